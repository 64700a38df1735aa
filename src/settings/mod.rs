// SPDX-License-Identifier: GPL-3.0-or-later
mod cli;

pub(crate) use cli::Args;

use crate::display::SurfaceMode;
use crate::render::resize::Method;

impl From<&Args> for SurfaceMode {
    fn from(args: &Args) -> Self {
        if args.windowed {
            Self::Windowed
        } else {
            Self::Fullscreen
        }
    }
}

impl From<&Args> for Method {
    fn from(args: &Args) -> Self {
        if args.disable_interpolation {
            Self::Nearest
        } else {
            Self::CatmullRom
        }
    }
}
