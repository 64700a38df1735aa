// SPDX-License-Identifier: GPL-3.0-or-later
use structopt::StructOpt;

/// The entire command line surface: two toggles, nothing else. Everything else about the
/// viewer is fixed configuration.
#[derive(Clone, Copy, Debug, StructOpt)]
#[structopt(about = "Full-screen real-time viewer for MLX90640 thermal cameras.")]
pub(crate) struct Args {
    /// Display in a window instead of taking over the whole screen.
    #[structopt(short, long)]
    pub(crate) windowed: bool,

    /// Disable interpolation in-between camera pixels.
    #[structopt(long)]
    pub(crate) disable_interpolation: bool,
}
