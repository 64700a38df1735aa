// SPDX-License-Identifier: GPL-3.0-or-later
use structopt::StructOpt;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod camera;
mod display;
mod pipeline;
mod render;
mod settings;

use crate::camera::Mlx90640Source;
use crate::display::{MiniFbDisplay, SurfaceMode};
use crate::pipeline::Pipeline;
use crate::render::gradient::{GradientTable, COLOR_DEPTH, HEAT_STOPS};
use crate::render::resize::{Method, Upsampler, INTERPOLATION_FACTOR};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = settings::Args::from_args();

    // Everything that outlives a single cycle is built here, once, and handed to the loop.
    let table = GradientTable::build(&HEAT_STOPS, COLOR_DEPTH)?;
    let camera = Mlx90640Source::open()?;
    let display = MiniFbDisplay::open(SurfaceMode::from(&args))?;
    let upsampler = Upsampler::new(Method::from(&args), INTERPOLATION_FACTOR);
    info!(
        windowed = args.windowed,
        interpolation = !args.disable_interpolation,
        "Starting render loop; click the window to exit"
    );

    Pipeline::new(camera, display, table, upsampler).run()
}
