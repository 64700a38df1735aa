// SPDX-License-Identifier: GPL-3.0-or-later
use std::error::Error as StdError;
use std::fmt;

mod mlx;

pub(crate) use mlx::Mlx90640Source;

/// Sensor grid dimensions for the MLX90640.
pub(crate) const SENSOR_WIDTH: u32 = 32;
pub(crate) const SENSOR_HEIGHT: u32 = 24;

/// One frame of temperatures in Celsius, row-major over the sensor grid.
pub(crate) type ThermalFrame = image::ImageBuffer<image::Luma<f32>, Vec<f32>>;

/// The operations the render loop needs from a camera.
pub(crate) trait FrameSource {
    /// Block until the next complete frame is available.
    fn next_frame(&mut self) -> Result<ThermalFrame, FrameError>;
}

/// Frame acquisition errors, split by whether retrying can help.
#[derive(Debug)]
pub(crate) enum FrameError {
    /// An expected, recoverable sensor glitch. The caller should drop the cycle and retry.
    Transient(anyhow::Error),

    /// Anything a retry will not fix.
    Fatal(anyhow::Error),
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::Transient(err) => write!(f, "transient camera error: {}", err),
            FrameError::Fatal(err) => write!(f, "camera failure: {}", err),
        }
    }
}

impl StdError for FrameError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            FrameError::Transient(err) | FrameError::Fatal(err) => Some(err.as_ref()),
        }
    }
}
