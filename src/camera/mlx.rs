// SPDX-License-Identifier: GPL-3.0-or-later
use std::convert::TryFrom;
use std::thread;
use std::time::Duration;

use anyhow::Context as _;
use linux_embedded_hal::I2cdev;
use mlx9064x::Mlx90640Driver;
use tracing::{debug, info};

use super::{FrameError, FrameSource, ThermalFrame};

/// I2C device node the sensor hangs off of. The bus needs to be clocked at 1MHz for the
/// higher refresh rates to keep up.
const I2C_BUS: &str = "/dev/i2c-1";

/// Factory-default MLX90640 address.
const CAMERA_ADDRESS: u8 = 0x33;

/// Sensor refresh rate in frames per second.
const FRAME_RATE: u8 = 16;

/// How long to sleep between readiness checks while waiting on the sensor.
const POLL_INTERVAL: Duration = Duration::from_millis(2);

/// An MLX90640 on the system I2C bus.
pub(crate) struct Mlx90640Source {
    camera: Mlx90640Driver<I2cdev>,
    scratch: Vec<f32>,
}

impl Mlx90640Source {
    pub(crate) fn open() -> anyhow::Result<Self> {
        let bus = I2cdev::new(I2C_BUS)
            .with_context(|| format!("Unable to open I2C bus {}", I2C_BUS))?;
        let mut camera = Mlx90640Driver::new(bus, CAMERA_ADDRESS)
            .context("Unable to initialize MLX90640 camera")?;
        let frame_rate = mlx9064x::FrameRate::try_from(FRAME_RATE).context("Invalid frame rate")?;
        camera
            .set_frame_rate(frame_rate)
            .context("Error setting camera frame rate")?;
        info!(
            bus = I2C_BUS,
            address = CAMERA_ADDRESS,
            frame_rate = FRAME_RATE,
            "MLX90640 detected"
        );
        let scratch = vec![0f32; camera.height() * camera.width()];
        Ok(Self { camera, scratch })
    }
}

impl FrameSource for Mlx90640Source {
    fn next_frame(&mut self) -> Result<ThermalFrame, FrameError> {
        loop {
            match self.camera.generate_image_if_ready(&mut self.scratch) {
                Ok(true) => break,
                Ok(false) => thread::sleep(POLL_INTERVAL),
                // Glitches on the wire happen with these sensors; the loop retries.
                Err(error) => {
                    debug!(%error, "MLX90640 read failed");
                    return Err(FrameError::Transient(error.into()));
                }
            }
        }
        let width = self.camera.width() as u32;
        let height = self.camera.height() as u32;
        ThermalFrame::from_raw(width, height, self.scratch.clone()).ok_or_else(|| {
            FrameError::Fatal(anyhow::anyhow!(
                "Camera produced a buffer that doesn't match its own dimensions"
            ))
        })
    }
}
