// SPDX-License-Identifier: GPL-3.0-or-later
use anyhow::Context as _;
use image::RgbImage;
use minifb::{MouseButton, Window, WindowOptions};
use tracing::debug;

use crate::camera::{SENSOR_HEIGHT, SENSOR_WIDTH};

/// Fixed resolution used when taking over the whole screen.
const FULLSCREEN_WIDTH: usize = 1920;
const FULLSCREEN_HEIGHT: usize = 1080;

/// How much to scale the sensor grid by when running in a window.
const WINDOW_SCALING_FACTOR: usize = 50;

/// Whether the surface covers the screen or sits in a normal window.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum SurfaceMode {
    Fullscreen,
    Windowed,
}

/// The operations the render loop needs from a display surface.
pub(crate) trait PresentationSink {
    /// The surface size in pixels. Authoritative for the upsampler every cycle.
    fn dimensions(&self) -> (u32, u32);

    /// Hand a full-surface image to the display and flush it.
    fn present(&mut self, image: &RgbImage) -> anyhow::Result<()>;

    /// Non-blocking check for the termination signal, polled once per cycle.
    fn exit_requested(&mut self) -> bool;
}

/// A minifb window acting as the presentation surface.
///
/// "Fullscreen" is a borderless window at a fixed resolution; minifb has no exclusive
/// fullscreen mode. The user exits by clicking anywhere in the window (or closing it).
pub(crate) struct MiniFbDisplay {
    window: Window,
    buffer: Vec<u32>,
    width: usize,
    height: usize,
}

impl MiniFbDisplay {
    pub(crate) fn open(mode: SurfaceMode) -> anyhow::Result<Self> {
        let (width, height, options) = match mode {
            SurfaceMode::Fullscreen => (
                FULLSCREEN_WIDTH,
                FULLSCREEN_HEIGHT,
                WindowOptions {
                    borderless: true,
                    title: false,
                    ..WindowOptions::default()
                },
            ),
            SurfaceMode::Windowed => (
                SENSOR_WIDTH as usize * WINDOW_SCALING_FACTOR,
                SENSOR_HEIGHT as usize * WINDOW_SCALING_FACTOR,
                WindowOptions::default(),
            ),
        };
        let mut window = Window::new("thermview", width, height, options)
            .context("Unable to create display window")?;
        // The sensor paces the loop; minifb shouldn't throttle it further.
        window.set_target_fps(0);
        debug!(width, height, ?mode, "Created display surface");
        let mut display = Self {
            window,
            buffer: vec![0; width * height],
            width,
            height,
        };
        display.clear()?;
        Ok(display)
    }

    /// Present a black frame so the surface doesn't sit on desktop contents until the sensor
    /// delivers its first frame.
    fn clear(&mut self) -> anyhow::Result<()> {
        for value in self.buffer.iter_mut() {
            *value = 0;
        }
        self.window
            .update_with_buffer(&self.buffer, self.width, self.height)
            .context("Error clearing display")
    }
}

impl PresentationSink for MiniFbDisplay {
    fn dimensions(&self) -> (u32, u32) {
        (self.width as u32, self.height as u32)
    }

    fn present(&mut self, image: &RgbImage) -> anyhow::Result<()> {
        anyhow::ensure!(
            (image.width() as usize, image.height() as usize) == (self.width, self.height),
            "Rendered image is {}x{} but the surface is {}x{}",
            image.width(),
            image.height(),
            self.width,
            self.height
        );
        for (value, pixel) in self.buffer.iter_mut().zip(image.pixels()) {
            let [red, green, blue] = pixel.0;
            *value = (u32::from(red) << 16) | (u32::from(green) << 8) | u32::from(blue);
        }
        self.window
            .update_with_buffer(&self.buffer, self.width, self.height)
            .context("Error presenting frame")
    }

    fn exit_requested(&mut self) -> bool {
        !self.window.is_open() || self.window.get_mouse_down(MouseButton::Left)
    }
}
