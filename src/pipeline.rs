// SPDX-License-Identifier: GPL-3.0-or-later
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::camera::{FrameError, FrameSource};
use crate::display::PresentationSink;
use crate::render::gradient::GradientTable;
use crate::render::normalize::normalize;
use crate::render::overlay;
use crate::render::resize::Upsampler;

/// How many consecutive transient camera errors to retry quietly before escalating.
const QUIET_RETRIES: u32 = 32;

/// Delay between acquisition attempts once escalated, so a wedged sensor doesn't spin the
/// CPU at full speed.
const RETRY_BACKOFF: Duration = Duration::from_millis(50);

/// The per-frame render loop: everything between sensor samples and pixels on screen.
///
/// Single-threaded and blocking. One frame is in flight at a time, owned by the current
/// iteration; the gradient table is the only state shared across cycles and is read-only.
/// The loop paces itself off the sensor's refresh rate and runs until the display reports
/// the termination signal.
pub(crate) struct Pipeline<C, D> {
    camera: C,
    display: D,
    table: GradientTable,
    upsampler: Upsampler,
}

impl<C, D> Pipeline<C, D>
where
    C: FrameSource,
    D: PresentationSink,
{
    pub(crate) fn new(camera: C, display: D, table: GradientTable, upsampler: Upsampler) -> Self {
        Self {
            camera,
            display,
            table,
            upsampler,
        }
    }

    /// Run until the user asks to exit or a fatal error surfaces.
    ///
    /// Transient acquisition errors drop the cycle and retry immediately; the previous image
    /// just stays on screen one cycle longer. After [`QUIET_RETRIES`] consecutive misses the
    /// loop logs a warning and backs off between attempts, but it never gives up on the
    /// sensor.
    pub(crate) fn run(mut self) -> anyhow::Result<()> {
        let mut misses = 0u32;
        loop {
            if self.display.exit_requested() {
                debug!("Termination signal received");
                return Ok(());
            }
            let cycle_start = Instant::now();
            let frame = match self.camera.next_frame() {
                Ok(frame) => frame,
                Err(FrameError::Transient(error)) => {
                    misses += 1;
                    debug!(consecutive = misses, %error, "Dropped cycle on camera glitch");
                    if misses >= QUIET_RETRIES {
                        if misses % QUIET_RETRIES == 0 {
                            warn!(
                                consecutive = misses,
                                "Camera has not produced a frame recently, still retrying"
                            );
                        }
                        thread::sleep(RETRY_BACKOFF);
                    }
                    continue;
                }
                Err(error @ FrameError::Fatal(_)) => return Err(error.into()),
            };
            misses = 0;
            let acquire_time = cycle_start.elapsed();

            let indexed = normalize(&frame, self.table.len());
            let grid = self.table.colorize(&indexed);
            let surface = self.display.dimensions();
            let mut image = self.upsampler.upsample(&grid, surface)?;
            overlay::composite(&mut image, indexed.min, indexed.max);
            self.display.present(&image)?;

            let cycle_time = cycle_start.elapsed();
            debug!(
                min = %indexed.min,
                max = %indexed.max,
                acquire_ms = acquire_time.as_millis() as u64,
                cycle_ms = cycle_time.as_millis() as u64,
                "Presented frame"
            );
        }
    }
}
