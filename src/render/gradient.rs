// SPDX-License-Identifier: GPL-3.0-or-later
use image::{Rgb, RgbImage};

use super::normalize::IndexedFrame;

/// How many discrete colors a built [`GradientTable`] holds.
pub(crate) const COLOR_DEPTH: usize = 1000;

/// Tuning constant for the width of each color stop's basis bump. Larger values narrow the
/// bumps, giving each stop a more distinct band of the table.
const SPREAD: f32 = 1.0;

/// A control color anchoring the gradient at a position.
///
/// Positions are in `[0, 1]` over the whole table, channels in `[0, 1]`. Stops are listed in
/// position order for visual continuity, but nothing depends on the ordering.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ColorStop {
    pub(crate) position: f32,
    pub(crate) color: [f32; 3],
}

/// The default palette: black through blue, green, and red up to white-hot.
pub(crate) const HEAT_STOPS: [ColorStop; 7] = [
    ColorStop {
        position: 0.0,
        color: [0.0, 0.0, 0.0],
    },
    ColorStop {
        position: 0.20,
        color: [0.0, 0.0, 0.5],
    },
    ColorStop {
        position: 0.40,
        color: [0.0, 0.5, 0.0],
    },
    ColorStop {
        position: 0.60,
        color: [0.5, 0.0, 0.0],
    },
    ColorStop {
        position: 0.80,
        color: [0.75, 0.75, 0.0],
    },
    ColorStop {
        position: 0.90,
        color: [1.0, 0.75, 0.0],
    },
    ColorStop {
        position: 1.00,
        color: [1.0, 1.0, 1.0],
    },
];

/// A fixed-size color lookup table synthesized from a handful of control stops.
///
/// Each channel of each entry is the sum of one Gaussian bump per stop, centered on the stop's
/// position and scaled by the stop's channel value. Overlapping bumps blend adjacent colors
/// into each other without the stops needing to be sorted or evenly spaced. The summing is
/// done on raw channel values with no gamma correction; the palette was tuned against that
/// blending, so correcting it would change every color in the table.
///
/// Built once at startup and never mutated afterwards.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct GradientTable {
    entries: Vec<Rgb<u8>>,
}

impl GradientTable {
    pub(crate) fn build(stops: &[ColorStop], depth: usize) -> anyhow::Result<Self> {
        anyhow::ensure!(
            !stops.is_empty(),
            "A gradient needs at least one color stop"
        );
        anyhow::ensure!(depth > 0, "A gradient needs a non-zero color depth");
        let width = depth as f32;
        let basis_width = width / (SPREAD * stops.len() as f32);
        let entries = (0..depth)
            .map(|index| {
                let x = index as f32;
                let mut channels = [0f32; 3];
                for stop in stops {
                    let bump = gaussian(x, stop.position * width, basis_width);
                    for (channel, amplitude) in channels.iter_mut().zip(stop.color.iter()) {
                        *channel += amplitude * bump;
                    }
                }
                let mut entry = [0u8; 3];
                for (value, channel) in entry.iter_mut().zip(channels.iter()) {
                    *value = (channel * 255.0).clamp(0.0, 255.0) as u8;
                }
                Rgb(entry)
            })
            .collect();
        Ok(Self { entries })
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// The color at `index`. The index must be in range; the normalizer guarantees that for
    /// every index it produces.
    pub(crate) fn color(&self, index: usize) -> Rgb<u8> {
        self.entries[index]
    }

    /// Look up every cell of a normalized frame, producing the sensor-resolution color grid.
    pub(crate) fn colorize(&self, indexed: &IndexedFrame) -> RgbImage {
        let mut grid = RgbImage::new(indexed.width, indexed.height);
        for (pixel, index) in grid.pixels_mut().zip(indexed.indices.iter()) {
            *pixel = self.entries[*index];
        }
        grid
    }
}

fn gaussian(x: f32, center: f32, width: f32) -> f32 {
    (-(x - center).powi(2) / (2.0 * width * width)).exp()
}
