// SPDX-License-Identifier: GPL-3.0-or-later
use image::{GrayImage, Rgb, RgbImage};

use super::font;

/// Dimensions of the shaded band behind the readout.
const BAND_WIDTH: u32 = 500;
const BAND_HEIGHT: u32 = 60;

/// Offset of the band's top edge from the bottom of the surface.
const BOTTOM_OFFSET: u32 = 80;

const BAND_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Opacity of the band, out of 255.
const BAND_OPACITY: u32 = 128;

const TEXT_COLOR: Rgb<u8> = Rgb([255, 255, 0]);

/// Scale bringing the 7-row glyphs up to a size readable from across a room.
const TEXT_SCALE: u32 = 8;

/// Composite the min/max readout over the bottom-left corner of a rendered frame.
///
/// A half-transparent band is blended first so the text stays readable whatever the thermal
/// image underneath looks like, then the temperatures are drawn over it, rounded to whole
/// degrees.
pub(crate) fn composite(image: &mut RgbImage, min: f32, max: f32) {
    let top = image.height().saturating_sub(BOTTOM_OFFSET);
    shade_band(image, top);
    let text = format!("Min: {:.0}, Max: {:.0}", min, max);
    draw_mask(image, &font::render_line(&text, TEXT_SCALE), top);
}

fn shade_band(image: &mut RgbImage, top: u32) {
    let bottom = (top + BAND_HEIGHT).min(image.height());
    let right = BAND_WIDTH.min(image.width());
    for y in top..bottom {
        for x in 0..right {
            let pixel = image.get_pixel_mut(x, y);
            for (channel, band) in pixel.0.iter_mut().zip(BAND_COLOR.0.iter()) {
                let blended = (u32::from(*band) * BAND_OPACITY
                    + u32::from(*channel) * (255 - BAND_OPACITY))
                    / 255;
                *channel = blended as u8;
            }
        }
    }
}

fn draw_mask(image: &mut RgbImage, mask: &GrayImage, top: u32) {
    for (x, y, coverage) in mask.enumerate_pixels() {
        if coverage.0[0] == 0 {
            continue;
        }
        if x >= image.width() || top + y >= image.height() {
            continue;
        }
        image.put_pixel(x, top + y, TEXT_COLOR);
    }
}
