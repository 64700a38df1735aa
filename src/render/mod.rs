// SPDX-License-Identifier: GPL-3.0-or-later
mod font;
pub(crate) mod gradient;
pub(crate) mod normalize;
pub(crate) mod overlay;
pub(crate) mod resize;

/// The full pipeline from raw samples to a presentable image, minus acquisition and
/// presentation, exercised the way the render loop drives it.
#[cfg(test)]
mod pipeline_test {
    use image::Rgb;

    use super::gradient::{GradientTable, COLOR_DEPTH, HEAT_STOPS};
    use super::normalize::normalize;
    use super::resize::{Method, Upsampler, INTERPOLATION_FACTOR};
    use crate::camera::{ThermalFrame, SENSOR_HEIGHT, SENSOR_WIDTH};

    fn close_enough(actual: &Rgb<u8>, expected: &Rgb<u8>) -> bool {
        actual
            .0
            .iter()
            .zip(expected.0.iter())
            .all(|(a, e)| (i16::from(*a) - i16::from(*e)).abs() <= 3)
    }

    #[test]
    fn linear_ramp_end_to_end() {
        let table = GradientTable::build(&HEAT_STOPS, COLOR_DEPTH).unwrap();
        let count = (SENSOR_WIDTH * SENSOR_HEIGHT) as usize;
        let samples: Vec<f32> = (0..count)
            .map(|i| 20.0 + 15.0 * i as f32 / (count - 1) as f32)
            .collect();
        let frame = ThermalFrame::from_raw(SENSOR_WIDTH, SENSOR_HEIGHT, samples).unwrap();

        let indexed = normalize(&frame, table.len());
        assert_eq!(indexed.indices[0], 0);
        assert_eq!(indexed.indices[count - 1], COLOR_DEPTH - 1);
        // The ramp must stay a ramp: colors vary monotonically along it.
        assert!(indexed.indices.windows(2).all(|pair| pair[0] <= pair[1]));

        let grid = table.colorize(&indexed);
        assert_eq!(*grid.get_pixel(0, 0), table.color(0));
        assert_eq!(
            *grid.get_pixel(SENSOR_WIDTH - 1, SENSOR_HEIGHT - 1),
            table.color(COLOR_DEPTH - 1)
        );

        let mut upsampler = Upsampler::new(Method::CatmullRom, INTERPOLATION_FACTOR);
        let image = upsampler.enlarge(&grid).unwrap();
        assert_eq!(image.dimensions(), (320, 240));
        // The corners of the smoothed image sit on the table's endpoint colors.
        assert!(
            close_enough(image.get_pixel(0, 0), &table.color(0)),
            "Cold corner {:?} strayed from {:?}",
            image.get_pixel(0, 0),
            table.color(0)
        );
        assert!(
            close_enough(image.get_pixel(319, 239), &table.color(COLOR_DEPTH - 1)),
            "Hot corner {:?} strayed from {:?}",
            image.get_pixel(319, 239),
            table.color(COLOR_DEPTH - 1)
        );
    }
}
