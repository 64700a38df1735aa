// SPDX-License-Identifier: GPL-3.0-or-later
use itertools::Itertools;

use crate::camera::ThermalFrame;

/// A frame's worth of gradient table indices, along with the extremes of the scan.
///
/// `indices` is row-major, matching the source frame, and every value is within the table
/// depth the frame was normalized against.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct IndexedFrame {
    pub(crate) indices: Vec<usize>,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) min: f32,
    pub(crate) max: f32,
}

/// Map a frame of temperatures onto gradient table indices.
///
/// The scale runs from the coldest to the hottest sample of *this* frame, so the full color
/// range always spans the current scene. A uniformly warm frame still gets full contrast;
/// what changes frame to frame is which temperature each color means, and the min/max carried
/// in the result is what makes that legible on screen.
///
/// A frame where every sample is identical has no range to scale over and maps entirely to
/// the lowest index. NaN samples are skipped during the scan and also land on the lowest
/// index; anything else out of range (including infinities) is clamped.
pub(crate) fn normalize(frame: &ThermalFrame, depth: usize) -> IndexedFrame {
    let (min, max) = frame
        .iter()
        .copied()
        .filter(|sample| !sample.is_nan())
        .minmax()
        .into_option()
        .unwrap_or((0.0, 0.0));
    let top = (depth - 1) as f32;
    let range = max - min;
    let indices = frame
        .iter()
        .map(|sample| {
            if range > 0.0 {
                ((sample - min) * top / range).clamp(0.0, top) as usize
            } else {
                0
            }
        })
        .collect();
    IndexedFrame {
        indices,
        width: frame.width(),
        height: frame.height(),
        min,
        max,
    }
}

#[cfg(test)]
mod test {
    use float_cmp::{approx_eq, F32Margin};

    use super::normalize;
    use crate::camera::{ThermalFrame, SENSOR_HEIGHT, SENSOR_WIDTH};

    const DEPTH: usize = 1000;

    fn frame_from(samples: Vec<f32>) -> ThermalFrame {
        ThermalFrame::from_raw(SENSOR_WIDTH, SENSOR_HEIGHT, samples)
            .expect("sample count matches the sensor dimensions")
    }

    fn ramp() -> ThermalFrame {
        let count = (SENSOR_WIDTH * SENSOR_HEIGHT) as usize;
        frame_from(
            (0..count)
                .map(|i| 20.0 + 15.0 * i as f32 / (count - 1) as f32)
                .collect(),
        )
    }

    #[test]
    fn full_range() {
        let indexed = normalize(&ramp(), DEPTH);
        assert_eq!(indexed.indices.first(), Some(&0));
        assert_eq!(indexed.indices.last(), Some(&(DEPTH - 1)));
        assert!(approx_eq!(f32, indexed.min, 20.0, F32Margin::default()));
        assert!(approx_eq!(f32, indexed.max, 35.0, F32Margin::default()));
    }

    #[test]
    fn indices_always_in_range() {
        let count = (SENSOR_WIDTH * SENSOR_HEIGHT) as usize;
        let mut samples = vec![21.25; count];
        samples[0] = -1.0e30;
        samples[1] = 1.0e30;
        samples[2] = f32::NEG_INFINITY;
        samples[3] = f32::INFINITY;
        samples[4] = f32::NAN;
        let indexed = normalize(&frame_from(samples), DEPTH);
        assert!(indexed.indices.iter().all(|index| *index < DEPTH));
    }

    /// A flat frame has no range to scale over; everything lands on the lowest index rather
    /// than dividing by zero.
    #[test]
    fn degenerate_uniform_frame() {
        let count = (SENSOR_WIDTH * SENSOR_HEIGHT) as usize;
        let indexed = normalize(&frame_from(vec![27.5; count]), DEPTH);
        assert!(indexed.indices.iter().all(|index| *index == 0));
        assert_eq!(indexed.min, indexed.max);
    }

    #[test]
    fn all_nan_degenerates() {
        let count = (SENSOR_WIDTH * SENSOR_HEIGHT) as usize;
        let indexed = normalize(&frame_from(vec![f32::NAN; count]), DEPTH);
        assert!(indexed.indices.iter().all(|index| *index == 0));
    }

    #[test]
    fn nan_skipped_in_scan() {
        let count = (SENSOR_WIDTH * SENSOR_HEIGHT) as usize;
        let mut samples = vec![22.0; count];
        samples[10] = f32::NAN;
        samples[20] = 19.0;
        samples[30] = 31.0;
        let indexed = normalize(&frame_from(samples), DEPTH);
        assert!(approx_eq!(f32, indexed.min, 19.0, F32Margin::default()));
        assert!(approx_eq!(f32, indexed.max, 31.0, F32Margin::default()));
        assert_eq!(indexed.indices[10], 0);
    }

    /// Increasing samples never map to decreasing indices; the end-to-end ramp test relies
    /// on this.
    #[test]
    fn monotone_samples_monotone_indices() {
        let indexed = normalize(&ramp(), DEPTH);
        assert!(indexed
            .indices
            .windows(2)
            .all(|pair| pair[0] <= pair[1]));
    }
}
