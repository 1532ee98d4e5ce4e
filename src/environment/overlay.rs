//! Mask compositing.
//!
//! The environment operations all reduce to the same step: add or subtract
//! a coverage-weighted amount of light. Compositing clamps each touched
//! sample into `[0, 1]` as it writes; samples under zero coverage are
//! copied through verbatim, never recomputed, so everything outside a
//! footprint stays bit-identical to the input.

use ndarray::{Array2, Array3};

use crate::image_proc::CHANNELS;

/// Adds `intensity * coverage` light wherever the mask covers.
pub fn brighten(image: &Array3<f32>, mask: &Array2<f32>, intensity: f32) -> Array3<f32> {
    composite(image, mask, intensity)
}

/// Removes `darkness * coverage` light wherever the mask covers.
pub fn darken(image: &Array3<f32>, mask: &Array2<f32>, darkness: f32) -> Array3<f32> {
    composite(image, mask, -darkness)
}

fn composite(image: &Array3<f32>, mask: &Array2<f32>, amount: f32) -> Array3<f32> {
    let (height, width, _) = image.dim();
    let mut output = image.clone();

    for row in 0..height {
        for col in 0..width {
            let coverage = mask[[row, col]];
            if coverage > 0.0 {
                let delta = amount * coverage;
                for channel in 0..CHANNELS {
                    let sample = output[[row, col, channel]] + delta;
                    output[[row, col, channel]] = sample.clamp(0.0, 1.0);
                }
            }
        }
    }

    output
}
