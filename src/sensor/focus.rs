//! Defocus blur.
//!
//! Models a lens that missed focus on the subject: a Gaussian point spread
//! applied uniformly over the frame. The Gaussian is separable, so the blur
//! runs as a horizontal then a vertical 1-D pass instead of a full 2-D
//! convolution.

use ndarray::Array3;
use rand::Rng;

use crate::error::NoiseError;
use crate::image_proc::{self, CHANNELS};
use crate::params::Parameter;

/// Truncation radius of the discrete Gaussian, in standard deviations.
/// Taps beyond this carry under 0.05% of the kernel mass.
const KERNEL_TRUNCATE: f32 = 3.5;

/// Blurs the image with a Gaussian point spread of standard deviation
/// `kernel_extent` (in pixels).
///
/// Borders are handled by mirroring the image at its edges, so frame
/// brightness is preserved; no dark vignette creeps in from the outside.
/// Output samples are clipped to `[0, 1]`.
///
/// # Errors
///
/// Returns [`NoiseError::ShapeMismatch`] for a non-`(H, W, 3)` input and
/// [`NoiseError::InvalidParameter`] unless the whole `kernel_extent` span is
/// finite and strictly positive.
pub fn poor_focus<R: Rng + ?Sized>(
    image: &Array3<f32>,
    kernel_extent: &Parameter,
    rng: &mut R,
) -> Result<Array3<f32>, NoiseError> {
    let (height, width) = image_proc::validate(image)?;
    kernel_extent.require_positive("kernel_extent")?;
    let sigma = kernel_extent.sample(rng);

    let taps = gaussian_taps(sigma, height.max(width));
    let radius = taps.len() as isize / 2;

    // Horizontal pass: blur along each row.
    let mut horizontal = Array3::<f32>::zeros(image.raw_dim());
    for row in 0..height {
        for col in 0..width {
            for channel in 0..CHANNELS {
                let mut sum = 0.0;
                for (tap, &weight) in taps.iter().enumerate() {
                    let source = reflect_index(col as isize + tap as isize - radius, width as isize);
                    sum += image[[row, source, channel]] * weight;
                }
                horizontal[[row, col, channel]] = sum;
            }
        }
    }

    // Vertical pass: blur along each column of the horizontal result.
    let mut output = Array3::<f32>::zeros(image.raw_dim());
    for row in 0..height {
        for col in 0..width {
            for channel in 0..CHANNELS {
                let mut sum = 0.0;
                for (tap, &weight) in taps.iter().enumerate() {
                    let source =
                        reflect_index(row as isize + tap as isize - radius, height as isize);
                    sum += horizontal[[source, col, channel]] * weight;
                }
                output[[row, col, channel]] = sum;
            }
        }
    }

    image_proc::clip(&mut output);
    Ok(output)
}

/// Builds normalized 1-D Gaussian taps for the given standard deviation.
///
/// The kernel spans `2 * ceil(KERNEL_TRUNCATE * sigma) + 1` taps, capped at
/// one mirror period of the image; taps past that fold back onto pixels the
/// kernel already covers.
fn gaussian_taps(sigma: f32, max_extent: usize) -> Vec<f32> {
    let denom = 2.0 * sigma * sigma;
    if denom == 0.0 {
        // Sub-normal sigma underflows the denominator; the kernel collapses
        // to an identity tap.
        return vec![1.0];
    }

    let radius = ((KERNEL_TRUNCATE * sigma).ceil() as usize).min(max_extent) as isize;

    let mut taps = Vec::with_capacity((2 * radius + 1) as usize);
    let mut sum = 0.0;
    for offset in -radius..=radius {
        let value = (-((offset * offset) as f32) / denom).exp();
        taps.push(value);
        sum += value;
    }

    if sum > 0.0 {
        for tap in &mut taps {
            *tap /= sum;
        }
    }

    taps
}

/// Mirrors an out-of-bounds index back into `[0, size)`.
fn reflect_index(idx: isize, size: isize) -> usize {
    let reflected = if idx < 0 {
        -idx - 1
    } else if idx >= size {
        2 * size - idx - 1
    } else {
        idx
    };
    // A kernel wider than the image can reflect past the far edge; clamp
    // rather than reflect again.
    reflected.clamp(0, size - 1) as usize
}
