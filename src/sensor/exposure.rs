//! Global exposure errors.
//!
//! Auto-exposure that metered on the wrong thing produces a frame that is
//! uniformly too dark or blown out. Both directions are a plain gain
//! applied to every sample, followed by the usual clip, so over-exposure
//! crushes highlights into saturation the way a real sensor does rather
//! than rescaling them.

use ndarray::Array3;
use rand::Rng;

use crate::error::NoiseError;
use crate::image_proc;
use crate::params::Parameter;

/// Darkens the whole frame by the gain `factor`.
///
/// A factor of 1 leaves the image unchanged and 0 produces a black frame;
/// values in between compress the histogram toward zero.
///
/// # Errors
///
/// Returns [`NoiseError::ShapeMismatch`] for a non-`(H, W, 3)` input and
/// [`NoiseError::InvalidParameter`] unless the whole `factor` span lies in
/// `[0, 1]`.
pub fn under_expose<R: Rng + ?Sized>(
    image: &Array3<f32>,
    factor: &Parameter,
    rng: &mut R,
) -> Result<Array3<f32>, NoiseError> {
    image_proc::validate(image)?;
    factor.require_within("factor", 0.0, 1.0, "under-exposure gain must lie in [0, 1]")?;
    let gain = factor.sample(rng);

    let mut output = image.mapv(|value| value * gain);
    image_proc::clip(&mut output);
    Ok(output)
}

/// Brightens the whole frame by the gain `factor`, saturating highlights.
///
/// Any sample whose boosted value passes 1.0 clips to full white, so a
/// strong factor flattens bright regions into a single blown-out level.
///
/// # Errors
///
/// Returns [`NoiseError::ShapeMismatch`] for a non-`(H, W, 3)` input and
/// [`NoiseError::InvalidParameter`] unless the whole `factor` span is
/// finite and at least 1.
pub fn over_expose<R: Rng + ?Sized>(
    image: &Array3<f32>,
    factor: &Parameter,
    rng: &mut R,
) -> Result<Array3<f32>, NoiseError> {
    image_proc::validate(image)?;
    factor.require_within("factor", 1.0, f32::MAX, "over-exposure gain must be >= 1")?;
    let gain = factor.sample(rng);

    let mut output = image.mapv(|value| value * gain);
    image_proc::clip(&mut output);
    Ok(output)
}
