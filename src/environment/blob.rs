//! Compact light blobs and shadows.
//!
//! A stray reflection, a flashlight glare, a thumbprint on the lens: small
//! roughly circular patches that lift or drop the exposure locally. Each
//! application drops one feathered disc at a uniformly random spot; discs
//! that overhang the frame are simply clipped by it.

use ndarray::Array3;
use rand::Rng;

use crate::environment::{mask, overlay};
use crate::error::NoiseError;
use crate::image_proc;
use crate::params::{self, Parameter};

/// Brightens a random disc of the given `radius` (pixels) by `intensity`.
///
/// The disc center is drawn uniformly over the image plane. Pixels outside
/// the disc are returned bit-identical to the input; a zero radius
/// degenerates to a full no-op.
///
/// # Errors
///
/// Returns [`NoiseError::ShapeMismatch`] for a non-`(H, W, 3)` input and
/// [`NoiseError::InvalidParameter`] unless `radius` is finite and
/// non-negative and `intensity` lies in `[0, 1]` over their whole spans.
pub fn point_source<R: Rng + ?Sized>(
    image: &Array3<f32>,
    radius: &Parameter,
    intensity: &Parameter,
    rng: &mut R,
) -> Result<Array3<f32>, NoiseError> {
    let (height, width) = image_proc::validate(image)?;
    radius.require_within("radius", 0.0, f32::MAX, "must be finite and >= 0")?;
    intensity.require_within("intensity", 0.0, 1.0, "must lie in [0, 1]")?;

    let radius = radius.sample(rng);
    let intensity = intensity.sample(rng);
    let (center_row, center_col) = params::sample_center(height, width, rng);

    let footprint = mask::disc(height, width, center_row, center_col, radius);
    Ok(overlay::brighten(image, &footprint, intensity))
}

/// Darkens a random disc of the given `radius` (pixels) by `darkness`;
/// shadow counterpart of [`point_source`].
///
/// # Errors
///
/// Same domains as [`point_source`], with `darkness` in place of
/// `intensity`.
pub fn point_shadow<R: Rng + ?Sized>(
    image: &Array3<f32>,
    radius: &Parameter,
    darkness: &Parameter,
    rng: &mut R,
) -> Result<Array3<f32>, NoiseError> {
    let (height, width) = image_proc::validate(image)?;
    radius.require_within("radius", 0.0, f32::MAX, "must be finite and >= 0")?;
    darkness.require_within("darkness", 0.0, 1.0, "must lie in [0, 1]")?;

    let radius = radius.sample(rng);
    let darkness = darkness.sample(rng);
    let (center_row, center_col) = params::sample_center(height, width, rng);

    let footprint = mask::disc(height, width, center_row, center_col, radius);
    Ok(overlay::darken(image, &footprint, darkness))
}
