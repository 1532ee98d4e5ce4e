//! Edge streaks and crossing pipes.
//!
//! Larger structured occlusions: light spilling in over the top of the
//! frame, a shadow creeping up from the bottom, or an out-of-focus linear
//! obstruction (a cable, a railing edge) laid across the face. All are
//! feathered bands; streaks hang off a frame edge while pipes cross the
//! full width at a random height.

use ndarray::Array3;
use rand::Rng;

use crate::environment::{mask, overlay};
use crate::error::NoiseError;
use crate::image_proc;
use crate::params::{self, Parameter};

/// Brightens a band hanging from the top edge of the frame.
///
/// `width` is the band depth in rows; it is drawn once per side, so a range
/// parameter produces a slanted lower boundary while a fixed value gives a
/// straight one. Rows beyond the deeper side are returned bit-identical.
///
/// # Errors
///
/// Returns [`NoiseError::ShapeMismatch`] for a non-`(H, W, 3)` input and
/// [`NoiseError::InvalidParameter`] unless `width` is finite and
/// non-negative and `intensity` lies in `[0, 1]` over their whole spans.
pub fn streak_source<R: Rng + ?Sized>(
    image: &Array3<f32>,
    width: &Parameter,
    intensity: &Parameter,
    rng: &mut R,
) -> Result<Array3<f32>, NoiseError> {
    let (height, image_width) = image_proc::validate(image)?;
    width.require_within("width", 0.0, f32::MAX, "must be finite and >= 0")?;
    intensity.require_within("intensity", 0.0, 1.0, "must lie in [0, 1]")?;

    let depth_left = width.sample(rng);
    let depth_right = width.sample(rng);
    let intensity = intensity.sample(rng);

    let footprint = mask::top_band(height, image_width, depth_left, depth_right);
    Ok(overlay::brighten(image, &footprint, intensity))
}

/// Darkens a band rising from the bottom edge of the frame; shadow
/// counterpart of [`streak_source`].
///
/// # Errors
///
/// Same domains as [`streak_source`], with `darkness` in place of
/// `intensity`.
pub fn streak_shadow<R: Rng + ?Sized>(
    image: &Array3<f32>,
    width: &Parameter,
    darkness: &Parameter,
    rng: &mut R,
) -> Result<Array3<f32>, NoiseError> {
    let (height, image_width) = image_proc::validate(image)?;
    width.require_within("width", 0.0, f32::MAX, "must be finite and >= 0")?;
    darkness.require_within("darkness", 0.0, 1.0, "must lie in [0, 1]")?;

    let depth_left = width.sample(rng);
    let depth_right = width.sample(rng);
    let darkness = darkness.sample(rng);

    let footprint = mask::bottom_band(height, image_width, depth_left, depth_right);
    Ok(overlay::darken(image, &footprint, darkness))
}

/// Brightens a band of the given `width` (rows thick) crossing the full
/// frame at a random height.
///
/// The centerline anchors at an independently drawn row on each side, so
/// the band usually tilts. Pixels farther than half the width from the
/// centerline are returned bit-identical.
///
/// # Errors
///
/// Same domains as [`streak_source`].
pub fn pipe_source<R: Rng + ?Sized>(
    image: &Array3<f32>,
    width: &Parameter,
    intensity: &Parameter,
    rng: &mut R,
) -> Result<Array3<f32>, NoiseError> {
    let (height, image_width) = image_proc::validate(image)?;
    width.require_within("width", 0.0, f32::MAX, "must be finite and >= 0")?;
    intensity.require_within("intensity", 0.0, 1.0, "must lie in [0, 1]")?;

    let thickness = width.sample(rng);
    let intensity = intensity.sample(rng);
    let center_left = params::sample_position(height, rng);
    let center_right = params::sample_position(height, rng);

    let footprint = mask::cross_band(height, image_width, center_left, center_right, thickness);
    Ok(overlay::brighten(image, &footprint, intensity))
}

/// Darkens a crossing band; shadow counterpart of [`pipe_source`].
///
/// # Errors
///
/// Same domains as [`streak_shadow`].
pub fn pipe_shadow<R: Rng + ?Sized>(
    image: &Array3<f32>,
    width: &Parameter,
    darkness: &Parameter,
    rng: &mut R,
) -> Result<Array3<f32>, NoiseError> {
    let (height, image_width) = image_proc::validate(image)?;
    width.require_within("width", 0.0, f32::MAX, "must be finite and >= 0")?;
    darkness.require_within("darkness", 0.0, 1.0, "must lie in [0, 1]")?;

    let thickness = width.sample(rng);
    let darkness = darkness.sample(rng);
    let center_left = params::sample_position(height, rng);
    let center_right = params::sample_position(height, rng);

    let footprint = mask::cross_band(height, image_width, center_left, center_right, thickness);
    Ok(overlay::darken(image, &footprint, darkness))
}
