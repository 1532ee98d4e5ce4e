//! Canonical image representation and format conversions.
//!
//! Every noise operation works on the same in-memory form: an
//! `Array3<f32>` of shape `(height, width, 3)` with samples in `[0, 1]`,
//! RGB channel order, row-major. Integer pixel formats exist only at the
//! I/O boundary; conversions to and from the [`image`] crate types live
//! here so the operations themselves never see a `u8`.

use image::{Rgb, RgbImage};
use ndarray::Array3;

use crate::error::NoiseError;

/// Channel count of the canonical representation.
pub const CHANNELS: usize = 3;

/// Checks that `image` is a non-empty `(height, width, 3)` array.
///
/// Returns the `(height, width)` pair so callers validate and destructure in
/// one step. Sample values are not range-checked; operations clip their own
/// output instead.
pub fn validate(image: &Array3<f32>) -> Result<(usize, usize), NoiseError> {
    let (height, width, channels) = image.dim();
    if height == 0 || width == 0 || channels != CHANNELS {
        return Err(NoiseError::ShapeMismatch {
            height,
            width,
            channels,
        });
    }
    Ok((height, width))
}

/// Clamps every sample into `[0, 1]` in place.
pub fn clip(image: &mut Array3<f32>) {
    image.mapv_inplace(|v| v.clamp(0.0, 1.0));
}

/// Converts an 8-bit RGB image to the canonical float array.
///
/// Each sample maps to `value / 255`, so 0 becomes 0.0 and 255 becomes 1.0.
pub fn from_rgb(image: &RgbImage) -> Array3<f32> {
    let (width, height) = image.dimensions();
    Array3::from_shape_fn(
        (height as usize, width as usize, CHANNELS),
        |(row, col, channel)| f32::from(image.get_pixel(col as u32, row as u32)[channel]) / 255.0,
    )
}

/// Converts a canonical float array back to an 8-bit RGB image.
///
/// Samples map through `round(value * 255)` clamped to `[0, 255]`, which
/// makes `from_rgb` followed by `to_rgb` exact for every 8-bit level.
///
/// # Errors
///
/// Returns [`NoiseError::ShapeMismatch`] if the array is not `(H, W, 3)`.
pub fn to_rgb(image: &Array3<f32>) -> Result<RgbImage, NoiseError> {
    let (height, width) = validate(image)?;
    let mut out = RgbImage::new(width as u32, height as u32);
    for row in 0..height {
        for col in 0..width {
            let pixel = Rgb([
                quantize(image[[row, col, 0]]),
                quantize(image[[row, col, 1]]),
                quantize(image[[row, col, 2]]),
            ]);
            out.put_pixel(col as u32, row as u32, pixel);
        }
    }
    Ok(out)
}

/// Collapses an RGB array to its Rec. 601 luma, replicated across all three
/// channels.
///
/// Face datasets mix visible-light and infrared captures; infrared frames
/// carry no chroma, and this is the canonical-form equivalent of loading
/// such a frame. The result still satisfies the `(H, W, 3)` contract so the
/// noise operations need no grayscale special case.
pub fn to_infrared(image: &Array3<f32>) -> Result<Array3<f32>, NoiseError> {
    let (height, width) = validate(image)?;
    Ok(Array3::from_shape_fn(
        (height, width, CHANNELS),
        |(row, col, _)| {
            0.299 * image[[row, col, 0]]
                + 0.587 * image[[row, col, 1]]
                + 0.114 * image[[row, col, 2]]
        },
    ))
}

fn quantize(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}
