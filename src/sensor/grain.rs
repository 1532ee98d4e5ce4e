//! Pixel-level grain: additive Gaussian noise, photon shot noise, and
//! impulse (salt/pepper) flips.

use ndarray::Array3;
use rand::Rng;
use rand_distr::{Distribution, Normal, Poisson};

use crate::error::NoiseError;
use crate::image_proc::{self, CHANNELS};
use crate::params::Parameter;

/// Above this expected count the Poisson draw switches to its Normal
/// approximation, which is faster and numerically stable.
const POISSON_NORMAL_CROSSOVER: f32 = 20.0;

/// Adds zero-mean Gaussian read noise of standard deviation `sigma` to every
/// sample, then clips to `[0, 1]`.
///
/// A sampled `sigma` of exactly zero returns the input unchanged, bit for
/// bit, so a zero-strength configuration entry is a true no-op.
///
/// # Errors
///
/// Returns [`NoiseError::ShapeMismatch`] for a non-`(H, W, 3)` input and
/// [`NoiseError::InvalidParameter`] unless the whole `sigma` span is finite
/// and non-negative.
pub fn dark_noise<R: Rng + ?Sized>(
    image: &Array3<f32>,
    sigma: &Parameter,
    rng: &mut R,
) -> Result<Array3<f32>, NoiseError> {
    image_proc::validate(image)?;
    sigma.require_within("sigma", 0.0, f32::MAX, "must be finite and >= 0")?;
    let sigma = sigma.sample(rng);

    if sigma == 0.0 {
        return Ok(image.clone());
    }

    let normal = Normal::new(0.0f32, sigma).expect("sigma is finite and positive");
    let mut output = image.clone();
    output.mapv_inplace(|value| value + normal.sample(&mut *rng));
    image_proc::clip(&mut output);
    Ok(output)
}

/// Applies signal-dependent photon shot noise.
///
/// Each sample `v` is treated as an expected photon count `v * lambda_scale`,
/// a Poisson draw replaces the count, and the result is divided back into
/// `[0, 1]`. Larger `lambda_scale` means more photons and therefore less
/// relative noise; bright pixels fluctuate more than dark ones in absolute
/// terms, which is what distinguishes shot noise from [`dark_noise`]. Zero
/// samples stay exactly zero.
///
/// Expected counts above [`POISSON_NORMAL_CROSSOVER`] use the Gaussian
/// approximation `Normal(mean, sqrt(mean))`, floored at zero.
///
/// # Errors
///
/// Returns [`NoiseError::ShapeMismatch`] for a non-`(H, W, 3)` input and
/// [`NoiseError::InvalidParameter`] unless the whole `lambda_scale` span is
/// finite and strictly positive.
pub fn shot_noise<R: Rng + ?Sized>(
    image: &Array3<f32>,
    lambda_scale: &Parameter,
    rng: &mut R,
) -> Result<Array3<f32>, NoiseError> {
    image_proc::validate(image)?;
    lambda_scale.require_positive("lambda_scale")?;
    let scale = lambda_scale.sample(rng);

    let mut output = image.clone();
    output.mapv_inplace(|value| {
        let mean = value * scale;
        if mean > 0.0 {
            let counts = if mean < POISSON_NORMAL_CROSSOVER {
                let poisson = Poisson::new(mean).expect("Poisson parameter is positive");
                poisson.sample(&mut *rng)
            } else {
                let normal =
                    Normal::new(mean, mean.sqrt()).expect("Normal parameters are positive");
                normal.sample(&mut *rng).max(0.0)
            };
            counts / scale
        } else {
            // No expected photons, no noise.
            0.0
        }
    });
    image_proc::clip(&mut output);
    Ok(output)
}

/// Flips each pixel to full white or full black with probability
/// `flip_probability`, half of the flips going each way.
///
/// Flips act on whole pixels: all three channels of a flipped pixel take the
/// same extreme, the way a stuck photosite reads out. Unflipped pixels pass
/// through untouched, so `flip_probability = 0` returns the input bit for
/// bit.
///
/// # Errors
///
/// Returns [`NoiseError::ShapeMismatch`] for a non-`(H, W, 3)` input and
/// [`NoiseError::InvalidParameter`] unless the whole `flip_probability` span
/// lies in `[0, 1]`.
pub fn salt_and_pepper<R: Rng + ?Sized>(
    image: &Array3<f32>,
    flip_probability: &Parameter,
    rng: &mut R,
) -> Result<Array3<f32>, NoiseError> {
    image_proc::validate(image)?;
    flip_probability.require_within(
        "flip_probability",
        0.0,
        1.0,
        "probability must lie in [0, 1]",
    )?;
    let probability = flip_probability.sample(rng);
    Ok(impulse_flips(image, probability, 0.5, rng))
}

/// Like [`salt_and_pepper`], but every flipped pixel goes to black.
///
/// Models dead photosites. On infrared captures the bright salt speckles of
/// [`salt_and_pepper`] read as implausible hot pixels, so the dark-only
/// variant is the better fit there.
///
/// # Errors
///
/// Same as [`salt_and_pepper`].
pub fn pepper<R: Rng + ?Sized>(
    image: &Array3<f32>,
    flip_probability: &Parameter,
    rng: &mut R,
) -> Result<Array3<f32>, NoiseError> {
    image_proc::validate(image)?;
    flip_probability.require_within(
        "flip_probability",
        0.0,
        1.0,
        "probability must lie in [0, 1]",
    )?;
    let probability = flip_probability.sample(rng);
    Ok(impulse_flips(image, probability, 0.0, rng))
}

/// Shared impulse core: flips whole pixels to an extreme with the given
/// probability; `salt_probability` picks white over black per flip.
fn impulse_flips<R: Rng + ?Sized>(
    image: &Array3<f32>,
    flip_probability: f32,
    salt_probability: f64,
    rng: &mut R,
) -> Array3<f32> {
    let (height, width, _) = image.dim();
    let mut output = image.clone();

    for row in 0..height {
        for col in 0..width {
            if rng.gen_bool(f64::from(flip_probability)) {
                // Short-circuit keeps the pepper-only path to one draw per flip.
                let extreme = if salt_probability > 0.0 && rng.gen_bool(salt_probability) {
                    1.0
                } else {
                    0.0
                };
                for channel in 0..CHANNELS {
                    output[[row, col, channel]] = extreme;
                }
            }
        }
    }

    output
}
