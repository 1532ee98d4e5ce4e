//! Randomizable noise parameters.
//!
//! Every noise strength in this crate is a [`Parameter`]: either a fixed
//! value or a closed interval sampled uniformly each time an operation is
//! applied. Keeping the draw at application time means one configuration
//! fans out into a different concrete degradation per image, which is what
//! makes the output usable as training data.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::NoiseError;

/// A noise parameter that is either fixed or drawn from a range per call.
///
/// Serializes untagged, so a bare number is a fixed value and an object with
/// `min`/`max` keys is a sampling range:
///
/// ```json
/// 0.1
/// { "min": 0.05, "max": 0.2 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Parameter {
    /// The same value on every application.
    Fixed(f32),
    /// Uniformly distributed over `[min, max]`, redrawn on every application.
    Range { min: f32, max: f32 },
}

impl Parameter {
    /// Creates a fixed-value parameter.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::InvalidParameter`] if `value` is NaN or infinite.
    pub fn fixed(value: f32) -> Result<Self, NoiseError> {
        if !value.is_finite() {
            return Err(NoiseError::invalid("parameter", value, "must be finite"));
        }
        Ok(Self::Fixed(value))
    }

    /// Creates a uniform sampling range over `[min, max]`.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::InvalidParameter`] if either bound is non-finite
    /// or the bounds are inverted.
    pub fn range(min: f32, max: f32) -> Result<Self, NoiseError> {
        if !min.is_finite() {
            return Err(NoiseError::invalid("parameter", min, "must be finite"));
        }
        if !max.is_finite() {
            return Err(NoiseError::invalid("parameter", max, "must be finite"));
        }
        if min > max {
            return Err(NoiseError::invalid(
                "parameter",
                min,
                "range bounds must satisfy min <= max",
            ));
        }
        Ok(Self::Range { min, max })
    }

    /// Draws a concrete value.
    ///
    /// Fixed parameters return their value without consuming randomness;
    /// ranges draw uniformly from `[min, max]` inclusive.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        match *self {
            Self::Fixed(value) => value,
            Self::Range { min, max } => rng.gen_range(min..=max),
        }
    }

    /// The `(lowest, highest)` value this parameter can produce.
    pub fn span(&self) -> (f32, f32) {
        match *self {
            Self::Fixed(value) => (value, value),
            Self::Range { min, max } => (min, max),
        }
    }

    /// Checks that every value this parameter can produce lies in `[lo, hi]`.
    ///
    /// Deserialized parameters bypass the validating constructors, so the
    /// operations re-check the whole span here before doing any pixel work.
    /// `reason` is the human-readable domain, e.g. `"must be finite and >= 0"`.
    pub(crate) fn require_within(
        &self,
        name: &'static str,
        lo: f32,
        hi: f32,
        reason: &'static str,
    ) -> Result<(), NoiseError> {
        let (min, max) = self.span();
        if !min.is_finite() {
            return Err(NoiseError::invalid(name, min, "must be finite"));
        }
        if !max.is_finite() {
            return Err(NoiseError::invalid(name, max, "must be finite"));
        }
        if min > max {
            return Err(NoiseError::invalid(
                name,
                min,
                "range bounds must satisfy min <= max",
            ));
        }
        if min < lo {
            return Err(NoiseError::invalid(name, min, reason));
        }
        if max > hi {
            return Err(NoiseError::invalid(name, max, reason));
        }
        Ok(())
    }

    /// Like [`require_within`](Self::require_within) with an open lower bound:
    /// the whole span must be strictly positive.
    pub(crate) fn require_positive(&self, name: &'static str) -> Result<(), NoiseError> {
        self.require_within(name, f32::MIN_POSITIVE, f32::MAX, "must be finite and > 0")
    }
}

/// Draws a coordinate uniformly over `[0, extent)`.
pub(crate) fn sample_position<R: Rng + ?Sized>(extent: usize, rng: &mut R) -> f32 {
    rng.gen_range(0.0..extent as f32)
}

/// Draws an anchor point uniformly over the image plane, `(row, col)` order.
pub(crate) fn sample_center<R: Rng + ?Sized>(
    height: usize,
    width: usize,
    rng: &mut R,
) -> (f32, f32) {
    let row = sample_position(height, rng);
    let col = sample_position(width, rng);
    (row, col)
}
