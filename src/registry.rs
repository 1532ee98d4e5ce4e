//! Explicit catalogue of every noise operation.
//!
//! Configuration files and the driver refer to operations by name; this
//! module owns that mapping. Each operation is listed by hand rather than
//! discovered, so adding one means touching the enums here and nothing
//! else learns about it by accident.

use std::fmt;
use std::str::FromStr;

use ndarray::Array3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::environment::{
    pipe_shadow, pipe_source, point_shadow, point_source, streak_shadow, streak_source,
};
use crate::error::NoiseError;
use crate::params::Parameter;
use crate::sensor::{
    dark_noise, over_expose, pepper, poor_focus, salt_and_pepper, shot_noise, under_expose,
};

/// Which half of the degradation model an operation belongs to.
///
/// Sensor noise happens inside the camera and covers the whole frame;
/// environment noise comes from the scene and has a spatial footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoiseFamily {
    Sensor,
    Environment,
}

impl fmt::Display for NoiseFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor => write!(f, "sensor"),
            Self::Environment => write!(f, "environment"),
        }
    }
}

/// Every noise operation the crate implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseKind {
    PoorFocus,
    DarkNoise,
    ShotNoise,
    SaltAndPepper,
    Pepper,
    UnderExpose,
    OverExpose,
    PointSource,
    PointShadow,
    StreakSource,
    StreakShadow,
    PipeSource,
    PipeShadow,
}

impl NoiseKind {
    /// Every operation, sensor family first.
    pub const ALL: [NoiseKind; 13] = [
        NoiseKind::PoorFocus,
        NoiseKind::DarkNoise,
        NoiseKind::ShotNoise,
        NoiseKind::SaltAndPepper,
        NoiseKind::Pepper,
        NoiseKind::UnderExpose,
        NoiseKind::OverExpose,
        NoiseKind::PointSource,
        NoiseKind::PointShadow,
        NoiseKind::StreakSource,
        NoiseKind::StreakShadow,
        NoiseKind::PipeSource,
        NoiseKind::PipeShadow,
    ];

    /// Stable snake_case name, used in config files, CLI arguments and
    /// output paths.
    pub fn name(self) -> &'static str {
        match self {
            Self::PoorFocus => "poor_focus",
            Self::DarkNoise => "dark_noise",
            Self::ShotNoise => "shot_noise",
            Self::SaltAndPepper => "salt_and_pepper",
            Self::Pepper => "pepper",
            Self::UnderExpose => "under_expose",
            Self::OverExpose => "over_expose",
            Self::PointSource => "point_source",
            Self::PointShadow => "point_shadow",
            Self::StreakSource => "streak_source",
            Self::StreakShadow => "streak_shadow",
            Self::PipeSource => "pipe_source",
            Self::PipeShadow => "pipe_shadow",
        }
    }

    pub fn family(self) -> NoiseFamily {
        match self {
            Self::PoorFocus
            | Self::DarkNoise
            | Self::ShotNoise
            | Self::SaltAndPepper
            | Self::Pepper
            | Self::UnderExpose
            | Self::OverExpose => NoiseFamily::Sensor,
            Self::PointSource
            | Self::PointShadow
            | Self::StreakSource
            | Self::StreakShadow
            | Self::PipeSource
            | Self::PipeShadow => NoiseFamily::Environment,
        }
    }
}

impl fmt::Display for NoiseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for NoiseKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NoiseKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| format!("unknown noise kind '{s}'"))
    }
}

/// A noise operation paired with its parameters.
///
/// This is the unit a config file holds. Parameters deserialize through
/// [`Parameter`]'s untagged form, so strengths can be fixed numbers or
/// `min`/`max` ranges:
///
/// ```json
/// { "kind": "dark_noise", "sigma": { "min": 0.05, "max": 0.2 } }
/// { "kind": "over_expose", "factor": 2.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NoiseConfig {
    PoorFocus { kernel_extent: Parameter },
    DarkNoise { sigma: Parameter },
    ShotNoise { lambda_scale: Parameter },
    SaltAndPepper { flip_probability: Parameter },
    Pepper { flip_probability: Parameter },
    UnderExpose { factor: Parameter },
    OverExpose { factor: Parameter },
    PointSource { radius: Parameter, intensity: Parameter },
    PointShadow { radius: Parameter, darkness: Parameter },
    StreakSource { width: Parameter, intensity: Parameter },
    StreakShadow { width: Parameter, darkness: Parameter },
    PipeSource { width: Parameter, intensity: Parameter },
    PipeShadow { width: Parameter, darkness: Parameter },
}

impl NoiseConfig {
    /// The operation this configuration drives.
    pub fn kind(&self) -> NoiseKind {
        match self {
            Self::PoorFocus { .. } => NoiseKind::PoorFocus,
            Self::DarkNoise { .. } => NoiseKind::DarkNoise,
            Self::ShotNoise { .. } => NoiseKind::ShotNoise,
            Self::SaltAndPepper { .. } => NoiseKind::SaltAndPepper,
            Self::Pepper { .. } => NoiseKind::Pepper,
            Self::UnderExpose { .. } => NoiseKind::UnderExpose,
            Self::OverExpose { .. } => NoiseKind::OverExpose,
            Self::PointSource { .. } => NoiseKind::PointSource,
            Self::PointShadow { .. } => NoiseKind::PointShadow,
            Self::StreakSource { .. } => NoiseKind::StreakSource,
            Self::StreakShadow { .. } => NoiseKind::StreakShadow,
            Self::PipeSource { .. } => NoiseKind::PipeSource,
            Self::PipeShadow { .. } => NoiseKind::PipeShadow,
        }
    }

    /// Runs the operation on `image`, drawing all randomness from `rng`.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        image: &Array3<f32>,
        rng: &mut R,
    ) -> Result<Array3<f32>, NoiseError> {
        match self {
            Self::PoorFocus { kernel_extent } => poor_focus(image, kernel_extent, rng),
            Self::DarkNoise { sigma } => dark_noise(image, sigma, rng),
            Self::ShotNoise { lambda_scale } => shot_noise(image, lambda_scale, rng),
            Self::SaltAndPepper { flip_probability } => {
                salt_and_pepper(image, flip_probability, rng)
            }
            Self::Pepper { flip_probability } => pepper(image, flip_probability, rng),
            Self::UnderExpose { factor } => under_expose(image, factor, rng),
            Self::OverExpose { factor } => over_expose(image, factor, rng),
            Self::PointSource { radius, intensity } => {
                point_source(image, radius, intensity, rng)
            }
            Self::PointShadow { radius, darkness } => point_shadow(image, radius, darkness, rng),
            Self::StreakSource { width, intensity } => {
                streak_source(image, width, intensity, rng)
            }
            Self::StreakShadow { width, darkness } => streak_shadow(image, width, darkness, rng),
            Self::PipeSource { width, intensity } => pipe_source(image, width, intensity, rng),
            Self::PipeShadow { width, darkness } => pipe_shadow(image, width, darkness, rng),
        }
    }

    /// Default strength ranges for an operation.
    ///
    /// Magnitudes are tuned for face crops in the 100 to 300 pixel range:
    /// strong enough that a recognizer notices, weak enough that a human
    /// still finds the face. Spatial extents are in absolute pixels.
    pub fn preset(kind: NoiseKind) -> Self {
        match kind {
            NoiseKind::PoorFocus => Self::PoorFocus {
                kernel_extent: Parameter::Range { min: 3.0, max: 5.0 },
            },
            NoiseKind::DarkNoise => Self::DarkNoise {
                sigma: Parameter::Range {
                    min: 0.10,
                    max: 0.17,
                },
            },
            NoiseKind::ShotNoise => Self::ShotNoise {
                lambda_scale: Parameter::Range {
                    min: 64.0,
                    max: 256.0,
                },
            },
            NoiseKind::SaltAndPepper => Self::SaltAndPepper {
                flip_probability: Parameter::Range {
                    min: 0.003,
                    max: 0.006,
                },
            },
            NoiseKind::Pepper => Self::Pepper {
                flip_probability: Parameter::Range {
                    min: 0.003,
                    max: 0.006,
                },
            },
            NoiseKind::UnderExpose => Self::UnderExpose {
                factor: Parameter::Range {
                    min: 0.15,
                    max: 0.45,
                },
            },
            NoiseKind::OverExpose => Self::OverExpose {
                factor: Parameter::Range { min: 1.6, max: 2.4 },
            },
            NoiseKind::PointSource => Self::PointSource {
                radius: Parameter::Range {
                    min: 6.0,
                    max: 48.0,
                },
                intensity: Parameter::Range {
                    min: 0.35,
                    max: 0.8,
                },
            },
            NoiseKind::PointShadow => Self::PointShadow {
                radius: Parameter::Range {
                    min: 6.0,
                    max: 48.0,
                },
                darkness: Parameter::Range {
                    min: 0.35,
                    max: 0.8,
                },
            },
            NoiseKind::StreakSource => Self::StreakSource {
                width: Parameter::Range {
                    min: 24.0,
                    max: 96.0,
                },
                intensity: Parameter::Range { min: 0.3, max: 0.7 },
            },
            NoiseKind::StreakShadow => Self::StreakShadow {
                width: Parameter::Range {
                    min: 24.0,
                    max: 96.0,
                },
                darkness: Parameter::Range { min: 0.3, max: 0.7 },
            },
            NoiseKind::PipeSource => Self::PipeSource {
                width: Parameter::Range {
                    min: 16.0,
                    max: 64.0,
                },
                intensity: Parameter::Range { min: 0.3, max: 0.7 },
            },
            NoiseKind::PipeShadow => Self::PipeShadow {
                width: Parameter::Range {
                    min: 16.0,
                    max: 64.0,
                },
                darkness: Parameter::Range { min: 0.3, max: 0.7 },
            },
        }
    }
}
