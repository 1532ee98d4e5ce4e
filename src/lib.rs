//! Synthetic sensor and environment degradations for face imagery.
//!
//! This crate turns clean face crops into the kind of frames a cheap or
//! badly placed camera actually delivers: defocused, grainy, mis-exposed,
//! glared at, or partly in shadow. Each degradation is a standalone
//! operation over a float RGB array, with strengths that can be fixed or
//! drawn from ranges per application, so a single configuration fans a
//! dataset out into varied training imagery.
//!
//! Operations come in two families: [`sensor`] noise applies uniformly
//! over the frame, [`environment`] noise has a spatial footprint and
//! leaves everything outside it bit-identical. The [`registry`] names all
//! of them for config files and the `noisify` driver binary.
//!
//! ```
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use smudge::{NoiseConfig, NoiseKind};
//!
//! let image = ndarray::Array3::<f32>::from_elem((128, 128, 3), 0.5);
//! let mut rng = StdRng::seed_from_u64(7);
//!
//! let config = NoiseConfig::preset(NoiseKind::DarkNoise);
//! let degraded = config.apply(&image, &mut rng)?;
//! assert_eq!(degraded.dim(), (128, 128, 3));
//! # Ok::<(), smudge::NoiseError>(())
//! ```

pub mod environment;
pub mod error;
pub mod image_proc;
pub mod params;
pub mod registry;
pub mod sensor;

// Re-exports for easier access
pub use environment::{
    pipe_shadow, pipe_source, point_shadow, point_source, streak_shadow, streak_source,
};
pub use error::NoiseError;
pub use params::Parameter;
pub use registry::{NoiseConfig, NoiseFamily, NoiseKind};
pub use sensor::{
    dark_noise, over_expose, pepper, poor_focus, salt_and_pepper, shot_noise, under_expose,
};
