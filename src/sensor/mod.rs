//! Sensor noise: degradations born inside the camera.
//!
//! Everything in this family applies uniformly over the frame, with no
//! spatial footprint: optics out of focus, read-out grain, photon shot
//! noise, defective photosites, and mis-metered exposure.

pub mod exposure;
pub mod focus;
pub mod grain;

// Re-export the operations flat; callers rarely care about the split.
pub use exposure::{over_expose, under_expose};
pub use focus::poor_focus;
pub use grain::{dark_noise, pepper, salt_and_pepper, shot_noise};
