//! Environment noise: degradations from the scene around the subject.
//!
//! Stray light sources and shadows with a spatial footprint. Every effect
//! follows the same protocol: rasterize a feathered coverage mask, then
//! composite brightness into the covered pixels. Pixels outside the
//! footprint are returned bit-identical to the input, which keeps these
//! effects strictly local.

mod mask;
mod overlay;

pub mod band;
pub mod blob;

pub use band::{pipe_shadow, pipe_source, streak_shadow, streak_source};
pub use blob::{point_shadow, point_source};
