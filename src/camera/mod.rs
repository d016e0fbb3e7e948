//! Camera model: eye/target/up pose plus a perspective, orthographic or
//! host-supplied projection.

/// Core camera struct and GPU uniform types.
pub mod core;

pub use self::core::{Camera, CameraUniform, Lens, Projection};
