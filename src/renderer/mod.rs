//! Rendering of the scene's line geometry.

pub mod lines;

pub use lines::LineRenderer;
