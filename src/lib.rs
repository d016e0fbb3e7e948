// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Interactive 3D viewer for node/member structural models, built on wgpu.
//!
//! A model is a set of nodes (points with ids) and members (line segments
//! joining two nodes by id). The viewer draws members as lines and nodes
//! as small cross markers, and lets the user orbit, zoom and pan with a
//! trackball controller driven by mouse, wheel, touch and keyboard input.
//!
//! # Key entry points
//!
//! - [`controls::TrackballControls`] - the camera controller
//! - [`engine::ViewerEngine`] - GPU engine tying controls, scene and
//!   renderer together
//! - [`engine::ViewerState`] - the same without a GPU, for hosts and tests
//! - [`model::Construction`] - model parsing from JSON
//! - [`options::Options`] - runtime configuration (camera, controls,
//!   display, key bindings)
//!
//! # Architecture
//!
//! Hosts translate window events into [`input::InputEvent`]s and feed them
//! through an [`input::InputSurface`], which only delivers channels the
//! controller currently listens on. The controller accumulates gesture
//! deltas; once per frame [`controls::TrackballControls::update`] applies
//! rotation, zoom and pan with optional damping and emits change events.
//! The scene rebuilds its line vertices only when the model or display
//! options change.

pub mod camera;
pub mod controls;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod model;
pub mod options;
pub mod renderer;
pub mod scene;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use controls::TrackballControls;
pub use engine::{ViewerEngine, ViewerState};
pub use error::ViewerError;
pub use model::Construction;
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
