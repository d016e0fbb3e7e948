//! Trackball camera controls.
//!
//! [`TrackballControls`] consumes platform-agnostic
//! [`InputEvent`](crate::input::InputEvent)s, classifies them into a single
//! [`ManipulationState`], and applies rotation, zoom and pan to the camera
//! it owns once per frame.

mod align;
mod gesture;
mod pointers;
mod screen;
mod state;
mod trackball;

pub use align::RollAlignment;
pub use gesture::{classify, GestureSource};
pub use pointers::{PointerError, PointerTracker, TrackedPointer};
pub use screen::ScreenRect;
pub use state::{ControlEvent, GestureFlags, Intent, ManipulationState};
pub use trackball::TrackballControls;
