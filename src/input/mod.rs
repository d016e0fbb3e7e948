//! Platform-agnostic input handling.
//!
//! The viewer translates window events into [`InputEvent`]s and routes them
//! through an [`InputSurface`], which tracks who listens on which channel
//! and which pointer is captured.

mod action;
pub mod event;
pub mod surface;

pub use action::KeyAction;
pub use event::{
    Channel, InputEvent, MouseButton, PointerId, PointerKind, WheelDeltaMode,
};
pub use surface::{InputSurface, ListenerId, Subscriptions};
