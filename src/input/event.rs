//! Input events, listener channels and pointer identifiers.

use glam::Vec2;

/// Platform-agnostic input events.
///
/// The viewer translates window events into these and feeds them to
/// [`TrackballControls::handle_event`](crate::controls::TrackballControls::handle_event).
///
/// # Example
///
/// ```ignore
/// let consumed = controls.handle_event(
///     &mut surface,
///     &InputEvent::PointerMove {
///         id: PointerId::MOUSE,
///         kind: PointerKind::Mouse,
///         position: Vec2::new(480.0, 300.0),
///     },
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A pointer (mouse button or finger) went down.
    PointerDown {
        /// Pointer identifier, stable until the pointer is released.
        id: PointerId,
        /// Mouse or touch.
        kind: PointerKind,
        /// Button that changed (ignored for touch).
        button: MouseButton,
        /// Screen position in physical pixels.
        position: Vec2,
    },
    /// A pointer moved.
    PointerMove {
        /// Pointer identifier.
        id: PointerId,
        /// Mouse or touch.
        kind: PointerKind,
        /// Screen position in physical pixels.
        position: Vec2,
    },
    /// A pointer was released.
    PointerUp {
        /// Pointer identifier.
        id: PointerId,
        /// Mouse or touch.
        kind: PointerKind,
        /// Screen position in physical pixels.
        position: Vec2,
    },
    /// The platform cancelled a pointer (e.g. touch interrupted).
    PointerCancel {
        /// Pointer identifier.
        id: PointerId,
    },
    /// Scroll wheel; positive `delta_y` scrolls down (zooms out).
    Wheel {
        /// Vertical scroll amount in `mode` units.
        delta_y: f32,
        /// Unit of `delta_y`.
        mode: WheelDeltaMode,
    },
    /// Physical key pressed. Codes use the `winit::keyboard::KeyCode`
    /// debug format (`"KeyA"`, `"Escape"`, ...).
    KeyDown {
        /// Physical key code.
        code: String,
    },
    /// Physical key released.
    KeyUp {
        /// Physical key code.
        code: String,
    },
}

impl InputEvent {
    /// The listener channel this event is delivered on.
    #[must_use]
    pub fn channel(&self) -> Channel {
        match self {
            Self::PointerDown { .. } => Channel::PointerDown,
            Self::PointerMove { .. } => Channel::PointerMove,
            Self::PointerUp { .. } => Channel::PointerUp,
            Self::PointerCancel { .. } => Channel::PointerCancel,
            Self::Wheel { .. } => Channel::Wheel,
            Self::KeyDown { .. } => Channel::KeyDown,
            Self::KeyUp { .. } => Channel::KeyUp,
        }
    }
}

/// Listener channels an [`InputSurface`](super::InputSurface) routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Pointer pressed.
    PointerDown,
    /// Pointer moved.
    PointerMove,
    /// Pointer released.
    PointerUp,
    /// Pointer cancelled.
    PointerCancel,
    /// Scroll wheel.
    Wheel,
    /// Key pressed.
    KeyDown,
    /// Key released.
    KeyUp,
}

/// Identifies one active pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(pub u64);

impl PointerId {
    /// The single mouse pointer.
    pub const MOUSE: Self = Self(0);

    /// Pointer id for a platform touch id (offset so it never collides
    /// with [`PointerId::MOUSE`]).
    #[must_use]
    pub fn touch(id: u64) -> Self {
        Self(id.saturating_add(1))
    }
}

/// Kind of device behind a pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Mouse, pen or trackpad click.
    Mouse,
    /// Finger on a touch screen.
    Touch,
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
    /// Any other button (back, forward, ...).
    Other,
}

/// Unit of a wheel delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WheelDeltaMode {
    /// Pixels (trackpads, smooth scrolling).
    #[default]
    Pixel,
    /// Text lines (classic notched wheels).
    Line,
    /// Whole pages.
    Page,
}

#[cfg(feature = "viewer")]
impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Left => Self::Left,
            winit::event::MouseButton::Right => Self::Right,
            winit::event::MouseButton::Middle => Self::Middle,
            _ => Self::Other,
        }
    }
}
