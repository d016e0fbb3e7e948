use serde::{Deserialize, Serialize};

/// The single active gesture governing how per-frame deltas are
/// interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ManipulationState {
    /// No gesture in progress.
    #[default]
    None,
    /// Mouse-driven trackball rotation.
    Rotate,
    /// Mouse-driven zoom (vertical drag).
    Zoom,
    /// Mouse-driven pan.
    Pan,
    /// One-finger touch rotation.
    TouchRotate,
    /// Two-finger pinch zoom coupled with midpoint pan.
    TouchZoomPan,
}

impl ManipulationState {
    /// Whether a gesture is in progress.
    #[must_use]
    pub fn is_active(self) -> bool {
        self != Self::None
    }

    /// Whether this state was entered from touch input.
    #[must_use]
    pub fn is_touch(self) -> bool {
        matches!(self, Self::TouchRotate | Self::TouchZoomPan)
    }
}

/// A mouse manipulation a button or held modifier key can select.
///
/// Serializes as `snake_case` so TOML presets read naturally:
/// ```toml
/// [controls.mouse_buttons]
/// left = "rotate"
/// right = "pan"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Trackball rotation.
    Rotate,
    /// Dolly (perspective) or scale (orthographic) zoom.
    Zoom,
    /// Translate camera and target together.
    Pan,
}

impl From<Intent> for ManipulationState {
    fn from(intent: Intent) -> Self {
        match intent {
            Intent::Rotate => Self::Rotate,
            Intent::Zoom => Self::Zoom,
            Intent::Pan => Self::Pan,
        }
    }
}

/// Which gestures the controller is allowed to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureFlags {
    /// Rotation allowed.
    pub rotate: bool,
    /// Zoom allowed.
    pub zoom: bool,
    /// Pan allowed.
    pub pan: bool,
}

impl GestureFlags {
    /// Every gesture enabled.
    pub const ALL: Self = Self {
        rotate: true,
        zoom: true,
        pan: true,
    };

    /// Whether `intent` is enabled.
    #[must_use]
    pub fn allows(self, intent: Intent) -> bool {
        match intent {
            Intent::Rotate => self.rotate,
            Intent::Zoom => self.zoom,
            Intent::Pan => self.pan,
        }
    }
}

impl Default for GestureFlags {
    fn default() -> Self {
        Self::ALL
    }
}

/// Notifications emitted by the controller, drained by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlEvent {
    /// Camera position, orientation or zoom changed materially.
    Change,
    /// A gesture started (pointer down or wheel nudge).
    Start,
    /// A gesture ended (pointer up or wheel nudge).
    End,
}
