use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use crate::controls::{GestureFlags, Intent};
use crate::input::MouseButton;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Trackball controller parameters.
pub struct ControlsOptions {
    /// Rotation sensitivity multiplier.
    pub rotate_speed: f32,
    /// Zoom sensitivity multiplier.
    pub zoom_speed: f32,
    /// Pan sensitivity multiplier.
    pub pan_speed: f32,
    /// Fraction of the roll correction applied per frame (0 disables
    /// roll alignment).
    pub align_speed: f32,
    /// Reference axis the camera up is biased toward.
    pub align_axis: [f32; 3],
    /// Roll alignment engages only when up is within this angle (radians)
    /// of the nearer reference direction.
    pub align_start_angle: f32,
    /// Largest roll correction (radians) considered in one frame.
    pub align_max_step: f32,
    /// Snap anchors to the latest input instead of damping, no inertia.
    pub static_moving: bool,
    /// Damping applied each frame when not static (0..1).
    pub damping_factor: f32,
    /// Minimum orbit distance (perspective).
    pub min_distance: f32,
    /// Maximum orbit distance (perspective).
    pub max_distance: f32,
    /// Minimum zoom (orthographic).
    pub min_zoom: f32,
    /// Maximum zoom (orthographic).
    pub max_zoom: f32,
    /// Allow rotation.
    pub enable_rotate: bool,
    /// Allow zoom.
    pub enable_zoom: bool,
    /// Allow panning.
    pub enable_pan: bool,
    /// Mouse button → manipulation mapping.
    pub mouse_buttons: ButtonMap,
    /// Held key → manipulation mapping (overrides the button mapping).
    pub modifier_keys: ModifierKeys,
}

impl Default for ControlsOptions {
    fn default() -> Self {
        Self {
            rotate_speed: 1.0,
            zoom_speed: 1.2,
            pan_speed: 0.3,
            align_speed: 0.1,
            align_axis: [0.0, 0.0, 1.0],
            align_start_angle: PI / 10.0,
            align_max_step: PI / 500.0,
            static_moving: false,
            damping_factor: 0.2,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_zoom: 0.0,
            max_zoom: f32::INFINITY,
            enable_rotate: true,
            enable_zoom: true,
            enable_pan: true,
            mouse_buttons: ButtonMap::default(),
            modifier_keys: ModifierKeys::default(),
        }
    }
}

impl ControlsOptions {
    /// The enable flags as one value.
    #[must_use]
    pub fn gesture_flags(&self) -> GestureFlags {
        GestureFlags {
            rotate: self.enable_rotate,
            zoom: self.enable_zoom,
            pan: self.enable_pan,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Which manipulation each mouse button starts. `None` leaves the button
/// unbound.
pub struct ButtonMap {
    /// Left button.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<Intent>,
    /// Middle button.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle: Option<Intent>,
    /// Right button.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<Intent>,
}

impl Default for ButtonMap {
    fn default() -> Self {
        Self {
            left: Some(Intent::Rotate),
            middle: Some(Intent::Zoom),
            right: Some(Intent::Pan),
        }
    }
}

impl ButtonMap {
    /// The intent bound to `button`.
    #[must_use]
    pub fn intent_for(&self, button: MouseButton) -> Option<Intent> {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Middle => self.middle,
            MouseButton::Right => self.right,
            MouseButton::Other => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Key codes that, while held, select a manipulation for the next mouse
/// gesture. Codes use the `winit::keyboard::KeyCode` debug format.
pub struct ModifierKeys {
    /// Key selecting rotation.
    pub rotate: String,
    /// Key selecting zoom.
    pub zoom: String,
    /// Key selecting pan.
    pub pan: String,
}

impl Default for ModifierKeys {
    fn default() -> Self {
        Self {
            rotate: "KeyA".into(),
            zoom: "KeyS".into(),
            pan: "KeyD".into(),
        }
    }
}

impl ModifierKeys {
    /// The intent bound to a key code.
    #[must_use]
    pub fn intent_for(&self, code: &str) -> Option<Intent> {
        if code == self.rotate {
            Some(Intent::Rotate)
        } else if code == self.zoom {
            Some(Intent::Zoom)
        } else if code == self.pan {
            Some(Intent::Pan)
        } else {
            None
        }
    }
}
