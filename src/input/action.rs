use serde::{Deserialize, Serialize};

/// Viewer-level actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// reset_camera = "KeyR"
/// toggle_axes = "KeyX"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Restore the camera pose captured when the model was loaded.
    ResetCamera,
    /// Pick a model file and load it.
    OpenModel,
    /// Show or hide the coordinate axes.
    ToggleAxes,
    /// Show or hide node markers.
    ToggleNodes,
    /// Switch between perspective and orthographic projection.
    ToggleProjection,
}
