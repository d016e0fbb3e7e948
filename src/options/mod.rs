//! Viewer options with TOML preset support.
//!
//! Camera placement, controller tuning, display toggles and keybindings are
//! consolidated here. Every section uses `#[serde(default)]`, so a partial
//! TOML file (e.g. only overriding `[controls]`) works.

mod camera;
mod controls;
mod display;
mod keybindings;

use std::path::Path;

pub use camera::{CameraOptions, ProjectionKind};
pub use controls::{ButtonMap, ControlsOptions, ModifierKeys};
pub use display::{rgb, DisplayOptions};
pub use keybindings::KeybindingOptions;
use serde::{Deserialize, Serialize};

use crate::error::ViewerError;

/// Top-level options container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Home camera placement and projection.
    pub camera: CameraOptions,
    /// Trackball controller parameters.
    pub controls: ControlsOptions,
    /// Display toggles and colors.
    pub display: DisplayOptions,
    /// Keyboard binding options.
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Parse options from TOML text. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::OptionsParse`] for invalid TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, ViewerError> {
        let mut options: Self = toml::from_str(content)
            .map_err(|e| ViewerError::OptionsParse(e.to_string()))?;
        options.keybindings.rebuild_reverse_map();
        Ok(options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Io`] if the file cannot be read, or
    /// [`ViewerError::OptionsParse`] for invalid TOML.
    pub fn load(path: &Path) -> Result<Self, ViewerError> {
        let content = std::fs::read_to_string(path).map_err(ViewerError::Io)?;
        let options = Self::from_toml_str(&content)?;
        log::info!("Loaded options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed), creating parent
    /// directories.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::OptionsParse`] if serialization fails or
    /// [`ViewerError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ViewerError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ViewerError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ViewerError::Io)?;
        }
        std::fs::write(path, content).map_err(ViewerError::Io)
    }
}
