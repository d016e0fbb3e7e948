use serde::{Deserialize, Serialize};

/// Projection used for the home camera.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionKind {
    /// Perspective projection; zoom dollies the eye.
    #[default]
    Perspective,
    /// Orthographic projection; zoom scales the view.
    Orthographic,
}

impl ProjectionKind {
    /// The other projection kind.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Perspective => Self::Orthographic,
            Self::Orthographic => Self::Perspective,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Home camera placement and projection parameters.
pub struct CameraOptions {
    /// Projection kind.
    pub projection: ProjectionKind,
    /// Vertical field of view in degrees (perspective).
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Direction from the model center toward the home eye position.
    pub view_direction: [f32; 3],
    /// Home camera up vector.
    pub up: [f32; 3],
    /// Extra room around the model bounding sphere when framing it.
    pub fit_padding: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            projection: ProjectionKind::Perspective,
            fovy: 45.0,
            znear: 0.1,
            zfar: 1000.0,
            view_direction: [1.0, -1.0, 1.0],
            up: [0.0, 0.0, 1.0],
            fit_padding: 1.2,
        }
    }
}
