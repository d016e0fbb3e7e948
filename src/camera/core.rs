//! Camera pose, projection and the GPU camera uniform.

use glam::{Mat3, Mat4, Quat, Vec3};

/// How the camera projects the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Fixed field of view; zooming moves the eye.
    Perspective {
        /// Vertical field of view in degrees.
        fovy: f32,
        /// Near clipping plane distance.
        znear: f32,
        /// Far clipping plane distance.
        zfar: f32,
    },
    /// Parallel projection; zooming scales the visible extent.
    Orthographic {
        /// Visible height in world units at zoom 1.
        height: f32,
        /// Zoom factor (visible height is `height / zoom`).
        zoom: f32,
        /// Near clipping plane distance.
        znear: f32,
        /// Far clipping plane distance.
        zfar: f32,
    },
    /// A projection matrix supplied by the host. The controls can orbit
    /// and pan it but cannot zoom it.
    Fixed(Mat4),
}

/// Zoom capability of a projection, resolved once per controller frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lens {
    /// Zoom by scaling the eye vector (perspective).
    Dolly,
    /// Zoom by scaling the projection (orthographic).
    Scale,
    /// No zoom model known for this projection.
    Unsupported,
}

impl Projection {
    /// The zoom capability of this projection.
    #[must_use]
    pub fn lens(&self) -> Lens {
        match self {
            Self::Perspective { .. } => Lens::Dolly,
            Self::Orthographic { .. } => Lens::Scale,
            Self::Fixed(_) => Lens::Unsupported,
        }
    }

    fn matrix(&self, aspect: f32) -> Mat4 {
        match *self {
            // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
            // convention)
            Self::Perspective { fovy, znear, zfar } => {
                Mat4::perspective_rh(fovy.to_radians(), aspect, znear, zfar)
            }
            Self::Orthographic {
                height,
                zoom,
                znear,
                zfar,
            } => {
                let half_h = height * 0.5 / zoom.max(f32::EPSILON);
                let half_w = half_h * aspect;
                Mat4::orthographic_rh(-half_w, half_w, -half_h, half_h, znear, zfar)
            }
            Self::Fixed(matrix) => matrix,
        }
    }
}

/// Camera defined by eye position, look-at target, up direction and a
/// projection.
///
/// The orientation is derived from `eye`, `target` and `up` by
/// [`look_at`](Self::look_at); the projection matrix is cached and
/// refreshed by [`update_projection_matrix`](Self::update_projection_matrix).
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Projection model.
    pub projection: Projection,
    orientation: Quat,
    projection_matrix: Mat4,
}

impl Camera {
    /// Camera at `eye` looking at `target` with the given projection.
    #[must_use]
    pub fn new(
        eye: Vec3,
        target: Vec3,
        up: Vec3,
        aspect: f32,
        projection: Projection,
    ) -> Self {
        let mut camera = Self {
            eye,
            target,
            up,
            aspect,
            projection,
            orientation: Quat::IDENTITY,
            projection_matrix: projection.matrix(aspect),
        };
        camera.look_at(target);
        camera
    }

    /// Perspective camera with the default clip planes.
    #[must_use]
    pub fn perspective(eye: Vec3, target: Vec3, fovy: f32, aspect: f32) -> Self {
        Self::new(
            eye,
            target,
            Vec3::Y,
            aspect,
            Projection::Perspective {
                fovy,
                znear: 0.1,
                zfar: 1000.0,
            },
        )
    }

    /// Orthographic camera at zoom 1 with the default clip planes.
    #[must_use]
    pub fn orthographic(eye: Vec3, target: Vec3, height: f32, aspect: f32) -> Self {
        Self::new(
            eye,
            target,
            Vec3::Y,
            aspect,
            Projection::Orthographic {
                height,
                zoom: 1.0,
                znear: 0.1,
                zfar: 1000.0,
            },
        )
    }

    /// Zoom capability of the current projection.
    #[must_use]
    pub fn lens(&self) -> Lens {
        self.projection.lens()
    }

    /// Orthographic zoom factor, `None` for other projections.
    #[must_use]
    pub fn zoom(&self) -> Option<f32> {
        match self.projection {
            Projection::Orthographic { zoom, .. } => Some(zoom),
            _ => None,
        }
    }

    /// Set the orthographic zoom factor. Returns `false` (and changes
    /// nothing) for other projections. Call
    /// [`update_projection_matrix`](Self::update_projection_matrix) after.
    pub fn set_zoom(&mut self, value: f32) -> bool {
        match &mut self.projection {
            Projection::Orthographic { zoom, .. } => {
                *zoom = value;
                true
            }
            _ => false,
        }
    }

    /// Orient the camera to face `target`.
    ///
    /// Keeps the previous orientation when the eye sits on the target or
    /// `up` is parallel to the view direction.
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
        let back = (self.eye - target).normalize_or_zero();
        if back == Vec3::ZERO {
            return;
        }
        let right = self.up.cross(back).normalize_or_zero();
        if right == Vec3::ZERO {
            return;
        }
        let true_up = back.cross(right);
        self.orientation =
            Quat::from_mat3(&Mat3::from_cols(right, true_up, back)).normalize();
    }

    /// World-space orientation (camera looks down its local -Z).
    #[must_use]
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    /// Unit view direction.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    /// Update the aspect ratio and refresh the projection matrix.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection_matrix();
    }

    /// Recompute the cached projection matrix from `projection` and
    /// `aspect`.
    pub fn update_projection_matrix(&mut self) {
        self.projection_matrix = self.projection.matrix(self.aspect);
    }

    /// The cached projection matrix.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }

    /// World-to-view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.eye).inverse()
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix()
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the view-projection matrix.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Padding for GPU alignment.
    pub(crate) _pad: f32,
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity view-projection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            _pad: 0.0,
        }
    }

    /// Update uniform fields from the given camera's current state.
    pub fn update_view_proj(&mut self, camera: &Camera) {
        self.view_proj = camera.build_matrix().to_cols_array_2d();
        self.position = camera.eye.to_array();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn look_at_matches_glam_view_matrix() {
        let camera = Camera::perspective(
            Vec3::new(3.0, 4.0, 5.0),
            Vec3::new(0.5, 0.0, -1.0),
            45.0,
            1.5,
        );
        let expected =
            Mat4::look_at_rh(camera.eye, camera.target, camera.up);
        assert!(camera.view_matrix().abs_diff_eq(expected, 1e-5));
        let dir = (camera.target - camera.eye).normalize();
        assert!(camera.forward().abs_diff_eq(dir, 1e-5));
    }

    #[test]
    fn degenerate_look_at_keeps_orientation() {
        let mut camera =
            Camera::perspective(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, 45.0, 1.0);
        let before = camera.orientation();
        camera.up = Vec3::Z;
        camera.look_at(Vec3::ZERO);
        assert_eq!(camera.orientation(), before);
    }

    #[test]
    fn zoom_is_orthographic_only() {
        let mut persp = Camera::perspective(Vec3::Z, Vec3::ZERO, 45.0, 1.0);
        assert_eq!(persp.zoom(), None);
        assert!(!persp.set_zoom(2.0));
        assert_eq!(persp.lens(), Lens::Dolly);

        let mut ortho = Camera::orthographic(Vec3::Z, Vec3::ZERO, 10.0, 1.0);
        assert!(ortho.set_zoom(2.0));
        ortho.update_projection_matrix();
        assert_eq!(ortho.zoom(), Some(2.0));
        assert_eq!(ortho.lens(), Lens::Scale);
        // Visible half-height halves with zoom 2: 10 / 2 / 2 = 2.5.
        let top = ortho.projection_matrix() * glam::Vec4::new(0.0, 2.5, -1.0, 1.0);
        assert!((top.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn fixed_projection_is_unsupported() {
        let camera = Camera::new(
            Vec3::Z,
            Vec3::ZERO,
            Vec3::Y,
            1.0,
            Projection::Fixed(Mat4::IDENTITY),
        );
        assert_eq!(camera.lens(), Lens::Unsupported);
        assert_eq!(camera.projection_matrix(), Mat4::IDENTITY);
    }
}
