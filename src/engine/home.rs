//! Home camera placement: frame the model's bounding sphere from the
//! configured view direction.

use glam::Vec3;

use crate::camera::{Camera, Projection};
use crate::model::Geometry;
use crate::options::{CameraOptions, ProjectionKind};

/// Radius used for models without extent.
const FALLBACK_RADIUS: f32 = 1.0;

/// Camera framing `geometry` plus the orbit target (the model center).
#[must_use]
pub fn home_camera(geometry: &Geometry, options: &CameraOptions, aspect: f32) -> (Camera, Vec3) {
    let center = geometry.center().unwrap_or(Vec3::ZERO);
    let radius = match geometry.radius() {
        r if r > f32::EPSILON => r,
        _ => FALLBACK_RADIUS,
    };
    let direction = Vec3::from_array(options.view_direction)
        .try_normalize()
        .unwrap_or(Vec3::Z);
    let up = pick_up(Vec3::from_array(options.up), direction);

    let half_fov = (options.fovy.to_radians() * 0.5).max(f32::EPSILON);
    let distance = radius * options.fit_padding / half_fov.tan();
    let zfar = options.zfar.max((distance + radius) * 2.0);

    let projection = match options.projection {
        ProjectionKind::Perspective => Projection::Perspective {
            fovy: options.fovy,
            znear: options.znear,
            zfar,
        },
        ProjectionKind::Orthographic => Projection::Orthographic {
            height: 2.0 * radius * options.fit_padding,
            zoom: 1.0,
            znear: options.znear,
            zfar,
        },
    };
    let camera = Camera::new(center + direction * distance, center, up, aspect, projection);
    (camera, center)
}

/// `up` unless it is degenerate or parallel to `direction`, in which case
/// the first world axis that is not.
fn pick_up(up: Vec3, direction: Vec3) -> Vec3 {
    [up, Vec3::Z, Vec3::Y, Vec3::X]
        .into_iter()
        .filter_map(Vec3::try_normalize)
        .find(|candidate| candidate.cross(direction).length_squared() > 1e-6)
        .unwrap_or(Vec3::Y)
}

/// Same pose, other projection. Orthographic height matches the
/// perspective frustum height at the target distance.
#[must_use]
pub fn switch_projection(camera: &Camera, kind: ProjectionKind, options: &CameraOptions) -> Camera {
    let distance = (camera.eye - camera.target).length();
    let (znear, zfar) = match camera.projection {
        Projection::Perspective { znear, zfar, .. } | Projection::Orthographic { znear, zfar, .. } => {
            (znear, zfar)
        }
        Projection::Fixed(_) => (options.znear, options.zfar),
    };
    let projection = match kind {
        ProjectionKind::Perspective => Projection::Perspective {
            fovy: options.fovy,
            znear,
            zfar,
        },
        ProjectionKind::Orthographic => {
            let visible = match camera.projection {
                Projection::Orthographic { height, zoom, .. } => height / zoom.max(f32::EPSILON),
                _ => 2.0 * distance * (options.fovy.to_radians() * 0.5).tan(),
            };
            Projection::Orthographic {
                height: visible,
                zoom: 1.0,
                znear,
                zfar,
            }
        }
    };
    Camera::new(camera.eye, camera.target, camera.up, camera.aspect, projection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Node;

    fn cube() -> Geometry {
        let nodes = (0..8)
            .map(|i| Node {
                id: i,
                x: (i & 1) as f32 * 2.0,
                y: ((i >> 1) & 1) as f32 * 2.0,
                z: ((i >> 2) & 1) as f32 * 2.0,
            })
            .collect();
        Geometry::new(nodes, Vec::new())
    }

    #[test]
    fn frames_model_center_from_view_direction() {
        let options = CameraOptions::default();
        let (camera, target) = home_camera(&cube(), &options, 1.0);
        assert_eq!(target, Vec3::ONE);
        let offset = (camera.eye - target).normalize();
        assert!(offset.abs_diff_eq(Vec3::new(1.0, -1.0, 1.0).normalize(), 1e-5));

        let radius = 3.0_f32.sqrt();
        let expected = radius * options.fit_padding / (options.fovy.to_radians() * 0.5).tan();
        assert!(((camera.eye - target).length() - expected).abs() < 1e-3);
    }

    #[test]
    fn empty_model_gets_a_usable_camera() {
        let (camera, target) = home_camera(&Geometry::default(), &CameraOptions::default(), 1.5);
        assert_eq!(target, Vec3::ZERO);
        assert!(camera.eye.length() > 0.0);
    }

    #[test]
    fn parallel_up_is_replaced() {
        let options = CameraOptions {
            view_direction: [0.0, 0.0, 1.0],
            up: [0.0, 0.0, 1.0],
            ..CameraOptions::default()
        };
        let (camera, _) = home_camera(&cube(), &options, 1.0);
        assert!(camera.up.cross(Vec3::Z).length() > 0.5);
    }

    #[test]
    fn orthographic_switch_keeps_pose_and_visible_height() {
        let options = CameraOptions::default();
        let (camera, _) = home_camera(&cube(), &options, 1.0);
        let ortho = switch_projection(&camera, ProjectionKind::Orthographic, &options);
        assert_eq!(ortho.eye, camera.eye);
        assert_eq!(ortho.zoom(), Some(1.0));

        let back = switch_projection(&ortho, ProjectionKind::Perspective, &options);
        assert!(matches!(back.projection, Projection::Perspective { .. }));
        assert_eq!(back.target, camera.target);
    }
}
