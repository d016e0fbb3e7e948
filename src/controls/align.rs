//! Roll alignment: nudges the camera up vector toward a reference axis by
//! rotating around the view axis.

use glam::{Quat, Vec3};

/// Projections shorter than this mean up is parallel to the view axis.
const MIN_PROJECTED_LENGTH: f32 = 1e-3;
/// Roll corrections below this (radians) are floating-point noise.
const MIN_ROLL_ANGLE: f32 = 1e-3;

/// Parameters of the roll alignment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollAlignment {
    /// Reference axis; either direction along it is a valid target.
    pub axis: Vec3,
    /// Alignment engages only when up is within this angle of the nearer
    /// reference direction.
    pub start_angle: f32,
    /// Largest roll considered per call.
    pub max_step: f32,
    /// Fraction of the (capped) roll applied per call.
    pub speed: f32,
}

impl RollAlignment {
    /// Incremental rotation around the view axis that moves `up` toward the
    /// nearer of `±axis`, or `None` when no correction applies.
    ///
    /// `eye` is the target-to-camera offset; its direction is the view
    /// axis.
    #[must_use]
    pub fn correction(&self, up: Vec3, eye: Vec3) -> Option<Quat> {
        if self.speed <= 0.0 {
            return None;
        }
        let up = up.normalize_or_zero();
        let axis = self.axis.normalize_or_zero();
        let view = eye.normalize_or_zero();
        if up == Vec3::ZERO || axis == Vec3::ZERO || view == Vec3::ZERO {
            return None;
        }

        let desired = if up.dot(axis) > up.dot(-axis) { axis } else { -axis };
        if clamped_angle(up, desired) > self.start_angle {
            return None;
        }

        let up_projected = up - view * up.dot(view);
        let desired_projected = desired - view * desired.dot(view);
        if up_projected.length() < MIN_PROJECTED_LENGTH
            || desired_projected.length() < MIN_PROJECTED_LENGTH
        {
            return None;
        }
        let up_projected = up_projected.normalize();
        let desired_projected = desired_projected.normalize();

        let roll = clamped_angle(up_projected, desired_projected);
        if roll < MIN_ROLL_ANGLE {
            return None;
        }
        let sign = if up_projected.cross(desired_projected).dot(view) >= 0.0 {
            1.0
        } else {
            -1.0
        };

        let step = roll.min(self.max_step) * self.speed * sign;
        Some(Quat::from_axis_angle(view, step))
    }
}

/// Angle between two unit vectors, with the cosine clamped to `[-1, 1]`.
fn clamped_angle(a: Vec3, b: Vec3) -> f32 {
    a.dot(b).clamp(-1.0, 1.0).acos()
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use super::*;

    fn alignment() -> RollAlignment {
        RollAlignment {
            axis: Vec3::Z,
            start_angle: PI / 10.0,
            max_step: PI / 500.0,
            speed: 0.5,
        }
    }

    fn tilted_up(angle: f32) -> Vec3 {
        // Roll away from +Z around the X view axis.
        Quat::from_axis_angle(Vec3::X, angle) * Vec3::Z
    }

    #[test]
    fn nudges_up_toward_axis() {
        let up = tilted_up(0.1);
        let q = alignment().correction(up, Vec3::X * 5.0).unwrap();
        let corrected = q * up;
        assert!(corrected.angle_between(Vec3::Z) < up.angle_between(Vec3::Z));
        let expected_step = (PI / 500.0) * 0.5;
        assert!((up.angle_between(corrected) - expected_step).abs() < 1e-4);
    }

    #[test]
    fn picks_the_nearer_direction() {
        let up = -tilted_up(0.1);
        let q = alignment().correction(up, Vec3::X).unwrap();
        let corrected = q * up;
        assert!(
            corrected.angle_between(Vec3::NEG_Z) < up.angle_between(Vec3::NEG_Z)
        );
    }

    #[test]
    fn does_not_engage_beyond_start_angle() {
        let up = tilted_up(PI / 10.0 + 0.05);
        assert!(alignment().correction(up, Vec3::X).is_none());
    }

    #[test]
    fn skips_when_up_is_parallel_to_view() {
        assert!(alignment().correction(Vec3::Z, Vec3::Z * 3.0).is_none());
    }

    #[test]
    fn skips_negligible_rolls() {
        let up = tilted_up(0.0005);
        assert!(alignment().correction(up, Vec3::X).is_none());
    }

    #[test]
    fn zero_speed_disables() {
        let params = RollAlignment {
            speed: 0.0,
            ..alignment()
        };
        assert!(params.correction(tilted_up(0.1), Vec3::X).is_none());
    }
}
