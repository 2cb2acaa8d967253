//! Frame utilities for physics bodies
//!
//! World-space vectors are expressed in a body frame by applying the inverse
//! of the body's orientation. Positions are additionally offset by the body's
//! position. Bodies carry no scale.

use crate::types::{Pose, FORWARD, UP};
use glam::{Mat3, Quat, Vec3};

const PARALLEL_EPSILON: f32 = 1e-6;

/// Express a world-space point in the frame of `pose`.
#[must_use]
pub fn inverse_transform_point(pose: &Pose, point: Vec3) -> Vec3 {
    pose.orientation.inverse() * (point - pose.position)
}

/// Express a world-space direction in the frame of `pose`.
#[must_use]
pub fn inverse_transform_direction(pose: &Pose, direction: Vec3) -> Vec3 {
    pose.orientation.inverse() * direction
}

/// Unit vector pointing from `from` to `to`, or zero when they coincide.
#[must_use]
pub fn direction_between(from: Vec3, to: Vec3) -> Vec3 {
    (to - from).normalize_or_zero()
}

/// Rotation whose forward axis points along `forward` and whose up axis is as
/// close to `up` as possible.
///
/// A zero `forward` yields the identity. When `forward` is parallel to `up`
/// the shortest arc from the body forward axis is used instead.
#[must_use]
pub fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let Some(z) = forward.try_normalize() else {
        return Quat::IDENTITY;
    };
    let x = up.cross(z);
    if x.length_squared() < PARALLEL_EPSILON {
        return Quat::from_rotation_arc(FORWARD, z);
    }
    let x = x.normalize();
    let y = z.cross(x);
    Quat::from_mat3(&Mat3::from_cols(x, y, z)).normalize()
}

/// [`look_rotation`] with world up.
#[must_use]
pub fn look_rotation_up(forward: Vec3) -> Quat {
    look_rotation(forward, UP)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn identity_pose_only_translates_points() {
        let pose = Pose::at(Vec3::new(1.0, 2.0, 3.0));
        let local = inverse_transform_point(&pose, Vec3::new(1.0, 2.0, 13.0));
        assert!(close(local, Vec3::new(0.0, 0.0, 10.0)));
    }

    #[test]
    fn yawed_pose_sees_world_x_straight_ahead() {
        let pose = Pose::with_yaw_degrees(Vec3::ZERO, 90.0);
        let local = inverse_transform_direction(&pose, Vec3::X);
        assert!(close(local, FORWARD), "local={local:?}");
    }

    #[test]
    fn look_rotation_maps_forward_onto_target_direction() {
        let dir = Vec3::new(1.0, 0.0, 1.0).normalize();
        let q = look_rotation_up(dir);
        assert!(close(q * FORWARD, dir));
        assert!((q * UP).y > 0.99);
    }

    #[test]
    fn look_rotation_handles_degenerate_inputs() {
        assert_eq!(look_rotation_up(Vec3::ZERO), Quat::IDENTITY);
        let q = look_rotation_up(Vec3::Y);
        assert!(close(q * FORWARD, Vec3::Y));
    }

    #[test]
    fn coincident_points_have_no_direction() {
        assert_eq!(direction_between(Vec3::ONE, Vec3::ONE), Vec3::ZERO);
    }
}
