//! # Single-Body Integration
//!
//! Handles the numerical integration of the agent body: accumulated
//! accelerations, kinematic yaw rotations and position updates. There is no
//! gravity or contact handling, the agent moves on a frictionless plane.

use crate::error::PhysicsError;
use crate::types::{KinematicState, Pose};
use glam::{Quat, Vec3};

/// A rigid body driven by accelerations and explicit rotations.
#[derive(Clone, Debug)]
pub struct RigidBody {
    state: KinematicState,
    /// Accelerations queued since the last [`RigidBody::integrate`].
    pending_acceleration: Vec3,
    /// Rotation queued by [`RigidBody::move_rotation`].
    pending_rotation: Option<Quat>,
}

impl RigidBody {
    #[must_use]
    pub fn new(pose: Pose) -> Self {
        Self {
            state: KinematicState::at_rest(pose),
            pending_acceleration: Vec3::ZERO,
            pending_rotation: None,
        }
    }

    /// Current snapshot.
    #[must_use]
    pub fn state(&self) -> KinematicState {
        self.state
    }

    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.state.pose.forward()
    }

    #[must_use]
    pub fn rotation(&self) -> Quat {
        self.state.pose.orientation
    }

    /// Teleport to `pose` and zero both velocities. Queued inputs are dropped.
    pub fn snap_to(&mut self, pose: Pose) {
        self.state = KinematicState::at_rest(pose);
        self.pending_acceleration = Vec3::ZERO;
        self.pending_rotation = None;
    }

    /// Queue a mass-independent acceleration for the next step.
    pub fn add_acceleration(&mut self, acceleration: Vec3) {
        self.pending_acceleration += acceleration;
    }

    /// Queue a kinematic rotation target for the next step.
    pub fn move_rotation(&mut self, rotation: Quat) {
        self.pending_rotation = Some(rotation.normalize());
    }

    /// Override the linear velocity, e.g. for scripted test scenarios.
    pub fn set_linear_velocity(&mut self, velocity: Vec3) {
        self.state.linear_velocity = velocity;
    }

    /// Advance by `dt` seconds using semi-implicit Euler.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::NonPositiveTimestep`] for `dt <= 0` or a
    /// non-finite `dt`.
    pub fn integrate(&mut self, dt: f32) -> Result<(), PhysicsError> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(PhysicsError::NonPositiveTimestep(dt));
        }

        let previous = self.state.pose.orientation;
        if let Some(target) = self.pending_rotation.take() {
            self.state.pose.orientation = target;
            self.state.angular_velocity = angular_velocity_between(previous, target, dt);
        } else {
            self.state.angular_velocity = Vec3::ZERO;
        }

        self.state.linear_velocity += self.pending_acceleration * dt;
        self.state.pose.position += self.state.linear_velocity * dt;
        self.pending_acceleration = Vec3::ZERO;
        Ok(())
    }
}

fn angular_velocity_between(from: Quat, to: Quat, dt: f32) -> Vec3 {
    let (axis, angle) = (to * from.inverse()).to_axis_angle();
    if angle.is_finite() {
        axis * (angle / dt)
    } else {
        Vec3::ZERO
    }
}
