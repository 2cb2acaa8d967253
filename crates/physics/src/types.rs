use crate::error::PhysicsError;
use glam::{Quat, Vec3};

/// Forward axis of every body in its own frame.
pub const FORWARD: Vec3 = Vec3::Z;
/// World up.
pub const UP: Vec3 = Vec3::Y;

/// Position and orientation of a body in world space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    pub const IDENTITY: Self = Self { position: Vec3::ZERO, orientation: Quat::IDENTITY };

    #[must_use]
    pub const fn new(position: Vec3, orientation: Quat) -> Self {
        Self { position, orientation }
    }

    /// Pose at `position` facing world `+Z`.
    #[must_use]
    pub const fn at(position: Vec3) -> Self {
        Self { position, orientation: Quat::IDENTITY }
    }

    /// Pose at `position` rotated about world up by `degrees`.
    #[must_use]
    pub fn with_yaw_degrees(position: Vec3, degrees: f32) -> Self {
        Self { position, orientation: Quat::from_rotation_y(degrees.to_radians()) }
    }

    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.orientation * FORWARD
    }

    #[must_use]
    pub fn distance_to(&self, other: &Pose) -> f32 {
        self.position.distance(other.position)
    }

    /// Rejects poses that no frame transform can be computed from.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::NonFinitePosition`] or
    /// [`PhysicsError::NonFiniteOrientation`] when any component is NaN or
    /// infinite.
    pub fn ensure_finite(&self) -> Result<(), PhysicsError> {
        if !self.position.is_finite() {
            return Err(PhysicsError::NonFinitePosition(self.position.to_array()));
        }
        if !self.orientation.is_finite() {
            return Err(PhysicsError::NonFiniteOrientation(self.orientation.to_array()));
        }
        Ok(())
    }
}

/// Snapshot of a body for one tick.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct KinematicState {
    pub pose: Pose,
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
}

impl KinematicState {
    /// A body at rest.
    #[must_use]
    pub const fn at_rest(pose: Pose) -> Self {
        Self { pose, linear_velocity: Vec3::ZERO, angular_velocity: Vec3::ZERO }
    }

    #[must_use]
    pub fn with_velocity(mut self, linear_velocity: Vec3) -> Self {
        self.linear_velocity = linear_velocity;
        self
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.pose.position
    }

    /// Linear velocity with NaN/Inf components replaced by zero.
    #[must_use]
    pub fn finite_velocity(&self) -> Vec3 {
        zero_non_finite(self.linear_velocity)
    }
}

/// Replaces every non-finite component with `0.0`.
#[must_use]
pub fn zero_non_finite(v: Vec3) -> Vec3 {
    let fix = |c: f32| if c.is_finite() { c } else { 0.0 };
    Vec3::new(fix(v.x), fix(v.y), fix(v.z))
}
