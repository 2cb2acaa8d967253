//! Observation encoding.
//!
//! Every feature is expressed relative to the agent so a policy trained on
//! one start/target layout transfers to any other.

use crate::reward::velocity_goal;
use bytemuck::{Pod, Zeroable};
use physics::transform::{
    direction_between, inverse_transform_direction, inverse_transform_point, look_rotation_up,
};
use physics::{KinematicState, Pose, PhysicsError};

/// Number of scalars in an [`Observation`].
pub const OBS_SIZE: usize = 10;

/// Fixed-layout feature vector handed to the policy.
///
/// `#[repr(C)]` so that a slice of observations can be viewed as one flat
/// `&[f32]` batch without copying.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Observation {
    /// Agent velocity in a frame whose forward axis points at the target.
    pub velocity_to_target: [f32; 3],
    /// `|velocity_goal - velocity| / max_travel_speed`.
    pub velocity_error: f32,
    /// Target position in the agent frame.
    pub local_target_position: [f32; 3],
    /// Unit direction to the target in the agent frame.
    pub local_direction: [f32; 3],
}

impl Observation {
    #[must_use]
    pub fn as_array(&self) -> &[f32; OBS_SIZE] {
        bytemuck::cast_ref(self)
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<f32> {
        self.as_array().to_vec()
    }

    /// View a batch of observations as `batch.len() * OBS_SIZE` floats.
    #[must_use]
    pub fn flatten(batch: &[Observation]) -> &[f32] {
        bytemuck::cast_slice(batch)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ObservationEncoder {
    max_travel_speed: f32,
}

impl ObservationEncoder {
    #[must_use]
    pub const fn new(max_travel_speed: f32) -> Self {
        Self { max_travel_speed }
    }

    /// Encode the agent's view of the target.
    ///
    /// Non-finite velocity components are read as zero.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError`] if the agent or target pose is not finite.
    pub fn encode(
        &self,
        state: &KinematicState,
        target: &Pose,
        target_travel_speed: f32,
    ) -> Result<Observation, PhysicsError> {
        state.pose.ensure_finite()?;
        target.ensure_finite()?;

        let velocity = state.finite_velocity();
        let to_target = direction_between(state.pose.position, target.position);
        let target_frame = look_rotation_up(to_target);
        let velocity_to_target = target_frame.inverse() * velocity;
        let goal = velocity_goal(to_target, target_travel_speed);

        Ok(Observation {
            velocity_to_target: velocity_to_target.to_array(),
            velocity_error: goal.distance(velocity) / self.max_travel_speed,
            local_target_position: inverse_transform_point(&state.pose, target.position).to_array(),
            local_direction: inverse_transform_direction(&state.pose, to_target).to_array(),
        })
    }
}
