//! # Reward Shaping
//!
//! The per-step reward has two dense parts and one sparse part:
//!
//! -   **Velocity matching:** how close the agent's velocity is to a desired
//!     velocity that points straight at the target at the episode's travel
//!     speed. Bounded to `[0, 1]` and scaled down before it is added.
//! -   **Progress:** the reduction in distance to the target since the previous
//!     step. Negative when the agent moves away.
//! -   **Success bonus:** a fixed terminal reward once the agent is within the
//!     success radius.

use crate::config::AgentConfig;
use physics::Vec3;

/// Desired velocity: along `direction_to_target` at `target_travel_speed`.
#[must_use]
pub fn velocity_goal(direction_to_target: Vec3, target_travel_speed: f32) -> Vec3 {
    direction_to_target * target_travel_speed
}

/// Bounded score of how well `actual_velocity` matches `velocity_goal`.
///
/// The error magnitude is clamped to `[0, target_travel_speed]` and
/// normalized by `max_travel_speed`, then mapped through `(1 - r²)²`. The curve
/// is flat around a perfect match and falls off steeply for large errors.
/// Returns `1.0` for an exact match and never leaves `[0, 1]` while
/// `target_travel_speed <= max_travel_speed`.
#[must_use]
pub fn velocity_matching_reward(
    velocity_goal: Vec3,
    actual_velocity: Vec3,
    target_travel_speed: f32,
    max_travel_speed: f32,
) -> f32 {
    let error = actual_velocity.distance(velocity_goal);
    // NaN error counts as the worst case; +Inf is already saturated by clamp
    let delta = if error.is_nan() {
        target_travel_speed
    } else {
        error.clamp(0.0, target_travel_speed)
    };
    let ratio = delta / max_travel_speed;
    (1.0 - ratio * ratio).powi(2)
}

/// Reduction in distance to the target over one step.
#[must_use]
pub fn progress_reward(previous_distance: f32, distance_to_target: f32) -> f32 {
    previous_distance - distance_to_target
}

/// Components of one step's reward.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RewardBreakdown {
    /// Unscaled velocity-matching score in `[0, 1]`.
    pub velocity_matching: f32,
    pub progress: f32,
    pub success_bonus: f32,
    pub total: f32,
}

/// Inputs of [`RewardShaper::shape`] for one step.
#[derive(Clone, Copy, Debug)]
pub struct RewardInputs {
    pub direction_to_target: Vec3,
    pub velocity: Vec3,
    pub target_travel_speed: f32,
    pub previous_distance: f32,
    pub distance_to_target: f32,
}

/// Combines the reward terms with the weights from [`AgentConfig`].
#[derive(Clone, Copy, Debug)]
pub struct RewardShaper {
    max_travel_speed: f32,
    velocity_reward_scale: f32,
    success_radius: f32,
    success_bonus: f32,
}

impl RewardShaper {
    #[must_use]
    pub fn new(config: &AgentConfig) -> Self {
        Self {
            max_travel_speed: config.max_travel_speed,
            velocity_reward_scale: config.velocity_reward_scale,
            success_radius: config.success_radius,
            success_bonus: config.success_bonus,
        }
    }

    #[must_use]
    pub fn reached(&self, distance_to_target: f32) -> bool {
        distance_to_target < self.success_radius
    }

    #[must_use]
    pub fn shape(&self, inputs: &RewardInputs) -> RewardBreakdown {
        let goal = velocity_goal(inputs.direction_to_target, inputs.target_travel_speed);
        let velocity_matching = velocity_matching_reward(
            goal,
            inputs.velocity,
            inputs.target_travel_speed,
            self.max_travel_speed,
        );
        let progress = progress_reward(inputs.previous_distance, inputs.distance_to_target);
        let success_bonus =
            if self.reached(inputs.distance_to_target) { self.success_bonus } else { 0.0 };
        RewardBreakdown {
            velocity_matching,
            progress,
            success_bonus,
            total: self.velocity_reward_scale * velocity_matching + progress + success_bonus,
        }
    }
}
