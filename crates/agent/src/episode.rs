use physics::{KinematicState, Pose};

/// Per-episode mutable state. A fresh value is built by every
/// [`crate::EpisodeController::begin_episode`]; nothing carries over.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EpisodeState {
    /// Number of `step` calls since the episode began.
    pub step_count: u32,
    /// Agent-to-target distance at the end of the previous step.
    pub previous_distance: f32,
    /// Speed the agent should travel at this episode.
    pub target_travel_speed: f32,
}

impl EpisodeState {
    #[must_use]
    pub const fn new(start_distance: f32, target_travel_speed: f32) -> Self {
        Self { step_count: 0, previous_distance: start_distance, target_travel_speed }
    }
}

/// Lifecycle of one controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Terminated,
}

/// Why an episode ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// `step_count` hit `max_episode_steps`.
    StepLimit,
    /// The agent came within the success radius.
    ReachedTarget,
}

/// Physical reset the driver must apply at the next tick boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendingReset {
    pub pose: Pose,
}

impl PendingReset {
    /// The body snapshot after the reset: at `pose`, both velocities zero.
    #[must_use]
    pub const fn state(&self) -> KinematicState {
        KinematicState::at_rest(self.pose)
    }
}
