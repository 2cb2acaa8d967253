//! # Episode Controller
//!
//! Orchestrates one agent's episodes. The driver calls, in order:
//!
//! 1.  [`EpisodeController::begin_episode`] which draws the travel speed and
//!     schedules a physical reset.
//! 2.  [`EpisodeController::take_pending_reset`] at the next tick boundary,
//!     applying the returned pose to the body exactly once.
//! 3.  [`EpisodeController::observe`] and [`EpisodeController::step`] every
//!     tick until a step reports `terminated`.
//!
//! The step-count cutoff is checked before anything else in `step`. When it
//! fires no control intent is emitted and no reward is computed, even if the
//! agent is inside the success radius on that same tick.

use crate::action::{ActionDecoder, ControlIntent, ACTION_SIZE};
use crate::config::AgentConfig;
use crate::episode::{EpisodeState, PendingReset, Phase, Termination};
use crate::error::{AgentError, ConfigError};
use crate::observation::{Observation, ObservationEncoder};
use crate::reward::{RewardBreakdown, RewardInputs, RewardShaper};
use physics::transform::direction_between;
use physics::{KinematicState, Pose};
use tracing::{debug, info, trace, warn};

/// Result of one [`EpisodeController::step`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepOutcome {
    pub reward: f32,
    pub terminated: bool,
    /// Why the episode ended, if it did.
    pub termination: Option<Termination>,
    /// Intent for the physics collaborator; `None` when the step-count cutoff fired.
    pub control: Option<ControlIntent>,
    pub breakdown: RewardBreakdown,
}

impl StepOutcome {
    fn cut_off() -> Self {
        Self {
            reward: 0.0,
            terminated: true,
            termination: Some(Termination::StepLimit),
            control: None,
            breakdown: RewardBreakdown::default(),
        }
    }
}

pub struct EpisodeController {
    config: AgentConfig,
    decoder: ActionDecoder,
    encoder: ObservationEncoder,
    shaper: RewardShaper,
    phase: Phase,
    episode: Option<EpisodeState>,
    pending_reset: Option<PendingReset>,
    last_termination: Option<Termination>,
}

impl EpisodeController {
    /// Validate `config` and build an idle controller.
    ///
    /// # Errors
    ///
    /// Returns the first invariant `config` violates.
    pub fn new(config: AgentConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            decoder: ActionDecoder,
            encoder: ObservationEncoder::new(config.max_travel_speed),
            shaper: RewardShaper::new(&config),
            config,
            phase: Phase::Idle,
            episode: None,
            pending_reset: None,
            last_termination: None,
        })
    }

    /// Check that a policy emitting `actual` values per step fits this controller.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ActionArity`] on mismatch.
    pub fn check_action_arity(actual: usize) -> Result<(), ConfigError> {
        if actual == ACTION_SIZE {
            Ok(())
        } else {
            Err(ConfigError::ActionArity { expected: ACTION_SIZE, actual })
        }
    }

    #[must_use]
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn episode(&self) -> Option<&EpisodeState> {
        self.episode.as_ref()
    }

    #[must_use]
    pub fn last_termination(&self) -> Option<Termination> {
        self.last_termination
    }

    #[must_use]
    pub fn reset_pending(&self) -> bool {
        self.pending_reset.is_some()
    }

    /// Start a new episode.
    ///
    /// The physical reset to `start` is only scheduled here; the driver
    /// applies it at the next tick boundary through
    /// [`EpisodeController::take_pending_reset`], after any other per-episode
    /// setup has run.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::NonFiniteState`] if either pose is not finite.
    pub fn begin_episode(
        &mut self,
        start: &Pose,
        target: &Pose,
        rng: &mut fastrand::Rng,
    ) -> Result<(), AgentError> {
        start.ensure_finite()?;
        target.ensure_finite()?;

        let floor = self.config.speed_sample_floor;
        let sampled = floor + rng.f32() * (self.config.max_travel_speed - floor);
        let speed = self.config.clamp_travel_speed(sampled);
        let distance = start.distance_to(target);

        self.episode = Some(EpisodeState::new(distance, speed));
        self.pending_reset = Some(PendingReset { pose: *start });
        self.phase = Phase::Running;
        self.last_termination = None;
        debug!(distance, target_travel_speed = speed, "episode started");
        Ok(())
    }

    /// Hand the scheduled reset to the driver. Returns `Some` exactly once per
    /// episode.
    pub fn take_pending_reset(&mut self) -> Option<PendingReset> {
        self.pending_reset.take()
    }

    fn running_episode(&self) -> Result<EpisodeState, AgentError> {
        if self.pending_reset.is_some() {
            return Err(AgentError::ResetPending);
        }
        self.episode.ok_or(AgentError::EpisodeNotStarted)
    }

    /// Encode the current world state. Does not mutate the episode.
    ///
    /// # Errors
    ///
    /// Fails before the first episode, while a reset is pending, or on a
    /// non-finite pose.
    pub fn observe(
        &self,
        state: &KinematicState,
        target: &Pose,
    ) -> Result<Observation, AgentError> {
        let episode = self.running_episode()?;
        Ok(self.encoder.encode(state, target, episode.target_travel_speed)?)
    }

    /// Advance the episode by one action.
    ///
    /// # Errors
    ///
    /// Fails before the first episode, while a reset is pending, or on a
    /// non-finite pose. Malformed action values are clamped, never rejected.
    pub fn step(
        &mut self,
        action: [f32; ACTION_SIZE],
        state: &KinematicState,
        target: &Pose,
    ) -> Result<StepOutcome, AgentError> {
        let mut episode = self.running_episode()?;
        if self.phase == Phase::Terminated {
            warn!("step called on a terminated episode");
            return Ok(StepOutcome { termination: self.last_termination, ..StepOutcome::cut_off() });
        }
        state.pose.ensure_finite()?;
        target.ensure_finite()?;

        episode.step_count += 1;
        if episode.step_count >= self.config.max_episode_steps {
            self.episode = Some(episode);
            self.finish(Termination::StepLimit);
            debug!(steps = episode.step_count, "episode cut off at step limit");
            return Ok(StepOutcome::cut_off());
        }

        let control = self.decoder.decode(action);

        let distance_to_target = state.position().distance(target.position);
        let breakdown = self.shaper.shape(&RewardInputs {
            direction_to_target: direction_between(state.position(), target.position),
            velocity: state.finite_velocity(),
            target_travel_speed: episode.target_travel_speed,
            previous_distance: episode.previous_distance,
            distance_to_target,
        });
        episode.previous_distance = distance_to_target;
        self.episode = Some(episode);

        let reached = self.shaper.reached(distance_to_target);
        trace!(
            step = episode.step_count,
            distance = distance_to_target,
            progress = breakdown.progress,
            velocity_matching = breakdown.velocity_matching,
            reward = breakdown.total,
            "step"
        );
        let termination = if reached {
            self.finish(Termination::ReachedTarget);
            info!(
                "reached target in {} steps at distance {distance_to_target}",
                episode.step_count
            );
            Some(Termination::ReachedTarget)
        } else {
            None
        };

        Ok(StepOutcome {
            reward: breakdown.total,
            terminated: termination.is_some(),
            termination,
            control: Some(control),
            breakdown,
        })
    }

    fn finish(&mut self, reason: Termination) {
        self.phase = Phase::Terminated;
        self.last_termination = Some(reason);
    }
}
