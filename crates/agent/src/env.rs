use crate::action::ACTION_SIZE;
use crate::config::EnvConfig;
use crate::controller::{EpisodeController, StepOutcome};
use crate::episode::{Phase, Termination};
use crate::error::{AgentError, ConfigError};
use crate::observation::{Observation, OBS_SIZE};
use physics::{Pose, RigidBody, Vec3};
use tracing::debug;

/// Reinforcement learning environment trait.
///
/// Inspired by classic frameworks like OpenAI Gym, this trait defines the core
/// interface an environment must provide. Each call to [`step`] advances the
/// simulation by one action and returns the new observation vector, a reward
/// signal, and whether the episode has terminated.
///
/// [`step`]: Env::step
pub trait Env {
    /// Advance the environment by one action.
    ///
    /// # Errors
    ///
    /// Implementations fail only on fatal conditions; an episode ending is
    /// reported through [`Transition::done`].
    fn step(&mut self, action: &[f32]) -> Result<Transition, AgentError>;

    /// Start a new episode and return its first observation vector.
    ///
    /// # Errors
    ///
    /// See [`Env::step`].
    fn reset(&mut self) -> Result<Vec<f32>, AgentError>;

    /// Size of the observation vector.
    fn obs_size(&self) -> usize;

    /// Size of the action space.
    fn action_size(&self) -> usize;
}

/// One environment transition.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub obs: Vec<f32>,
    pub reward: f32,
    pub done: bool,
}

/// Totals for one finished episode.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EpisodeSummary {
    pub steps: u32,
    pub total_reward: f32,
    pub termination: Termination,
    pub final_distance: f32,
}

/// A single agent chasing a fixed or linearly moving target on a frictionless
/// plane, with [`RigidBody`] standing in for the physics engine.
pub struct PointToPointEnv {
    config: EnvConfig,
    controller: EpisodeController,
    body: RigidBody,
    start: Pose,
    initial_target: Pose,
    target: Pose,
    rng: fastrand::Rng,
    episode_reward: f32,
    last_summary: Option<EpisodeSummary>,
}

impl PointToPointEnv {
    /// # Errors
    ///
    /// Returns the first invariant `config` violates.
    pub fn new(config: EnvConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let controller = EpisodeController::new(config.agent)?;
        let start = config.start.to_pose();
        let target = config.target.to_pose();
        Ok(Self {
            controller,
            body: RigidBody::new(start),
            start,
            initial_target: target,
            target,
            rng: fastrand::Rng::with_seed(seed),
            episode_reward: 0.0,
            last_summary: None,
            config,
        })
    }

    #[must_use]
    pub fn controller(&self) -> &EpisodeController {
        &self.controller
    }

    #[must_use]
    pub fn body(&self) -> &RigidBody {
        &self.body
    }

    /// Mutable body access for scripted scenarios.
    pub fn body_mut(&mut self) -> &mut RigidBody {
        &mut self.body
    }

    #[must_use]
    pub fn target(&self) -> Pose {
        self.target
    }

    /// Place the start and target for subsequent episodes.
    pub fn set_layout(&mut self, start: Pose, target: Pose) {
        self.start = start;
        self.initial_target = target;
    }

    #[must_use]
    pub fn last_summary(&self) -> Option<EpisodeSummary> {
        self.last_summary
    }

    /// Current observation as a typed struct.
    ///
    /// # Errors
    ///
    /// See [`EpisodeController::observe`].
    pub fn observe(&self) -> Result<Observation, AgentError> {
        self.controller.observe(&self.body.state(), &self.target)
    }

    /// Typed reset: begin the episode, then apply the deferred reset at the
    /// tick boundary.
    ///
    /// # Errors
    ///
    /// See [`EpisodeController::begin_episode`].
    pub fn reset_typed(&mut self) -> Result<Observation, AgentError> {
        self.target = self.initial_target;
        self.controller.begin_episode(&self.start, &self.target, &mut self.rng)?;
        self.episode_reward = 0.0;
        self.tick_boundary();
        self.observe()
    }

    /// Typed step. The controller scores the current state first; the
    /// resulting intent is then integrated and the target advanced. A tick
    /// cut off by the step limit moves nothing.
    ///
    /// # Errors
    ///
    /// See [`EpisodeController::step`].
    pub fn step_typed(
        &mut self,
        action: [f32; ACTION_SIZE],
    ) -> Result<(Observation, StepOutcome), AgentError> {
        let was_running = self.controller.phase() == Phase::Running;
        let outcome = self.controller.step(action, &self.body.state(), &self.target)?;
        if !was_running {
            return Ok((self.observe()?, outcome));
        }
        self.episode_reward += outcome.reward;

        // a cut-off tick ends the episode before any motion
        if outcome.termination != Some(Termination::StepLimit) {
            if let Some(control) = outcome.control {
                let forward = self.body.forward();
                let move_speed = self.config.agent.move_speed;
                self.body.add_acceleration(control.forward_acceleration(forward, move_speed));
                let yaw =
                    control.yaw_rotation(self.config.yaw_degrees_per_turn_unit, self.config.dt);
                self.body.move_rotation(self.body.rotation() * yaw);
            }
            self.body.integrate(self.config.dt)?;
            self.target.position += self.config.target_velocity() * self.config.dt;
        }

        if let Some(termination) = outcome.termination {
            self.record_summary(termination);
        }
        Ok((self.observe()?, outcome))
    }

    fn tick_boundary(&mut self) {
        if let Some(reset) = self.controller.take_pending_reset() {
            self.body.snap_to(reset.pose);
        }
    }

    fn record_summary(&mut self, termination: Termination) {
        let steps = self.controller.episode().map_or(0, |e| e.step_count);
        let summary = EpisodeSummary {
            steps,
            total_reward: self.episode_reward,
            termination,
            final_distance: self.body.state().position().distance(self.target.position),
        };
        debug!(?summary, "episode finished");
        self.last_summary = Some(summary);
    }

    /// Distance from the body to the target right now.
    #[must_use]
    pub fn distance_to_target(&self) -> f32 {
        self.body.state().position().distance(self.target.position)
    }

    /// World-space target velocity.
    #[must_use]
    pub fn target_velocity(&self) -> Vec3 {
        self.config.target_velocity()
    }
}

impl Env for PointToPointEnv {
    fn step(&mut self, action: &[f32]) -> Result<Transition, AgentError> {
        let action: [f32; ACTION_SIZE] = action
            .try_into()
            .map_err(|_| ConfigError::ActionArity {
                expected: ACTION_SIZE,
                actual: action.len(),
            })?;
        let (obs, outcome) = self.step_typed(action)?;
        Ok(Transition { obs: obs.to_vec(), reward: outcome.reward, done: outcome.terminated })
    }

    fn reset(&mut self) -> Result<Vec<f32>, AgentError> {
        Ok(self.reset_typed()?.to_vec())
    }

    fn obs_size(&self) -> usize {
        OBS_SIZE
    }

    fn action_size(&self) -> usize {
        ACTION_SIZE
    }
}
