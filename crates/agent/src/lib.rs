#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Point-to-Point Agent
//!
//! Episode lifecycle and reward shaping for a single rigid-body agent that
//! learns to reach a target while holding a sampled travel speed.
//!
//! The crate maps world state to observations, rewards and termination, and
//! maps policy actions to physical intents. It never applies forces itself;
//! the physics collaborator does that with the [`ControlIntent`] each step
//! returns.
//!
//! ## Key Components
//!
//! -   **[`EpisodeController`]:** owns the [`EpisodeState`], runs the step
//!     sequence and decides termination.
//! -   **[`ObservationEncoder`]:** ten agent-relative features.
//! -   **[`ActionDecoder`]:** clamps raw actions into thrust and turn.
//! -   **[`RewardShaper`]:** velocity matching, progress and success bonus.
//! -   **[`PointToPointEnv`] / [`EnvBatch`]:** a ready-made host around
//!     [`physics::RigidBody`] behind the [`Env`] trait, and a vector of them.
//!
//! ## Usage
//!
//! ```rust
//! use agent::{EnvConfig, PointToPointEnv};
//!
//! let mut env = PointToPointEnv::new(EnvConfig::default(), 42)?;
//! let obs = env.reset_typed()?;
//! let (_obs, outcome) = env.step_typed([1.0, 0.0])?;
//! assert!(!outcome.terminated);
//! # let _ = obs;
//! # Ok::<(), agent::AgentError>(())
//! ```

pub mod action;
pub mod batch;
pub mod config;
pub mod controller;
pub mod env;
pub mod episode;
pub mod error;
pub mod observation;
pub mod reward;

pub use action::{ActionDecoder, ControlIntent, ACTION_SIZE};
pub use batch::{BatchStep, EnvBatch};
pub use config::{AgentConfig, EnvConfig, PoseDef};
pub use controller::{EpisodeController, StepOutcome};
pub use env::{Env, EpisodeSummary, PointToPointEnv, Transition};
pub use episode::{EpisodeState, PendingReset, Phase, Termination};
pub use error::{AgentError, ConfigError};
pub use observation::{Observation, ObservationEncoder, OBS_SIZE};
pub use reward::{velocity_matching_reward, RewardBreakdown, RewardShaper};
