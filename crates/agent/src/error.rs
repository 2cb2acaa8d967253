use physics::PhysicsError;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal setup problems. Raised once, before any episode runs.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("max_travel_speed must be positive, got {0}")]
    NonPositiveTravelSpeed(f32),
    #[error("min_travel_speed must lie in (0, max_travel_speed], got {min} with max {max}")]
    TravelSpeedRange { min: f32, max: f32 },
    #[error("max_episode_steps must be positive")]
    ZeroEpisodeSteps,
    #[error("move_speed must be positive, got {0}")]
    NonPositiveMoveSpeed(f32),
    #[error("dt must be positive, got {0}")]
    NonPositiveTimestep(f32),
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },
    #[error("policy emits {actual} action values, environment expects {expected}")]
    ActionArity { expected: usize, actual: usize },
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum AgentError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("non-finite world state: {0}")]
    NonFiniteState(#[from] PhysicsError),
    #[error("step called before begin_episode")]
    EpisodeNotStarted,
    #[error("episode reset is still pending; apply it at the tick boundary first")]
    ResetPending,
    #[error("batch was left partially stepped by an earlier error")]
    BatchPoisoned,
}
