//! Configuration for the agent core and for the single-body host.
//!
//! Both structs deserialize from JSON with every field optional; missing
//! fields take the defaults below.

use crate::error::ConfigError;
use physics::{Pose, Vec3};
use serde::Deserialize;
use std::path::Path;

/// Parameters of the learning signal.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AgentConfig {
    /// Scale applied to the thrust intent by the physics collaborator.
    pub move_speed: f32,
    /// Step at which an episode is cut off.
    pub max_episode_steps: u32,
    /// Upper bound of the sampled travel speed; also normalizes velocity error.
    pub max_travel_speed: f32,
    /// Lower clamp of the travel speed. Zero would make the velocity ratio singular.
    pub min_travel_speed: f32,
    /// Lower end of the uniform draw for the travel speed.
    pub speed_sample_floor: f32,
    /// Distance below which the target counts as reached.
    pub success_radius: f32,
    /// Terminal reward for reaching the target.
    pub success_bonus: f32,
    /// Weight of the velocity-matching term in the per-step reward.
    pub velocity_reward_scale: f32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            move_speed: 1.0,
            max_episode_steps: 1000,
            max_travel_speed: 15.0,
            min_travel_speed: 0.1,
            speed_sample_floor: 0.5,
            success_radius: 1.0,
            success_bonus: 20.0,
            velocity_reward_scale: 0.01,
        }
    }
}

impl AgentConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check every invariant the controller relies on.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("move_speed", self.move_speed),
            ("max_travel_speed", self.max_travel_speed),
            ("min_travel_speed", self.min_travel_speed),
            ("speed_sample_floor", self.speed_sample_floor),
            ("success_radius", self.success_radius),
            ("success_bonus", self.success_bonus),
            ("velocity_reward_scale", self.velocity_reward_scale),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }
        if self.max_travel_speed <= 0.0 {
            return Err(ConfigError::NonPositiveTravelSpeed(self.max_travel_speed));
        }
        if self.min_travel_speed <= 0.0 || self.min_travel_speed > self.max_travel_speed {
            return Err(ConfigError::TravelSpeedRange {
                min: self.min_travel_speed,
                max: self.max_travel_speed,
            });
        }
        if self.max_episode_steps == 0 {
            return Err(ConfigError::ZeroEpisodeSteps);
        }
        if self.move_speed <= 0.0 {
            return Err(ConfigError::NonPositiveMoveSpeed(self.move_speed));
        }
        Ok(())
    }

    /// Clamp a candidate travel speed into `[min_travel_speed, max_travel_speed]`.
    #[must_use]
    pub fn clamp_travel_speed(&self, speed: f32) -> f32 {
        if speed.is_nan() {
            return self.min_travel_speed;
        }
        speed.clamp(self.min_travel_speed, self.max_travel_speed)
    }
}

/// Pose as written in config files: a position and a heading about world up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PoseDef {
    pub position: [f32; 3],
    #[serde(default)]
    pub yaw_degrees: f32,
}

impl PoseDef {
    #[must_use]
    pub fn to_pose(self) -> Pose {
        Pose::with_yaw_degrees(Vec3::from_array(self.position), self.yaw_degrees)
    }
}

/// Everything a [`crate::PointToPointEnv`] needs besides the RNG seed.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnvConfig {
    pub agent: AgentConfig,
    /// Fixed physics timestep in seconds.
    pub dt: f32,
    pub start: PoseDef,
    pub target: PoseDef,
    /// World-space target velocity; zero keeps the target fixed.
    pub target_velocity: [f32; 3],
    /// Degrees of yaw per unit of turn intent per second.
    pub yaw_degrees_per_turn_unit: f32,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            agent: AgentConfig::default(),
            dt: 0.02,
            start: PoseDef { position: [0.0, 0.0, 0.0], yaw_degrees: 0.0 },
            target: PoseDef { position: [0.0, 0.0, 20.0], yaw_degrees: 0.0 },
            target_velocity: [0.0; 3],
            yaw_degrees_per_turn_unit: 180.0,
        }
    }
}

impl EnvConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read, otherwise
    /// as [`EnvConfig::from_json_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// # Errors
    ///
    /// Returns the first violated invariant of this config or its
    /// [`AgentConfig`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.agent.validate()?;
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(ConfigError::NonPositiveTimestep(self.dt));
        }
        if !self.yaw_degrees_per_turn_unit.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "yaw_degrees_per_turn_unit",
                value: self.yaw_degrees_per_turn_unit,
            });
        }
        let poses = [self.start.position, self.target.position, self.target_velocity];
        for value in poses.iter().flatten().copied() {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field: "pose", value });
            }
        }
        for value in [self.start.yaw_degrees, self.target.yaw_degrees] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field: "yaw_degrees", value });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn target_velocity(&self) -> Vec3 {
        Vec3::from_array(self.target_velocity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reference_agent() {
        let cfg = AgentConfig::default();
        assert_eq!(cfg.max_episode_steps, 1000);
        assert_eq!(cfg.max_travel_speed, 15.0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg = AgentConfig::from_json_str(r#"{ "max_episode_steps": 50 }"#).unwrap();
        assert_eq!(cfg.max_episode_steps, 50);
        assert_eq!(cfg.success_bonus, 20.0);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = AgentConfig::from_json_str(r#"{ "max_speed": 3 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn non_positive_values_are_fatal() {
        let cfg = AgentConfig { max_travel_speed: 0.0, ..AgentConfig::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::NonPositiveTravelSpeed(_))));

        let cfg = AgentConfig { max_episode_steps: 0, ..AgentConfig::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::ZeroEpisodeSteps)));
    }

    #[test]
    fn travel_speed_clamp_never_returns_zero() {
        let cfg = AgentConfig::default();
        assert_eq!(cfg.clamp_travel_speed(0.0), 0.1);
        assert_eq!(cfg.clamp_travel_speed(99.0), 15.0);
        assert_eq!(cfg.clamp_travel_speed(f32::NAN), 0.1);
    }

    #[test]
    fn env_config_parses_poses() {
        let cfg = EnvConfig::from_json_str(
            r#"{ "start": { "position": [1, 0, 2], "yaw_degrees": 90 },
                 "target_velocity": [0.5, 0, 0] }"#,
        )
        .unwrap();
        assert_eq!(cfg.start.position, [1.0, 0.0, 2.0]);
        assert_eq!(cfg.target.position, [0.0, 0.0, 20.0]);
        assert!(cfg.validate().is_ok());
        assert!((cfg.start.to_pose().forward() - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn non_finite_yaw_is_rejected_up_front() {
        let cfg = EnvConfig {
            start: PoseDef { yaw_degrees: f32::INFINITY, ..EnvConfig::default().start },
            ..EnvConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NonFinite { field: "yaw_degrees", .. })
        ));

        // overflows f32 on parse
        let cfg = EnvConfig::from_json_str(
            r#"{ "target": { "position": [0, 0, 5], "yaw_degrees": 1e39 } }"#,
        )
        .unwrap();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NonFinite { field: "yaw_degrees", .. })
        ));
    }
}
