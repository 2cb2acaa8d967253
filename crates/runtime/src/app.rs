//! # Episode Runner
//!
//! Drives a batch of [`agent::PointToPointEnv`] instances with a scripted
//! [`Policy`] until the requested number of episodes has finished, logging
//! each episode's outcome and a final summary.

use crate::policy::Policy;
use agent::{ConfigError, EnvBatch, EnvConfig, PointToPointEnv, Termination, ACTION_SIZE, OBS_SIZE};
use anyhow::{Context, Result};
use tracing::{info, warn};

/// What to run.
pub struct RunSettings {
    pub config: EnvConfig,
    pub episodes: usize,
    pub envs: usize,
    pub seed: u64,
}

/// Aggregate results of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RunStats {
    pub episodes: usize,
    pub successes: usize,
    pub mean_return: f32,
    pub mean_steps: f32,
}

/// Run episodes until `settings.episodes` have finished.
///
/// # Errors
///
/// Returns configuration errors and any fatal environment error.
#[allow(clippy::cast_precision_loss)]
pub fn run(settings: &RunSettings, policy: &mut dyn Policy) -> Result<RunStats> {
    let envs = settings.envs.max(1);
    let seed = settings.seed;
    let config = settings.config.clone();
    let mut batch = EnvBatch::new_with(
        |i| -> Result<PointToPointEnv, ConfigError> {
            PointToPointEnv::new(config.clone(), seed.wrapping_add(i as u64))
        },
        envs,
        ACTION_SIZE,
    )
    .context("failed to build environments")?;

    info!(envs, episodes = settings.episodes, "starting episode loop");

    let mut obs = batch.observations();
    let mut actions = vec![0.0_f32; envs * ACTION_SIZE];
    let mut stats = RunStats::default();
    let (mut total_return, mut total_steps) = (0.0_f32, 0_u64);

    while stats.episodes < settings.episodes {
        for (row, action) in obs.chunks(OBS_SIZE).zip(actions.chunks_mut(ACTION_SIZE)) {
            action.copy_from_slice(&policy.act(row));
        }
        let step = batch.step(&actions)?;
        for (i, done) in step.dones.iter().enumerate() {
            if !done {
                continue;
            }
            let Some(summary) = batch.envs()[i].last_summary() else {
                warn!(env = i, "episode ended without a summary");
                continue;
            };
            stats.episodes += 1;
            total_return += summary.total_reward;
            total_steps += u64::from(summary.steps);
            if summary.termination == Termination::ReachedTarget {
                stats.successes += 1;
            }
            info!(
                episode = stats.episodes,
                env = i,
                steps = summary.steps,
                total_reward = summary.total_reward,
                final_distance = summary.final_distance,
                outcome = ?summary.termination,
                "episode finished"
            );
            if stats.episodes >= settings.episodes {
                break;
            }
        }
        obs = step.obs;
    }

    if stats.episodes > 0 {
        stats.mean_return = total_return / stats.episodes as f32;
        stats.mean_steps = total_steps as f32 / stats.episodes as f32;
    }
    info!(
        episodes = stats.episodes,
        successes = stats.successes,
        mean_return = stats.mean_return,
        mean_steps = stats.mean_steps,
        "run complete"
    );
    Ok(stats)
}
