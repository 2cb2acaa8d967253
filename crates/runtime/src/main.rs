#![deny(clippy::all, clippy::pedantic)]
//! # Point-to-Point Runtime
//!
//! Entry point for the episode runner binary.
//!
//! Loads an [`agent::EnvConfig`] (JSON, every field optional), builds a batch
//! of environments and drives them with a scripted policy, logging every
//! finished episode. Set `RUST_LOG` to control verbosity; `debug` shows
//! episode starts and cutoffs, `trace` shows every step's reward terms.

mod app;
mod policy;

use agent::EnvConfig;
use anyhow::{Context, Result};
use clap::Parser;
use policy::PolicyKind;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Run point-to-point agent episodes with a scripted policy")]
struct Args {
    /// JSON environment config; defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of episodes to finish before exiting.
    #[arg(long, default_value_t = 10)]
    episodes: usize,
    /// Number of environments stepped side by side.
    #[arg(long, default_value_t = 1)]
    envs: usize,
    /// Seed for travel-speed draws and the random policy.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    #[arg(long, value_enum, default_value_t = PolicyKind::Seek)]
    policy: PolicyKind,
    /// Override `agent.max_episode_steps` from the config.
    #[arg(long)]
    max_steps: Option<u32>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => EnvConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EnvConfig::default(),
    };
    if let Some(max_steps) = args.max_steps {
        config.agent.max_episode_steps = max_steps;
    }
    config.validate().context("invalid configuration")?;
    tracing::info!(policy = ?args.policy, seed = args.seed, "configuration loaded");

    let settings = app::RunSettings {
        config,
        episodes: args.episodes,
        envs: args.envs,
        seed: args.seed,
    };
    let mut policy = args.policy.build(args.seed);
    app::run(&settings, policy.as_mut())?;
    Ok(())
}
