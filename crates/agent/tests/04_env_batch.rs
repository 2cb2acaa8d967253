use agent::{
    AgentConfig, AgentError, ConfigError, Env, EnvBatch, EnvConfig, Observation, PointToPointEnv,
    Transition, OBS_SIZE,
};

/// Counts its steps and fails on the first one when `broken`.
struct CountingEnv {
    broken: bool,
    steps: usize,
}

impl Env for CountingEnv {
    fn step(&mut self, _action: &[f32]) -> Result<Transition, AgentError> {
        if self.broken {
            return Err(AgentError::EpisodeNotStarted);
        }
        self.steps += 1;
        Ok(Transition { obs: vec![0.0], reward: 1.0, done: false })
    }

    fn reset(&mut self) -> Result<Vec<f32>, AgentError> {
        Ok(vec![0.0])
    }

    fn obs_size(&self) -> usize {
        1
    }

    fn action_size(&self) -> usize {
        1
    }
}

fn make(max_steps: u32) -> impl FnMut(usize) -> Result<PointToPointEnv, ConfigError> {
    move |i| {
        let cfg = EnvConfig {
            agent: AgentConfig { max_episode_steps: max_steps, ..AgentConfig::default() },
            ..EnvConfig::default()
        };
        PointToPointEnv::new(cfg, i as u64)
    }
}

#[test]
fn batch_rejects_mismatched_policy_arity() {
    let err = EnvBatch::new_with(make(10), 4, 3).err().unwrap();
    assert!(matches!(err, AgentError::Config(ConfigError::ActionArity { expected: 2, actual: 3 })));
}

#[test]
fn batch_steps_every_env_and_auto_resets() {
    let mut batch = EnvBatch::new_with(make(5), 8, 2).unwrap();
    assert_eq!(batch.len(), 8);
    assert_eq!(batch.observations().len(), 8 * OBS_SIZE);

    let actions = vec![0.0; 16];
    let mut finished = 0;
    for _ in 0..5 {
        let step = batch.step(&actions).unwrap();
        assert_eq!(step.obs.len(), 8 * OBS_SIZE);
        assert_eq!(step.rewards.len(), 8);
        finished += step.dones.iter().filter(|d| **d).count();
    }
    assert_eq!(finished, 8, "every env hits the step limit on tick 5");

    // reset rows match a fresh episode's observation
    let fresh = batch.envs()[0].observe().unwrap();
    assert_eq!(&batch.observations()[..OBS_SIZE], fresh.as_array());
}

#[test]
fn batch_checks_flat_action_length() {
    let mut batch = EnvBatch::new_with(make(10), 2, 2).unwrap();
    assert!(batch.step(&[0.0; 3]).is_err());
}

#[test]
fn failed_step_poisons_the_batch() {
    let make = |i: usize| -> Result<CountingEnv, ConfigError> {
        Ok(CountingEnv { broken: i == 1, steps: 0 })
    };
    let mut batch = EnvBatch::new_with(make, 3, 1).unwrap();

    assert!(matches!(batch.step(&[0.0; 3]), Err(AgentError::EpisodeNotStarted)));
    // env 0 advanced before env 1 failed; env 2 never ran
    assert_eq!(batch.envs()[0].steps, 1);
    assert_eq!(batch.envs()[2].steps, 0);

    assert!(matches!(batch.step(&[0.0; 3]), Err(AgentError::BatchPoisoned)));
    assert_eq!(batch.envs()[0].steps, 1);
}

#[test]
fn observations_flatten_without_copying_layout() {
    let obs = [
        Observation { velocity_error: 1.0, ..Observation::default() },
        Observation { velocity_error: 2.0, ..Observation::default() },
    ];
    let flat = Observation::flatten(&obs);
    assert_eq!(flat.len(), 2 * OBS_SIZE);
    assert_eq!(flat[3], 1.0);
    assert_eq!(flat[OBS_SIZE + 3], 2.0);
}
