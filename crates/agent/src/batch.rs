use crate::env::Env;
use crate::error::{AgentError, ConfigError};

/// Flat per-tick results of an [`EnvBatch`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchStep {
    /// `len * obs_size` values; rows of finished envs hold their reset observation.
    pub obs: Vec<f32>,
    pub rewards: Vec<f32>,
    pub dones: Vec<bool>,
}

/// Independent environments stepped together, as a batched trainer drives them.
///
/// Environments share nothing; a finished env is reset in place so every row
/// of [`BatchStep::obs`] is always a valid input for the next action.
///
/// An env error mid-step leaves earlier envs advanced and later ones not, so
/// the batch refuses further steps after one and must be rebuilt.
pub struct EnvBatch<E: Env> {
    envs: Vec<E>,
    obs: Vec<Vec<f32>>,
    obs_dim: usize,
    act_dim: usize,
    poisoned: bool,
}

impl<E: Env> EnvBatch<E> {
    /// Build `count` envs and check that a policy emitting `policy_action_size`
    /// values per env fits them.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ActionArity`] on mismatch, or the first error
    /// from resetting an env.
    pub fn new_with(
        mut make_env: impl FnMut(usize) -> Result<E, ConfigError>,
        count: usize,
        policy_action_size: usize,
    ) -> Result<Self, AgentError> {
        let mut envs = Vec::with_capacity(count);
        for i in 0..count {
            envs.push(make_env(i)?);
        }
        let obs_dim = envs.first().map_or(0, Env::obs_size);
        let act_dim = envs.first().map_or(policy_action_size, Env::action_size);
        if act_dim != policy_action_size {
            return Err(ConfigError::ActionArity {
                expected: act_dim,
                actual: policy_action_size,
            }
            .into());
        }
        let obs = envs.iter_mut().map(Env::reset).collect::<Result<Vec<_>, _>>()?;
        Ok(Self { envs, obs, obs_dim, act_dim, poisoned: false })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.envs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.envs.is_empty()
    }

    #[must_use]
    pub fn obs_dim(&self) -> usize {
        self.obs_dim
    }

    #[must_use]
    pub fn envs(&self) -> &[E] {
        &self.envs
    }

    /// Current observations, flattened row by row.
    #[must_use]
    pub fn observations(&self) -> Vec<f32> {
        self.obs.iter().flatten().copied().collect()
    }

    /// Step every env with its slice of `actions` (`len * action_size` values).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ActionArity`] if `actions` has the wrong length,
    /// [`AgentError::BatchPoisoned`] once an earlier step has failed, otherwise
    /// the first fatal env error.
    pub fn step(&mut self, actions: &[f32]) -> Result<BatchStep, AgentError> {
        if self.poisoned {
            return Err(AgentError::BatchPoisoned);
        }
        if self.envs.is_empty() {
            return Ok(BatchStep::default());
        }
        if actions.len() != self.envs.len() * self.act_dim {
            return Err(ConfigError::ActionArity {
                expected: self.envs.len() * self.act_dim,
                actual: actions.len(),
            }
            .into());
        }
        let result = self.step_all(actions);
        self.poisoned = result.is_err();
        result
    }

    fn step_all(&mut self, actions: &[f32]) -> Result<BatchStep, AgentError> {
        let mut rewards = Vec::with_capacity(self.envs.len());
        let mut dones = Vec::with_capacity(self.envs.len());
        let rows = self.envs.iter_mut().zip(&mut self.obs);
        for ((env, obs), action) in rows.zip(actions.chunks(self.act_dim)) {
            let t = env.step(action)?;
            rewards.push(t.reward);
            dones.push(t.done);
            *obs = if t.done { env.reset()? } else { t.obs };
        }
        Ok(BatchStep { obs: self.observations(), rewards, dones })
    }
}
