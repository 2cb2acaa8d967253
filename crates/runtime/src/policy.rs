//! Scripted policies for driving episodes without a trained network.

use agent::{ACTION_SIZE, OBS_SIZE};
use clap::ValueEnum;

/// Maps one observation to one raw action.
pub trait Policy {
    fn act(&mut self, obs: &[f32]) -> [f32; ACTION_SIZE];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PolicyKind {
    /// Steer toward the target and thrust when facing it.
    Seek,
    /// Uniform random actions.
    Random,
}

impl PolicyKind {
    #[must_use]
    pub fn build(self, seed: u64) -> Box<dyn Policy> {
        match self {
            Self::Seek => Box::new(SeekPolicy::default()),
            Self::Random => Box::new(RandomPolicy::new(seed)),
        }
    }
}

/// Proportional steering on the heading error to the target.
#[derive(Clone, Copy, Debug)]
pub struct SeekPolicy {
    pub turn_gain: f32,
}

impl Default for SeekPolicy {
    fn default() -> Self {
        Self { turn_gain: 0.1 }
    }
}

impl Policy for SeekPolicy {
    fn act(&mut self, obs: &[f32]) -> [f32; ACTION_SIZE] {
        debug_assert_eq!(obs.len(), OBS_SIZE);
        let (dx, dz) = (obs[7], obs[9]);
        let heading_error = dx.atan2(dz);
        // thrust scales with how squarely the agent faces the target
        [dz, heading_error * self.turn_gain]
    }
}

pub struct RandomPolicy {
    rng: fastrand::Rng,
}

impl RandomPolicy {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { rng: fastrand::Rng::with_seed(seed) }
    }
}

impl Policy for RandomPolicy {
    fn act(&mut self, _obs: &[f32]) -> [f32; ACTION_SIZE] {
        [self.rng.f32() * 2.0 - 1.0, (self.rng.f32() * 2.0 - 1.0) * 0.01]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs_with_direction(dx: f32, dz: f32) -> Vec<f32> {
        let mut obs = vec![0.0; OBS_SIZE];
        obs[7] = dx;
        obs[9] = dz;
        obs
    }

    #[test]
    fn seek_thrusts_straight_at_target_ahead() {
        let [thrust, turn] = SeekPolicy::default().act(&obs_with_direction(0.0, 1.0));
        assert_eq!(thrust, 1.0);
        assert_eq!(turn, 0.0);
    }

    #[test]
    fn seek_turns_toward_target_on_the_right() {
        let [thrust, turn] = SeekPolicy::default().act(&obs_with_direction(1.0, 0.0));
        assert_eq!(thrust, 0.0);
        assert!(turn > 0.0);
    }

    #[test]
    fn random_actions_stay_in_range() {
        let mut policy = RandomPolicy::new(5);
        for _ in 0..100 {
            let [thrust, turn] = policy.act(&[0.0; OBS_SIZE]);
            assert!((-1.0..=1.0).contains(&thrust));
            assert!((-0.01..=0.01).contains(&turn));
        }
    }
}
