//! Actor-critic policy.
use crate::{error::PolicyError, ActionSpace, NeuralNet, Observation, Policy};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::sync::Arc;

/// Samples an index from a categorical distribution.
///
/// Returns the smallest index `i` such that `output[0] + ... + output[i]`
/// exceeds `draw`, where `draw` is expected to be uniform in `[0, 1)`.
/// If the cumulative sum never exceeds `draw`, `output` is not a probability
/// distribution and [`PolicyError::InvalidDistribution`] is returned.
pub fn sample_categorical(output: &[f32], draw: f32) -> Result<usize, PolicyError> {
    let mut cumsum = 0f32;
    for (i, p) in output.iter().enumerate() {
        cumsum += *p;
        if draw < cumsum {
            return Ok(i);
        }
    }

    Err(PolicyError::InvalidDistribution {
        output: output.to_vec(),
        draw,
    })
}

/// Policy of actor-critic agents.
///
/// The output of the network is the probability of each discrete action.
/// In training mode an action is sampled from it; otherwise the action is
/// decoded deterministically by the action space.
pub struct ActorCriticPolicy<N, A, R = StdRng> {
    net: N,
    action_space: Arc<dyn ActionSpace<A> + Send + Sync>,
    is_training: bool,
    rng: R,
}

impl<N, A> ActorCriticPolicy<N, A, StdRng>
where
    N: NeuralNet,
{
    /// Constructs a policy with a random number generator seeded by `seed`.
    pub fn with_seed(
        net: N,
        action_space: Arc<dyn ActionSpace<A> + Send + Sync>,
        is_training: bool,
        seed: u64,
    ) -> Self {
        Self::new(net, action_space, is_training, StdRng::seed_from_u64(seed))
    }
}

impl<N, A, R> ActorCriticPolicy<N, A, R>
where
    N: NeuralNet,
    R: Rng,
{
    /// Constructs a policy drawing random values from `rng`.
    pub fn new(
        net: N,
        action_space: Arc<dyn ActionSpace<A> + Send + Sync>,
        is_training: bool,
        rng: R,
    ) -> Self {
        Self {
            net,
            action_space,
            is_training,
            rng,
        }
    }

    /// Returns `true` if actions are sampled.
    pub fn is_training(&self) -> bool {
        self.is_training
    }

    /// Switches between sampling (`true`) and deterministic decoding (`false`).
    pub fn set_training(&mut self, is_training: bool) {
        self.is_training = is_training;
    }
}

impl<N, A, R> Policy<A> for ActorCriticPolicy<N, A, R>
where
    N: NeuralNet,
    R: Rng,
{
    fn next_action(&mut self, obs: &Observation) -> Result<A, PolicyError> {
        if obs.is_skipped() {
            return Err(PolicyError::SkippedObservation);
        }
        let output = self.net.output(obs).map_err(PolicyError::NeuralNet)?;
        if !self.is_training {
            return self.action_space.from_array(&output);
        }

        let draw: f32 = self.rng.gen();
        let ix = sample_categorical(&output, draw)?;
        Ok(self.action_space.from_integer(ix))
    }

    fn reset(&mut self) {
        self.net.reset();
    }

    fn neural_net(&self) -> Option<&dyn NeuralNet> {
        Some(&self.net)
    }
}
