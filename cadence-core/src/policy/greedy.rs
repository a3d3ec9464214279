//! Greedy policy.
use crate::{error::PolicyError, ActionSpace, NeuralNet, Observation, Policy};
use std::sync::Arc;

/// Always takes the action the action space decodes from the network output.
pub struct GreedyPolicy<N, A> {
    net: N,
    action_space: Arc<dyn ActionSpace<A> + Send + Sync>,
}

impl<N: NeuralNet, A> GreedyPolicy<N, A> {
    /// Constructs a greedy policy.
    pub fn new(net: N, action_space: Arc<dyn ActionSpace<A> + Send + Sync>) -> Self {
        Self { net, action_space }
    }

    /// Returns the network.
    pub fn net(&self) -> &N {
        &self.net
    }
}

impl<N: NeuralNet, A> Policy<A> for GreedyPolicy<N, A> {
    fn next_action(&mut self, obs: &Observation) -> Result<A, PolicyError> {
        if obs.is_skipped() {
            return Err(PolicyError::SkippedObservation);
        }
        let output = self.net.output(obs).map_err(PolicyError::NeuralNet)?;
        self.action_space.from_array(&output)
    }

    fn reset(&mut self) {
        self.net.reset();
    }

    fn neural_net(&self) -> Option<&dyn NeuralNet> {
        Some(&self.net)
    }
}
