//! Policy.
use super::Observation;
use crate::error::PolicyError;
use anyhow::Result;
use std::io::Write;

/// A policy on an environment.
///
/// Policy is a mapping from an observation to an action.
/// The mapping can be either of deterministic or stochastic.
pub trait Policy<A> {
    /// Decides an action given a non-skipped observation.
    ///
    /// The observation is not modified. A stochastic policy draws from its own
    /// random number generator, so a seeded generator makes the decisions
    /// reproducible.
    fn next_action(&mut self, obs: &Observation) -> Result<A, PolicyError>;

    /// Clears the recurrent state of the underlying decision function, if any.
    ///
    /// The agent calls this at the start of every episode.
    fn reset(&mut self);

    /// Returns the network behind the policy, if the policy is neural.
    ///
    /// A neural policy is serialized into checkpoint archives.
    fn neural_net(&self) -> Option<&dyn NeuralNet> {
        None
    }
}

/// A network mapping observations to output vectors.
pub trait NeuralNet {
    /// Computes the output for an observation.
    fn output(&mut self, obs: &Observation) -> Result<Vec<f32>>;

    /// Clears recurrent state. Stateless networks do nothing.
    fn reset(&mut self) {}

    /// Serializes the parameters of the network.
    fn save(&self, writer: &mut dyn Write) -> Result<()>;
}
