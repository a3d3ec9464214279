//! Built-in policies backed by a [`NeuralNet`](crate::NeuralNet).
//!
//! * [`GreedyPolicy`] decodes the network output deterministically through the
//!   action space, typically the arg-max. It is used outside of training.
//! * [`ActorCriticPolicy`] reads the network output as a categorical
//!   distribution over discrete actions and samples from it while training.
mod actor_critic;
mod greedy;
pub use actor_critic::{sample_categorical, ActorCriticPolicy};
pub use greedy::GreedyPolicy;
