#![warn(missing_docs)]
//! Episodic agent-environment interaction loop with experience batching.
//!
//! A [`LearningAgent`] repeatedly observes an [`Environment`] through a
//! [`TransformProcess`], decides actions with a [`Policy`] and notifies a
//! [`LearningBehavior`] of every recorded step. The default learning behavior
//! buffers experience in an [`ExperienceHandler`](experience::ExperienceHandler)
//! and hands training batches to an [`UpdateRule`](learning::UpdateRule)
//! when they are ready.
//!
//! Observations may be *skipped* by the transform process. No decision is
//! taken on a skipped observation: the previous action is repeated and its
//! reward is added to the next recorded experience.
//!
//! Side effects such as checkpoints and episode recordings are done by
//! [`AgentListener`](listener::AgentListener)s, see
//! [`CheckpointListener`](checkpoint::CheckpointListener).
pub mod checkpoint;
pub mod error;
pub mod experience;
pub mod history;
pub mod learning;
pub mod listener;
pub mod policy;
pub mod record;

mod base;
pub use base::{
    ActionSpace, Environment, FrameSkip, IdentityTransform, IntegerActionSpace, LearningBehavior,
    NeuralNet, Observation, Policy, Schema, StepResult, TransformProcess,
};

mod agent;
pub use agent::{LearningAgent, LearningAgentConfig};
pub use error::{AgentError, PolicyError};
