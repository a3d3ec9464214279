//! Errors in the library.
use thiserror::Error;

/// Errors raised when reading values out of a [`Record`](crate::record::Record).
#[derive(Error, Debug)]
pub enum RecordError {
    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKeyError(String),

    /// Record value type error.
    #[error("Record value type error: {0}")]
    RecordValueTypeError(String),
}

/// Errors raised while a [`Policy`](crate::Policy) decides an action.
#[derive(Error, Debug)]
pub enum PolicyError {
    /// The network output could not be read as a categorical distribution.
    ///
    /// The cumulative sum of `output` never exceeded the uniform draw `draw`.
    #[error("Output from network is not a probability distribution: {output:?} (draw = {draw})")]
    InvalidDistribution {
        /// Output of the network.
        output: Vec<f32>,

        /// Uniform random value the distribution was sampled with.
        draw: f32,
    },

    /// A skipped observation carries no features and can not be decided on.
    #[error("A skipped observation was given to a policy")]
    SkippedObservation,

    /// The network returned no values to decode an action from.
    #[error("Output from network is empty")]
    EmptyOutput,

    /// The underlying network failed.
    #[error("Neural network failed: {0:#}")]
    NeuralNet(anyhow::Error),
}

/// Errors aborting [`LearningAgent::run()`](crate::LearningAgent::run).
///
/// Each variant names the collaborator that failed. Failures of listeners and
/// checkpoint writes are recovered inside the loop and never appear here.
#[derive(Error, Debug)]
pub enum AgentError {
    /// The environment failed to reset or step.
    #[error("Environment failed: {0:#}")]
    Environment(anyhow::Error),

    /// The transform process failed to build an observation.
    #[error("Transform process failed: {0:#}")]
    TransformProcess(anyhow::Error),

    /// The policy failed to decide an action.
    #[error("Policy failed: {0}")]
    Policy(#[from] PolicyError),

    /// The learning behavior failed to handle a notification.
    #[error("Learning behavior failed: {0:#}")]
    LearningBehavior(anyhow::Error),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
