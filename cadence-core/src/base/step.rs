//! Environment step.

/// Outcome of a single environment step.
///
/// An environment emits a [`StepResult`] every time an action is applied to it.
/// The raw state is turned into an [`Observation`](super::Observation) by a
/// [`TransformProcess`](super::TransformProcess) before the agent sees it.
#[derive(Clone, Debug, PartialEq)]
pub struct StepResult<S> {
    /// Raw state of the environment after the step.
    pub raw_state: S,

    /// Reward of the step.
    pub reward: f64,

    /// Flag denoting if the step ended the episode.
    pub is_terminal: bool,
}

impl<S> StepResult<S> {
    /// Constructs a [`StepResult`] object.
    pub fn new(raw_state: S, reward: f64, is_terminal: bool) -> Self {
        Self {
            raw_state,
            reward,
            is_terminal,
        }
    }
}
