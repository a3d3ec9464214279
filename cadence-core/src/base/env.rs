//! Environment.
use super::{Schema, StepResult};
use anyhow::Result;

/// Represents an environment, typically an MDP.
///
/// All methods are blocking. An implementation backed by an asynchronous
/// simulator must wait for the result before returning so that the
/// interaction loop keeps its step ordering.
pub trait Environment {
    /// Action accepted by the environment.
    type Action: Clone;

    /// Raw state emitted by the environment, before any transformation.
    type RawState;

    /// Returns the schema describing the legal actions.
    fn schema(&self) -> &Schema<Self::Action>;

    /// Resets the environment and returns a fresh raw state.
    fn reset(&mut self) -> Result<Self::RawState>;

    /// Performes an environment step.
    fn step(&mut self, action: &Self::Action) -> Result<StepResult<Self::RawState>>;

    /// Returns `true` if the current episode is over.
    fn is_episode_finished(&self) -> bool;

    /// Name of the environment, written in checkpoint metadata.
    ///
    /// Defaults to the name of the implementing type.
    fn name(&self) -> String {
        short_type_name::<Self>()
    }
}

/// Returns the last path segment of the name of `T`, without generic parameters.
pub(crate) fn short_type_name<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}
