//! Action space.
use crate::error::PolicyError;
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, sync::Arc};

/// The domain of legal actions of an environment.
pub trait ActionSpace<A>: Debug {
    /// Returns the action taken when no decision has been made yet.
    ///
    /// The agent carries this action over skipped observations at the start
    /// of an episode.
    fn no_op(&self) -> A;

    /// Returns the action with the given index.
    fn from_integer(&self, index: usize) -> A;

    /// Decodes an action deterministically from the output of a network.
    ///
    /// The default implementation takes the index of the maximum value, the
    /// first one in case of ties.
    fn from_array(&self, output: &[f32]) -> Result<A, PolicyError> {
        let ix = argmax(output).ok_or(PolicyError::EmptyOutput)?;
        Ok(self.from_integer(ix))
    }

    /// Returns the number of actions.
    fn size(&self) -> usize;
}

fn argmax(xs: &[f32]) -> Option<usize> {
    xs.iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f32)>, (i, &x)| match best {
            Some((_, b)) if b >= x => best,
            _ => Some((i, x)),
        })
        .map(|(i, _)| i)
}

/// Discrete actions `0..size`, represented as `usize`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegerActionSpace {
    size: usize,
    no_op: usize,
}

impl IntegerActionSpace {
    /// Constructs an action space of `size` actions with `no_op` as the no-op action.
    pub fn new(size: usize, no_op: usize) -> Self {
        Self { size, no_op }
    }
}

impl ActionSpace<usize> for IntegerActionSpace {
    fn no_op(&self) -> usize {
        self.no_op
    }

    fn from_integer(&self, index: usize) -> usize {
        index
    }

    fn size(&self) -> usize {
        self.size
    }
}

/// Describes what an environment accepts.
///
/// It is supplied once by the environment and does not change while an agent
/// runs on it.
#[derive(Debug)]
pub struct Schema<A> {
    action_space: Arc<dyn ActionSpace<A> + Send + Sync>,
}

impl<A> Clone for Schema<A> {
    fn clone(&self) -> Self {
        Self {
            action_space: self.action_space.clone(),
        }
    }
}

impl<A> Schema<A> {
    /// Constructs a schema with the given action space.
    pub fn new(action_space: impl ActionSpace<A> + Send + Sync + 'static) -> Self {
        Self {
            action_space: Arc::new(action_space),
        }
    }

    /// Returns the action space.
    pub fn action_space(&self) -> &(dyn ActionSpace<A> + Send + Sync) {
        self.action_space.as_ref()
    }

    /// Returns a shared handle to the action space, for policies decoding actions.
    pub fn shared_action_space(&self) -> Arc<dyn ActionSpace<A> + Send + Sync> {
        self.action_space.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_array_takes_first_maximum() {
        let space = IntegerActionSpace::new(4, 0);
        assert_eq!(space.from_array(&[0.1, 0.7, 0.2, 0.7]).unwrap(), 1);
        assert_eq!(space.from_array(&[-3.0, -1.0, -2.0]).unwrap(), 1);
    }

    #[test]
    fn test_from_array_empty_output() {
        let space = IntegerActionSpace::new(2, 0);
        assert!(matches!(
            space.from_array(&[]),
            Err(PolicyError::EmptyOutput)
        ));
    }

    #[test]
    fn test_schema_no_op() {
        let schema = Schema::new(IntegerActionSpace::new(3, 2));
        assert_eq!(schema.action_space().no_op(), 2);
        assert_eq!(schema.clone().action_space().size(), 3);
    }
}
