//! Update rule.
use crate::record::Record;
use anyhow::Result;

/// Updates the parameters of a learner from a batch of experience.
///
/// This is where the network computation lives; the interaction loop only
/// decides when it runs.
pub trait UpdateRule<E> {
    /// Performs an update with `batch`, in temporal order, and returns some information.
    fn update(&mut self, batch: Vec<E>) -> Result<Record>;

    /// Returns the number of updates done so far.
    fn update_count(&self) -> usize;
}
