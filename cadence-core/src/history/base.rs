//! History processor interface.
use crate::Observation;
use anyhow::Result;
use std::path::Path;

/// Keeps recent observations and records episodes.
pub trait HistoryProcessor {
    /// Returns the rolling history, oldest first.
    fn history(&self) -> Vec<Observation>;

    /// Records an observation into the current monitoring session, if any.
    fn record(&mut self, obs: &Observation);

    /// Adds an observation to the rolling history.
    fn add(&mut self, obs: &Observation);

    /// Starts a monitoring session exported to `path`.
    fn start_monitor(&mut self, path: &Path) -> Result<()>;

    /// Ends the monitoring session, if any, and exports what was recorded.
    fn stop_monitor(&mut self) -> Result<()>;

    /// Returns `true` while a monitoring session is open.
    fn is_monitoring(&self) -> bool;
}
