//! Observation history and episode monitoring.
//!
//! A [`HistoryProcessor`] keeps a rolling history of recent observations and
//! brackets optional recording sessions with [`start_monitor`] and
//! [`stop_monitor`]. The history is kept for debugging and export only; it is
//! never written into checkpoint archives.
//!
//! [`start_monitor`]: HistoryProcessor::start_monitor
//! [`stop_monitor`]: HistoryProcessor::stop_monitor
mod base;
mod rolling;
pub use base::HistoryProcessor;
pub use rolling::{RollingHistoryConfig, RollingHistoryProcessor};
