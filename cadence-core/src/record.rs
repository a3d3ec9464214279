//! Records of metrics produced by the interaction loop.
//!
//! A [`Record`] is a set of named values. [`LearningAgent::run()`] returns one
//! summarizing the episode, and an [`UpdateRule`] returns one per update.
//!
//! ```rust
//! use cadence_core::record::{Record, RecordValue};
//!
//! let mut record = Record::from_scalar("episode_reward", 12.5);
//! record.insert("episode_steps", RecordValue::Scalar(30.0));
//! assert_eq!(record.get_scalar("episode_steps").unwrap(), 30.0);
//! ```
//!
//! [`LearningAgent::run()`]: crate::LearningAgent::run
//! [`UpdateRule`]: crate::learning::UpdateRule
mod base;
pub use base::{Record, RecordValue};
