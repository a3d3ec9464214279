//! Periodic checkpoints of an agent.
//!
//! [`CheckpointListener`] saves, every [`save_frequency`] steps, a zip archive
//! to `<data_root>/model/<agent id>-<total steps>.training` holding the
//! entries below. When the agent has a history processor, it also records
//! each episode to `<data_root>/video/video-<agent id>-<episode>.mp4`.
//!
//! | Entry                      | Content                                        |
//! |----------------------------|------------------------------------------------|
//! | `agentConfiguration.json`  | [`LearningAgentConfig`](crate::LearningAgentConfig) as JSON |
//! | `agentInformation.json`    | [`CheckpointInfo`] as JSON                     |
//! | `policy.bin`               | Serialized network, when the policy has one    |
//!
//! [`save_frequency`]: CheckpointConfig::save_frequency
mod config;
mod listener;
mod writer;
pub use config::CheckpointConfig;
pub use listener::{CheckpointInfo, CheckpointListener};
pub use writer::{read_checkpoint_entry, Checkpoint, CheckpointWriter};

/// Name of the archive entry holding the agent configuration.
pub const CONFIGURATION_ENTRY: &str = "agentConfiguration.json";

/// Name of the archive entry holding [`CheckpointInfo`].
pub const INFORMATION_ENTRY: &str = "agentInformation.json";

/// Name of the archive entry holding the serialized network.
pub const POLICY_ENTRY: &str = "policy.bin";
