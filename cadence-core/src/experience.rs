//! Buffering of experience and batch readiness.
//!
//! A [`LearningBehavior`](crate::LearningBehavior) pushes one experience per
//! recorded step into an [`ExperienceHandler`] and drains a training batch when
//! the handler says it is ready, independently of the per-step cadence of the
//! agent.
mod base;
mod config;
mod state_action;
pub use base::ExperienceHandler;
pub use config::ExperienceHandlerConfig;
pub use state_action::{StateActionExperienceHandler, StateActionReward};
