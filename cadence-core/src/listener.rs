//! Observers of the interaction loop.
//!
//! An [`AgentListener`] is notified before and after each episode and each
//! step. The step callbacks and the before-episode callback return a
//! [`ListenerResponse`]; [`ListenerResponse::Stop`] ends the episode at the
//! next step boundary, never in the middle of a step.
mod base;
mod list;
pub use base::{AgentContext, AgentListener, ListenerResponse, StepInfo};
pub use list::AgentListenerList;
