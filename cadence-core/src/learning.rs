//! Learning behaviors driven by the notifications of a [`LearningAgent`](crate::LearningAgent).
mod default_behavior;
mod update_rule;
pub use default_behavior::DefaultLearningBehavior;
pub use update_rule::UpdateRule;
