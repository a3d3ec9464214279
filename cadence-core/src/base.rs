//! Core functionalities.
mod action_space;
mod behavior;
mod env;
mod observation;
mod policy;
mod step;
mod transform;
pub use action_space::{ActionSpace, IntegerActionSpace, Schema};
pub use behavior::LearningBehavior;
pub use env::Environment;
pub(crate) use env::short_type_name;
pub use observation::Observation;
pub use policy::{NeuralNet, Policy};
pub use step::StepResult;
pub use transform::{FrameSkip, IdentityTransform, TransformProcess};
