//! Multilayer perceptron without any deep learning backend.
//!
//! [`Mlp`] implements [`NeuralNet`](cadence_core::NeuralNet), so it can drive
//! the policies of `cadence-core` and be serialized into checkpoints. Its
//! parameters are typically trained elsewhere and loaded with [`Mlp::load`].
mod mat;
mod mlp;
pub use mat::Mat;
pub use mlp::{Mlp, OutputActivation};
