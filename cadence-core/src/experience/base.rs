//! Experience handler interface.
use crate::Observation;

/// Accumulates experience and decides when a training batch is ready.
///
/// A handler is used by a single writer and a single reader. It does no
/// locking; callers sharing one across threads must serialize access.
pub trait ExperienceHandler<A> {
    /// The unit of experience stored by the handler.
    type Experience;

    /// Appends one experience.
    fn add_experience(&mut self, obs: Observation, action: A, reward: f64, is_terminal: bool);

    /// Marks that the terminal state of the current episode has been reached.
    ///
    /// No experience is added; a non-empty buffer becomes ready as a batch.
    fn set_final_observation(&mut self, obs: &Observation);

    /// Returns the number of buffered experiences.
    fn training_batch_size(&self) -> usize;

    /// Returns `true` if the buffered experience should be drained for training.
    fn is_training_batch_ready(&self) -> bool;

    /// Returns the buffered experience in temporal order and clears the buffer.
    ///
    /// It may be called when the batch is not ready and returns whatever is
    /// buffered, possibly nothing.
    fn generate_training_batch(&mut self) -> Vec<Self::Experience>;

    /// Clears the buffer and the final-observation flag.
    fn reset(&mut self);
}
