//! Transformation of raw environment states into observations.
use super::Observation;
use anyhow::Result;

/// Maps a raw state of an environment to an [`Observation`].
///
/// `step` is the index of the episode step the raw state belongs to, `0` for
/// the state returned by a reset. `is_terminal` is the terminal flag known so
/// far for that state. The returned observation may be skipped.
pub trait TransformProcess<S> {
    /// Transforms a raw state.
    fn transform(&mut self, raw_state: &S, step: usize, is_terminal: bool) -> Result<Observation>;
}

impl<S, F> TransformProcess<S> for F
where
    F: FnMut(&S, usize, bool) -> Result<Observation>,
{
    fn transform(&mut self, raw_state: &S, step: usize, is_terminal: bool) -> Result<Observation> {
        self(raw_state, step, is_terminal)
    }
}

/// Uses a raw feature vector as it is.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTransform;

impl TransformProcess<Vec<f64>> for IdentityTransform {
    fn transform(&mut self, raw_state: &Vec<f64>, _step: usize, _is_terminal: bool) -> Result<Observation> {
        Ok(Observation::new(raw_state.clone()))
    }
}

/// Skips every step whose index is not a multiple of `skip_frame`.
///
/// Terminal states are never skipped, so the last state of an episode always
/// reaches the learning behavior.
#[derive(Debug, Clone)]
pub struct FrameSkip<T> {
    inner: T,
    skip_frame: usize,
}

impl<T> FrameSkip<T> {
    /// Wraps `inner`, keeping one step out of `skip_frame`.
    ///
    /// # Panics
    ///
    /// Panics if `skip_frame` is zero.
    pub fn new(inner: T, skip_frame: usize) -> Self {
        assert!(skip_frame > 0, "skip_frame must be positive");
        Self { inner, skip_frame }
    }
}

impl<S, T: TransformProcess<S>> TransformProcess<S> for FrameSkip<T> {
    fn transform(&mut self, raw_state: &S, step: usize, is_terminal: bool) -> Result<Observation> {
        if step % self.skip_frame != 0 && !is_terminal {
            Ok(Observation::skipped())
        } else {
            self.inner.transform(raw_state, step, is_terminal)
        }
    }
}
