//! Observation.
use serde::{Deserialize, Serialize};

/// An observation of an environment, produced by a
/// [`TransformProcess`](super::TransformProcess).
///
/// An observation either wraps a feature vector or is *skipped*. A skipped
/// observation tells the agent that no decision is needed at this step
/// (frame skipping, for example): it carries no features and is never given
/// to a [`Policy`](super::Policy).
///
/// Observations are plain owned values. Cloning produces a fresh, independent
/// copy, so two observations are never aliased.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    data: Option<Vec<f64>>,
}

impl Observation {
    /// Constructs an observation with the given features.
    pub fn new(data: Vec<f64>) -> Self {
        Self { data: Some(data) }
    }

    /// Constructs a skipped observation.
    pub fn skipped() -> Self {
        Self { data: None }
    }

    /// Returns `true` if this observation is skipped.
    pub fn is_skipped(&self) -> bool {
        self.data.is_none()
    }

    /// Returns the features, or `None` for a skipped observation.
    pub fn data(&self) -> Option<&[f64]> {
        self.data.as_deref()
    }

    /// Consumes the observation and returns its features.
    pub fn into_data(self) -> Option<Vec<f64>> {
        self.data
    }

    /// Returns the number of features. A skipped observation has none.
    pub fn len(&self) -> usize {
        self.data.as_ref().map_or(0, Vec::len)
    }

    /// Returns `true` if the observation has no features.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<f64>> for Observation {
    fn from(data: Vec<f64>) -> Self {
        Self::new(data)
    }
}

#[cfg(test)]
mod tests {
    use super::Observation;

    #[test]
    fn test_skipped_observation_has_no_payload() {
        let obs = Observation::skipped();
        assert!(obs.is_skipped());
        assert!(obs.data().is_none());
        assert_eq!(obs.len(), 0);
    }

    #[test]
    fn test_clone_is_independent() {
        let obs = Observation::new(vec![1.0, 2.0]);
        let mut data = obs.clone().into_data().unwrap();
        data[0] = 5.0;
        assert_eq!(obs.data(), Some(&[1.0, 2.0][..]));
    }
}
