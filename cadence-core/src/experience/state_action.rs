//! Experience handler storing `(observation, action, reward, is_terminal)` tuples.
use super::{ExperienceHandler, ExperienceHandlerConfig};
use crate::Observation;
use anyhow::Result;

/// One recorded step.
#[derive(Clone, Debug, PartialEq)]
pub struct StateActionReward<A> {
    /// Observation the action was decided on.
    pub observation: Observation,

    /// Action taken.
    pub action: A,

    /// Reward accumulated since the previous recorded step.
    pub reward: f64,

    /// Flag denoting if the step ended the episode.
    pub is_terminal: bool,
}

/// Buffers [`StateActionReward`]s in insertion order.
///
/// A batch is ready when `batch_size` experiences are buffered, or when the
/// final observation of the episode has been set and anything is buffered,
/// so the trailing part of an episode is never dropped.
#[derive(Debug)]
pub struct StateActionExperienceHandler<A> {
    batch_size: usize,
    is_final_observation_set: bool,
    buffer: Vec<StateActionReward<A>>,
}

impl<A> StateActionExperienceHandler<A> {
    /// Builds a handler.
    pub fn build(config: &ExperienceHandlerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            batch_size: config.batch_size,
            is_final_observation_set: false,
            buffer: Vec::with_capacity(config.batch_size),
        })
    }

    /// Returns the batch size.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }
}

impl<A> ExperienceHandler<A> for StateActionExperienceHandler<A> {
    type Experience = StateActionReward<A>;

    fn add_experience(&mut self, obs: Observation, action: A, reward: f64, is_terminal: bool) {
        self.buffer.push(StateActionReward {
            observation: obs,
            action,
            reward,
            is_terminal,
        });
    }

    fn set_final_observation(&mut self, _obs: &Observation) {
        self.is_final_observation_set = true;
    }

    fn training_batch_size(&self) -> usize {
        self.buffer.len()
    }

    fn is_training_batch_ready(&self) -> bool {
        self.buffer.len() >= self.batch_size
            || (self.is_final_observation_set && !self.buffer.is_empty())
    }

    fn generate_training_batch(&mut self) -> Vec<Self::Experience> {
        std::mem::take(&mut self.buffer)
    }

    fn reset(&mut self) {
        self.buffer.clear();
        self.is_final_observation_set = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler(batch_size: usize) -> StateActionExperienceHandler<usize> {
        let config = ExperienceHandlerConfig::default().batch_size(batch_size);
        StateActionExperienceHandler::build(&config).unwrap()
    }

    fn add(h: &mut StateActionExperienceHandler<usize>, i: usize) {
        h.add_experience(Observation::new(vec![i as f64]), i, i as f64 * 0.5, false);
    }

    #[test]
    fn test_readiness_without_final_observation() {
        let mut h = handler(3);
        assert!(!h.is_training_batch_ready());
        add(&mut h, 0);
        add(&mut h, 1);
        assert!(!h.is_training_batch_ready());
        add(&mut h, 2);
        assert!(h.is_training_batch_ready());
    }

    #[test]
    fn test_final_observation_makes_partial_batch_ready() {
        let mut h = handler(8);
        h.set_final_observation(&Observation::new(vec![0.0]));
        assert!(!h.is_training_batch_ready());
        add(&mut h, 0);
        assert!(h.is_training_batch_ready());
        assert_eq!(h.training_batch_size(), 1);
    }

    #[test]
    fn test_batch_of_ten_with_size_eight() {
        let mut h = handler(8);
        for i in 0..8 {
            assert!(!h.is_training_batch_ready());
            add(&mut h, i);
        }
        assert!(h.is_training_batch_ready());
        let batch = h.generate_training_batch();
        let actions: Vec<usize> = batch.iter().map(|e| e.action).collect();
        assert_eq!(actions, (0..8).collect::<Vec<_>>());
        assert_eq!(h.training_batch_size(), 0);

        add(&mut h, 8);
        add(&mut h, 9);
        assert_eq!(h.training_batch_size(), 2);
        assert!(!h.is_training_batch_ready());
    }

    #[test]
    fn test_generate_drains_everything() {
        let mut h = handler(8);
        for i in 0..10 {
            add(&mut h, i);
        }
        assert_eq!(h.generate_training_batch().len(), 10);
        assert!(h.generate_training_batch().is_empty());
        assert_eq!(h.training_batch_size(), 0);
    }

    #[test]
    fn test_generate_twice() {
        let mut h = handler(4);
        add(&mut h, 0);
        add(&mut h, 1);
        let batch = h.generate_training_batch();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].observation, Observation::new(vec![0.0]));
        assert_eq!(batch[1].reward, 0.5);
        assert!(h.generate_training_batch().is_empty());
        assert_eq!(h.training_batch_size(), 0);
    }

    #[test]
    fn test_reset_clears_flag_and_buffer() {
        let mut h = handler(4);
        add(&mut h, 0);
        h.set_final_observation(&Observation::new(vec![0.0]));
        assert!(h.is_training_batch_ready());
        h.reset();
        assert_eq!(h.training_batch_size(), 0);
        add(&mut h, 1);
        assert!(!h.is_training_batch_ready());
    }
}
