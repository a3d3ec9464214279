//! Default learning behavior.
use super::UpdateRule;
use crate::{experience::ExperienceHandler, LearningBehavior, Observation};
use anyhow::Result;
use log::debug;
use std::marker::PhantomData;

/// Feeds experience into an [`ExperienceHandler`] and runs an [`UpdateRule`]
/// every time a training batch is ready.
///
/// * At the start of an episode the handler is reset, so nothing leaks from a
///   previous run.
/// * Each new experience is added to the handler, then a ready batch is drained.
/// * At the end of an episode the final observation is set on the handler,
///   so the trailing partial batch is drained as well.
pub struct DefaultLearningBehavior<A, H, U> {
    experience_handler: H,
    update_rule: U,
    phantom: PhantomData<A>,
}

impl<A, H, U> DefaultLearningBehavior<A, H, U>
where
    H: ExperienceHandler<A>,
    U: UpdateRule<H::Experience>,
{
    /// Constructs a learning behavior.
    pub fn new(experience_handler: H, update_rule: U) -> Self {
        Self {
            experience_handler,
            update_rule,
            phantom: PhantomData,
        }
    }

    /// Returns the experience handler.
    pub fn experience_handler(&self) -> &H {
        &self.experience_handler
    }

    /// Returns the update rule.
    pub fn update_rule(&self) -> &U {
        &self.update_rule
    }

    fn update_if_ready(&mut self) -> Result<()> {
        if self.experience_handler.is_training_batch_ready() {
            let batch = self.experience_handler.generate_training_batch();
            let n = batch.len();
            let record = self.update_rule.update(batch)?;
            debug!(
                "Update {} with a batch of {} experiences: {:?}",
                self.update_rule.update_count(),
                n,
                record
            );
        }
        Ok(())
    }
}

impl<A, H, U> LearningBehavior<A> for DefaultLearningBehavior<A, H, U>
where
    H: ExperienceHandler<A>,
    U: UpdateRule<H::Experience>,
{
    fn handle_episode_start(&mut self) -> Result<()> {
        self.experience_handler.reset();
        Ok(())
    }

    fn handle_new_experience(
        &mut self,
        obs: Observation,
        action: A,
        reward: f64,
        is_terminal: bool,
    ) -> Result<()> {
        self.experience_handler
            .add_experience(obs, action, reward, is_terminal);
        self.update_if_ready()
    }

    fn handle_episode_end(&mut self, final_obs: &Observation) -> Result<()> {
        self.experience_handler.set_final_observation(final_obs);
        self.update_if_ready()
    }

    fn notify_before_step(&mut self) -> Result<()> {
        Ok(())
    }
}
