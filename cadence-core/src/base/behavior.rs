//! Learning behavior.
use super::Observation;
use anyhow::Result;

/// Consumes the notifications of a [`LearningAgent`](crate::LearningAgent)
/// and triggers training.
///
/// For every run of the agent, [`handle_episode_start`] is called exactly once
/// before any other method and [`handle_episode_end`] exactly once after all
/// the others.
///
/// [`handle_episode_start`]: LearningBehavior::handle_episode_start
/// [`handle_episode_end`]: LearningBehavior::handle_episode_end
pub trait LearningBehavior<A> {
    /// Called when an episode starts.
    fn handle_episode_start(&mut self) -> Result<()>;

    /// Called once per non-skipped step with the observation the action was
    /// decided on, the action, the reward accumulated since the previous
    /// experience and the terminal flag of the step.
    fn handle_new_experience(
        &mut self,
        obs: Observation,
        action: A,
        reward: f64,
        is_terminal: bool,
    ) -> Result<()>;

    /// Called when an episode ends, with the last observation of the episode.
    fn handle_episode_end(&mut self, final_obs: &Observation) -> Result<()>;

    /// Called before the environment is stepped with a decided action.
    fn notify_before_step(&mut self) -> Result<()>;
}
