//! Listener interface.
use crate::{history::HistoryProcessor, LearningAgentConfig, Observation, Policy};
use anyhow::Result;

/// Response of a listener to a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerResponse {
    /// Keep running the episode.
    Continue,

    /// End the episode at the next step boundary.
    Stop,
}

/// What listeners learn about a step that was just taken.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepInfo {
    /// Reward of the step.
    pub reward: f64,

    /// Flag denoting if the step ended the episode.
    pub is_terminal: bool,

    /// Whether the observation the step was taken on was skipped.
    pub is_skipped: bool,
}

/// View of a [`LearningAgent`](crate::LearningAgent) handed to listeners.
pub struct AgentContext<'a, A> {
    id: &'a str,
    training_name: &'a str,
    mdp_name: &'a str,
    config: &'a LearningAgentConfig,
    policy: &'a dyn Policy<A>,
    history: Option<&'a mut (dyn HistoryProcessor + 'static)>,
    episode_count: usize,
    episode_step_count: usize,
    total_step_count: usize,
}

impl<'a, A> AgentContext<'a, A> {
    /// Constructs a context with all counters at zero and no history processor.
    pub fn new(
        id: &'a str,
        training_name: &'a str,
        mdp_name: &'a str,
        config: &'a LearningAgentConfig,
        policy: &'a dyn Policy<A>,
    ) -> Self {
        Self {
            id,
            training_name,
            mdp_name,
            config,
            policy,
            history: None,
            episode_count: 0,
            episode_step_count: 0,
            total_step_count: 0,
        }
    }

    /// Sets the history processor.
    pub fn history(mut self, history: Option<&'a mut (dyn HistoryProcessor + 'static)>) -> Self {
        self.history = history;
        self
    }

    /// Sets the episode count, the step count of the episode and the total step count.
    pub fn counts(mut self, episode: usize, episode_step: usize, total_step: usize) -> Self {
        self.episode_count = episode;
        self.episode_step_count = episode_step;
        self.total_step_count = total_step;
        self
    }

    /// Identifier of the agent.
    pub fn id(&self) -> &str {
        self.id
    }

    /// Name of the training procedure, written in checkpoint metadata.
    pub fn training_name(&self) -> &str {
        self.training_name
    }

    /// Name of the environment.
    pub fn mdp_name(&self) -> &str {
        self.mdp_name
    }

    /// Configuration of the agent.
    pub fn configuration(&self) -> &LearningAgentConfig {
        self.config
    }

    /// Policy of the agent.
    pub fn policy(&self) -> &dyn Policy<A> {
        self.policy
    }

    /// History processor of the agent, if any.
    pub fn history_processor(&mut self) -> Option<&mut (dyn HistoryProcessor + 'static)> {
        self.history.as_deref_mut()
    }

    /// The number of episodes the agent finished before the current one.
    pub fn episode_count(&self) -> usize {
        self.episode_count
    }

    /// The number of steps taken in the current episode.
    pub fn episode_step_count(&self) -> usize {
        self.episode_step_count
    }

    /// The number of steps taken by the agent over all episodes.
    pub fn total_step_count(&self) -> usize {
        self.total_step_count
    }
}

/// Observes a [`LearningAgent`](crate::LearningAgent) for side effects.
///
/// All methods have no-op defaults. An error returned from a callback is
/// logged by the agent and treated as [`ListenerResponse::Stop`]; it never
/// aborts the run.
pub trait AgentListener<A> {
    /// Called after the environment is reset, before the first step.
    fn on_before_episode(&mut self, _ctx: &mut AgentContext<'_, A>) -> Result<ListenerResponse> {
        Ok(ListenerResponse::Continue)
    }

    /// Called before a step, with the observation the step will be taken on.
    fn on_before_step(
        &mut self,
        _ctx: &mut AgentContext<'_, A>,
        _obs: &Observation,
    ) -> Result<ListenerResponse> {
        Ok(ListenerResponse::Continue)
    }

    /// Called after a step.
    fn on_after_step(
        &mut self,
        _ctx: &mut AgentContext<'_, A>,
        _step: &StepInfo,
    ) -> Result<ListenerResponse> {
        Ok(ListenerResponse::Continue)
    }

    /// Called after the episode ended.
    fn on_after_episode(&mut self, _ctx: &mut AgentContext<'_, A>) -> Result<()> {
        Ok(())
    }
}
