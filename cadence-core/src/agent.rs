//! Learning agent.
mod config;
use crate::{
    base::short_type_name,
    error::AgentError,
    history::HistoryProcessor,
    listener::{AgentContext, AgentListener, AgentListenerList, StepInfo},
    record::{Record, RecordValue::Scalar},
    Environment, LearningBehavior, Observation, Policy, TransformProcess,
};
pub use config::LearningAgentConfig;
use log::debug;

/// Identity and counters of an agent, handed to listeners.
struct AgentState {
    id: String,
    training_name: String,
    mdp_name: String,
    config: LearningAgentConfig,
    episode_count: usize,
    episode_step_count: usize,
    total_step_count: usize,
}

impl AgentState {
    fn context<'a, A>(
        &'a self,
        policy: &'a dyn Policy<A>,
        history: &'a mut Option<Box<dyn HistoryProcessor>>,
    ) -> AgentContext<'a, A> {
        AgentContext::new(
            &self.id,
            &self.training_name,
            &self.mdp_name,
            &self.config,
            policy,
        )
        .counts(
            self.episode_count,
            self.episode_step_count,
            self.total_step_count,
        )
        .history(history.as_deref_mut())
    }

    fn cap_reached(&self) -> bool {
        self.config
            .max_episode_steps
            .map_or(false, |cap| self.episode_step_count >= cap)
    }
}

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Runs episodes of an [`Environment`], deciding actions with a [`Policy`] and
/// feeding experience to a [`LearningBehavior`].
///
/// # Episode loop
///
/// One call of [`LearningAgent::run()`] runs one episode:
///
/// 1. Reset the step counter of the episode, the environment and the policy.
///    The raw state is transformed with step index `0`. The action carried
///    over skipped observations is set to the no-op of the action space.
/// 2. Call [`LearningBehavior::handle_episode_start()`] and notify listeners
///    of the episode start.
/// 3. While the environment is not finished and the step cap is not reached:
///     1. Notify listeners that a step is about to be taken on the current
///        observation.
///     2. If the observation is skipped, take the carried action. Otherwise
///        ask the policy, then call [`LearningBehavior::notify_before_step()`].
///     3. Step the environment and add the reward to the pending reward.
///     4. Transform the new raw state with the index of the next step and
///        the terminal flag of the step.
///     5. If the observation the step was taken on is not skipped, pass it to
///        [`LearningBehavior::handle_new_experience()`] with the action, the
///        pending reward and the terminal flag, then clear the pending reward.
///     6. Increment the step counters and notify listeners that the step was
///        taken.
/// 4. Call [`LearningBehavior::handle_episode_end()`] with the last
///    observation and notify listeners of the episode end.
///
/// A listener answering [`Stop`] (or failing) ends the loop at the step
/// boundary it was notified at; the episode end is notified as usual.
///
/// ```mermaid
/// stateDiagram-v2
///     [*] --> Idle
///     Idle --> EpisodeRunning: run()
///     EpisodeRunning --> StepPending: handle_episode_start
///     StepPending --> StepTaken: env.step
///     StepTaken --> StepPending: continue
///     StepTaken --> EpisodeEnded: finished, cap or Stop
///     StepPending --> EpisodeEnded: Stop
///     EpisodeEnded --> Idle: handle_episode_end
/// ```
///
/// Errors of the environment, the transform process, the policy and the
/// learning behavior abort the run and are returned as [`AgentError`].
///
/// [`Stop`]: crate::listener::ListenerResponse::Stop
pub struct LearningAgent<E, T, P, B>
where
    E: Environment,
    T: TransformProcess<E::RawState>,
    P: Policy<E::Action>,
    B: LearningBehavior<E::Action>,
{
    env: E,
    transform: T,
    policy: P,
    behavior: B,
    history: Option<Box<dyn HistoryProcessor>>,
    listeners: AgentListenerList<E::Action>,
    state: AgentState,
}

impl<E, T, P, B> LearningAgent<E, T, P, B>
where
    E: Environment,
    T: TransformProcess<E::RawState>,
    P: Policy<E::Action>,
    B: LearningBehavior<E::Action>,
{
    /// Constructs an agent.
    pub fn new(
        env: E,
        transform: T,
        policy: P,
        behavior: B,
        config: LearningAgentConfig,
    ) -> Result<Self, AgentError> {
        config
            .validate()
            .map_err(|e| AgentError::InvalidConfig(e.to_string()))?;
        let mdp_name = env.name();

        Ok(Self {
            env,
            transform,
            policy,
            behavior,
            history: None,
            listeners: AgentListenerList::default(),
            state: AgentState {
                id: "agent".to_string(),
                training_name: short_type_name::<B>(),
                mdp_name,
                config,
                episode_count: 0,
                episode_step_count: 0,
                total_step_count: 0,
            },
        })
    }

    /// Sets the identifier of the agent, used in checkpoint file names.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.state.id = id.into();
        self
    }

    /// Sets the name of the training procedure written in checkpoints.
    ///
    /// Defaults to the type name of the learning behavior.
    pub fn with_training_name(mut self, name: impl Into<String>) -> Self {
        self.state.training_name = name.into();
        self
    }

    /// Sets a history processor.
    pub fn with_history_processor(mut self, history: impl HistoryProcessor + 'static) -> Self {
        self.history = Some(Box::new(history));
        self
    }

    /// Appends a listener.
    pub fn add_listener(&mut self, listener: impl AgentListener<E::Action> + 'static) {
        self.listeners.add(listener);
    }

    /// Identifier of the agent.
    pub fn id(&self) -> &str {
        &self.state.id
    }

    /// Configuration of the agent.
    pub fn config(&self) -> &LearningAgentConfig {
        &self.state.config
    }

    /// The number of episodes run so far.
    pub fn episode_count(&self) -> usize {
        self.state.episode_count
    }

    /// The number of steps of the last (or current) episode.
    pub fn episode_step_count(&self) -> usize {
        self.state.episode_step_count
    }

    /// The number of steps over all episodes.
    pub fn total_step_count(&self) -> usize {
        self.state.total_step_count
    }

    /// Reference to the environment.
    pub fn env(&self) -> &E {
        &self.env
    }

    /// Reference to the policy.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Mutable reference to the policy.
    pub fn policy_mut(&mut self) -> &mut P {
        &mut self.policy
    }

    /// Reference to the learning behavior.
    pub fn behavior(&self) -> &B {
        &self.behavior
    }

    /// Reference to the history processor, if any.
    pub fn history_processor(&self) -> Option<&dyn HistoryProcessor> {
        self.history.as_deref()
    }

    /// Runs one episode.
    ///
    /// The returned record holds `episode`, `episode_steps`,
    /// `episode_reward`, `experiences`, `unassigned_reward` and `stopped`
    /// (`1.0` if a listener ended the episode).
    pub fn run(&mut self) -> Result<Record, AgentError> {
        self.state.episode_step_count = 0;
        let raw_state = self.env.reset().map_err(AgentError::Environment)?;
        self.policy.reset();
        let mut obs = self
            .transform
            .transform(&raw_state, 0, false)
            .map_err(AgentError::TransformProcess)?;
        self.push_history(&obs);

        let mut last_action = self.env.schema().action_space().no_op();
        let mut pending_reward = 0.0;
        let mut episode_reward = 0.0;
        let mut n_experiences = 0;

        self.behavior
            .handle_episode_start()
            .map_err(AgentError::LearningBehavior)?;

        let mut stopped = {
            let mut ctx = self.state.context(&self.policy, &mut self.history);
            !self.listeners.notify_before_episode(&mut ctx)
        };

        while !stopped && !self.env.is_episode_finished() && !self.state.cap_reached() {
            {
                let mut ctx = self.state.context(&self.policy, &mut self.history);
                if !self.listeners.notify_before_step(&mut ctx, &obs) {
                    stopped = true;
                    break;
                }
            }

            let is_skipped = obs.is_skipped();
            let action = match is_skipped {
                true => last_action.clone(),
                false => {
                    let action = self.policy.next_action(&obs)?;
                    self.behavior
                        .notify_before_step()
                        .map_err(AgentError::LearningBehavior)?;
                    action
                }
            };

            let step = self.env.step(&action).map_err(AgentError::Environment)?;
            pending_reward += step.reward;
            episode_reward += step.reward;
            let next_obs = self
                .transform
                .transform(
                    &step.raw_state,
                    self.state.episode_step_count + 1,
                    step.is_terminal,
                )
                .map_err(AgentError::TransformProcess)?;

            if !is_skipped {
                self.behavior
                    .handle_new_experience(obs, action.clone(), pending_reward, step.is_terminal)
                    .map_err(AgentError::LearningBehavior)?;
                pending_reward = 0.0;
                n_experiences += 1;
            }
            obs = next_obs;
            self.push_history(&obs);
            last_action = action;

            self.state.episode_step_count += 1;
            self.state.total_step_count += 1;

            let info = StepInfo {
                reward: step.reward,
                is_terminal: step.is_terminal,
                is_skipped,
            };
            let mut ctx = self.state.context(&self.policy, &mut self.history);
            if !self.listeners.notify_after_step(&mut ctx, &info) {
                stopped = true;
            }
        }

        self.behavior
            .handle_episode_end(&obs)
            .map_err(AgentError::LearningBehavior)?;
        {
            let mut ctx = self.state.context(&self.policy, &mut self.history);
            self.listeners.notify_after_episode(&mut ctx);
        }

        if pending_reward != 0.0 {
            debug!(
                "Reward {} of trailing skipped steps was not assigned to an experience",
                pending_reward
            );
        }
        debug!(
            "Episode {} of {} finished: {} steps, reward {}",
            self.state.episode_count, self.state.id, self.state.episode_step_count, episode_reward
        );

        let record = Record::from_slice(&[
            ("episode", Scalar(self.state.episode_count as f64)),
            ("episode_steps", Scalar(self.state.episode_step_count as f64)),
            ("episode_reward", Scalar(episode_reward)),
            ("experiences", Scalar(n_experiences as f64)),
            ("unassigned_reward", Scalar(pending_reward)),
            ("stopped", Scalar(if stopped { 1.0 } else { 0.0 })),
        ]);
        self.state.episode_count += 1;

        Ok(record)
    }

    fn push_history(&mut self, obs: &Observation) {
        if obs.is_skipped() {
            return;
        }
        if let Some(history) = self.history.as_mut() {
            history.add(obs);
            history.record(obs);
        }
    }
}
