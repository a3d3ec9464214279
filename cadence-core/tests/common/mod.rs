//! Test doubles recording the calls made by a learning agent.
#![allow(dead_code)]
use anyhow::{bail, Result};
use cadence_core::{
    listener::{AgentContext, AgentListener, ListenerResponse, StepInfo},
    Environment, IntegerActionSpace, LearningBehavior, Observation, Policy, PolicyError, Schema,
    StepResult,
};
use std::{cell::RefCell, rc::Rc};

/// Calls observed by the doubles, in order.
pub type Log = Rc<RefCell<Vec<String>>>;

pub fn new_log() -> Log {
    Rc::new(RefCell::new(vec![]))
}

pub fn entries(log: &Log, prefix: &str) -> Vec<String> {
    log.borrow()
        .iter()
        .filter(|e| e.starts_with(prefix))
        .cloned()
        .collect()
}

pub fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Environment whose raw state is the step index and whose reward of step
/// `k` (1-based) is `k`.
pub struct CountingEnv {
    schema: Schema<usize>,
    step: usize,
    terminal_at: Option<usize>,
    fail_reset: bool,
    log: Log,
}

impl CountingEnv {
    pub fn new(log: &Log) -> Self {
        Self {
            schema: Schema::new(IntegerActionSpace::new(4, 3)),
            step: 0,
            terminal_at: None,
            fail_reset: false,
            log: log.clone(),
        }
    }

    pub fn terminal_at(mut self, step: usize) -> Self {
        self.terminal_at = Some(step);
        self
    }

    pub fn fail_reset(mut self) -> Self {
        self.fail_reset = true;
        self
    }
}

impl Environment for CountingEnv {
    type Action = usize;
    type RawState = f64;

    fn schema(&self) -> &Schema<usize> {
        &self.schema
    }

    fn reset(&mut self) -> Result<f64> {
        if self.fail_reset {
            bail!("reset failed");
        }
        self.step = 0;
        self.log.borrow_mut().push("env.reset".into());
        Ok(0.0)
    }

    fn step(&mut self, action: &usize) -> Result<StepResult<f64>> {
        self.step += 1;
        self.log
            .borrow_mut()
            .push(format!("env.step {} {}", self.step, action));
        let is_terminal = self.terminal_at == Some(self.step);
        Ok(StepResult::new(self.step as f64, self.step as f64, is_terminal))
    }

    fn is_episode_finished(&self) -> bool {
        self.terminal_at.map_or(false, |t| self.step >= t)
    }
}

/// Skips odd steps, unless terminal.
pub fn skip_odd_steps(raw: &f64, step: usize, is_terminal: bool) -> Result<Observation> {
    match step % 2 == 1 && !is_terminal {
        true => Ok(Observation::skipped()),
        false => Ok(Observation::new(vec![*raw])),
    }
}

/// Never skips.
pub fn keep_all_steps(raw: &f64, _step: usize, _is_terminal: bool) -> Result<Observation> {
    Ok(Observation::new(vec![*raw]))
}

/// Takes action `10 + n` at its `n`-th decision and fails on skipped
/// observations.
pub struct CountingPolicy {
    n_decisions: usize,
    fail_at: Option<usize>,
    log: Log,
}

impl CountingPolicy {
    pub fn new(log: &Log) -> Self {
        Self {
            n_decisions: 0,
            fail_at: None,
            log: log.clone(),
        }
    }

    pub fn fail_at(mut self, n: usize) -> Self {
        self.fail_at = Some(n);
        self
    }
}

impl Policy<usize> for CountingPolicy {
    fn next_action(&mut self, obs: &Observation) -> Result<usize, PolicyError> {
        let data = obs.data().ok_or(PolicyError::SkippedObservation)?;
        if self.fail_at == Some(self.n_decisions) {
            return Err(PolicyError::InvalidDistribution {
                output: vec![0.0],
                draw: 0.5,
            });
        }
        self.log
            .borrow_mut()
            .push(format!("policy.next_action {}", data[0]));
        self.n_decisions += 1;
        Ok(10 + self.n_decisions - 1)
    }

    fn reset(&mut self) {
        self.n_decisions = 0;
        self.log.borrow_mut().push("policy.reset".into());
    }
}

/// Learning behavior recording its notifications.
pub struct RecordingBehavior {
    log: Log,
}

impl RecordingBehavior {
    pub fn new(log: &Log) -> Self {
        Self { log: log.clone() }
    }
}

impl LearningBehavior<usize> for RecordingBehavior {
    fn handle_episode_start(&mut self) -> Result<()> {
        self.log.borrow_mut().push("behavior.episode_start".into());
        Ok(())
    }

    fn handle_new_experience(
        &mut self,
        obs: Observation,
        action: usize,
        reward: f64,
        is_terminal: bool,
    ) -> Result<()> {
        let obs = obs.data().map_or(-1.0, |d| d[0]);
        self.log.borrow_mut().push(format!(
            "behavior.experience {} {} {} {}",
            obs, action, reward, is_terminal
        ));
        Ok(())
    }

    fn handle_episode_end(&mut self, final_obs: &Observation) -> Result<()> {
        let obs = final_obs.data().map_or(-1.0, |d| d[0]);
        self.log
            .borrow_mut()
            .push(format!("behavior.episode_end {}", obs));
        Ok(())
    }

    fn notify_before_step(&mut self) -> Result<()> {
        self.log.borrow_mut().push("behavior.before_step".into());
        Ok(())
    }
}

/// What a [`ScriptedListener`] does at a given episode step.
#[derive(Clone, Copy)]
pub enum Script {
    Continue,
    StopBeforeEpisode,
    StopBeforeStep(usize),
    StopAfterStep(usize),
    FailAfterStep(usize),
}

/// Listener recording its notifications and answering as scripted.
pub struct ScriptedListener {
    script: Script,
    log: Log,
}

impl ScriptedListener {
    pub fn new(log: &Log, script: Script) -> Self {
        Self {
            script,
            log: log.clone(),
        }
    }
}

impl AgentListener<usize> for ScriptedListener {
    fn on_before_episode(&mut self, ctx: &mut AgentContext<'_, usize>) -> Result<ListenerResponse> {
        self.log
            .borrow_mut()
            .push(format!("listener.before_episode {}", ctx.episode_count()));
        match self.script {
            Script::StopBeforeEpisode => Ok(ListenerResponse::Stop),
            _ => Ok(ListenerResponse::Continue),
        }
    }

    fn on_before_step(
        &mut self,
        ctx: &mut AgentContext<'_, usize>,
        obs: &Observation,
    ) -> Result<ListenerResponse> {
        let step = ctx.episode_step_count();
        self.log.borrow_mut().push(format!(
            "listener.before_step {} {}",
            step,
            obs.is_skipped()
        ));
        match self.script {
            Script::StopBeforeStep(s) if s == step => Ok(ListenerResponse::Stop),
            _ => Ok(ListenerResponse::Continue),
        }
    }

    fn on_after_step(
        &mut self,
        ctx: &mut AgentContext<'_, usize>,
        info: &StepInfo,
    ) -> Result<ListenerResponse> {
        let step = ctx.episode_step_count();
        self.log
            .borrow_mut()
            .push(format!("listener.after_step {} {}", step, info.reward));
        match self.script {
            Script::StopAfterStep(s) if s == step => Ok(ListenerResponse::Stop),
            Script::FailAfterStep(s) if s == step => bail!("listener failure"),
            _ => Ok(ListenerResponse::Continue),
        }
    }

    fn on_after_episode(&mut self, ctx: &mut AgentContext<'_, usize>) -> Result<()> {
        self.log.borrow_mut().push(format!(
            "listener.after_episode {} {}",
            ctx.episode_count(),
            ctx.total_step_count()
        ));
        Ok(())
    }
}
