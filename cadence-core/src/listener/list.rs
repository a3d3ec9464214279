//! Ordered collection of listeners.
use super::{AgentContext, AgentListener, ListenerResponse, StepInfo};
use crate::Observation;
use log::error;

/// Listeners of an agent, notified in the order they were added.
///
/// Each `notify_*` method returns `true` if the episode should continue.
/// Notification stops at the first listener answering
/// [`ListenerResponse::Stop`]; listeners after it are not called. A listener
/// returning an error is logged and counted as a stop.
pub struct AgentListenerList<A> {
    listeners: Vec<Box<dyn AgentListener<A>>>,
}

impl<A> Default for AgentListenerList<A> {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }
}

impl<A> AgentListenerList<A> {
    /// Appends a listener.
    pub fn add(&mut self, listener: impl AgentListener<A> + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// The number of listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns `true` if there is no listener.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Notifies the start of an episode.
    pub fn notify_before_episode(&mut self, ctx: &mut AgentContext<'_, A>) -> bool {
        self.notify("on_before_episode", |l| l.on_before_episode(ctx))
    }

    /// Notifies that a step is about to be taken on `obs`.
    pub fn notify_before_step(&mut self, ctx: &mut AgentContext<'_, A>, obs: &Observation) -> bool {
        self.notify("on_before_step", |l| l.on_before_step(ctx, obs))
    }

    /// Notifies that a step was taken.
    pub fn notify_after_step(&mut self, ctx: &mut AgentContext<'_, A>, step: &StepInfo) -> bool {
        self.notify("on_after_step", |l| l.on_after_step(ctx, step))
    }

    /// Notifies every listener of the end of an episode. Errors are logged.
    pub fn notify_after_episode(&mut self, ctx: &mut AgentContext<'_, A>) {
        for (i, listener) in self.listeners.iter_mut().enumerate() {
            if let Err(e) = listener.on_after_episode(ctx) {
                error!("Listener {} failed in on_after_episode: {:#}", i, e);
            }
        }
    }

    fn notify<F>(&mut self, event: &str, mut f: F) -> bool
    where
        F: FnMut(&mut dyn AgentListener<A>) -> anyhow::Result<ListenerResponse>,
    {
        for (i, listener) in self.listeners.iter_mut().enumerate() {
            match f(listener.as_mut()) {
                Ok(ListenerResponse::Continue) => {}
                Ok(ListenerResponse::Stop) => return false,
                Err(e) => {
                    error!("Listener {} failed in {}: {:#}", i, event, e);
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LearningAgentConfig, Policy, PolicyError};
    use anyhow::{bail, Result};
    use std::{cell::RefCell, rc::Rc};

    struct NullPolicy;

    impl Policy<usize> for NullPolicy {
        fn next_action(&mut self, _obs: &Observation) -> Result<usize, PolicyError> {
            Ok(0)
        }

        fn reset(&mut self) {}
    }

    struct Probe {
        name: &'static str,
        response: Option<ListenerResponse>,
        calls: Calls,
    }

    impl AgentListener<usize> for Probe {
        fn on_before_step(
            &mut self,
            _ctx: &mut AgentContext<'_, usize>,
            _obs: &Observation,
        ) -> Result<ListenerResponse> {
            self.calls.borrow_mut().push(self.name);
            match self.response {
                Some(r) => Ok(r),
                None => bail!("listener failure"),
            }
        }
    }

    type Calls = Rc<RefCell<Vec<&'static str>>>;

    fn list(responses: &[Option<ListenerResponse>]) -> (AgentListenerList<usize>, Calls) {
        const NAMES: [&str; 3] = ["a", "b", "c"];
        let calls = Rc::new(RefCell::new(vec![]));
        let mut list = AgentListenerList::default();
        for (name, response) in NAMES.iter().zip(responses) {
            list.add(Probe {
                name: *name,
                response: *response,
                calls: calls.clone(),
            });
        }
        (list, calls)
    }

    #[test]
    fn test_stop_short_circuits() {
        let _ = env_logger::builder().is_test(true).try_init();
        let config = LearningAgentConfig::default();
        let policy = NullPolicy;
        let mut ctx = AgentContext::new("agent", "test", "env", &config, &policy);
        let obs = Observation::new(vec![0.0]);

        let (mut l, calls) = list(&[
            Some(ListenerResponse::Continue),
            Some(ListenerResponse::Stop),
            Some(ListenerResponse::Continue),
        ]);
        assert!(!l.notify_before_step(&mut ctx, &obs));
        assert_eq!(*calls.borrow(), vec!["a", "b"]);

        let (mut l, calls) = list(&[Some(ListenerResponse::Continue); 3]);
        assert!(l.notify_before_step(&mut ctx, &obs));
        assert_eq!(*calls.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_error_counts_as_stop() {
        let _ = env_logger::builder().is_test(true).try_init();
        let config = LearningAgentConfig::default();
        let policy = NullPolicy;
        let mut ctx = AgentContext::new("agent", "test", "env", &config, &policy);
        let obs = Observation::new(vec![0.0]);

        let (mut l, calls) = list(&[None, Some(ListenerResponse::Continue)]);
        assert!(!l.notify_before_step(&mut ctx, &obs));
        assert_eq!(*calls.borrow(), vec!["a"]);
    }

    #[test]
    fn test_empty_list_continues() {
        let config = LearningAgentConfig::default();
        let policy = NullPolicy;
        let mut ctx = AgentContext::new("agent", "test", "env", &config, &policy);
        let mut l = AgentListenerList::<usize>::default();
        assert!(l.is_empty());
        assert!(l.notify_before_episode(&mut ctx));
        l.notify_after_episode(&mut ctx);
    }
}
