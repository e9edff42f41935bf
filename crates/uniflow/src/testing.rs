// ── Synchronous reducer harness for tests ──

use crate::feature::{Context, Feature};
use crate::mailbox::EffectMailbox;

/// Drives a feature's reducer synchronously, without a dispatch loop.
///
/// Async work queued via [`Context::run`] is discarded — the harness is for
/// pure transition tests (validation gates, step machines, field copies).
/// Flows that need task completions belong in a full [`Store`](crate::Store)
/// test instead.
pub struct ReducerHarness<F: Feature> {
    feature: F,
    state: F::State,
    effects: EffectMailbox<F::Effect>,
}

impl<F: Feature> ReducerHarness<F> {
    pub fn new(feature: F, initial: F::State) -> Self {
        Self {
            feature,
            state: initial,
            effects: EffectMailbox::new(),
        }
    }

    /// Apply one action and return the resulting state.
    pub fn dispatch(&mut self, action: F::Action) -> &F::State {
        let mut ctx = Context {
            effects: &self.effects,
            tasks: Vec::new(),
        };
        self.state = self.feature.reduce(&self.state, action, &mut ctx);
        // ctx.tasks dropped: async work is out of scope here
        &self.state
    }

    /// Apply a sequence of actions, returning the final state.
    pub fn dispatch_all<I>(&mut self, actions: I) -> &F::State
    where
        I: IntoIterator<Item = F::Action>,
    {
        for action in actions {
            self.dispatch(action);
        }
        &self.state
    }

    pub fn state(&self) -> &F::State {
        &self.state
    }

    /// Take the pending effect, if the last dispatches emitted one.
    pub fn take_effect(&self) -> Option<F::Effect> {
        self.effects.try_take()
    }

    /// Map a task failure through the feature's error hook and dispatch the
    /// resulting action, as the store loop would.
    pub fn dispatch_error(&mut self, error: F::Error) -> &F::State {
        let action = self.feature.on_error(error);
        self.dispatch(action)
    }
}
