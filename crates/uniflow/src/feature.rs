// ── Feature trait and reducer context ──

use std::future::Future;
use std::pin::Pin;

use crate::mailbox::EffectMailbox;

/// Boxed future handed to the dispatch loop by [`Context::run`].
pub(crate) type TaskFuture<F> = Pin<
    Box<
        dyn Future<Output = Result<<F as Feature>::Action, <F as Feature>::Error>>
            + Send
            + 'static,
    >,
>;

/// One screen's state machine.
///
/// A feature defines the four types of the unidirectional loop and the two
/// hooks the [`Store`](crate::Store) calls into:
///
/// - [`reduce`](Self::reduce) — the synchronous transition function. It is
///   the only writer of `State`; every mutation is a copy, never in-place.
/// - [`on_error`](Self::on_error) — maps a failed [`Context::run`] task into
///   an error-kind action, which then flows through `reduce` like any other.
///
/// `State` equality is used to suppress redundant emissions: a reduce that
/// returns a value equal to the current state wakes no observers.
pub trait Feature: Sized + Send + 'static {
    /// Immutable snapshot of the screen's data. Replaced wholesale on every
    /// dispatch.
    type State: Clone + PartialEq + Send + Sync + 'static;

    /// Closed set of intents and completion events. Consumed exactly once.
    type Action: Send + 'static;

    /// One-shot signal (navigation, toast) that is not part of state.
    type Effect: Send + 'static;

    /// Failure type produced by async work started via [`Context::run`].
    type Error: Send + 'static;

    /// Compute the next state from the current state and one action.
    ///
    /// Must not block: anything that suspends belongs in a [`Context::run`]
    /// task whose result re-enters dispatch as another action.
    fn reduce(
        &mut self,
        state: &Self::State,
        action: Self::Action,
        ctx: &mut Context<'_, Self>,
    ) -> Self::State;

    /// Map a task failure to an error-kind action.
    fn on_error(&self, error: Self::Error) -> Self::Action;
}

/// Capabilities available to [`Feature::reduce`] for one dispatch.
///
/// Effects emitted here land in the store's mailbox immediately; tasks queued
/// via [`run`](Self::run) are spawned after `reduce` returns, under the
/// store's scope — dropping the store cancels them.
pub struct Context<'a, F: Feature> {
    pub(crate) effects: &'a EffectMailbox<F::Effect>,
    pub(crate) tasks: Vec<TaskFuture<F>>,
}

impl<F: Feature> Context<'_, F> {
    /// Emit a one-shot effect. Latest-wins: a second emission before the
    /// first is consumed overwrites it.
    pub fn effect(&self, effect: F::Effect) {
        self.effects.send(effect);
    }

    /// Launch async work under the store's scope.
    ///
    /// On `Ok(action)` the action is dispatched; on `Err(e)` exactly one
    /// `on_error(e)` action is dispatched instead. The task never crashes
    /// the dispatch loop.
    pub fn run<Fut>(&mut self, fut: Fut)
    where
        Fut: Future<Output = Result<F::Action, F::Error>> + Send + 'static,
    {
        self.tasks.push(Box::pin(fut));
    }

    /// Like [`run`](Self::run), but with a caller-supplied error handler in
    /// place of [`Feature::on_error`].
    pub fn run_with<Fut, H>(&mut self, fut: Fut, handler: H)
    where
        Fut: Future<Output = Result<F::Action, F::Error>> + Send + 'static,
        H: FnOnce(F::Error) -> F::Action + Send + 'static,
    {
        self.tasks.push(Box::pin(async move {
            match fut.await {
                Ok(action) => Ok(action),
                Err(error) => Ok(handler(error)),
            }
        }));
    }
}
