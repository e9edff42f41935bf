// ── Store: single-writer dispatch loop ──
//
// Owns a Feature and serializes every dispatch through one actor-style
// task. `reduce` is the only writer of state; concurrent senders enqueue
// and the loop applies their actions in arrival order. Async work spawned
// from `reduce` re-enters the same queue on completion.

use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::feature::{Context, Feature, TaskFuture};
use crate::mailbox::EffectMailbox;

enum Inbound<F: Feature> {
    Action(F::Action),
    TaskDone(Result<F::Action, F::Error>),
}

/// Handle to a running feature.
///
/// Created per screen/flow and dropped when the screen is popped; dropping
/// the handle cancels the dispatch loop and every in-flight task started
/// via [`Context::run`].
pub struct Store<F: Feature> {
    inbound_tx: mpsc::UnboundedSender<Inbound<F>>,
    state_rx: watch::Receiver<F::State>,
    effects: EffectMailbox<F::Effect>,
    cancel: CancellationToken,
}

impl<F: Feature> Store<F> {
    /// Spawn the dispatch loop for `feature`. Must be called from within a
    /// Tokio runtime.
    pub fn spawn(feature: F, initial: F::State) -> Self {
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(initial.clone());
        let effects = EffectMailbox::new();
        let cancel = CancellationToken::new();

        tokio::spawn(dispatch_loop(
            feature,
            initial,
            inbound_rx,
            inbound_tx.clone(),
            state_tx,
            effects.clone(),
            cancel.clone(),
        ));

        Self {
            inbound_tx,
            state_rx,
            effects,
            cancel,
        }
    }

    /// Enqueue an action for the dispatch loop.
    ///
    /// Never blocks. After the store is closed this is a no-op; late
    /// completions from a dying screen have nowhere useful to land anyway.
    pub fn send(&self, action: F::Action) {
        if self.inbound_tx.send(Inbound::Action(action)).is_err() {
            debug!("store closed, action dropped");
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> F::State {
        self.state_rx.borrow().clone()
    }

    /// Read-only state stream. Emits only on actual change; a reduce that
    /// returns an equal state wakes no subscribers.
    pub fn watch(&self) -> watch::Receiver<F::State> {
        self.state_rx.clone()
    }

    /// The effect mailbox for this store's one-shot signals.
    pub fn effects(&self) -> EffectMailbox<F::Effect> {
        self.effects.clone()
    }

    /// Stop the dispatch loop and cancel in-flight tasks.
    pub fn close(&self) {
        self.cancel.cancel();
    }
}

impl<F: Feature> Drop for Store<F> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn dispatch_loop<F: Feature>(
    mut feature: F,
    initial: F::State,
    mut inbound_rx: mpsc::UnboundedReceiver<Inbound<F>>,
    inbound_tx: mpsc::UnboundedSender<Inbound<F>>,
    state_tx: watch::Sender<F::State>,
    effects: EffectMailbox<F::Effect>,
    cancel: CancellationToken,
) {
    let mut state = initial;

    loop {
        let inbound = tokio::select! {
            () = cancel.cancelled() => break,
            msg = inbound_rx.recv() => match msg {
                Some(msg) => msg,
                None => break,
            },
        };

        let action = match inbound {
            Inbound::Action(action) => action,
            Inbound::TaskDone(Ok(action)) => action,
            Inbound::TaskDone(Err(error)) => feature.on_error(error),
        };

        let mut ctx = Context {
            effects: &effects,
            tasks: Vec::new(),
        };
        let next = feature.reduce(&state, action, &mut ctx);
        let tasks = ctx.tasks;

        if next != state {
            state = next.clone();
            state_tx.send_replace(next);
        } else {
            trace!("state unchanged, emission suppressed");
        }

        for task in tasks {
            spawn_task(task, inbound_tx.clone(), cancel.clone());
        }
    }

    debug!("dispatch loop ended");
}

fn spawn_task<F: Feature>(
    task: TaskFuture<F>,
    inbound_tx: mpsc::UnboundedSender<Inbound<F>>,
    cancel: CancellationToken,
) {
    tokio::spawn(async move {
        tokio::select! {
            () = cancel.cancelled() => {}
            result = task => {
                // Loop gone means the screen is gone; drop the result.
                let _ = inbound_tx.send(Inbound::TaskDone(result));
            }
        }
    });
}
