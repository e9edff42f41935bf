// ── Latest-wins effect mailbox ──
//
// The one-shot signal channel between a feature and its single UI consumer.
// Capacity is exactly one: an unconsumed value is overwritten by the next
// send. Effect loss is tolerated -- effects are transient by contract.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::Notify;

/// A conflated, at-most-once mailbox for one-shot effects.
///
/// Semantics:
/// - `send` stores the value, replacing any unconsumed predecessor.
/// - `recv` waits for a value and takes it; each value is observed at most
///   once.
/// - Intended for a single consumer (the screen). Multiple concurrent
///   receivers race for the same slot.
pub struct EffectMailbox<E> {
    inner: Arc<Inner<E>>,
}

struct Inner<E> {
    slot: Mutex<Option<E>>,
    notify: Notify,
}

impl<E> EffectMailbox<E> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                slot: Mutex::new(None),
                notify: Notify::new(),
            }),
        }
    }

    /// Store an effect, overwriting any unconsumed one.
    pub fn send(&self, effect: E) {
        let mut slot = self
            .inner
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *slot = Some(effect);
        drop(slot);
        self.inner.notify.notify_one();
    }

    /// Take the pending effect without waiting, if there is one.
    pub fn try_take(&self) -> Option<E> {
        self.inner
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    /// Wait for the next effect and take it.
    pub async fn recv(&self) -> E {
        loop {
            // Register interest before checking the slot so a send racing
            // with the check cannot be missed.
            let notified = self.inner.notify.notified();
            if let Some(effect) = self.try_take() {
                return effect;
            }
            notified.await;
        }
    }
}

impl<E> Clone for EffectMailbox<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E> Default for EffectMailbox<E> {
    fn default() -> Self {
        Self::new()
    }
}
