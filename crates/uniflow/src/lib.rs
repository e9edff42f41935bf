//! uniflow: the unidirectional data-flow container behind every screen store.
//!
//! A [`Feature`] owns one screen's state machine: an immutable `State`
//! snapshot, a closed set of `Action` intents consumed exactly once by a
//! synchronous [`Feature::reduce`], and one-shot `Effect` signals delivered
//! through a latest-wins [`EffectMailbox`]. [`Store`] runs the feature on a
//! single-writer dispatch loop: every state transition goes through `reduce`,
//! so observers can never see a torn or concurrent write.
//!
//! Async work (network calls, persistence) is started from inside `reduce`
//! via [`Context::run`] and re-enters the same dispatch path as an ordinary
//! action when it completes — success and failure alike. Failures are routed
//! through [`Feature::on_error`], giving the reducer a single place to decide
//! user-visible error presentation.

pub mod feature;
pub mod mailbox;
pub mod store;
pub mod testing;

pub use feature::{Context, Feature};
pub use mailbox::EffectMailbox;
pub use store::Store;
pub use testing::ReducerHarness;
