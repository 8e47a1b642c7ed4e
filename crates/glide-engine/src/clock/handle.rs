use std::cell::{Cell, OnceCell};
use std::rc::Rc;

use crate::frame::Subscription;

/// Why a session stopped.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Termination {
    /// The duration elapsed.
    Completed,
    /// The cancel predicate returned `true`.
    Cancelled,
    /// The caller released the handle.
    Released,
    /// The cancel predicate panicked.
    Faulted,
}

/// Session state shared between the tick handler and the caller's handle.
#[derive(Debug, Default)]
pub(crate) struct SessionState {
    termination: Cell<Option<Termination>>,
    subscription: OnceCell<Subscription>,
}

impl SessionState {
    /// Stores the session's subscription once the source has handed it out.
    ///
    /// The source may already have delivered a terminating tick, in which case
    /// the subscription is released immediately.
    pub(crate) fn bind(&self, subscription: Subscription) {
        if self.termination().is_some() {
            subscription.release();
        }
        if self.subscription.set(subscription).is_err() {
            log::warn!("clock session bound twice; keeping the first subscription");
        }
    }

    /// Releases the subscription if it is bound. Idempotent.
    pub(crate) fn release_subscription(&self) {
        if let Some(subscription) = self.subscription.get() {
            subscription.release();
        }
    }

    fn is_subscribed(&self) -> bool {
        self.subscription.get().is_some_and(Subscription::is_live)
    }

    pub(crate) fn termination(&self) -> Option<Termination> {
        self.termination.get()
    }

    /// Records `reason` if the session has not terminated yet.
    ///
    /// Returns `true` only for the call that performed the transition.
    pub(crate) fn terminate(&self, reason: Termination) -> bool {
        if self.termination.get().is_some() {
            return false;
        }
        self.termination.set(Some(reason));
        true
    }
}

/// Caller-side handle to a running session.
///
/// Dropping the handle does not stop the session; call
/// [`release`](Self::release) for that.
#[derive(Debug, Clone)]
pub struct ClockHandle {
    state: Rc<SessionState>,
}

impl ClockHandle {
    pub(crate) fn new(state: Rc<SessionState>) -> Self {
        Self { state }
    }

    /// `true` while the session is still subscribed to its frame phase.
    pub fn is_live(&self) -> bool {
        self.state.termination().is_none() && self.state.is_subscribed()
    }

    /// Stops the session without dispatching completion.
    ///
    /// Safe to call any number of times, and after the session has already
    /// ended on its own.
    pub fn release(&self) {
        if self.state.terminate(Termination::Released) {
            log::debug!("clock released by caller");
        }
        self.state.release_subscription();
    }

    /// How the session ended, or `None` while it is still running.
    pub fn termination(&self) -> Option<Termination> {
        self.state.termination()
    }
}
