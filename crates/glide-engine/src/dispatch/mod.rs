//! Fire-and-forget callback dispatch.
//!
//! Clocks never run user callbacks inline on the frame path. They hand each
//! callback to a [`Dispatcher`] as a [`Job`] and return immediately, so a slow
//! callback cannot stall the tick that produced it.

mod queued;
mod spawned;

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use crate::error::{ClockError, panic_message};

pub use queued::{DrainReport, QueuedDispatcher};
pub use spawned::TokioDispatcher;

/// Which user callback a job wraps.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CallbackKind {
    Progress,
    Completion,
}

impl fmt::Display for CallbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Progress => "progress",
            Self::Completion => "completion",
        })
    }
}

/// A unit of deferred work.
pub struct Job {
    kind: CallbackKind,
    task: Box<dyn FnOnce() + Send>,
}

impl Job {
    pub fn new(kind: CallbackKind, task: impl FnOnce() + Send + 'static) -> Self {
        Self { kind, task: Box::new(task) }
    }

    pub fn kind(&self) -> CallbackKind {
        self.kind
    }

    /// Runs the job, converting a panic into `ClockError::CallbackPanicked`.
    ///
    /// The failure is logged here so that no executor can drop it silently.
    pub fn run(self) -> Result<(), ClockError> {
        let Job { kind, task } = self;
        panic::catch_unwind(AssertUnwindSafe(task)).map_err(|payload| {
            let err = ClockError::CallbackPanicked {
                callback: kind,
                message: panic_message(payload.as_ref()),
            };
            log::error!("{err}");
            err
        })
    }
}

impl fmt::Debug for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Job").field("kind", &self.kind).finish_non_exhaustive()
    }
}

/// Schedules jobs without blocking the caller.
pub trait Dispatcher {
    fn dispatch(&self, job: Job);
}

impl<D: Dispatcher + ?Sized> Dispatcher for std::rc::Rc<D> {
    fn dispatch(&self, job: Job) {
        (**self).dispatch(job);
    }
}
