use tokio::runtime::Handle;

use super::{Dispatcher, Job};

/// Dispatcher that runs every job on a tokio runtime's blocking pool.
///
/// Jobs run in parallel with the frame loop and with each other; no ordering
/// between them is guaranteed. Panics are caught inside the job and logged.
#[derive(Debug, Clone)]
pub struct TokioDispatcher {
    handle: Handle,
}

impl TokioDispatcher {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Uses the runtime the caller is currently inside, if any.
    pub fn current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }
}

impl Dispatcher for TokioDispatcher {
    fn dispatch(&self, job: Job) {
        // The join handle is dropped: fire-and-forget. `Job::run` already
        // logs a panicking callback.
        drop(self.handle.spawn_blocking(move || {
            let _ = job.run();
        }));
    }
}
