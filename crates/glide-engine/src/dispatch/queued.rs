use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use super::{Dispatcher, Job};
use crate::error::ClockError;

/// Outcome of one [`QueuedDispatcher::run_pending`] drain.
#[derive(Debug, Default)]
pub struct DrainReport {
    /// Jobs executed, including those that panicked.
    pub ran: usize,
    /// One entry per panicking job, in execution order.
    pub failures: Vec<ClockError>,
}

impl DrainReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Dispatcher that queues jobs as continuations for the host to drain.
///
/// The host calls [`run_pending`](Self::run_pending) at a point of its choosing,
/// typically once per frame after all phases have fired. Clones share one queue.
#[derive(Clone, Default)]
pub struct QueuedDispatcher {
    queue: Rc<RefCell<VecDeque<Job>>>,
}

impl QueuedDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of jobs waiting to run.
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Runs queued jobs in FIFO order until the queue is empty.
    ///
    /// A panicking job is recorded and the drain continues with the next one.
    pub fn run_pending(&self) -> DrainReport {
        let mut report = DrainReport::default();
        loop {
            let next = self.queue.borrow_mut().pop_front();
            let Some(job) = next else { break };
            report.ran += 1;
            if let Err(err) = job.run() {
                report.failures.push(err);
            }
        }
        report
    }
}

impl Dispatcher for QueuedDispatcher {
    fn dispatch(&self, job: Job) {
        log::trace!("queued {} job", job.kind());
        self.queue.borrow_mut().push_back(job);
    }
}
