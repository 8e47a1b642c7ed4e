use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use super::handle::{SessionState, Termination};
use super::spec::{CancelFn, ClockSpec, CompletionFn, Progress, ProgressFn};
use crate::dispatch::{CallbackKind, Dispatcher, Job};
use crate::error::{ClockError, panic_message};
use crate::frame::FramePhase;
use crate::time::TimeSource;

/// One running clock. Owned by the frame handler closure.
pub(super) struct Session {
    phase: FramePhase,
    started: Duration,
    /// Seconds; `0.0` for any non-positive or NaN request.
    duration: f64,
    progress: ProgressFn,
    completion: Option<CompletionFn>,
    cancel: Option<CancelFn>,
    time: Rc<dyn TimeSource>,
    dispatcher: Rc<dyn Dispatcher>,
    state: Rc<SessionState>,
}

impl Session {
    pub(super) fn new(
        spec: ClockSpec,
        time: Rc<dyn TimeSource>,
        dispatcher: Rc<dyn Dispatcher>,
    ) -> Self {
        let ClockSpec { phase, duration, progress, completion, cancel } = spec;

        // `!(d > 0)` also catches NaN.
        let duration = if duration > 0.0 {
            duration
        } else {
            log::debug!("clock on {phase} has duration {duration}; ends on first tick");
            0.0
        };

        let started = time.now();
        log::debug!("clock started on {phase} for {duration}s");

        Self {
            phase,
            started,
            duration,
            progress,
            completion,
            cancel,
            time,
            dispatcher,
            state: Rc::new(SessionState::default()),
        }
    }

    pub(super) fn state(&self) -> Rc<SessionState> {
        Rc::clone(&self.state)
    }

    /// Handles one frame of the subscribed phase.
    pub(super) fn tick(&mut self, delta: f64) -> Result<(), ClockError> {
        // The source may still deliver a frame that was snapshotted before the
        // subscription went away.
        if self.state.termination().is_some() {
            return Ok(());
        }

        let elapsed = self.time.now().saturating_sub(self.started).as_secs_f64();
        let finished = elapsed >= self.duration;
        let alpha = if self.duration > 0.0 { elapsed / self.duration } else { 1.0 };

        if finished {
            self.finish(Termination::Completed, delta);
            return Ok(());
        }

        let polled = self.poll_cancel();
        // The predicate may have released this session's own handle.
        if self.state.termination().is_some() {
            return polled.map(|_| ());
        }

        match polled {
            Ok(false) => {
                log::trace!("clock on {} at alpha {alpha:.4}", self.phase);
                self.dispatch_progress(Progress { alpha, delta, elapsed });
                Ok(())
            }
            Ok(true) => {
                self.finish(Termination::Cancelled, delta);
                Ok(())
            }
            Err(err) => {
                self.finish(Termination::Faulted, delta);
                Err(err)
            }
        }
    }

    fn poll_cancel(&mut self) -> Result<bool, ClockError> {
        let Some(cancel) = self.cancel.as_mut() else {
            return Ok(false);
        };
        panic::catch_unwind(AssertUnwindSafe(|| cancel())).map_err(|payload| {
            ClockError::PredicatePanicked { message: panic_message(payload.as_ref()) }
        })
    }

    /// Tears the session down: release, finalization (only when the duration
    /// was reached), then completion.
    fn finish(&mut self, reason: Termination, delta: f64) {
        if !self.state.terminate(reason) {
            return;
        }
        self.state.release_subscription();
        log::debug!("clock on {} ended: {reason:?}", self.phase);

        if reason == Termination::Completed {
            self.dispatch_progress(Progress { alpha: 1.0, delta, elapsed: self.duration });
        }

        if let Some(completion) = self.completion.take() {
            self.dispatcher.dispatch(Job::new(CallbackKind::Completion, completion));
        }
        // Nothing else reads the predicate once the session has ended.
        self.cancel = None;
    }

    fn dispatch_progress(&self, progress: Progress) {
        let callback = Arc::clone(&self.progress);
        self.dispatcher
            .dispatch(Job::new(CallbackKind::Progress, move || callback(progress)));
    }
}
