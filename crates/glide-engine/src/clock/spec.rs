use std::fmt;
use std::sync::Arc;

use crate::frame::FramePhase;

/// Values passed to a progress callback.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Progress {
    /// `elapsed / duration`; exactly `1.0` on the finalization call.
    pub alpha: f64,
    /// Delta of the frame that produced this call, in seconds.
    pub delta: f64,
    /// Seconds since the session started, clamped to the duration on the
    /// finalization call.
    pub elapsed: f64,
}

pub(crate) type ProgressFn = Arc<dyn Fn(Progress) + Send + Sync>;
pub(crate) type CompletionFn = Box<dyn FnOnce() + Send>;
pub(crate) type CancelFn = Box<dyn FnMut() -> bool>;

/// Everything a session is started with.
///
/// ```ignore
/// let spec = ClockSpec::new(FramePhase::PreRender, 0.3, |p| fade(p.alpha))
///     .on_complete(|| println!("faded"))
///     .cancel_when(move || hovered.get());
/// ```
pub struct ClockSpec {
    pub(crate) phase: FramePhase,
    pub(crate) duration: f64,
    pub(crate) progress: ProgressFn,
    pub(crate) completion: Option<CompletionFn>,
    pub(crate) cancel: Option<CancelFn>,
}

impl ClockSpec {
    /// `duration` is in seconds. Zero, negative or NaN durations end the
    /// session on its first tick.
    pub fn new(
        phase: FramePhase,
        duration: f64,
        progress: impl Fn(Progress) + Send + Sync + 'static,
    ) -> Self {
        Self {
            phase,
            duration,
            progress: Arc::new(progress),
            completion: None,
            cancel: None,
        }
    }

    /// Callback dispatched once when the session ends from a tick.
    pub fn on_complete(mut self, completion: impl FnOnce() + Send + 'static) -> Self {
        self.completion = Some(Box::new(completion));
        self
    }

    /// Predicate polled on the frame thread before each progress dispatch.
    /// Returning `true` ends the session.
    pub fn cancel_when(mut self, cancel: impl FnMut() -> bool + 'static) -> Self {
        self.cancel = Some(Box::new(cancel));
        self
    }
}

impl fmt::Debug for ClockSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClockSpec")
            .field("phase", &self.phase)
            .field("duration", &self.duration)
            .field("completion", &self.completion.is_some())
            .field("cancel", &self.cancel.is_some())
            .finish()
    }
}
