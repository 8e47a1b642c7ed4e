//! Frame-driven progress clocks.
//!
//! A clock session subscribes to one frame phase and, on every tick, measures
//! the time elapsed since it started. While elapsed time is below the requested
//! duration (and the optional cancel predicate stays false) it dispatches a
//! progress callback with `alpha = elapsed / duration`. Once the duration has
//! elapsed or the predicate fires, the session releases its subscription,
//! dispatches a final `alpha == 1` progress call if the duration was reached,
//! and then dispatches the completion callback.
//!
//! Completion fires on every termination that happens inside a tick, including
//! predicate cancellation. Use [`ClockHandle::termination`] to tell the cases
//! apart.

mod handle;
mod session;
mod spec;

use std::rc::Rc;

use crate::dispatch::Dispatcher;
use crate::frame::FrameSource;
use crate::time::{MonotonicTime, TimeSource};

pub use handle::{ClockHandle, Termination};
pub use spec::{ClockSpec, Progress};

use session::Session;

/// Starts clock sessions against a frame source.
///
/// A `FrameClock` holds only the environment (frame source, dispatcher, time
/// source); every [`start`](Self::start) creates an independent session.
pub struct FrameClock {
    source: Rc<dyn FrameSource>,
    dispatcher: Rc<dyn Dispatcher>,
    time: Rc<dyn TimeSource>,
}

impl FrameClock {
    /// Creates a clock measuring wall-clock time.
    pub fn new(
        source: impl FrameSource + 'static,
        dispatcher: impl Dispatcher + 'static,
    ) -> Self {
        Self::with_time(source, dispatcher, MonotonicTime::new())
    }

    /// Creates a clock measuring elapsed time with `time`.
    pub fn with_time(
        source: impl FrameSource + 'static,
        dispatcher: impl Dispatcher + 'static,
        time: impl TimeSource + 'static,
    ) -> Self {
        Self {
            source: Rc::new(source),
            dispatcher: Rc::new(dispatcher),
            time: Rc::new(time),
        }
    }

    /// Starts a session and subscribes it to `spec`'s phase.
    ///
    /// The start timestamp is taken now, not on the first tick.
    pub fn start(&self, spec: ClockSpec) -> ClockHandle {
        let phase = spec.phase;
        let mut session = Session::new(
            spec,
            Rc::clone(&self.time),
            Rc::clone(&self.dispatcher),
        );
        let state = session.state();

        let subscription = self
            .source
            .subscribe(phase, Box::new(move |delta| session.tick(delta)));
        state.bind(subscription);

        ClockHandle::new(state)
    }
}
