use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Monotonic time, measured from an arbitrary per-source origin.
pub trait TimeSource {
    fn now(&self) -> Duration;
}

/// Wall-clock backed source anchored at construction time.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicTime {
    origin: Instant,
}

impl MonotonicTime {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicTime {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Manually stepped source.
///
/// Clones share the same underlying time, so a test can keep one handle and
/// give another to the clock under test.
#[derive(Debug, Clone, Default)]
pub struct ManualTime {
    now: Rc<Cell<Duration>>,
}

impl ManualTime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves time forward by `by`.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get().saturating_add(by));
    }

    /// Moves time forward by `secs` seconds.
    ///
    /// Negative and NaN spans advance nothing; spans too large for a
    /// `Duration` saturate.
    pub fn advance_secs(&self, secs: f64) {
        if !(secs > 0.0) {
            return;
        }
        self.advance(Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX));
    }

    /// Jumps to an absolute time. Going backwards is allowed; consumers
    /// saturate negative spans to zero.
    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }
}

impl TimeSource for ManualTime {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Rc<T> {
    fn now(&self) -> Duration {
        (**self).now()
    }
}
