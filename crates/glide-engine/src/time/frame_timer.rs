use std::time::Duration;

use super::source::{MonotonicTime, TimeSource};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds.
    pub dt: f64,

    /// Source timestamp taken at the tick.
    pub now: Duration,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Host-side frame timer producing `FrameTime` snapshots.
///
/// The `dt` it yields is what a host passes to
/// [`FrameSignals::fire`](crate::frame::FrameSignals::fire). One timer per loop
/// keeps independent loops from sharing delta-time state.
///
/// Delta time is clamped to avoid pathological values when the process is paused
/// by the debugger, minimized, or stalls.
#[derive(Debug, Clone)]
pub struct FrameTimer<T = MonotonicTime> {
    time: T,
    last: Duration,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

const DEFAULT_DT_MIN: Duration = Duration::from_micros(100);
const DEFAULT_DT_MAX: Duration = Duration::from_millis(250);

impl FrameTimer {
    /// Creates a wall-clock timer with default clamps.
    ///
    /// - minimum prevents zero-dt behavior from tight loops on some platforms
    /// - maximum keeps downstream consumers stable after long stalls
    pub fn new() -> Self {
        Self::with_time(MonotonicTime::new())
    }

    /// Creates a wall-clock timer with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        Self::new().clamps(dt_min, dt_max)
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TimeSource> FrameTimer<T> {
    /// Creates a timer reading from `time`, with default clamps.
    pub fn with_time(time: T) -> Self {
        let last = time.now();
        Self {
            time,
            last,
            frame_index: 0,
            dt_min: DEFAULT_DT_MIN,
            dt_max: DEFAULT_DT_MAX,
        }
    }

    /// Replaces the delta-time clamps. Bounds given in the wrong order are
    /// swapped.
    pub fn clamps(mut self, dt_min: Duration, dt_max: Duration) -> Self {
        self.dt_min = dt_min.min(dt_max);
        self.dt_max = dt_max.max(dt_min);
        self
    }

    /// Resets the timer baseline.
    ///
    /// Useful when resuming from suspension so the first frame does not
    /// report the whole pause.
    pub fn reset(&mut self) {
        self.last = self.time.now();
    }

    /// Advances the timer and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let now = self.time.now();
        let mut dt = now.saturating_sub(self.last);

        // Clamp delta time to keep downstream consumers stable.
        if dt < self.dt_min {
            dt = self.dt_min;
        } else if dt > self.dt_max {
            dt = self.dt_max;
        }

        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f64(),
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}
