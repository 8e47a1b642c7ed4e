//! Time subsystem.
//!
//! Provides monotonic time sources and frame timing utilities without coupling
//! to any particular host loop.
//! Intended usage:
//! - the host owns one `FrameTimer` per loop and calls `tick()` once per frame
//! - clocks read the same `TimeSource` to measure elapsed time
//! - tests swap in `ManualTime` to step time deterministically

mod frame_timer;
mod source;

pub use frame_timer::{FrameTime, FrameTimer};
pub use source::{ManualTime, MonotonicTime, TimeSource};
