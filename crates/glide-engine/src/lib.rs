//! Glide engine crate.
//!
//! Value interpolation primitives plus a frame-driven clock that samples a
//! progress fraction over a fixed duration. The host owns the frame loop; this
//! crate only subscribes to it.

pub mod clock;
pub mod coords;
pub mod dispatch;
pub mod error;
pub mod frame;
pub mod interp;
pub mod logging;
pub mod time;

pub use error::ClockError;
