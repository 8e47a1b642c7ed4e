//! Frame notification contract.
//!
//! The host owns the frame loop and exposes named phases of it. Anything that
//! wants per-frame callbacks subscribes a handler to a phase and gets back a
//! [`Subscription`] token it can release at any time.

mod phase;
mod signals;
mod subscription;

use crate::error::ClockError;

pub use phase::FramePhase;
pub use signals::{FrameReport, FrameSignals};
pub use subscription::Subscription;

/// Per-frame handler. Receives the frame delta in seconds.
///
/// A returned error is reported to the host for that tick only; it does not
/// detach the handler.
pub type FrameHandler = Box<dyn FnMut(f64) -> Result<(), ClockError>>;

/// A source of per-frame notifications.
pub trait FrameSource {
    /// Registers `handler` for `phase`. The handler fires once per frame until
    /// the returned subscription is released.
    fn subscribe(&self, phase: FramePhase, handler: FrameHandler) -> Subscription;
}

impl<S: FrameSource + ?Sized> FrameSource for std::rc::Rc<S> {
    fn subscribe(&self, phase: FramePhase, handler: FrameHandler) -> Subscription {
        (**self).subscribe(phase, handler)
    }
}
