use std::any::Any;
use std::fmt;

use crate::dispatch::CallbackKind;

/// Failures surfaced by clock sessions and their callbacks.
///
/// None of these abort the frame loop. A failing tick still tears its session
/// down, and a failing callback never prevents the remaining callbacks from
/// running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClockError {
    /// A frame phase name did not match any known phase.
    UnknownPhase(String),
    /// The cancel predicate panicked while being polled.
    PredicatePanicked { message: String },
    /// A dispatched progress or completion callback panicked.
    CallbackPanicked { callback: CallbackKind, message: String },
}

impl fmt::Display for ClockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPhase(name) => write!(f, "unknown frame phase `{name}`"),
            Self::PredicatePanicked { message } => {
                write!(f, "cancel predicate panicked: {message}")
            }
            Self::CallbackPanicked { callback, message } => {
                write!(f, "{callback} callback panicked: {message}")
            }
        }
    }
}

impl std::error::Error for ClockError {}

/// Extracts a readable message from a `catch_unwind` payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
