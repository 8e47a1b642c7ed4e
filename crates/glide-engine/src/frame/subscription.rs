use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Cancellable registration token handed out by a [`FrameSource`](super::FrameSource).
///
/// Clones refer to the same registration. Releasing is idempotent: the first
/// `release` runs the source's detach action, later calls do nothing.
#[derive(Clone)]
pub struct Subscription {
    inner: Rc<Inner>,
}

struct Inner {
    live: Cell<bool>,
    detach: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl Subscription {
    /// Creates a live token. `detach` runs once, on the first release.
    pub fn new(detach: impl FnOnce() + 'static) -> Self {
        Self {
            inner: Rc::new(Inner {
                live: Cell::new(true),
                detach: RefCell::new(Some(Box::new(detach))),
            }),
        }
    }

    pub fn is_live(&self) -> bool {
        self.inner.live.get()
    }

    /// Releases the registration.
    ///
    /// Returns `true` if this call performed the release, `false` if the token
    /// was already released.
    pub fn release(&self) -> bool {
        if !self.inner.live.replace(false) {
            log::trace!("subscription already released");
            return false;
        }
        let detach = self.inner.detach.borrow_mut().take();
        if let Some(detach) = detach {
            detach();
        }
        true
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("live", &self.is_live()).finish()
    }
}
