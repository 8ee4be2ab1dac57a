use std::any::Any;

/// Handle to an installed observer or callback.
///
/// Dropping the handle unsubscribes. A subscription may also keep the
/// observer it installed alive, since broadcasts only hold observers
/// weakly.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
    keepalive: Option<Box<dyn Any + Send + Sync>>,
}

impl Subscription {
    pub fn new<F: FnOnce() + Send + Sync + 'static>(cancel: F) -> Self {
        Subscription {
            cancel: Some(Box::new(cancel)),
            keepalive: None,
        }
    }

    /// A subscription that is already cancelled.
    pub fn empty() -> Self {
        Subscription {
            cancel: None,
            keepalive: None,
        }
    }

    pub fn keep_alive<K: Any + Send + Sync>(mut self, keepalive: K) -> Self {
        self.keepalive = Some(Box::new(keepalive));
        self
    }

    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }

    /// Stops future delivery. A dispatch already past this point
    /// on another thread still completes.
    pub fn unsubscribe(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
        self.keepalive = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
