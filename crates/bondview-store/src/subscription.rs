//! Subscription handles returned by [`Store::subscribe`](crate::Store::subscribe).

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

/// Identifier of a registered observer, unique within one store.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Removes an observer from its store.
pub(crate) trait Detach: Send + Sync {
    fn detach(&self, id: SubscriptionId);
}

/// Handle to a registered observer.
///
/// Calling [`unsubscribe`](Self::unsubscribe) or dropping the handle
/// deregisters the observer. Once deregistered, the observer is never
/// invoked again, including for writes already queued for delivery.
#[must_use = "dropping a Subscription unsubscribes its observer"]
pub struct Subscription {
    id: SubscriptionId,
    active: Arc<AtomicBool>,
    store: Weak<dyn Detach>,
}

impl Subscription {
    pub(crate) fn new(id: SubscriptionId, active: Arc<AtomicBool>, store: Weak<dyn Detach>) -> Self {
        Self { id, active, store }
    }

    /// Identifier of this subscription.
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Returns true until the observer is deregistered.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Deregisters the observer.
    pub fn unsubscribe(self) {
        // Drop does the work.
    }

    fn release(&mut self) {
        if self.active.swap(false, Ordering::AcqRel) {
            if let Some(store) = self.store.upgrade() {
                store.detach(self.id);
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Recorder {
        detached: Mutex<Vec<SubscriptionId>>,
    }

    impl Detach for Recorder {
        fn detach(&self, id: SubscriptionId) {
            self.detached.lock().push(id);
        }
    }

    #[test]
    fn test_unsubscribe_detaches_once() {
        let recorder = Arc::new(Recorder::default());
        let weak: Weak<dyn Detach> = Arc::downgrade(&recorder) as Weak<dyn Detach>;
        let active = Arc::new(AtomicBool::new(true));

        let sub = Subscription::new(SubscriptionId(7), Arc::clone(&active), weak);
        assert!(sub.is_active());
        assert_eq!(sub.id().to_string(), "sub-7");

        sub.unsubscribe();
        assert!(!active.load(Ordering::Acquire));
        assert_eq!(*recorder.detached.lock(), vec![SubscriptionId(7)]);
    }

    #[test]
    fn test_drop_after_store_gone() {
        let recorder = Arc::new(Recorder::default());
        let weak: Weak<dyn Detach> = Arc::downgrade(&recorder) as Weak<dyn Detach>;
        let active = Arc::new(AtomicBool::new(true));
        let sub = Subscription::new(SubscriptionId(1), Arc::clone(&active), weak);

        drop(recorder);
        drop(sub);
        assert!(!active.load(Ordering::Acquire));
    }
}
