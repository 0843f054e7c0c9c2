//! Shared observable holder for a single snapshot value.
//!
//! A [`Store`] holds either nothing or one immutable snapshot behind an
//! `Arc`. Writers replace the snapshot wholesale; every registered observer
//! is called synchronously with each new value.
//!
//! # Delivery
//!
//! ```text
//! set(v) ──► state.current = v ──► pending round (v, observers)
//!                                        │
//!                 drain loop ◄───────────┘
//!                    │
//!                    ├──► observer 1 (v)
//!                    ├──► observer 2 (v)
//!                    └──► observer N (v)
//! ```
//!
//! Observers are invoked outside the state lock, in registration order.
//! A write issued while a drain is in progress (from inside an observer, or
//! from another thread) only appends a round; the running drain delivers it
//! after the current one, so no observer ever sees writes out of order.

use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::config::StoreConfig;
use crate::subscription::{Detach, Subscription, SubscriptionId};

type Callback<T> = Arc<dyn Fn(Option<&T>) + Send + Sync>;

struct Observer<T> {
    callback: Callback<T>,
    active: Arc<AtomicBool>,
}

impl<T> Clone for Observer<T> {
    fn clone(&self) -> Self {
        Self {
            callback: Arc::clone(&self.callback),
            active: Arc::clone(&self.active),
        }
    }
}

/// One write waiting to be delivered to the observers registered at the
/// time of the write.
struct Round<T> {
    value: Option<Arc<T>>,
    observers: Vec<Observer<T>>,
}

struct State<T> {
    current: Option<Arc<T>>,
    version: u64,
    next_id: u64,
    observers: BTreeMap<SubscriptionId, Observer<T>>,
    pending: VecDeque<Round<T>>,
    draining: bool,
}

struct Shared<T> {
    config: StoreConfig,
    state: Mutex<State<T>>,
}

impl<T: Send + Sync + 'static> Detach for Shared<T> {
    fn detach(&self, id: SubscriptionId) {
        // The removed observer may own other subscriptions; drop it unlocked.
        let (removed, remaining) = {
            let mut state = self.state.lock();
            let removed = state.observers.remove(&id);
            (removed, state.observers.len())
        };
        drop(removed);
        debug!(store = %self.config.label, subscription = %id, remaining, "observer unsubscribed");
    }
}

/// Resets the drain flag if an observer panics mid-delivery so later
/// writes are still delivered.
struct DrainGuard<'a, T> {
    shared: &'a Shared<T>,
}

impl<T> Drop for DrainGuard<'_, T> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            let discarded = {
                let mut state = self.shared.state.lock();
                state.draining = false;
                std::mem::take(&mut state.pending)
            };
            drop(discarded);
        }
    }
}

/// Shared, observable holder of an optional snapshot.
///
/// Cloning a `Store` creates another handle to the same state.
///
/// # Invariants
///
/// 1. A fresh store holds no value and has version 0.
/// 2. Every write bumps the version by exactly 1.
/// 3. Each observer sees every write made while it is registered, once, in
///    write order. Equal consecutive values are not coalesced.
/// 4. Observers never receive a mutable reference to the held value.
pub struct Store<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Send + Sync + 'static> Store<T> {
    /// Creates an empty store with the default config.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Creates an empty store with the given config.
    pub fn with_config(config: StoreConfig) -> Self {
        debug!(store = %config.label, "store initialized");
        Self {
            shared: Arc::new(Shared {
                config,
                state: Mutex::new(State {
                    current: None,
                    version: 0,
                    next_id: 0,
                    observers: BTreeMap::new(),
                    pending: VecDeque::new(),
                    draining: false,
                }),
            }),
        }
    }

    /// Store configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.shared.config
    }

    /// Replaces the held value and notifies every observer.
    pub fn set(&self, value: Option<T>) {
        self.replace(value.map(Arc::new));
    }

    /// Replaces the held value with an already shared snapshot.
    pub fn set_shared(&self, value: Option<Arc<T>>) {
        self.replace(value);
    }

    /// Drops the held value, equivalent to `set(None)`.
    pub fn clear(&self) {
        self.replace(None);
    }

    /// Computes a new value from the current one and stores it.
    ///
    /// Concurrent writers are not serialized against `f`; the last write wins.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(Option<&T>) -> Option<T>,
    {
        let current = self.get_current();
        let next = f(current.as_deref());
        self.set(next);
    }

    /// Value held at the instant of the call.
    pub fn get_current(&self) -> Option<Arc<T>> {
        self.shared.state.lock().current.clone()
    }

    /// Registers an observer.
    ///
    /// The observer is called with the current value before any later write,
    /// then once per write until the returned [`Subscription`] is released.
    /// When no delivery is running the initial call happens before
    /// `subscribe` returns; otherwise it is queued behind the running round.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(Option<&T>) + Send + Sync + 'static,
    {
        let observer = Observer {
            callback: Arc::new(observer) as Callback<T>,
            active: Arc::new(AtomicBool::new(true)),
        };
        let active = Arc::clone(&observer.active);

        let (id, start_drain) = {
            let mut state = self.shared.state.lock();
            let id = SubscriptionId(state.next_id);
            state.next_id += 1;
            state.observers.insert(id, observer.clone());

            // Initial delivery goes through the queue so a concurrent write
            // can never overtake it.
            let value = state.current.clone();
            state.pending.push_back(Round {
                value,
                observers: vec![observer],
            });

            let start_drain = !state.draining;
            state.draining = true;
            (id, start_drain)
        };
        debug!(store = %self.shared.config.label, subscription = %id, "observer subscribed");

        let store: Weak<dyn Detach> = Arc::downgrade(&self.shared) as Weak<dyn Detach>;
        let subscription = Subscription::new(id, active, store);

        if start_drain {
            self.drain();
        }
        subscription
    }

    /// Read-only handle onto this store.
    pub fn reader(&self) -> StoreReader<T> {
        StoreReader {
            store: self.clone(),
        }
    }

    /// Number of writes performed so far.
    pub fn version(&self) -> u64 {
        self.shared.state.lock().version
    }

    /// Number of registered observers.
    pub fn subscriber_count(&self) -> usize {
        self.shared.state.lock().observers.len()
    }

    fn replace(&self, value: Option<Arc<T>>) {
        // The replaced snapshot is released only after the lock is gone.
        let (previous, start_drain) = {
            let mut state = self.shared.state.lock();
            let previous = std::mem::replace(&mut state.current, value.clone());
            state.version += 1;

            debug!(
                store = %self.shared.config.label,
                version = state.version,
                present = value.is_some(),
                observers = state.observers.len(),
                "snapshot replaced"
            );

            let observers = state.observers.values().cloned().collect();
            state.pending.push_back(Round { value, observers });

            if state.draining {
                trace!(
                    store = %self.shared.config.label,
                    queued = state.pending.len(),
                    "delivery in progress, write queued"
                );
            }
            let start_drain = !state.draining;
            state.draining = true;
            (previous, start_drain)
        };
        drop(previous);

        if start_drain {
            self.drain();
        }
    }

    fn drain(&self) {
        let _guard = DrainGuard {
            shared: &self.shared,
        };

        loop {
            let round = {
                let mut state = self.shared.state.lock();
                match state.pending.pop_front() {
                    Some(round) => round,
                    None => {
                        state.draining = false;
                        return;
                    }
                }
            };

            for observer in &round.observers {
                if observer.active.load(Ordering::Acquire) {
                    (observer.callback)(round.value.as_deref());
                }
            }
        }
    }
}

impl<T: Send + Sync + 'static> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("Store")
            .field("label", &self.shared.config.label)
            .field("present", &state.current.is_some())
            .field("version", &state.version)
            .field("subscriber_count", &state.observers.len())
            .finish()
    }
}

/// Read-only view of a [`Store`].
///
/// Handed to consumers that may observe the snapshot but must not replace it.
pub struct StoreReader<T> {
    store: Store<T>,
}

impl<T> Clone for StoreReader<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<T: Send + Sync + 'static> StoreReader<T> {
    /// Value held at the instant of the call.
    pub fn get_current(&self) -> Option<Arc<T>> {
        self.store.get_current()
    }

    /// Registers an observer, see [`Store::subscribe`].
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(Option<&T>) + Send + Sync + 'static,
    {
        self.store.subscribe(observer)
    }

    /// Number of writes performed so far.
    pub fn version(&self) -> u64 {
        self.store.version()
    }
}

impl<T> fmt::Debug for StoreReader<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreReader")
            .field("store", &self.store)
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
