//! Property-based tests for delivery ordering.
//!
//! These verify that for any sequence of writes:
//! - every registered observer sees exactly that sequence, in order
//! - unsubscribed observers see nothing after the unsubscribe
//! - the last delivered value always matches the current value
//! - a subscribe racing a write on another thread still sees its initial
//!   value first

use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use bondview_store::Store;
use parking_lot::Mutex;
use proptest::prelude::*;

fn collect(store: &Store<u32>) -> (Arc<Mutex<Vec<Option<u32>>>>, bondview_store::Subscription) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let sub = store.subscribe(move |v| sink.lock().push(v.copied()));
    (seen, sub)
}

proptest! {
    #[test]
    fn prop_observer_sees_every_write_in_order(
        writes in prop::collection::vec(prop::option::of(0u32..8), 0..64),
        observers in 1usize..5
    ) {
        let store = Store::new();
        let watchers: Vec<_> = (0..observers).map(|_| collect(&store)).collect();

        for w in &writes {
            store.set(*w);
        }

        let mut expected = vec![None];
        expected.extend(writes.iter().copied());
        for (seen, _sub) in &watchers {
            prop_assert_eq!(&*seen.lock(), &expected);
        }
        prop_assert_eq!(store.version(), writes.len() as u64);
        prop_assert_eq!(store.get_current().as_deref().copied(), writes.last().copied().flatten());
    }

    #[test]
    fn prop_unsubscribe_cuts_delivery(
        writes in prop::collection::vec(0u32..100, 1..32),
        cut in 0usize..32
    ) {
        let cut = cut.min(writes.len());
        let store = Store::new();
        let (seen, sub) = collect(&store);

        for w in &writes[..cut] {
            store.set(Some(*w));
        }
        sub.unsubscribe();
        for w in &writes[cut..] {
            store.set(Some(*w));
        }

        let mut expected = vec![None];
        expected.extend(writes[..cut].iter().map(|w| Some(*w)));
        prop_assert_eq!(&*seen.lock(), &expected);
    }

    #[test]
    fn prop_nested_writes_keep_order(
        writes in prop::collection::vec(1u32..50, 1..16)
    ) {
        let store: Store<u32> = Store::new();
        let (seen, _sub) = collect(&store);

        // Every odd value is followed by a nested write of value + 1000.
        let inner = store.clone();
        let _echo = store.subscribe(move |v| {
            if let Some(v) = v {
                if *v < 1000 && v % 2 == 1 {
                    inner.set(Some(v + 1000));
                }
            }
        });

        for w in &writes {
            store.set(Some(*w));
        }

        let mut expected = vec![None];
        for w in &writes {
            expected.push(Some(*w));
            if w % 2 == 1 {
                expected.push(Some(w + 1000));
            }
        }
        prop_assert_eq!(&*seen.lock(), &expected);
    }
}

#[test]
fn test_concurrent_writers_last_delivery_matches_current() {
    let store: Store<u32> = Store::new();
    let (seen, _sub) = collect(&store);

    thread::scope(|s| {
        for t in 0..4u32 {
            let store = store.clone();
            s.spawn(move || {
                for i in 0..250u32 {
                    store.set(Some(t * 1000 + i));
                }
            });
        }
    });

    let seen = seen.lock();
    assert_eq!(seen.len(), 1 + 4 * 250);
    assert_eq!(store.version(), 1000);
    assert_eq!(seen.last().copied().flatten(), store.get_current().as_deref().copied());

    // Each writer's values arrive in the order that writer issued them.
    for t in 0..4u32 {
        let from_writer: Vec<u32> = seen
            .iter()
            .flatten()
            .copied()
            .filter(|v| v / 1000 == t)
            .collect();
        let issued: Vec<u32> = (0..250).map(|i| t * 1000 + i).collect();
        assert_eq!(from_writer, issued);
    }
}

#[test]
fn test_subscribe_racing_write_delivers_initial_value_first() {
    let store: Store<u32> = Store::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let (entered_tx, entered_rx) = mpsc::channel::<()>();
    let (release_tx, release_rx) = mpsc::channel::<()>();
    let entered_tx = Mutex::new(entered_tx);
    let release_rx = Mutex::new(release_rx);

    // The observer stalls inside its initial delivery until released.
    let subscriber = {
        let store = store.clone();
        let sink = Arc::clone(&seen);
        thread::spawn(move || {
            store.subscribe(move |v| {
                if v.is_none() {
                    let _ = entered_tx.lock().send(());
                    let _ = release_rx.lock().recv();
                }
                sink.lock().push(v.copied());
            })
        })
    };

    entered_rx
        .recv_timeout(Duration::from_secs(5))
        .expect("initial delivery never started");
    store.set(Some(1));
    release_tx.send(()).unwrap();
    let _sub = subscriber.join().unwrap();

    let seen = seen.lock();
    assert_eq!(*seen, vec![None, Some(1)]);
    assert_eq!(seen.last().copied().flatten(), store.get_current().as_deref().copied());
}

#[test]
fn test_unsubscribe_observer_owning_subscription_across_threads() {
    let store: Store<u32> = Store::new();
    let (inner_seen, inner) = collect(&store);
    let outer = store.subscribe(move |_| {
        let _keep = &inner;
    });
    assert_eq!(store.subscriber_count(), 2);

    let (done_tx, done_rx) = mpsc::channel();
    thread::spawn(move || {
        outer.unsubscribe();
        let _ = done_tx.send(());
    });
    done_rx
        .recv_timeout(Duration::from_secs(5))
        .expect("unsubscribe did not complete");

    assert_eq!(store.subscriber_count(), 0);
    store.set(Some(7));
    assert_eq!(*inner_seen.lock(), vec![None]);
}
