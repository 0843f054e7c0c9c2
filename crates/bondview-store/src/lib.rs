//! # Bondview Store
//!
//! Shared, observable holder for the current bond snapshot.
//!
//! A [`Store`] is created once at startup and handed (by clone, or as a
//! read-only [`StoreReader`]) to every collaborator that needs the data.
//! A single producer replaces the snapshot with [`Store::set`]; views
//! register observers with [`Store::subscribe`] and are called synchronously
//! on every write.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use bondview_core::{Bond, BondData};
//! use bondview_store::BondDataStore;
//!
//! let store = BondDataStore::new();
//! assert!(store.get_current().is_none());
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//! let subscription = store.reader().subscribe(move |data: Option<&BondData>| {
//!     sink.lock().unwrap().push(data.map(|d| d.updated.clone()));
//! });
//!
//! store.set(Some(BondData::new("2024-01-01").with_current(vec![Bond::new("LTN-2027")])));
//! assert_eq!(store.get_current().unwrap().bond_count(), 1);
//!
//! subscription.unsubscribe();
//! store.clear();
//!
//! assert_eq!(
//!     *seen.lock().unwrap(),
//!     vec![None, Some("2024-01-01".to_string())]
//! );
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod store;
pub mod subscription;

use bondview_core::BondData;

pub use config::StoreConfig;
pub use store::{Store, StoreReader};
pub use subscription::{Subscription, SubscriptionId};

/// Store holding the current [`BondData`] snapshot.
pub type BondDataStore = Store<BondData>;

/// Read-only handle onto a [`BondDataStore`].
pub type BondDataReader = StoreReader<BondData>;
