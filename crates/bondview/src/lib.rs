//! # Bondview
//!
//! Bond market snapshot model plus the shared store that holds the current
//! snapshot for every view of the application.
//!
//! This crate re-exports [`bondview_core`] and [`bondview_store`]; most users
//! only need the [`prelude`].
//!
//! ```rust
//! use bondview::prelude::*;
//!
//! let store = BondDataStore::new();
//! let reader = store.reader();
//!
//! store.set(Some(BondData::new("2024-01-01")));
//! assert_eq!(reader.get_current().unwrap().updated, "2024-01-01");
//! ```

#![warn(missing_docs)]

pub use bondview_core as model;
pub use bondview_store as store;

pub use bondview_core::{Bond, BondData, Bucket, BucketEntry, ModelError, ModelResult};
pub use bondview_store::{
    BondDataReader, BondDataStore, Store, StoreConfig, StoreReader, Subscription, SubscriptionId,
};

/// Commonly used types.
pub mod prelude {
    pub use bondview_core::{Bond, BondData, Bucket, BucketEntry};
    pub use bondview_store::{BondDataReader, BondDataStore, StoreConfig, Subscription};
}
