//! # Bondview Core
//!
//! Data model for bond market snapshots.
//!
//! ## Module Structure
//!
//! - [`bond`]: A single bond instrument record
//! - [`bucket`]: Maturity bucket identifiers and open-ended bucket entries
//! - [`data`]: The full dataset snapshot and its JSON shape
//! - [`error`]: Encode/decode errors
//!
//! ## Example
//!
//! ```rust
//! use bondview_core::{Bond, BondData, Bucket};
//!
//! let data = BondData::new("2024-01-01")
//!     .with_current(vec![Bond::new("LTN-2027").with_value(812.35)])
//!     .with_bucket(Bucket::OneYear, vec![Bond::new("LFT-2025")]);
//!
//! assert_eq!(data.bond_count(), 2);
//! assert_eq!(data.find_by_code("LFT-2025").unwrap().0, Bucket::OneYear);
//!
//! let json = data.to_json().unwrap();
//! assert_eq!(BondData::from_json(&json).unwrap(), data);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bond;
pub mod bucket;
pub mod data;
pub mod error;

// Re-export commonly used types
pub use bond::Bond;
pub use bucket::{Bucket, BucketEntry};
pub use data::BondData;
pub use error::{ModelError, ModelResult};
