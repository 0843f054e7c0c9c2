//! Bond dataset snapshot.
//!
//! A [`BondData`] value is built wholesale by a producer and then treated as
//! immutable. Besides the four maturity buckets with dedicated fields, a
//! snapshot may carry arbitrary extra top-level keys; those are kept in
//! [`BondData::extra`] so no producer data is dropped on a decode/encode
//! cycle.
//!
//! The optional named buckets are the one exception: an explicit `null`
//! (e.g. `"bonds_1y": null`) decodes to `None`, the same as a missing key,
//! and `None` is omitted on encode. Extra keys keep `null` as
//! [`BucketEntry::Undefined`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::bond::Bond;
use crate::bucket::{Bucket, BucketEntry};
use crate::error::{ModelError, ModelResult};

/// Snapshot of the full bond dataset at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondData {
    /// Timestamp of the last refresh.
    pub updated: String,
    /// Currently listed bonds.
    pub bonds_current: Vec<Bond>,
    /// Bonds maturing within 3 months. `null` and a missing key both
    /// decode to `None`; `None` is not encoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonds_3m: Option<Vec<Bond>>,
    /// Bonds maturing within 1 year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonds_1y: Option<Vec<Bond>>,
    /// Bonds maturing within 3 years.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonds_3y: Option<Vec<Bond>>,
    /// Every other top-level key.
    #[serde(flatten)]
    pub extra: BTreeMap<String, BucketEntry>,
}

impl BondData {
    /// Creates an empty snapshot stamped with `updated`.
    pub fn new(updated: impl Into<String>) -> Self {
        Self {
            updated: updated.into(),
            bonds_current: Vec::new(),
            bonds_3m: None,
            bonds_1y: None,
            bonds_3y: None,
            extra: BTreeMap::new(),
        }
    }

    /// Sets the current bonds.
    pub fn with_current(mut self, bonds: Vec<Bond>) -> Self {
        self.bonds_current = bonds;
        self
    }

    /// Stores `bonds` under `bucket`.
    pub fn with_bucket(mut self, bucket: Bucket, bonds: Vec<Bond>) -> Self {
        match bucket {
            Bucket::Current => self.bonds_current = bonds,
            Bucket::ThreeMonths => self.bonds_3m = Some(bonds),
            Bucket::OneYear => self.bonds_1y = Some(bonds),
            Bucket::ThreeYears => self.bonds_3y = Some(bonds),
            Bucket::Other(key) => {
                self.extra.insert(key, BucketEntry::Bonds(bonds));
            }
        }
        self
    }

    /// Stores a string entry under `key`.
    ///
    /// Keys of the dedicated bucket fields cannot hold text; the entry is
    /// dropped and a `debug` event is logged.
    ///
    /// ```rust
    /// use bondview_core::BondData;
    ///
    /// let data = BondData::new("2024-01-01")
    ///     .with_text("source", "tesouro")
    ///     .with_text("bonds_1y", "ignored");
    ///
    /// assert_eq!(data.text("source"), Some("tesouro"));
    /// assert!(data.bonds_1y.is_none());
    /// assert!(data.text("bonds_1y").is_none());
    /// ```
    pub fn with_text(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        let key = key.into();
        if Bucket::parse(&key).is_named() {
            debug!(key = %key, "text entry ignored for named bucket key");
        } else {
            self.extra.insert(key, BucketEntry::Text(text.into()));
        }
        self
    }

    /// Bonds stored under `bucket`.
    ///
    /// Returns `None` when the bucket is missing or holds a non-bond entry.
    pub fn bucket(&self, bucket: &Bucket) -> Option<&[Bond]> {
        match bucket {
            Bucket::Current => Some(&self.bonds_current),
            Bucket::ThreeMonths => self.bonds_3m.as_deref(),
            Bucket::OneYear => self.bonds_1y.as_deref(),
            Bucket::ThreeYears => self.bonds_3y.as_deref(),
            Bucket::Other(key) => self.extra.get(key).and_then(BucketEntry::as_bonds),
        }
    }

    /// Every bucket holding bonds: named buckets first, then extra entries
    /// in key order.
    pub fn bond_buckets(&self) -> impl Iterator<Item = (Bucket, &[Bond])> + '_ {
        let named = [
            (Bucket::Current, Some(self.bonds_current.as_slice())),
            (Bucket::ThreeMonths, self.bonds_3m.as_deref()),
            (Bucket::OneYear, self.bonds_1y.as_deref()),
            (Bucket::ThreeYears, self.bonds_3y.as_deref()),
        ];

        named
            .into_iter()
            .filter_map(|(bucket, bonds)| bonds.map(|b| (bucket, b)))
            .chain(self.extra.iter().filter_map(|(key, entry)| {
                entry
                    .as_bonds()
                    .map(|bonds| (Bucket::Other(key.clone()), bonds))
            }))
    }

    /// String entry stored under `key`.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(BucketEntry::as_text)
    }

    /// Total number of bonds across all buckets.
    pub fn bond_count(&self) -> usize {
        self.bond_buckets().map(|(_, bonds)| bonds.len()).sum()
    }

    /// First bond with the given code, searched in [`bond_buckets`](Self::bond_buckets) order.
    pub fn find_by_code(&self, code: &str) -> Option<(Bucket, &Bond)> {
        self.bond_buckets().find_map(|(bucket, bonds)| {
            bonds
                .iter()
                .find(|bond| bond.code == code)
                .map(|bond| (bucket, bond))
        })
    }

    /// Decodes a snapshot from a JSON string.
    pub fn from_json(json: &str) -> ModelResult<Self> {
        serde_json::from_str(json).map_err(|e| ModelError::ParseError(e.to_string()))
    }

    /// Decodes a snapshot from JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> ModelResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| ModelError::ParseError(e.to_string()))
    }

    /// Encodes the snapshot as compact JSON.
    pub fn to_json(&self) -> ModelResult<String> {
        serde_json::to_string(self).map_err(|e| ModelError::SerializationError(e.to_string()))
    }

    /// Encodes the snapshot as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> ModelResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ModelError::SerializationError(e.to_string()))
    }
}
