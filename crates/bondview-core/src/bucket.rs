//! Maturity bucket identifiers and bucket entry values.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::bond::Bond;

/// JSON key of the current bucket.
pub const CURRENT_KEY: &str = "bonds_current";
/// JSON key of the 3 month bucket.
pub const THREE_MONTHS_KEY: &str = "bonds_3m";
/// JSON key of the 1 year bucket.
pub const ONE_YEAR_KEY: &str = "bonds_1y";
/// JSON key of the 3 year bucket.
pub const THREE_YEARS_KEY: &str = "bonds_3y";

/// Identifies a bucket inside a [`BondData`](crate::BondData) snapshot.
#[derive(Debug, Clone, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub enum Bucket {
    /// `bonds_current`
    Current,
    /// `bonds_3m`
    ThreeMonths,
    /// `bonds_1y`
    OneYear,
    /// `bonds_3y`
    ThreeYears,
    /// Any other top-level key.
    Other(String),
}

impl Bucket {
    /// The four buckets with dedicated fields, in display order.
    pub const NAMED: [Bucket; 4] = [
        Bucket::Current,
        Bucket::ThreeMonths,
        Bucket::OneYear,
        Bucket::ThreeYears,
    ];

    /// Maps a JSON key to its bucket.
    pub fn parse(key: &str) -> Self {
        match key {
            CURRENT_KEY => Bucket::Current,
            THREE_MONTHS_KEY => Bucket::ThreeMonths,
            ONE_YEAR_KEY => Bucket::OneYear,
            THREE_YEARS_KEY => Bucket::ThreeYears,
            other => Bucket::Other(other.to_string()),
        }
    }

    /// JSON key for this bucket.
    pub fn field_name(&self) -> &str {
        match self {
            Bucket::Current => CURRENT_KEY,
            Bucket::ThreeMonths => THREE_MONTHS_KEY,
            Bucket::OneYear => ONE_YEAR_KEY,
            Bucket::ThreeYears => THREE_YEARS_KEY,
            Bucket::Other(key) => key.as_str(),
        }
    }

    /// Returns true for the buckets backed by a dedicated field.
    pub fn is_named(&self) -> bool {
        !matches!(self, Bucket::Other(_))
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.field_name())
    }
}

impl From<&str> for Bucket {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for Bucket {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

/// Value of an open-ended snapshot entry.
///
/// Producers may attach bond lists or plain strings under arbitrary keys;
/// `null` is kept as [`BucketEntry::Undefined`] rather than rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BucketEntry {
    /// A list of bonds.
    Bonds(Vec<Bond>),
    /// A string value.
    Text(String),
    /// Explicit `null`.
    Undefined,
}

impl BucketEntry {
    /// Bonds held by this entry, if any.
    pub fn as_bonds(&self) -> Option<&[Bond]> {
        match self {
            BucketEntry::Bonds(bonds) => Some(bonds),
            _ => None,
        }
    }

    /// Text held by this entry, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            BucketEntry::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<Vec<Bond>> for BucketEntry {
    fn from(bonds: Vec<Bond>) -> Self {
        BucketEntry::Bonds(bonds)
    }
}

impl From<String> for BucketEntry {
    fn from(text: String) -> Self {
        BucketEntry::Text(text)
    }
}

impl From<&str> for BucketEntry {
    fn from(text: &str) -> Self {
        BucketEntry::Text(text.to_string())
    }
}
