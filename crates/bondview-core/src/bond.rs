//! Single bond instrument record.

use serde::{Deserialize, Serialize};

/// A bond instrument as published in a snapshot.
///
/// Field names on the wire are camelCase, with the optional GraphQL-style
/// `__typename` discriminator carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bond {
    /// Optional type discriminator tag.
    #[serde(rename = "__typename", default, skip_serializing_if = "Option::is_none")]
    pub typename: Option<String>,
    /// Issuance/reference year.
    pub year: i64,
    /// Maturity date (numeric encoding).
    pub maturity_date: i64,
    /// Free-text label.
    pub description: String,
    /// Free-text annotation.
    pub comments: String,
    /// Instrument identifier.
    pub code: String,
    /// Current value/price.
    pub value: f64,
    /// Coupon/payment period descriptor.
    pub period: String,
    /// Total issued amount.
    pub amount_issued: f64,
    /// Duration descriptor.
    pub duration: String,
    /// Maturity classification.
    pub maturity_type: String,
    /// Currency code.
    pub issued_currency: String,
}

impl Bond {
    /// Creates a bond with the given code and every other field empty or zero.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            typename: None,
            year: 0,
            maturity_date: 0,
            description: String::new(),
            comments: String::new(),
            code: code.into(),
            value: 0.0,
            period: String::new(),
            amount_issued: 0.0,
            duration: String::new(),
            maturity_type: String::new(),
            issued_currency: String::new(),
        }
    }

    /// Sets the type discriminator.
    pub fn with_typename(mut self, typename: impl Into<String>) -> Self {
        self.typename = Some(typename.into());
        self
    }

    /// Sets the year.
    pub fn with_year(mut self, year: i64) -> Self {
        self.year = year;
        self
    }

    /// Sets the maturity date.
    pub fn with_maturity_date(mut self, maturity_date: i64) -> Self {
        self.maturity_date = maturity_date;
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the comments.
    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = comments.into();
        self
    }

    /// Sets the value.
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    /// Sets the period.
    pub fn with_period(mut self, period: impl Into<String>) -> Self {
        self.period = period.into();
        self
    }

    /// Sets the amount issued.
    pub fn with_amount_issued(mut self, amount_issued: f64) -> Self {
        self.amount_issued = amount_issued;
        self
    }

    /// Sets the duration descriptor.
    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = duration.into();
        self
    }

    /// Sets the maturity type.
    pub fn with_maturity_type(mut self, maturity_type: impl Into<String>) -> Self {
        self.maturity_type = maturity_type.into();
        self
    }

    /// Sets the issued currency.
    pub fn with_issued_currency(mut self, currency: impl Into<String>) -> Self {
        self.issued_currency = currency.into();
        self
    }
}
