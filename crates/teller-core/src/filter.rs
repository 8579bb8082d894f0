//! Structured search filters
//!
//! `TransactionFilter` is the typed representation of one search request.
//! It is produced by the parameter extractor (or supplied directly by a
//! structured caller such as the CLI or an LLM tool front-end), consumed
//! once by the query compiler, then discarded.

use serde::{Deserialize, Serialize};

use crate::models::{AccountType, TransactionType};

/// Default result cap when the request doesn't ask for "all"
pub const DEFAULT_LIMIT: i64 = 10;

/// Result cap when the utterance contains "all"/"everything"
pub const EXPANDED_LIMIT: i64 = 100;

/// A structured transaction search request
///
/// Every criterion is optional; unset fields place no constraint on the
/// query. An entirely empty filter compiles to a match-everything query.
/// `amount_min > amount_max` is tolerated and passed through to the backend
/// as-is rather than rejected here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionFilter {
    /// Matched fuzzily across description/memo/reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Matched fuzzily across city/state/address/country
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_max: Option<f64>,
    /// Inclusive range start, `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    /// Inclusive range end, `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<AccountType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
    /// Document must carry at least one of these (backend "terms" semantics)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Result count cap
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

impl Default for TransactionFilter {
    fn default() -> Self {
        Self {
            description: None,
            merchant: None,
            category: None,
            location: None,
            amount_min: None,
            amount_max: None,
            date_from: None,
            date_to: None,
            account_type: None,
            transaction_type: None,
            tags: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no search criterion is set (limit alone is not a criterion)
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.merchant.is_none()
            && self.category.is_none()
            && self.location.is_none()
            && self.amount_min.is_none()
            && self.amount_max.is_none()
            && self.date_from.is_none()
            && self.date_to.is_none()
            && self.account_type.is_none()
            && self.transaction_type.is_none()
            && self.tags.is_none()
    }

    /// Project onto the reduced filter accepted by the aggregation path
    ///
    /// Free-text, amount, and tag criteria have no aggregation counterpart
    /// and are dropped, matching the summary tool's narrower signature.
    pub fn to_summary_filter(&self) -> SummaryFilter {
        SummaryFilter {
            date_from: self.date_from.clone(),
            date_to: self.date_to.clone(),
            category: self.category.clone(),
            account_type: self.account_type,
        }
    }

    pub fn description(mut self, value: impl Into<String>) -> Self {
        self.description = Some(value.into());
        self
    }

    pub fn merchant(mut self, value: impl Into<String>) -> Self {
        self.merchant = Some(value.into());
        self
    }

    pub fn category(mut self, value: impl Into<String>) -> Self {
        self.category = Some(value.into());
        self
    }

    pub fn location(mut self, value: impl Into<String>) -> Self {
        self.location = Some(value.into());
        self
    }

    pub fn amount_min(mut self, value: f64) -> Self {
        self.amount_min = Some(value);
        self
    }

    pub fn amount_max(mut self, value: f64) -> Self {
        self.amount_max = Some(value);
        self
    }

    pub fn date_from(mut self, value: impl Into<String>) -> Self {
        self.date_from = Some(value.into());
        self
    }

    pub fn date_to(mut self, value: impl Into<String>) -> Self {
        self.date_to = Some(value.into());
        self
    }

    pub fn account_type(mut self, value: AccountType) -> Self {
        self.account_type = Some(value);
        self
    }

    pub fn transaction_type(mut self, value: TransactionType) -> Self {
        self.transaction_type = Some(value);
        self
    }

    pub fn tags(mut self, values: Vec<String>) -> Self {
        self.tags = Some(values);
        self
    }

    pub fn limit(mut self, value: i64) -> Self {
        self.limit = value;
        self
    }
}

/// The reduced filter accepted by the aggregation compiler
///
/// Only date range, category, and account type are meaningful for summary
/// statistics; the narrower type makes the restriction structural instead of
/// a runtime check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<AccountType>,
}

impl SummaryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.date_from.is_none()
            && self.date_to.is_none()
            && self.category.is_none()
            && self.account_type.is_none()
    }
}
