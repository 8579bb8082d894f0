//! Query compilation
//!
//! Deterministically turns a [`TransactionFilter`] into the backend's boolean
//! query tree: one clause per set field, AND-combined. Free-text fields get
//! fuzzy match clauses, enum fields get exact term clauses against the
//! unanalyzed `.keyword` representation, ranges include only the bounds that
//! are present, and a filter with no clauses compiles to `match_all` (an
//! empty boolean conjunction would match nothing on most backends).
//!
//! Compilation never fails: a date bound that isn't `YYYY-MM-DD` shaped is
//! rejected on its own (logged) while the rest of the filter still compiles,
//! and non-finite amounts are dropped the same way.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{json, Value};
use tracing::warn;

use crate::filter::{SummaryFilter, TransactionFilter};

/// Shape check for date bounds. Deliberately not a calendar check: the
/// extractor emits day-31 month ends regardless of month length and those
/// must pass through to the backend unchanged.
fn is_date_shaped(value: &str) -> bool {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    SHAPE
        .get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("static pattern"))
        .is_match(value)
}

/// Validate a date bound, dropping (with a warning) anything unparseable
fn date_bound<'a>(field: &str, bound: Option<&'a str>) -> Option<&'a str> {
    let value = bound?;
    if is_date_shaped(value) {
        Some(value)
    } else {
        warn!(field, value, "dropping malformed date bound");
        None
    }
}

/// Validate an amount bound, dropping NaN/infinite values
fn amount_bound(field: &str, bound: Option<f64>) -> Option<f64> {
    let value = bound?;
    if value.is_finite() {
        Some(value)
    } else {
        warn!(field, value, "dropping non-finite amount bound");
        None
    }
}

/// An inclusive range clause with only the bounds present; None when neither
/// bound survives validation
fn range_clause(field: &str, gte: Option<Value>, lte: Option<Value>) -> Option<Value> {
    let mut range = serde_json::Map::new();
    if let Some(gte) = gte {
        range.insert("gte".into(), gte);
    }
    if let Some(lte) = lte {
        range.insert("lte".into(), lte);
    }
    if range.is_empty() {
        None
    } else {
        Some(json!({ "range": { field: Value::Object(range) } }))
    }
}

/// Compile a filter into the backend boolean query tree
pub fn compile(filter: &TransactionFilter) -> Value {
    let mut must: Vec<Value> = Vec::new();

    // Free-text fields: fuzzy matching, never exact-string-only.
    if let Some(ref description) = filter.description {
        must.push(json!({
            "multi_match": {
                "query": description,
                "fields": ["description^2", "memo", "reference"],
                "fuzziness": "AUTO",
                "operator": "and"
            }
        }));
    }

    if let Some(ref merchant) = filter.merchant {
        must.push(json!({
            "match": { "merchant": { "query": merchant, "fuzziness": "AUTO" } }
        }));
    }

    if let Some(ref category) = filter.category {
        must.push(json!({
            "match": { "category": { "query": category, "fuzziness": "AUTO" } }
        }));
    }

    if let Some(ref location) = filter.location {
        must.push(json!({
            "multi_match": {
                "query": location,
                "fields": ["location.city", "location.state", "location.address", "location.country"],
                "fuzziness": "AUTO"
            }
        }));
    }

    // Enum fields: exact, case-folded, against the unanalyzed representation.
    if let Some(account_type) = filter.account_type {
        must.push(json!({ "term": { "account_type.keyword": account_type.as_str() } }));
    }

    if let Some(transaction_type) = filter.transaction_type {
        must.push(json!({ "term": { "transaction_type.keyword": transaction_type.as_str() } }));
    }

    // Ranges: only the bounds actually present; min > max passes through.
    if let Some(clause) = range_clause(
        "amount",
        amount_bound("amount_min", filter.amount_min).map(|v| json!(v)),
        amount_bound("amount_max", filter.amount_max).map(|v| json!(v)),
    ) {
        must.push(clause);
    }

    if let Some(clause) = range_clause(
        "transaction_date",
        date_bound("date_from", filter.date_from.as_deref()).map(|v| json!(v)),
        date_bound("date_to", filter.date_to.as_deref()).map(|v| json!(v)),
    ) {
        must.push(clause);
    }

    // Tags: document must share at least one tag with the set.
    if let Some(ref tags) = filter.tags {
        if !tags.is_empty() {
            must.push(json!({ "terms": { "tags.keyword": tags } }));
        }
    }

    if must.is_empty() {
        json!({ "match_all": {} })
    } else {
        json!({ "bool": { "must": must } })
    }
}

/// Compile the reduced summary filter into the same boolean tree shape
pub fn compile_summary(filter: &SummaryFilter) -> Value {
    let mut must: Vec<Value> = Vec::new();

    if let Some(clause) = range_clause(
        "transaction_date",
        date_bound("date_from", filter.date_from.as_deref()).map(|v| json!(v)),
        date_bound("date_to", filter.date_to.as_deref()).map(|v| json!(v)),
    ) {
        must.push(clause);
    }

    if let Some(ref category) = filter.category {
        must.push(json!({ "match": { "category": category } }));
    }

    if let Some(account_type) = filter.account_type {
        must.push(json!({ "term": { "account_type.keyword": account_type.as_str() } }));
    }

    if must.is_empty() {
        json!({ "match_all": {} })
    } else {
        json!({ "bool": { "must": must } })
    }
}

/// The sort specification every compiled search requests: transaction date,
/// newest first
pub fn sort_spec() -> Value {
    json!([{ "transaction_date": { "order": "desc" } }])
}
