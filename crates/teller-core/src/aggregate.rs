//! Aggregation compilation
//!
//! The summary path's counterpart to the query compiler: builds the backend
//! aggregation request for a reduced [`SummaryFilter`], and parses the
//! backend's aggregation response back into a [`TransactionSummary`]. All
//! monetary aggregates are rounded to 2 decimal places so currency display
//! stays deterministic.

use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::models::{AccountSpending, CategorySpending, MonthlySpending, TransactionSummary};

/// How many category buckets the backend is asked for
const CATEGORY_BUCKETS: usize = 20;

/// The aggregation request: sum/avg/count over the filtered set, plus
/// grouped sums and counts by category (top 20, backend ordering), by
/// account type (all values), and by calendar month (chronological).
pub fn aggregation_spec() -> Value {
    json!({
        "total_amount": { "sum": { "field": "amount" } },
        "avg_amount": { "avg": { "field": "amount" } },
        "transaction_count": { "value_count": { "field": "amount" } },
        "by_category": {
            "terms": { "field": "category.keyword", "size": CATEGORY_BUCKETS },
            "aggs": { "total_spent": { "sum": { "field": "amount" } } }
        },
        "by_account": {
            "terms": { "field": "account_type.keyword" },
            "aggs": { "total_amount": { "sum": { "field": "amount" } } }
        },
        "by_month": {
            "date_histogram": {
                "field": "transaction_date",
                "calendar_interval": "month"
            },
            "aggs": { "monthly_total": { "sum": { "field": "amount" } } }
        }
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A sub-aggregation's numeric value; null/missing means an empty set (0.0)
fn metric_value(agg: &Value) -> f64 {
    agg.get("value").and_then(Value::as_f64).unwrap_or(0.0)
}

fn named_agg<'a>(aggregations: &'a Value, name: &str) -> Result<&'a Value> {
    aggregations
        .get(name)
        .ok_or_else(|| Error::InvalidData(format!("missing aggregation: {}", name)))
}

fn buckets<'a>(aggregations: &'a Value, name: &str) -> Result<&'a Vec<Value>> {
    named_agg(aggregations, name)?
        .get("buckets")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::InvalidData(format!("aggregation {} has no buckets", name)))
}

fn bucket_key(bucket: &Value) -> String {
    // Date-histogram buckets carry a formatted key alongside the epoch key.
    if let Some(label) = bucket.get("key_as_string").and_then(Value::as_str) {
        return label.to_string();
    }
    match bucket.get("key") {
        Some(Value::String(key)) => key.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

fn bucket_count(bucket: &Value) -> i64 {
    bucket.get("doc_count").and_then(Value::as_i64).unwrap_or(0)
}

fn bucket_metric(bucket: &Value, name: &str) -> f64 {
    bucket.get(name).map(metric_value).unwrap_or(0.0)
}

/// Parse a backend aggregation response into the summary model
pub fn parse_summary(aggregations: &Value) -> Result<TransactionSummary> {
    if !aggregations.is_object() {
        return Err(Error::InvalidData(
            "aggregation response is not an object".into(),
        ));
    }

    let spending_by_category = buckets(aggregations, "by_category")?
        .iter()
        .map(|bucket| CategorySpending {
            category: bucket_key(bucket),
            total_spent: round2(bucket_metric(bucket, "total_spent")),
            transaction_count: bucket_count(bucket),
        })
        .collect();

    let spending_by_account = buckets(aggregations, "by_account")?
        .iter()
        .map(|bucket| AccountSpending {
            account_type: bucket_key(bucket),
            total_amount: round2(bucket_metric(bucket, "total_amount")),
            transaction_count: bucket_count(bucket),
        })
        .collect();

    let monthly_spending = buckets(aggregations, "by_month")?
        .iter()
        .map(|bucket| MonthlySpending {
            month: bucket_key(bucket),
            total_spent: round2(bucket_metric(bucket, "monthly_total")),
            transaction_count: bucket_count(bucket),
        })
        .collect();

    Ok(TransactionSummary {
        total_amount: round2(metric_value(named_agg(aggregations, "total_amount")?)),
        average_amount: round2(metric_value(named_agg(aggregations, "avg_amount")?)),
        transaction_count: named_agg(aggregations, "transaction_count")?
            .get("value")
            .and_then(Value::as_i64)
            .unwrap_or(0),
        spending_by_category,
        spending_by_account,
        monthly_spending,
    })
}
