//! Front-end boundary
//!
//! The only entry points a UI, CLI, or LLM tool-calling front-end may depend
//! on: [`classify_and_extract`] plus [`SearchService::run_search`] and
//! [`SearchService::run_summary`]. Each request is one logical execution
//! (classify, extract, compile, a single backend call, format) with no
//! shared mutable state; backend failures are converted into error
//! envelopes here and never escape as faults.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::aggregate;
use crate::extract;
use crate::filter::{SummaryFilter, TransactionFilter};
use crate::intent;
use crate::models::{Intent, QueryInfo, SearchResults, SummaryResults};
use crate::query;
use crate::search::{BackendClient, SearchBackend};

/// Classify a free-text request and extract its structured filter
///
/// Relative date phrases resolve against the local calendar date; see
/// [`classify_and_extract_at`] for an injected date.
pub fn classify_and_extract(text: &str) -> (Intent, TransactionFilter) {
    (intent::classify(text), extract::extract_now(text))
}

/// [`classify_and_extract`] with an injected "today", for deterministic tests
pub fn classify_and_extract_at(text: &str, today: NaiveDate) -> (Intent, TransactionFilter) {
    (intent::classify(text), extract::extract(text, today))
}

/// Compile-and-execute entry points over a search backend
#[derive(Clone)]
pub struct SearchService {
    backend: BackendClient,
}

impl SearchService {
    pub fn new(backend: BackendClient) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &BackendClient {
        &self.backend
    }

    /// Compile a filter, execute it, and wrap the outcome in a result
    /// envelope
    ///
    /// Zero matches is a success with an empty list; only backend failures
    /// produce `success == false`.
    pub async fn run_search(&self, filter: &TransactionFilter) -> SearchResults {
        let compiled = query::compile(filter);
        let sort = query::sort_spec();
        debug!(query = %compiled, limit = filter.limit, "running search");

        match self.backend.search(&compiled, &sort, filter.limit).await {
            Ok(response) => SearchResults {
                success: true,
                total_hits: response.total_hits,
                returned_count: response.hits.len(),
                transactions: response.hits,
                error: None,
                query_info: Some(QueryInfo {
                    search_params: serde_json::to_value(filter).unwrap_or_default(),
                    elasticsearch_query: compiled,
                }),
            },
            Err(err) => {
                warn!(error = %err, "search backend call failed");
                SearchResults::failure(err.to_string())
            }
        }
    }

    /// Compile a reduced filter into an aggregation request, execute it, and
    /// parse the response into a summary envelope
    pub async fn run_summary(&self, filter: &SummaryFilter) -> SummaryResults {
        let compiled = query::compile_summary(filter);
        let aggs = aggregate::aggregation_spec();
        debug!(query = %compiled, "running summary aggregation");

        let aggregations = match self.backend.aggregate(&compiled, &aggs).await {
            Ok(aggregations) => aggregations,
            Err(err) => {
                warn!(error = %err, "aggregation backend call failed");
                return SummaryResults::failure(err.to_string());
            }
        };

        match aggregate::parse_summary(&aggregations) {
            Ok(summary) => SummaryResults {
                success: true,
                summary: Some(summary),
                error: None,
            },
            Err(err) => {
                warn!(error = %err, "aggregation response was malformed");
                SummaryResults::failure(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TransactionDocument, TransactionHit};
    use crate::search::MockBackend;
    use serde_json::json;

    fn hit(id: &str, merchant: &str) -> TransactionHit {
        TransactionHit {
            id: id.to_string(),
            score: Some(1.0),
            transaction: TransactionDocument {
                merchant: Some(merchant.to_string()),
                ..Default::default()
            },
        }
    }

    fn service_with(mock: MockBackend) -> SearchService {
        SearchService::new(BackendClient::mock(mock))
    }

    #[tokio::test]
    async fn test_run_search_success_envelope() {
        let service = service_with(
            MockBackend::new().with_hits(vec![hit("a", "Starbucks"), hit("b", "Costco")]),
        );
        let filter = TransactionFilter::new().merchant("Starbucks");
        let results = service.run_search(&filter).await;

        assert!(results.success);
        assert_eq!(results.total_hits, 2);
        assert_eq!(results.returned_count, 2);
        assert!(results.error.is_none());

        let info = results.query_info.unwrap();
        assert_eq!(info.search_params["merchant"], json!("Starbucks"));
        assert!(info.elasticsearch_query["bool"]["must"][0]["match"]["merchant"].is_object());
    }

    #[tokio::test]
    async fn test_run_search_empty_result_is_success() {
        let service = service_with(MockBackend::new());
        let results = service.run_search(&TransactionFilter::new()).await;
        assert!(results.success);
        assert_eq!(results.total_hits, 0);
        assert!(results.transactions.is_empty());
    }

    #[tokio::test]
    async fn test_run_search_backend_failure_envelope() {
        let service = service_with(MockBackend::failing("connection refused"));
        let results = service.run_search(&TransactionFilter::new()).await;
        assert!(!results.success);
        assert!(results.transactions.is_empty());
        assert!(results.error.unwrap().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_run_search_sends_sort_and_limit() {
        let mock = MockBackend::new();
        let service = service_with(mock.clone());
        let filter = TransactionFilter::new().limit(25);
        service.run_search(&filter).await;

        let request = mock.last_request().unwrap();
        assert_eq!(request["size"], json!(25));
        assert_eq!(
            request["sort"],
            json!([{ "transaction_date": { "order": "desc" } }])
        );
        assert_eq!(request["query"], json!({ "match_all": {} }));
    }

    #[tokio::test]
    async fn test_run_summary_success_and_idempotence() {
        let mock = MockBackend::new().with_aggregations(json!({
            "total_amount": { "value": -250.128 },
            "avg_amount": { "value": -25.0128 },
            "transaction_count": { "value": 10 },
            "by_category": { "buckets": [
                { "key": "gas", "doc_count": 10, "total_spent": { "value": -250.128 } }
            ]},
            "by_account": { "buckets": [] },
            "by_month": { "buckets": [] }
        }));
        let service = service_with(mock);
        let filter = SummaryFilter {
            category: Some("gas".into()),
            ..Default::default()
        };

        let first = service.run_summary(&filter).await;
        assert!(first.success);
        let summary = first.summary.clone().unwrap();
        assert_eq!(summary.total_amount, -250.13);
        assert_eq!(summary.spending_by_category[0].category, "gas");

        // Same reduced filter, unchanged backend: identical summary.
        let second = service.run_summary(&filter).await;
        assert_eq!(second.summary.unwrap(), summary);
    }

    #[tokio::test]
    async fn test_run_summary_failure_envelope() {
        let service = service_with(MockBackend::failing("timeout"));
        let results = service.run_summary(&SummaryFilter::new()).await;
        assert!(!results.success);
        assert!(results.summary.is_none());
        assert!(results.error.unwrap().contains("timeout"));
    }

    #[tokio::test]
    async fn test_run_summary_malformed_response_envelope() {
        let service =
            service_with(MockBackend::new().with_aggregations(json!({ "unexpected": true })));
        let results = service.run_summary(&SummaryFilter::new()).await;
        assert!(!results.success);
        assert!(results.error.is_some());
    }

    #[test]
    fn test_classify_and_extract_routes_both_paths() {
        let today = NaiveDate::from_ymd_opt(2025, 8, 15).unwrap();

        let (intent, filter) =
            classify_and_extract_at("How much did I spend on gas last month?", today);
        assert_eq!(intent, Intent::Summary);
        assert_eq!(filter.category.as_deref(), Some("gas"));
        assert_eq!(filter.date_from.as_deref(), Some("2025-07-16"));

        let (intent, filter) = classify_and_extract_at("Show me all Starbucks purchases", today);
        assert_eq!(intent, Intent::Search);
        assert_eq!(filter.merchant.as_deref(), Some("Starbucks"));
        assert_eq!(filter.limit, 100);
    }
}
