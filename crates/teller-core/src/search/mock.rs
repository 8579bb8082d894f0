//! Mock backend for testing
//!
//! Returns canned hits and aggregations without evaluating the query (query
//! semantics live in the compilers and are tested there); records the last
//! request so tests can assert what was actually compiled and sent. A
//! failing mode exercises the error envelope path.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::models::{BackendHealth, TransactionHit};

use super::{SearchBackend, SearchResponse, DEFAULT_INDEX};

/// Mock search backend for testing
#[derive(Clone, Default)]
pub struct MockBackend {
    hits: Vec<TransactionHit>,
    aggregations: Value,
    /// When set, every call fails with this message
    failure: Option<String>,
    last_request: Arc<Mutex<Option<Value>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            aggregations: empty_aggregations(),
            ..Self::default()
        }
    }

    /// Backend that fails every call (connection refused, timeout, ...)
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new()
        }
    }

    pub fn with_hits(mut self, hits: Vec<TransactionHit>) -> Self {
        self.hits = hits;
        self
    }

    pub fn with_aggregations(mut self, aggregations: Value) -> Self {
        self.aggregations = aggregations;
        self
    }

    /// The body of the most recent search/aggregate call
    pub fn last_request(&self) -> Option<Value> {
        self.last_request.lock().expect("mock lock").clone()
    }

    fn fail_if_configured(&self) -> Result<()> {
        match &self.failure {
            Some(message) => Err(Error::Backend(message.clone())),
            None => Ok(()),
        }
    }
}

/// The aggregation response shape of an empty index
fn empty_aggregations() -> Value {
    json!({
        "total_amount": { "value": null },
        "avg_amount": { "value": null },
        "transaction_count": { "value": 0 },
        "by_category": { "buckets": [] },
        "by_account": { "buckets": [] },
        "by_month": { "buckets": [] }
    })
}

#[async_trait]
impl SearchBackend for MockBackend {
    async fn search(&self, query: &Value, sort: &Value, limit: i64) -> Result<SearchResponse> {
        self.fail_if_configured()?;
        *self.last_request.lock().expect("mock lock") =
            Some(json!({ "query": query, "sort": sort, "size": limit }));

        let capped = self
            .hits
            .iter()
            .take(limit.max(0) as usize)
            .cloned()
            .collect();
        Ok(SearchResponse {
            total_hits: self.hits.len() as i64,
            hits: capped,
        })
    }

    async fn aggregate(&self, query: &Value, aggs: &Value) -> Result<Value> {
        self.fail_if_configured()?;
        *self.last_request.lock().expect("mock lock") =
            Some(json!({ "query": query, "size": 0, "aggs": aggs }));
        Ok(self.aggregations.clone())
    }

    async fn health(&self) -> Result<BackendHealth> {
        self.fail_if_configured()?;
        Ok(BackendHealth {
            status: "green".to_string(),
            cluster_name: "mock".to_string(),
            index_name: DEFAULT_INDEX.to_string(),
            index_exists: true,
            document_count: self.hits.len() as i64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionDocument;

    fn hit(id: &str) -> TransactionHit {
        TransactionHit {
            id: id.to_string(),
            score: None,
            transaction: TransactionDocument::default(),
        }
    }

    #[tokio::test]
    async fn test_mock_caps_results_but_reports_full_total() {
        let mock = MockBackend::new().with_hits(vec![hit("a"), hit("b"), hit("c")]);
        let response = mock
            .search(&json!({ "match_all": {} }), &json!([]), 2)
            .await
            .unwrap();
        assert_eq!(response.total_hits, 3);
        assert_eq!(response.hits.len(), 2);
    }

    #[tokio::test]
    async fn test_mock_records_last_request() {
        let mock = MockBackend::new();
        mock.search(&json!({ "match_all": {} }), &json!([]), 10)
            .await
            .unwrap();
        let request = mock.last_request().unwrap();
        assert_eq!(request["size"], json!(10));
        assert_eq!(request["query"], json!({ "match_all": {} }));
    }

    #[tokio::test]
    async fn test_failing_mock_errors_every_call() {
        let mock = MockBackend::failing("connection refused");
        let err = mock
            .search(&json!({ "match_all": {} }), &json!([]), 10)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("connection refused"));
        assert!(mock.health().await.is_err());
    }
}
