//! Elasticsearch backend implementation
//!
//! HTTP client for the Elasticsearch search and aggregation APIs. All calls
//! are read-only `_search` requests against a single index; connection and
//! auth settings come from a [`BackendConfig`] resolved once at startup.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::{json, Value};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{BackendHealth, TransactionDocument, TransactionHit};

use super::{AuthMode, BackendConfig, SearchBackend, SearchResponse};

/// Elasticsearch client over HTTP
pub struct ElasticsearchBackend {
    http_client: Client,
    config: BackendConfig,
}

impl Clone for ElasticsearchBackend {
    fn clone(&self) -> Self {
        Self {
            http_client: self.http_client.clone(),
            config: self.config.clone(),
        }
    }
}

impl ElasticsearchBackend {
    /// Create a new backend client with the configured request timeout
    pub fn new(config: BackendConfig) -> Result<Self> {
        let http_client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http_client,
            config,
        })
    }

    pub fn host(&self) -> &str {
        &self.config.host
    }

    pub fn index(&self) -> &str {
        &self.config.index
    }

    /// Apply the resolved auth mode to a request
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.auth {
            AuthMode::None => request,
            AuthMode::Basic { username, password } => {
                request.basic_auth(username, Some(password.as_str()))
            }
            AuthMode::ApiKey(key) => request.header("Authorization", format!("ApiKey {}", key)),
        }
    }

    async fn post_search(&self, body: &Value) -> Result<Value> {
        let url = format!("{}/{}/_search", self.config.host, self.config.index);
        debug!(%url, body = %body, "backend search request");

        let response = self
            .authorize(self.http_client.post(&url))
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Http(response.error_for_status().unwrap_err()));
        }

        Ok(response.json().await?)
    }
}

fn parse_hit(hit: &Value) -> Result<TransactionHit> {
    let id = hit
        .get("_id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let score = hit.get("_score").and_then(Value::as_f64);
    let transaction: TransactionDocument = match hit.get("_source") {
        Some(source) => serde_json::from_value(source.clone())?,
        None => TransactionDocument::default(),
    };
    Ok(TransactionHit {
        id,
        score,
        transaction,
    })
}

#[async_trait]
impl SearchBackend for ElasticsearchBackend {
    async fn search(&self, query: &Value, sort: &Value, limit: i64) -> Result<SearchResponse> {
        let body = json!({
            "query": query,
            "sort": sort,
            "size": limit,
        });
        let response = self.post_search(&body).await?;

        let total_hits = response["hits"]["total"]["value"].as_i64().unwrap_or(0);
        let hits = response["hits"]["hits"]
            .as_array()
            .map(|hits| hits.iter().map(parse_hit).collect::<Result<Vec<_>>>())
            .transpose()?
            .unwrap_or_default();

        Ok(SearchResponse { total_hits, hits })
    }

    async fn aggregate(&self, query: &Value, aggs: &Value) -> Result<Value> {
        let body = json!({
            "query": query,
            "size": 0,
            "aggs": aggs,
        });
        let response = self.post_search(&body).await?;

        response
            .get("aggregations")
            .cloned()
            .ok_or_else(|| Error::Backend("search response carried no aggregations".into()))
    }

    async fn health(&self) -> Result<BackendHealth> {
        let health_url = format!("{}/_cluster/health", self.config.host);
        let response = self
            .authorize(self.http_client.get(&health_url))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Error::Http(response.error_for_status().unwrap_err()));
        }
        let cluster: Value = response.json().await?;

        let count_url = format!("{}/{}/_count", self.config.host, self.config.index);
        let response = self
            .authorize(self.http_client.get(&count_url))
            .send()
            .await?;

        let (index_exists, document_count) = if response.status().is_success() {
            let count: Value = response.json().await?;
            (true, count["count"].as_i64().unwrap_or(0))
        } else {
            // A missing index is a health finding, not a transport failure.
            (false, 0)
        };

        Ok(BackendHealth {
            status: cluster["status"].as_str().unwrap_or("unknown").to_string(),
            cluster_name: cluster["cluster_name"]
                .as_str()
                .unwrap_or("unknown")
                .to_string(),
            index_name: self.config.index.clone(),
            index_exists,
            document_count,
        })
    }
}
