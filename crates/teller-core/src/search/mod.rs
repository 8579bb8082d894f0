//! Search backend abstraction
//!
//! The storage layer is an external document search engine; the core only
//! depends on this read-only capability:
//!
//! - `SearchBackend` trait: search, aggregate, health
//! - `BackendClient` enum: concrete wrapper providing Clone + compile-time
//!   dispatch
//! - Backend implementations: `ElasticsearchBackend`, `MockBackend`
//!
//! Both operations are idempotent and side-effect-free; the backend call is
//! the single blocking unit of a request and is issued with a bounded
//! timeout and no retries at this layer.
//!
//! # Configuration
//!
//! Environment variables (resolved once into a [`BackendConfig`]):
//! - `ELASTICSEARCH_HOST`: Backend URL (default: http://localhost:9200)
//! - `ELASTICSEARCH_INDEX`: Index name (default: banking_transactions)
//! - `ELASTICSEARCH_API_KEY`: API key auth (takes precedence)
//! - `ELASTICSEARCH_USERNAME` / `ELASTICSEARCH_PASSWORD`: Basic auth
//! - `ELASTICSEARCH_TIMEOUT_SECS`: Request timeout (default: 30)

mod elastic;
mod mock;

pub use elastic::ElasticsearchBackend;
pub use mock::MockBackend;

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::models::{BackendHealth, TransactionHit};

/// Default index name when `ELASTICSEARCH_INDEX` is unset
pub const DEFAULT_INDEX: &str = "banking_transactions";

/// Default backend request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How the client authenticates to the backend, resolved once at
/// construction rather than re-branched per request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMode {
    None,
    Basic { username: String, password: String },
    ApiKey(String),
}

/// Connection settings for the search backend
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Backend base URL, scheme included
    pub host: String,
    pub index: String,
    pub auth: AuthMode,
    pub timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            host: "http://localhost:9200".to_string(),
            index: DEFAULT_INDEX.to_string(),
            auth: AuthMode::None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

fn env_nonempty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

impl BackendConfig {
    /// Resolve configuration from environment variables
    ///
    /// An API key wins over basic auth when both are present.
    pub fn from_env() -> Self {
        let host = env_nonempty("ELASTICSEARCH_HOST")
            .map(|h| normalize_host(&h))
            .unwrap_or_else(|| "http://localhost:9200".to_string());
        let index = env_nonempty("ELASTICSEARCH_INDEX").unwrap_or_else(|| DEFAULT_INDEX.to_string());

        let auth = if let Some(key) = env_nonempty("ELASTICSEARCH_API_KEY") {
            AuthMode::ApiKey(key)
        } else if let (Some(username), Some(password)) = (
            env_nonempty("ELASTICSEARCH_USERNAME"),
            env_nonempty("ELASTICSEARCH_PASSWORD"),
        ) {
            AuthMode::Basic { username, password }
        } else {
            AuthMode::None
        };

        let timeout = env_nonempty("ELASTICSEARCH_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        Self {
            host,
            index,
            auth,
            timeout,
        }
    }

    /// Override the host, accepting bare `host:port` values
    pub fn host(mut self, host: &str) -> Self {
        self.host = normalize_host(host);
        self
    }

    /// Override the index name
    pub fn index(mut self, index: &str) -> Self {
        self.index = index.to_string();
        self
    }
}

/// Accept bare `host:port` values by assuming plain HTTP
fn normalize_host(host: &str) -> String {
    if host.contains("://") {
        host.trim_end_matches('/').to_string()
    } else {
        format!("http://{}", host.trim_end_matches('/'))
    }
}

/// A page of ranked search hits
#[derive(Debug, Clone)]
pub struct SearchResponse {
    /// Total matching documents, independent of the requested cap
    pub total_hits: i64,
    pub hits: Vec<TransactionHit>,
}

/// Read-only capability the translation core consumes
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Execute a compiled query, returning up to `limit` hits in `sort` order
    async fn search(&self, query: &Value, sort: &Value, limit: i64) -> Result<SearchResponse>;

    /// Execute a compiled query with an aggregation request, returning the
    /// backend's raw aggregation response (parsed by the aggregation
    /// compiler's inverse)
    async fn aggregate(&self, query: &Value, aggs: &Value) -> Result<Value>;

    /// Backend and index status
    async fn health(&self) -> Result<BackendHealth>;
}

/// Concrete backend client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum BackendClient {
    Elasticsearch(ElasticsearchBackend),
    Mock(MockBackend),
}

impl BackendClient {
    /// Build an Elasticsearch client from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self::Elasticsearch(ElasticsearchBackend::new(
            BackendConfig::from_env(),
        )?))
    }

    /// Build an Elasticsearch client from explicit configuration
    pub fn elasticsearch(config: BackendConfig) -> Result<Self> {
        Ok(Self::Elasticsearch(ElasticsearchBackend::new(config)?))
    }

    /// Mock backend for testing
    pub fn mock(backend: MockBackend) -> Self {
        Self::Mock(backend)
    }
}

#[async_trait]
impl SearchBackend for BackendClient {
    async fn search(&self, query: &Value, sort: &Value, limit: i64) -> Result<SearchResponse> {
        match self {
            Self::Elasticsearch(b) => b.search(query, sort, limit).await,
            Self::Mock(b) => b.search(query, sort, limit).await,
        }
    }

    async fn aggregate(&self, query: &Value, aggs: &Value) -> Result<Value> {
        match self {
            Self::Elasticsearch(b) => b.aggregate(query, aggs).await,
            Self::Mock(b) => b.aggregate(query, aggs).await,
        }
    }

    async fn health(&self) -> Result<BackendHealth> {
        match self {
            Self::Elasticsearch(b) => b.health().await,
            Self::Mock(b) => b.health().await,
        }
    }
}
