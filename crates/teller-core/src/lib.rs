//! Teller Core Library
//!
//! Shared functionality for the Teller transaction search tool:
//! - Intent classification for free-text banking questions
//! - Rule-based parameter extraction (merchants, categories, amounts, dates)
//! - Query compilation from structured filters to Elasticsearch bool queries
//! - Aggregation compilation and summary parsing
//! - Pluggable search backends (Elasticsearch, mock)
//! - Plain-text result formatting

pub mod aggregate;
pub mod error;
pub mod extract;
pub mod filter;
pub mod format;
pub mod intent;
pub mod models;
pub mod query;
pub mod search;
pub mod service;

pub use error::{Error, Result};
pub use filter::{SummaryFilter, TransactionFilter, DEFAULT_LIMIT, EXPANDED_LIMIT};
pub use format::{format_health, format_search_results, format_summary_results};
pub use models::{
    AccountSpending, AccountType, BackendHealth, CategorySpending, Intent, MonthlySpending,
    QueryInfo, SearchResults, SummaryResults, TransactionDocument, TransactionHit,
    TransactionLocation, TransactionSummary, TransactionType,
};
pub use search::{
    AuthMode, BackendClient, BackendConfig, ElasticsearchBackend, MockBackend, SearchBackend,
    SearchResponse,
};
pub use service::{classify_and_extract, classify_and_extract_at, SearchService};
