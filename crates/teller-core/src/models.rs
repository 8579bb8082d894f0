//! Domain models for Teller

use serde::{Deserialize, Serialize};

/// What a request is asking for: individual matching records or rolled-up
/// statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Search,
    Summary,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Summary => "summary",
        }
    }
}

impl std::str::FromStr for Intent {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "search" => Ok(Self::Search),
            "summary" => Ok(Self::Summary),
            _ => Err(format!("Unknown intent: {}", s)),
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Account types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Checking,
    Savings,
    Credit,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Checking => "checking",
            Self::Savings => "savings",
            Self::Credit => "credit",
        }
    }
}

impl std::str::FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "checking" => Ok(Self::Checking),
            "savings" => Ok(Self::Savings),
            "credit" => Ok(Self::Credit),
            _ => Err(format!("Unknown account type: {}", s)),
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Transaction types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Debit,
    Credit,
    Transfer,
    Fee,
    Interest,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debit => "debit",
            Self::Credit => "credit",
            Self::Transfer => "transfer",
            Self::Fee => "fee",
            Self::Interest => "interest",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debit" => Ok(Self::Debit),
            "credit" => Ok(Self::Credit),
            "transfer" => Ok(Self::Transfer),
            "fee" => Ok(Self::Fee),
            "interest" => Ok(Self::Interest),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Location sub-object on an indexed transaction
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

impl TransactionLocation {
    /// "City, ST" display form, empty if neither part is present
    pub fn display(&self) -> String {
        match (self.city.as_deref(), self.state.as_deref()) {
            (Some(city), Some(state)) => format!("{}, {}", city, state),
            (Some(city), None) => city.to_string(),
            (None, Some(state)) => state.to_string(),
            (None, None) => String::new(),
        }
    }
}

/// A transaction document as indexed by the search backend
///
/// Every field is optional on deserialize: the index schema is owned by the
/// backend and documents may carry any subset of these fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<TransactionLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance_after: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_pending: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_recurring: Option<bool>,
}

/// A ranked search hit: backend document id and relevance score plus the
/// indexed transaction fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionHit {
    /// Backend document id (`_id`)
    pub id: String,
    /// Backend relevance score (`_score`); absent when sorting overrides scoring
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(flatten)]
    pub transaction: TransactionDocument,
}

/// Spending rolled up by category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpending {
    pub category: String,
    pub total_spent: f64,
    pub transaction_count: i64,
}

/// Spending rolled up by account type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSpending {
    pub account_type: String,
    pub total_amount: f64,
    pub transaction_count: i64,
}

/// Spending rolled up by calendar month (chronological)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySpending {
    pub month: String,
    pub total_spent: f64,
    pub transaction_count: i64,
}

/// Aggregated transaction statistics (derived, never stored)
///
/// Monetary fields are rounded to 2 decimal places so currency display is
/// deterministic across backends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionSummary {
    pub total_amount: f64,
    pub average_amount: f64,
    pub transaction_count: i64,
    pub spending_by_category: Vec<CategorySpending>,
    pub spending_by_account: Vec<AccountSpending>,
    pub monthly_spending: Vec<MonthlySpending>,
}

/// Debug echo of a compiled search: the normalized filter set and the query
/// tree actually sent to the backend. For observability and regression
/// testing, not for re-parsing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryInfo {
    pub search_params: serde_json::Value,
    pub elasticsearch_query: serde_json::Value,
}

/// Result envelope for the search path
///
/// A backend failure is reported with `success == false` and an empty
/// transaction list; a valid zero-match outcome keeps `success == true`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    pub success: bool,
    pub total_hits: i64,
    pub returned_count: usize,
    pub transactions: Vec<TransactionHit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_info: Option<QueryInfo>,
}

impl SearchResults {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            total_hits: 0,
            returned_count: 0,
            transactions: Vec::new(),
            error: Some(error.into()),
            query_info: None,
        }
    }
}

/// Result envelope for the summary path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResults {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<TransactionSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SummaryResults {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            summary: None,
            error: Some(error.into()),
        }
    }
}

/// Search backend health snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendHealth {
    pub status: String,
    pub cluster_name: String,
    pub index_name: String,
    pub index_exists: bool,
    pub document_count: i64,
}
