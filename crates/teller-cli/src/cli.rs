//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use clap::{Parser, Subcommand};

/// Teller - Search banking transactions in plain English
#[derive(Parser)]
#[command(name = "teller")]
#[command(about = "Natural-language search over banking transactions", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Search backend host (defaults to ELASTICSEARCH_HOST or localhost:9200)
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Index to query (defaults to ELASTICSEARCH_INDEX or banking_transactions)
    #[arg(long, global = true)]
    pub index: Option<String>,

    /// Print the raw result envelope as JSON instead of formatted text
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ask a question in plain English
    ///
    /// The question is classified as a search or a spending summary and the
    /// extracted parameters are shown before the results.
    Ask {
        /// The question, e.g. "show me coffee purchases last month"
        text: Vec<String>,

        /// Print the extracted filter and compiled query without executing
        #[arg(long)]
        dry_run: bool,
    },

    /// Search transactions with explicit filters
    Search {
        /// Merchant name (fuzzy match)
        #[arg(long)]
        merchant: Option<String>,

        /// Spending category (fuzzy match)
        #[arg(long)]
        category: Option<String>,

        /// Free-text match on description, memo, and reference
        #[arg(long)]
        description: Option<String>,

        /// City, state, address, or country
        #[arg(long)]
        location: Option<String>,

        /// Minimum amount in dollars
        #[arg(long)]
        amount_min: Option<f64>,

        /// Maximum amount in dollars
        #[arg(long)]
        amount_max: Option<f64>,

        /// Earliest transaction date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Latest transaction date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Account type: checking, savings, credit
        #[arg(long)]
        account_type: Option<String>,

        /// Transaction type: debit, credit, transfer, fee, interest
        #[arg(long)]
        transaction_type: Option<String>,

        /// Tag filter (repeatable)
        #[arg(long)]
        tag: Vec<String>,

        /// Maximum number of results
        #[arg(short, long, default_value = "10")]
        limit: i64,
    },

    /// Aggregate spending into a summary
    Summary {
        /// Earliest transaction date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Latest transaction date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Spending category
        #[arg(long)]
        category: Option<String>,

        /// Account type: checking, savings, credit
        #[arg(long)]
        account_type: Option<String>,
    },

    /// Check backend connectivity and index status
    Health,
}
