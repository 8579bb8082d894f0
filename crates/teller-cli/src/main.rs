//! Teller CLI - Natural-language banking transaction search
//!
//! Usage:
//!   teller ask "coffee purchases last month"   Free-text question
//!   teller search --merchant Starbucks         Explicit filters
//!   teller summary --category groceries        Spending summary
//!   teller health                              Backend status

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let backend = commands::connect(cli.host.as_deref(), cli.index.as_deref())?;

    match cli.command {
        Commands::Ask { text, dry_run } => {
            commands::cmd_ask(backend, &text.join(" "), dry_run, cli.json).await
        }
        Commands::Search {
            merchant,
            category,
            description,
            location,
            amount_min,
            amount_max,
            from,
            to,
            account_type,
            transaction_type,
            tag,
            limit,
        } => {
            let filter = commands::build_filter(
                merchant,
                category,
                description,
                location,
                amount_min,
                amount_max,
                from,
                to,
                account_type,
                transaction_type,
                tag,
                limit,
            )?;
            commands::cmd_search(backend, &filter, cli.json).await
        }
        Commands::Summary {
            from,
            to,
            category,
            account_type,
        } => {
            let filter = commands::build_summary_filter(from, to, category, account_type)?;
            commands::cmd_summary(backend, &filter, cli.json).await
        }
        Commands::Health => commands::cmd_health(backend, cli.json).await,
    }
}
