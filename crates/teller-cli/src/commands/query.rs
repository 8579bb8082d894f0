//! Question answering, search, and summary command implementations

use anyhow::Result;
use teller_core::{
    classify_and_extract, format_search_results, format_summary_results, query, AccountType,
    BackendClient, Intent, SearchService, SummaryFilter, TransactionFilter, TransactionType,
};

/// Assemble a transaction filter from explicit CLI flags
#[allow(clippy::too_many_arguments)]
pub fn build_filter(
    merchant: Option<String>,
    category: Option<String>,
    description: Option<String>,
    location: Option<String>,
    amount_min: Option<f64>,
    amount_max: Option<f64>,
    from: Option<String>,
    to: Option<String>,
    account_type: Option<String>,
    transaction_type: Option<String>,
    tags: Vec<String>,
    limit: i64,
) -> Result<TransactionFilter> {
    let mut filter = TransactionFilter::new().limit(limit);
    filter.merchant = merchant;
    filter.category = category;
    filter.description = description;
    filter.location = location;
    filter.amount_min = amount_min;
    filter.amount_max = amount_max;
    filter.date_from = from;
    filter.date_to = to;
    filter.account_type = account_type
        .as_deref()
        .map(str::parse::<AccountType>)
        .transpose()
        .map_err(anyhow::Error::msg)?;
    filter.transaction_type = transaction_type
        .as_deref()
        .map(str::parse::<TransactionType>)
        .transpose()
        .map_err(anyhow::Error::msg)?;
    if !tags.is_empty() {
        filter.tags = Some(tags);
    }
    Ok(filter)
}

/// Assemble a summary filter from explicit CLI flags
pub fn build_summary_filter(
    from: Option<String>,
    to: Option<String>,
    category: Option<String>,
    account_type: Option<String>,
) -> Result<SummaryFilter> {
    Ok(SummaryFilter {
        date_from: from,
        date_to: to,
        category,
        account_type: account_type
            .as_deref()
            .map(str::parse::<AccountType>)
            .transpose()
            .map_err(anyhow::Error::msg)?,
    })
}

/// Answer a free-text question, routing to search or summary by intent
pub async fn cmd_ask(backend: BackendClient, text: &str, dry_run: bool, json: bool) -> Result<()> {
    let text = text.trim();
    if text.is_empty() {
        anyhow::bail!("empty question; try: teller ask \"coffee purchases last month\"");
    }

    let (intent, filter) = classify_and_extract(text);
    tracing::debug!("Classified \"{}\" as {} intent", text, intent);

    if dry_run {
        let compiled = match intent {
            Intent::Search => query::compile(&filter),
            Intent::Summary => query::compile_summary(&filter.to_summary_filter()),
        };
        println!("Intent: {}", intent);
        println!("Filter: {}", serde_json::to_string_pretty(&filter)?);
        println!("Query:  {}", serde_json::to_string_pretty(&compiled)?);
        return Ok(());
    }

    let service = SearchService::new(backend);
    match intent {
        Intent::Search => {
            let results = service.run_search(&filter).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                println!("{}", format_search_results(&results));
            }
        }
        Intent::Summary => {
            let results = service.run_summary(&filter.to_summary_filter()).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                println!("{}", format_summary_results(&results));
            }
        }
    }
    Ok(())
}

pub async fn cmd_search(
    backend: BackendClient,
    filter: &TransactionFilter,
    json: bool,
) -> Result<()> {
    let service = SearchService::new(backend);
    let results = service.run_search(filter).await;
    tracing::debug!(
        "Search returned {} of {} matching transactions",
        results.returned_count,
        results.total_hits
    );
    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        println!("{}", format_search_results(&results));
    }
    Ok(())
}

pub async fn cmd_summary(
    backend: BackendClient,
    filter: &SummaryFilter,
    json: bool,
) -> Result<()> {
    let service = SearchService::new(backend);
    let results = service.run_summary(filter).await;
    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        println!("{}", format_summary_results(&results));
    }
    Ok(())
}
