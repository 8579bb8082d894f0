//! Plain-text rendering of result envelopes
//!
//! Pure presentation: these functions define no matching semantics and never
//! touch the backend. Amounts are shown as magnitudes, with a `+` prefix for
//! credits.

use std::fmt::Write;

use crate::models::{BackendHealth, SearchResults, SummaryResults, TransactionLocation};

/// Categories shown in the summary breakdown
const TOP_CATEGORIES: usize = 5;

fn format_amount(amount: f64) -> String {
    if amount < 0.0 {
        format!("${:.2}", amount.abs())
    } else {
        format!("+${:.2}", amount)
    }
}

fn title_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Render a search envelope as a numbered transaction listing
pub fn format_search_results(results: &SearchResults) -> String {
    if !results.success {
        let reason = results.error.as_deref().unwrap_or("unknown error");
        return format!("Error: {reason}");
    }

    if results.transactions.is_empty() {
        return "No transactions found matching your criteria.".to_string();
    }

    let mut out = format!(
        "Found {} transactions. Showing top {}:\n\n",
        results.total_hits, results.returned_count
    );

    for (i, hit) in results.transactions.iter().enumerate() {
        let txn = &hit.transaction;
        let merchant = txn.merchant.as_deref().unwrap_or("Unknown");
        let date = txn.transaction_date.as_deref().unwrap_or("Unknown");
        let category = txn.category.as_deref().unwrap_or("Unknown");
        let description = txn.description.as_deref().unwrap_or("N/A");

        let _ = writeln!(out, "{}. {merchant}", i + 1);
        let _ = writeln!(out, "   Amount: {}", format_amount(txn.amount.unwrap_or(0.0)));
        let _ = writeln!(out, "   Date: {date}");
        let _ = writeln!(out, "   Category: {category}");
        let place = txn.location.as_ref().map(TransactionLocation::display);
        if let Some(place) = place.filter(|p| !p.is_empty()) {
            let _ = writeln!(out, "   Location: {place}");
        }
        let _ = writeln!(out, "   Description: {description}");
        out.push('\n');
    }

    out
}

/// Render a summary envelope as totals plus category/account breakdowns
pub fn format_summary_results(results: &SummaryResults) -> String {
    if !results.success {
        let reason = results.error.as_deref().unwrap_or("unknown error");
        return format!("Error: {reason}");
    }

    let Some(summary) = results.summary.as_ref() else {
        return "Error: summary missing from successful response".to_string();
    };

    let mut out = String::from("Transaction Summary\n\n");
    let _ = writeln!(out, "Total Transactions: {}", summary.transaction_count);
    let _ = writeln!(out, "Total Amount: ${:.2}", summary.total_amount.abs());
    let _ = writeln!(out, "Average Amount: ${:.2}", summary.average_amount.abs());

    if !summary.spending_by_category.is_empty() {
        out.push('\n');
        out.push_str("Top Spending Categories:\n");
        for cat in summary.spending_by_category.iter().take(TOP_CATEGORIES) {
            let _ = writeln!(
                out,
                "  {}: ${:.2} ({} transactions)",
                title_word(&cat.category),
                cat.total_spent.abs(),
                cat.transaction_count
            );
        }
    }

    if !summary.spending_by_account.is_empty() {
        out.push('\n');
        out.push_str("Spending by Account:\n");
        for acc in &summary.spending_by_account {
            let _ = writeln!(
                out,
                "  {}: ${:.2}",
                title_word(&acc.account_type),
                acc.total_amount.abs()
            );
        }
    }

    if !summary.monthly_spending.is_empty() {
        out.push('\n');
        out.push_str("Monthly Spending:\n");
        for month in &summary.monthly_spending {
            let _ = writeln!(
                out,
                "  {}: ${:.2}",
                month.month,
                month.total_spent.abs()
            );
        }
    }

    out
}

/// Render a health probe result
pub fn format_health(health: &BackendHealth) -> String {
    let mut out = String::from("Backend Health\n\n");
    let _ = writeln!(out, "Cluster status: {}", health.status);
    let _ = writeln!(out, "Cluster name: {}", health.cluster_name);
    let _ = writeln!(out, "Index: {}", health.index_name);
    if health.index_exists {
        let _ = writeln!(out, "Documents: {}", health.document_count);
    } else {
        let _ = writeln!(out, "Index does not exist");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AccountSpending, CategorySpending, MonthlySpending, TransactionDocument, TransactionHit,
        TransactionLocation, TransactionSummary,
    };

    fn sample_hit() -> TransactionHit {
        TransactionHit {
            id: "txn-1".to_string(),
            score: Some(2.4),
            transaction: TransactionDocument {
                merchant: Some("Starbucks".to_string()),
                amount: Some(-5.75),
                transaction_date: Some("2025-08-01".to_string()),
                category: Some("dining".to_string()),
                description: Some("Morning coffee".to_string()),
                location: Some(TransactionLocation {
                    city: Some("Seattle".to_string()),
                    state: Some("WA".to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_format_search_error_envelope() {
        let rendered = format_search_results(&SearchResults::failure("connection refused"));
        assert_eq!(rendered, "Error: connection refused");
    }

    #[test]
    fn test_format_search_empty() {
        let results = SearchResults {
            success: true,
            total_hits: 0,
            returned_count: 0,
            transactions: Vec::new(),
            error: None,
            query_info: None,
        };
        assert_eq!(
            format_search_results(&results),
            "No transactions found matching your criteria."
        );
    }

    #[test]
    fn test_format_search_listing() {
        let results = SearchResults {
            success: true,
            total_hits: 42,
            returned_count: 1,
            transactions: vec![sample_hit()],
            error: None,
            query_info: None,
        };
        let rendered = format_search_results(&results);
        assert!(rendered.starts_with("Found 42 transactions. Showing top 1:"));
        assert!(rendered.contains("1. Starbucks"));
        assert!(rendered.contains("Amount: $5.75"));
        assert!(rendered.contains("Location: Seattle, WA"));
        assert!(rendered.contains("Description: Morning coffee"));
    }

    #[test]
    fn test_format_amount_sign_convention() {
        assert_eq!(format_amount(-12.5), "$12.50");
        assert_eq!(format_amount(1200.0), "+$1200.00");
        assert_eq!(format_amount(0.0), "+$0.00");
    }

    #[test]
    fn test_format_summary() {
        let results = SummaryResults {
            success: true,
            summary: Some(TransactionSummary {
                total_amount: -1234.56,
                average_amount: -61.73,
                transaction_count: 20,
                spending_by_category: vec![CategorySpending {
                    category: "groceries".to_string(),
                    total_spent: -800.0,
                    transaction_count: 12,
                }],
                spending_by_account: vec![AccountSpending {
                    account_type: "checking".to_string(),
                    total_amount: -1234.56,
                    transaction_count: 20,
                }],
                monthly_spending: vec![MonthlySpending {
                    month: "2025-08".to_string(),
                    total_spent: -1234.56,
                    transaction_count: 20,
                }],
            }),
            error: None,
        };
        let rendered = format_summary_results(&results);
        assert!(rendered.contains("Total Transactions: 20"));
        assert!(rendered.contains("Total Amount: $1234.56"));
        assert!(rendered.contains("Groceries: $800.00 (12 transactions)"));
        assert!(rendered.contains("Checking: $1234.56"));
        assert!(rendered.contains("2025-08: $1234.56"));
    }

    #[test]
    fn test_format_summary_error_envelope() {
        let rendered = format_summary_results(&SummaryResults::failure("timeout"));
        assert_eq!(rendered, "Error: timeout");
    }

    #[test]
    fn test_format_health() {
        let health = BackendHealth {
            status: "green".to_string(),
            cluster_name: "local".to_string(),
            index_name: "banking_transactions".to_string(),
            index_exists: true,
            document_count: 1000,
        };
        let rendered = format_health(&health);
        assert!(rendered.contains("Cluster status: green"));
        assert!(rendered.contains("Documents: 1000"));
    }
}
