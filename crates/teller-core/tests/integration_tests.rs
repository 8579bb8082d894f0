//! Integration tests for teller-core
//!
//! These tests exercise the full classify → extract → compile → backend →
//! format workflow over the mock backend.

use chrono::NaiveDate;
use serde_json::json;
use teller_core::{
    classify_and_extract_at, format_search_results, format_summary_results, BackendClient, Intent,
    MockBackend, SearchService, SummaryFilter, TransactionDocument, TransactionHit,
    TransactionLocation,
};

fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, 15).unwrap()
}

fn starbucks_hit(id: &str, amount: f64) -> TransactionHit {
    TransactionHit {
        id: id.to_string(),
        score: Some(3.1),
        transaction: TransactionDocument {
            merchant: Some("Starbucks".to_string()),
            amount: Some(amount),
            transaction_date: Some("2025-08-01".to_string()),
            category: Some("dining".to_string()),
            description: Some("Coffee".to_string()),
            location: Some(TransactionLocation {
                city: Some("Seattle".to_string()),
                state: Some("WA".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        },
    }
}

// =============================================================================
// Search Workflow
// =============================================================================

#[tokio::test]
async fn test_search_question_end_to_end() {
    let mock = MockBackend::new().with_hits(vec![
        starbucks_hit("t1", -5.75),
        starbucks_hit("t2", -4.25),
    ]);
    let service = SearchService::new(BackendClient::mock(mock.clone()));

    let (intent, filter) =
        classify_and_extract_at("Show me all Starbucks purchases", fixed_today());
    assert_eq!(intent, Intent::Search);
    assert_eq!(filter.merchant.as_deref(), Some("Starbucks"));
    assert_eq!(filter.limit, 100);

    let results = service.run_search(&filter).await;
    assert!(results.success);
    assert_eq!(results.total_hits, 2);
    assert_eq!(results.returned_count, 2);

    // The compiled request wires the filter into the backend call intact.
    let request = mock.last_request().unwrap();
    assert_eq!(request["size"], json!(100));
    assert_eq!(
        request["query"]["bool"]["must"][0]["match"]["merchant"]["query"],
        json!("Starbucks")
    );
    assert_eq!(
        request["sort"],
        json!([{ "transaction_date": { "order": "desc" } }])
    );

    let rendered = format_search_results(&results);
    assert!(rendered.starts_with("Found 2 transactions. Showing top 2:"));
    assert!(rendered.contains("1. Starbucks"));
    assert!(rendered.contains("Location: Seattle, WA"));
}

#[tokio::test]
async fn test_amount_and_date_question_end_to_end() {
    let mock = MockBackend::new();
    let service = SearchService::new(BackendClient::mock(mock.clone()));

    let (intent, filter) =
        classify_and_extract_at("Find grocery purchases over $50 from last month", fixed_today());
    assert_eq!(intent, Intent::Search);
    assert_eq!(filter.category.as_deref(), Some("groceries"));
    assert_eq!(filter.amount_min, Some(50.0));
    assert_eq!(filter.date_from.as_deref(), Some("2025-07-16"));

    let results = service.run_search(&filter).await;
    assert!(results.success);
    assert_eq!(results.total_hits, 0);

    let request = mock.last_request().unwrap();
    let must = request["query"]["bool"]["must"].as_array().unwrap();
    assert!(must
        .iter()
        .any(|clause| clause["range"]["amount"]["gte"] == json!(50.0)));
    assert!(must
        .iter()
        .any(|clause| clause["range"]["transaction_date"]["gte"] == json!("2025-07-16")));

    assert_eq!(
        format_search_results(&results),
        "No transactions found matching your criteria."
    );
}

#[tokio::test]
async fn test_backend_failure_becomes_error_envelope() {
    let service = SearchService::new(BackendClient::mock(MockBackend::failing(
        "connection refused",
    )));

    let (_, filter) = classify_and_extract_at("Show me coffee purchases", fixed_today());
    let results = service.run_search(&filter).await;

    assert!(!results.success);
    assert!(results.transactions.is_empty());
    let rendered = format_search_results(&results);
    assert!(rendered.starts_with("Error: "));
    assert!(rendered.contains("connection refused"));
}

#[tokio::test]
async fn test_extraction_is_deterministic_for_same_input() {
    let text = "Find all Amazon purchases between $20 and $100 from last week";
    let (first_intent, first) = classify_and_extract_at(text, fixed_today());
    let (second_intent, second) = classify_and_extract_at(text, fixed_today());

    assert_eq!(first_intent, second_intent);
    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );
    assert_eq!(first.merchant.as_deref(), Some("Amazon"));
    assert_eq!(first.amount_min, Some(20.0));
    assert_eq!(first.amount_max, Some(100.0));
}

// =============================================================================
// Summary Workflow
// =============================================================================

#[tokio::test]
async fn test_summary_question_end_to_end() {
    let mock = MockBackend::new().with_aggregations(json!({
        "total_amount": { "value": -1234.567 },
        "avg_amount": { "value": -61.7284 },
        "transaction_count": { "value": 20 },
        "by_category": { "buckets": [
            { "key": "groceries", "doc_count": 12, "total_spent": { "value": -800.004 } },
            { "key": "gas", "doc_count": 8, "total_spent": { "value": -434.563 } }
        ]},
        "by_account": { "buckets": [
            { "key": "checking", "doc_count": 20, "total_amount": { "value": -1234.567 } }
        ]},
        "by_month": { "buckets": [
            { "key": 1754006400000i64, "key_as_string": "2025-08-01T00:00:00.000Z",
              "doc_count": 20, "monthly_total": { "value": -1234.567 } }
        ]}
    }));
    let service = SearchService::new(BackendClient::mock(mock.clone()));

    let (intent, filter) =
        classify_and_extract_at("How much did I spend on groceries this year?", fixed_today());
    assert_eq!(intent, Intent::Summary);

    let summary_filter = filter.to_summary_filter();
    assert_eq!(summary_filter.category.as_deref(), Some("groceries"));
    assert_eq!(summary_filter.date_from.as_deref(), Some("2025-01-01"));

    let results = service.run_summary(&summary_filter).await;
    assert!(results.success);
    let summary = results.summary.as_ref().unwrap();
    assert_eq!(summary.total_amount, -1234.57);
    assert_eq!(summary.transaction_count, 20);
    assert_eq!(summary.spending_by_category.len(), 2);
    assert_eq!(summary.monthly_spending[0].month, "2025-08-01T00:00:00.000Z");

    // Aggregation requests never fetch documents.
    let request = mock.last_request().unwrap();
    assert_eq!(request["size"], json!(0));
    assert!(request["aggs"]["by_category"]["terms"].is_object());

    let rendered = format_summary_results(&results);
    assert!(rendered.contains("Total Transactions: 20"));
    assert!(rendered.contains("Groceries: $800.00 (12 transactions)"));
}

#[tokio::test]
async fn test_empty_summary_filter_runs_match_all() {
    let mock = MockBackend::new();
    let service = SearchService::new(BackendClient::mock(mock.clone()));

    let results = service.run_summary(&SummaryFilter::new()).await;
    assert!(results.success);
    assert_eq!(results.summary.unwrap().transaction_count, 0);

    let request = mock.last_request().unwrap();
    assert_eq!(request["query"], json!({ "match_all": {} }));
}
