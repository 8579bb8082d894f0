//! Rule-based parameter extraction
//!
//! Translates a free-text request into a [`TransactionFilter`]. Each field
//! is extracted independently by an explicit ordered decision list: the
//! first matching rule sets the field and stops extraction for that field.
//! Extraction is case-insensitive, single pass, and never fails; a field
//! with no matching rule is simply left unset.
//!
//! The current date is injected so extraction stays a pure function;
//! [`extract_now`] is the convenience wrapper for callers on the local
//! clock.

mod lexicon;

pub use lexicon::{CATEGORY_KEYWORDS, LOCATIONS, MERCHANTS, MONTHS};

use std::sync::OnceLock;

use chrono::{Datelike, Duration, NaiveDate};
use regex::Regex;

use crate::filter::{TransactionFilter, DEFAULT_LIMIT, EXPANDED_LIMIT};
use crate::models::AccountType;

/// Which filter bounds an amount pattern sets
#[derive(Debug, Clone, Copy)]
enum AmountRule {
    Min,
    Max,
    Range,
}

/// Amount phrase patterns in priority order. Only the first pattern that
/// matches anywhere in the text applies; later patterns are not evaluated.
/// The overlap between "N to M" and date-like phrases ("3 to 5") is resolved
/// by this order alone.
const AMOUNT_PATTERNS: &[(&str, AmountRule)] = &[
    (r"over \$?(\d+)", AmountRule::Min),
    (r"above \$?(\d+)", AmountRule::Min),
    (r"more than \$?(\d+)", AmountRule::Min),
    (r"under \$?(\d+)", AmountRule::Max),
    (r"below \$?(\d+)", AmountRule::Max),
    (r"less than \$?(\d+)", AmountRule::Max),
    (r"between \$?(\d+) and \$?(\d+)", AmountRule::Range),
    (r"\$?(\d+) to \$?(\d+)", AmountRule::Range),
];

fn amount_patterns() -> &'static Vec<(Regex, AmountRule)> {
    static PATTERNS: OnceLock<Vec<(Regex, AmountRule)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        AMOUNT_PATTERNS
            .iter()
            .map(|(pattern, rule)| (Regex::new(pattern).expect("static pattern"), *rule))
            .collect()
    })
}

/// A relative date phrase and the range it resolves to
struct DateRule {
    phrases: &'static [&'static str],
    resolve: fn(NaiveDate) -> (Option<String>, Option<String>),
}

fn days_ago(today: NaiveDate, days: i64) -> String {
    (today - Duration::days(days)).format("%Y-%m-%d").to_string()
}

/// Relative date phrases in priority order, evaluated before the absolute
/// month-name rules.
const DATE_RULES: &[DateRule] = &[
    DateRule {
        phrases: &["last week", "past week"],
        resolve: |today| (Some(days_ago(today, 7)), None),
    },
    DateRule {
        phrases: &["last month", "past month"],
        resolve: |today| (Some(days_ago(today, 30)), None),
    },
    DateRule {
        phrases: &["last 3 months", "past 3 months"],
        resolve: |today| (Some(days_ago(today, 90)), None),
    },
    DateRule {
        phrases: &["last year", "past year"],
        resolve: |today| (Some(days_ago(today, 365)), None),
    },
    DateRule {
        phrases: &["this year"],
        resolve: |today| (Some(format!("{}-01-01", today.year())), None),
    },
    DateRule {
        phrases: &["this month"],
        resolve: |today| (Some(format!("{}-{:02}-01", today.year(), today.month())), None),
    },
];

/// Capitalize the first letter of each whitespace-separated word
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn extract_merchant(lowered: &str) -> Option<String> {
    MERCHANTS
        .iter()
        .find(|merchant| lowered.contains(*merchant))
        .map(|merchant| title_case(merchant))
}

fn extract_category(lowered: &str) -> Option<String> {
    CATEGORY_KEYWORDS
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|(_, category)| category.to_string())
}

fn extract_location(lowered: &str) -> Option<String> {
    LOCATIONS
        .iter()
        .find(|location| lowered.contains(*location))
        .map(|location| title_case(location))
}

fn extract_amounts(lowered: &str) -> (Option<f64>, Option<f64>) {
    for (pattern, rule) in amount_patterns() {
        let Some(captures) = pattern.captures(lowered) else {
            continue;
        };
        match rule {
            AmountRule::Min => {
                if let Ok(value) = captures[1].parse::<f64>() {
                    return (Some(value), None);
                }
            }
            AmountRule::Max => {
                if let Ok(value) = captures[1].parse::<f64>() {
                    return (None, Some(value));
                }
            }
            AmountRule::Range => {
                if let (Ok(min), Ok(max)) =
                    (captures[1].parse::<f64>(), captures[2].parse::<f64>())
                {
                    return (Some(min), Some(max));
                }
            }
        }
        // First matching pattern wins even if the capture failed to parse.
        return (None, None);
    }
    (None, None)
}

fn extract_dates(lowered: &str, today: NaiveDate) -> (Option<String>, Option<String>) {
    let mut range = (None, None);

    for rule in DATE_RULES {
        if rule.phrases.iter().any(|phrase| lowered.contains(phrase)) {
            range = (rule.resolve)(today);
            break;
        }
    }

    // An explicit month name overrides any relative phrase. Day 31 is used
    // for the range end regardless of the month's real length; an accepted
    // simplification the backend tolerates as a range bound.
    for (name, number) in MONTHS {
        if lowered.contains(name) {
            let mut year = today.year();
            if lowered.contains("last") && *number > today.month() {
                year -= 1;
            }
            range = (
                Some(format!("{}-{:02}-01", year, number)),
                Some(format!("{}-{:02}-31", year, number)),
            );
            break;
        }
    }

    range
}

fn extract_account_type(lowered: &str) -> Option<AccountType> {
    // Fixed priority: checking, then savings, then credit.
    if lowered.contains("checking") {
        Some(AccountType::Checking)
    } else if lowered.contains("savings") {
        Some(AccountType::Savings)
    } else if lowered.contains("credit") {
        Some(AccountType::Credit)
    } else {
        None
    }
}

fn extract_limit(lowered: &str) -> i64 {
    if lowered.contains("all") || lowered.contains("everything") {
        EXPANDED_LIMIT
    } else {
        DEFAULT_LIMIT
    }
}

/// Extract a structured filter from free text, resolving relative dates
/// against the supplied date
pub fn extract(text: &str, today: NaiveDate) -> TransactionFilter {
    let lowered = text.to_lowercase();

    let (amount_min, amount_max) = extract_amounts(&lowered);
    let (date_from, date_to) = extract_dates(&lowered, today);

    TransactionFilter {
        description: None,
        merchant: extract_merchant(&lowered),
        category: extract_category(&lowered),
        location: extract_location(&lowered),
        amount_min,
        amount_max,
        date_from,
        date_to,
        account_type: extract_account_type(&lowered),
        transaction_type: None,
        tags: None,
        limit: extract_limit(&lowered),
    }
}

/// Extract against the local calendar date
pub fn extract_now(text: &str) -> TransactionFilter {
    extract(text, chrono::Local::now().date_naive())
}
