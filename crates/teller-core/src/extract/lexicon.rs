//! Fixed lookup tables used by the parameter extractor
//!
//! Immutable process-wide data. Match order within each table is part of the
//! extraction contract, so the tables are plain ordered slices rather than
//! maps.

/// Known merchant names, scanned in this order; first substring match wins.
pub const MERCHANTS: &[&str] = &[
    "starbucks",
    "mcdonald's",
    "walmart",
    "target",
    "amazon",
    "shell",
    "chevron",
    "safeway",
    "whole foods",
    "home depot",
    "best buy",
    "apple",
    "netflix",
    "spotify",
    "uber",
    "lyft",
    "airbnb",
    "marriott",
    "olive garden",
    "pizza hut",
    "subway",
    "chipotle",
    "costco",
    "cvs",
    "walgreens",
];

/// Keyword -> category mapping, ordered by descending keyword length so a
/// longer, more specific keyword ("gasoline") is always checked before a
/// shorter one it contains ("gas"). Ties keep their listed order.
pub const CATEGORY_KEYWORDS: &[(&str, &str)] = &[
    ("transportation", "transportation"),
    ("entertainment", "entertainment"),
    ("supermarket", "groceries"),
    ("restaurant", "dining"),
    ("healthcare", "healthcare"),
    ("groceries", "groceries"),
    ("streaming", "entertainment"),
    ("utilities", "utilities"),
    ("transport", "transportation"),
    ("insurance", "insurance"),
    ("gasoline", "gas"),
    ("shopping", "shopping"),
    ("electric", "utilities"),
    ("internet", "internet"),
    ("grocery", "groceries"),
    ("utility", "utilities"),
    ("medical", "healthcare"),
    ("coffee", "dining"),
    ("dining", "dining"),
    ("retail", "shopping"),
    ("travel", "travel"),
    ("flight", "travel"),
    ("doctor", "healthcare"),
    ("movie", "entertainment"),
    ("hotel", "travel"),
    ("phone", "phone"),
    ("food", "dining"),
    ("fuel", "gas"),
    ("uber", "transportation"),
    ("gas", "gas"),
];

/// Cities, states, and state abbreviations, scanned in this order.
///
/// Bare abbreviations match inside unrelated words ("ca" in "cash"); this is
/// an accepted precision limitation of substring scanning, not something to
/// correct here.
pub const LOCATIONS: &[&str] = &[
    "san francisco",
    "new york",
    "los angeles",
    "chicago",
    "seattle",
    "austin",
    "boston",
    "denver",
    "california",
    "ca",
    "ny",
    "texas",
    "tx",
    "washington",
    "wa",
];

/// Month names with their calendar numbers, January first.
pub const MONTHS: &[(&str, u32)] = &[
    ("january", 1),
    ("february", 2),
    ("march", 3),
    ("april", 4),
    ("may", 5),
    ("june", 6),
    ("july", 7),
    ("august", 8),
    ("september", 9),
    ("october", 10),
    ("november", 11),
    ("december", 12),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_keywords_are_longest_first() {
        // The precedence contract: no keyword may be shadowed by a shorter
        // keyword listed before it.
        for pair in CATEGORY_KEYWORDS.windows(2) {
            assert!(
                pair[0].0.len() >= pair[1].0.len(),
                "'{}' listed before shorter '{}'",
                pair[0].0,
                pair[1].0
            );
        }
    }

    #[test]
    fn test_gasoline_listed_before_gas() {
        let gasoline = CATEGORY_KEYWORDS.iter().position(|(k, _)| *k == "gasoline");
        let gas = CATEGORY_KEYWORDS.iter().position(|(k, _)| *k == "gas");
        assert!(gasoline.unwrap() < gas.unwrap());
    }

    #[test]
    fn test_tables_are_lowercase() {
        for m in MERCHANTS {
            assert_eq!(*m, m.to_lowercase());
        }
        for l in LOCATIONS {
            assert_eq!(*l, l.to_lowercase());
        }
        for (k, v) in CATEGORY_KEYWORDS {
            assert_eq!(*k, k.to_lowercase());
            assert_eq!(*v, v.to_lowercase());
        }
    }
}
