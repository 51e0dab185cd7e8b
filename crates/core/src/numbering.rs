use crate::domain::quote::QuoteNumber;

const QUOTE_NUMBER_PREFIX: &str = "Q-";
const QUOTE_NUMBER_FLOOR: u64 = 1000;

/// Parses a `Q-<integer>` quote number. Anything else (including padding or
/// trailing text) is ignored by the allocator.
pub fn parse_quote_number(value: &str) -> Option<u64> {
    value.trim().strip_prefix(QUOTE_NUMBER_PREFIX)?.parse().ok()
}

/// Allocates the next quote number: one past the highest existing `Q-<n>`,
/// starting above 1000 when none exist.
///
/// Scan-then-allocate has a race window between concurrent creators; callers
/// must run this inside the transaction that inserts the quote, with the
/// unique constraint on the quote number as the backstop.
pub fn next_quote_number<'a>(existing: impl IntoIterator<Item = &'a str>) -> QuoteNumber {
    let highest = existing
        .into_iter()
        .filter_map(parse_quote_number)
        .max()
        .unwrap_or(QUOTE_NUMBER_FLOOR)
        .max(QUOTE_NUMBER_FLOOR);

    QuoteNumber(format!("{QUOTE_NUMBER_PREFIX}{}", highest + 1))
}

#[cfg(test)]
mod tests {
    use super::{next_quote_number, parse_quote_number};

    #[test]
    fn first_allocation_starts_above_the_floor() {
        assert_eq!(next_quote_number([]).0, "Q-1001");
    }

    #[test]
    fn allocation_is_one_past_the_maximum() {
        let existing = ["Q-1001", "Q-1044", "Q-1002"];
        assert_eq!(next_quote_number(existing).0, "Q-1045");
    }

    #[test]
    fn malformed_numbers_are_ignored() {
        let existing = ["Q-1005", "QUOTE-9999", "Q-", "Q-12b", "draft"];
        assert_eq!(next_quote_number(existing).0, "Q-1006");
    }

    #[test]
    fn numbers_below_the_floor_do_not_lower_allocation() {
        assert_eq!(next_quote_number(["Q-17"]).0, "Q-1001");
    }

    #[test]
    fn sequential_allocations_are_strictly_increasing() {
        let mut existing: Vec<String> = Vec::new();
        for _ in 0..5 {
            let next = next_quote_number(existing.iter().map(String::as_str));
            assert!(!existing.contains(&next.0));
            existing.push(next.0);
        }
        assert_eq!(existing, vec!["Q-1001", "Q-1002", "Q-1003", "Q-1004", "Q-1005"]);
    }

    #[test]
    fn parse_rejects_non_canonical_forms() {
        assert_eq!(parse_quote_number("Q-1001"), Some(1001));
        assert_eq!(parse_quote_number("  Q-1001  "), Some(1001));
        assert_eq!(parse_quote_number("q-1001"), None);
        assert_eq!(parse_quote_number("Q-10.5"), None);
    }
}
