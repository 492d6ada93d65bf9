//! Alphanumeric ("human") string ordering.
//!
//! Splits keys into maximal runs of digits and non-digits, then compares
//! run-by-run: digit runs numerically, text runs case-insensitively. This
//! makes `note-2` sort before `note-10`, which plain lexicographic ordering
//! gets wrong.

use std::cmp::Ordering;

/// A maximal run of digits or non-digits within a key.
#[derive(Debug, PartialEq, Eq)]
enum Segment<'a> {
    Text(&'a str),
    Digits(&'a str),
}

/// Decompose a key into alternating text/digit segments.
///
/// The first segment is always `Text`, possibly empty, so two keys always
/// pair up segment kinds positionally even when one starts with a digit.
fn segments(s: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut rest = s;

    loop {
        let split = rest
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit())
            .map_or(rest.len(), |(i, _)| i);
        out.push(Segment::Text(&rest[..split]));
        rest = &rest[split..];
        if rest.is_empty() {
            break;
        }

        let split = rest
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map_or(rest.len(), |(i, _)| i);
        out.push(Segment::Digits(&rest[..split]));
        rest = &rest[split..];
        if rest.is_empty() {
            break;
        }
    }

    out
}

/// Compare two digit runs numerically without parsing.
///
/// Leading zeros are insignificant, so runs of any length compare correctly
/// where integer parsing would overflow.
fn compare_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Compare two text runs case-insensitively.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Compare two keys alphanumerically.
///
/// A key that is a segment-prefix of another orders first. Keys differing
/// only in case or in digit-run padding compare equal; callers needing a
/// deterministic order for such keys rely on sort stability.
pub fn compare(a: &str, b: &str) -> Ordering {
    let (a, b) = (segments(a), segments(b));
    let mut pairs = a.iter().zip(b.iter());

    let ordering = pairs.find_map(|(x, y)| {
        let ord = match (x, y) {
            (Segment::Text(x), Segment::Text(y)) => compare_text(x, y),
            (Segment::Digits(x), Segment::Digits(y)) => compare_digits(x, y),
            // Segments alternate and both keys start with Text, so kinds
            // always line up; fall back to literal comparison regardless.
            (Segment::Text(x), Segment::Digits(y))
            | (Segment::Digits(x), Segment::Text(y)) => compare_text(x, y),
        };
        (ord != Ordering::Equal).then_some(ord)
    });

    ordering.unwrap_or_else(|| a.len().cmp(&b.len()))
}

/// Compare two keys alphanumerically, optionally reversed.
pub fn compare_with(a: &str, b: &str, reverse: bool) -> Ordering {
    let ordering = compare(a, b);
    if reverse { ordering.reverse() } else { ordering }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_runs_compare_numerically() {
        assert_eq!(compare("item2", "item10"), Ordering::Less);
        assert_eq!(compare("item10", "item2"), Ordering::Greater);
        assert_eq!(compare("note-9", "note-11"), Ordering::Less);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(compare("Item2", "item2"), Ordering::Equal);
        assert_eq!(compare("ABC", "abd"), Ordering::Less);
    }

    #[test]
    fn test_identical_keys_equal() {
        assert_eq!(compare("a", "a"), Ordering::Equal);
        assert_eq!(compare("", ""), Ordering::Equal);
    }

    #[test]
    fn test_plain_text_keys() {
        // No digits at all: plain case-insensitive ordering
        assert_eq!(compare("apple", "banana"), Ordering::Less);
        assert_eq!(compare("Pear", "apple"), Ordering::Greater);
    }

    #[test]
    fn test_leading_digits() {
        // Empty leading text segment pairs against "note"'s text segment
        assert_eq!(compare("2-note", "note-2"), Ordering::Less);
        assert_eq!(compare("2020-12-01-c", "2021-01-01-a"), Ordering::Less);
    }

    #[test]
    fn test_prefix_orders_first() {
        assert_eq!(compare("note", "note2"), Ordering::Less);
        assert_eq!(compare("note2", "note2a"), Ordering::Less);
    }

    #[test]
    fn test_leading_zeros() {
        assert_eq!(compare("item07", "item7"), Ordering::Equal);
        assert_eq!(compare("item007", "item10"), Ordering::Less);
    }

    #[test]
    fn test_huge_digit_runs() {
        // Longer than u64: must still compare numerically
        let a = "v99999999999999999999999999999999999998";
        let b = "v99999999999999999999999999999999999999";
        assert_eq!(compare(a, b), Ordering::Less);
    }

    #[test]
    fn test_reverse_negates() {
        let pairs = [("item2", "item10"), ("a", "b"), ("x", "x")];
        for (a, b) in pairs {
            assert_eq!(compare_with(a, b, true), compare(a, b).reverse());
        }
    }

    #[test]
    fn test_segments_always_start_with_text() {
        assert_eq!(
            segments("2note"),
            vec![Segment::Text(""), Segment::Digits("2"), Segment::Text("note")]
        );
        assert_eq!(
            segments("note2"),
            vec![Segment::Text("note"), Segment::Digits("2")]
        );
    }

    #[test]
    fn test_descending_note_order() {
        let mut slugs = vec!["2021-01-01-a", "2021-02-01-b", "2020-12-01-c"];
        slugs.sort_by(|a, b| compare_with(a, b, true));
        assert_eq!(slugs, vec!["2021-02-01-b", "2021-01-01-a", "2020-12-01-c"]);
    }
}
