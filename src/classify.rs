// src/classify.rs
//! Turns raw `(label, status word)` pairs into typed records.
//!
//! Site conventions: lifts are labelled with a single letter (`B-Fugleleiken`),
//! slopes with a number or longer code (`11-Ølkorken`). Status words are
//! Norwegian or English; only the two spellings of "open" count as open.

use std::cmp::Ordering;

use crate::config::consts::OPEN_WORDS;
use crate::model::{ ClassifiedStatusRecord, FeatureKind, RawStatusRecord };

pub fn classify(raw: RawStatusRecord) -> ClassifiedStatusRecord {
    let (prefix, name) = split_label(&raw.label);
    let kind = kind_of_prefix(prefix);
    let (prefix, name) = (s!(prefix), s!(name));
    ClassifiedStatusRecord {
        is_open: is_open_word(&raw.status_word),
        full_name: raw.label,
        prefix,
        name,
        kind,
    }
}

pub fn classify_all<I>(raw: I) -> Vec<ClassifiedStatusRecord>
where
    I: IntoIterator<Item = RawStatusRecord>,
{
    raw.into_iter().map(classify).collect()
}

/// `(prefix, name)` split on the first `-`, both halves verbatim. Without a
/// `-` the whole label is the prefix and the name is empty.
pub fn split_label(label: &str) -> (&str, &str) {
    label.split_once('-').unwrap_or((label, ""))
}

/// Exactly one alphabetic character → lift; anything else → slope.
pub fn kind_of_prefix(prefix: &str) -> FeatureKind {
    let mut chars = prefix.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_alphabetic() => FeatureKind::Lift,
        _ => FeatureKind::Slope,
    }
}

/// Closed unless the word is one of the known spellings of "open".
pub fn is_open_word(word: &str) -> bool {
    let word = word.trim().to_lowercase();
    OPEN_WORDS.contains(&word.as_str())
}

/// Display order over prefixes: numbers ascending, then everything else
/// lexicographically.
pub fn compare_prefixes(a: &str, b: &str) -> Ordering {
    match (digits(a), digits(b)) {
        (Some(x), Some(y)) => x.len().cmp(&y.len())
            .then_with(|| x.cmp(y))
            .then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Significant digits of an all-ASCII-digit prefix, any length. No sign.
fn digits(prefix: &str) -> Option<&str> {
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(prefix.trim_start_matches('0'))
}

/// Stable sort by the prefix of the label `label_of` returns.
pub fn sort_by_prefix<T, F>(items: &mut [T], label_of: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by(|a, b| compare_prefixes(split_label(label_of(a)).0, split_label(label_of(b)).0));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(label: &str, status: &str) -> RawStatusRecord {
        RawStatusRecord { label: s!(label), status_word: s!(status) }
    }

    #[test]
    fn letter_prefix_is_a_lift() {
        let c = classify(raw("B-Fugleleiken", "Åpen"));
        assert_eq!(c.full_name, "B-Fugleleiken");
        assert_eq!(c.prefix, "B");
        assert_eq!(c.name, "Fugleleiken");
        assert_eq!(c.kind, FeatureKind::Lift);
        assert!(c.is_open);
    }

    #[test]
    fn numeric_prefix_is_a_slope() {
        let c = classify(raw("11-Ølkorken", "Stengt"));
        assert_eq!(c.prefix, "11");
        assert_eq!(c.name, "Ølkorken");
        assert_eq!(c.kind, FeatureKind::Slope);
        assert!(!c.is_open);
    }

    #[test]
    fn split_uses_first_dash_only() {
        assert_eq!(split_label("7-Nedre-Bakke"), ("7", "Nedre-Bakke"));
        assert_eq!(split_label("Barnebakken"), ("Barnebakken", ""));
        assert_eq!(split_label("-x"), ("", "x"));
    }

    #[test]
    fn split_keeps_whitespace_around_the_dash() {
        let c = classify(raw("B -Fugleleiken", "Åpen"));
        assert_eq!(c.prefix, "B ");
        assert_eq!(c.name, "Fugleleiken");
        assert_eq!(c.kind, FeatureKind::Slope);

        let c = classify(raw("11- Ølkorken", "Åpen"));
        assert_eq!(c.prefix, "11");
        assert_eq!(c.name, " Ølkorken");
        assert_eq!(c.full_name, "11- Ølkorken");
        assert_eq!(c.kind, FeatureKind::Slope);
    }

    #[test]
    fn kind_rules() {
        assert_eq!(kind_of_prefix("b"), FeatureKind::Lift);
        assert_eq!(kind_of_prefix("Ø"), FeatureKind::Lift);
        assert_eq!(kind_of_prefix("AB"), FeatureKind::Slope);
        assert_eq!(kind_of_prefix("7"), FeatureKind::Slope);
        assert_eq!(kind_of_prefix(""), FeatureKind::Slope);
        // no dash: the whole label is the prefix
        assert_eq!(classify(raw("Barnebakken", "open")).kind, FeatureKind::Slope);
    }

    #[test]
    fn open_words_any_case() {
        for w in ["åpen", "Åpen", "ÅPEN", " open ", "OPEN", "Open"] {
            assert!(is_open_word(w), "{w:?} should be open");
        }
        for w in ["stengt", "", "Closed", "apen", "opened", "åpent", "delvis åpen"] {
            assert!(!is_open_word(w), "{w:?} should be closed");
        }
    }

    #[test]
    fn prefix_order_numbers_first() {
        let mut v = vec!["C", "11", "B", "2", "1A", "10"];
        v.sort_by(|a, b| compare_prefixes(a, b));
        assert_eq!(v, vec!["2", "10", "11", "1A", "B", "C"]);
    }

    #[test]
    fn prefix_order_digits_only_any_length() {
        assert_eq!(compare_prefixes("99999999999999999999999", "1A"), Ordering::Less);
        assert_eq!(compare_prefixes("99999999999999999999999", "100000000000000000000000"), Ordering::Less);
        assert_eq!(compare_prefixes("+5", "7"), Ordering::Greater);
        assert_eq!(compare_prefixes("007", "10"), Ordering::Less);
        assert_eq!(compare_prefixes("07", "7"), Ordering::Less);

        let mut v = vec!["+5", "12345678901234567890123", "B", "3", ""];
        v.sort_by(|a, b| compare_prefixes(a, b));
        assert_eq!(v, vec!["3", "12345678901234567890123", "", "+5", "B"]);
    }

    #[test]
    fn sort_records_by_label_prefix() {
        let mut recs = classify_all(vec![
            raw("B-Fugleleiken", "open"),
            raw("11-Ølkorken", "open"),
            raw("3-Bakken", "open"),
        ]);
        sort_by_prefix(&mut recs, |r| r.full_name.as_str());
        let order: Vec<_> = recs.iter().map(|r| r.prefix.as_str()).collect();
        assert_eq!(order, vec!["3", "11", "B"]);
    }
}
