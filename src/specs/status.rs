//! Scraping *spec* for the lift and slope status list.
//!
//! The page renders one `.list-group-item` per feature, holding the feature
//! label and its status word as two text fragments:
//!
//! ```html
//! <li class="list-group-item">B-Fugleleiken <span class="badge">Åpen</span></li>
//! ```
//!
//! Items with any other fragment count (headers, decorative rows, notes) are
//! skipped.

use scraper::{ Html, Selector };

use crate::config::consts::LIST_ITEM_SELECTOR;
use crate::core::html::direct_fragments;
use crate::error::ExtractorError;
use crate::model::RawStatusRecord;

/// Markup in, two-field records out (document order).
pub trait RecordExtractor: Send + Sync {
    fn extract(&self, markup: &str) -> Vec<RawStatusRecord>;
}

/// Selects list items by CSS selector and keeps those with exactly two
/// non-empty direct text fragments.
#[derive(Debug, Clone)]
pub struct ListItemExtractor {
    selector: Selector,
}

impl ListItemExtractor {
    pub fn new(css: &str) -> Result<Self, ExtractorError> {
        let selector = Selector::parse(css).map_err(|e| ExtractorError {
            selector: s!(css),
            message: e.to_string(),
        })?;
        Ok(Self { selector })
    }

    /// Lazily walk the list items of an already parsed document.
    pub fn records<'a>(&'a self, doc: &'a Html) -> impl Iterator<Item = RawStatusRecord> + 'a {
        doc.select(&self.selector).filter_map(|el| {
            let mut frags = direct_fragments(el);
            if frags.len() != 2 {
                return None;
            }
            let status_word = frags.pop()?;
            let label = frags.pop()?;
            Some(RawStatusRecord { label, status_word })
        })
    }
}

impl Default for ListItemExtractor {
    fn default() -> Self {
        Self::new(LIST_ITEM_SELECTOR).expect("built-in list item selector parses")
    }
}

impl RecordExtractor for ListItemExtractor {
    fn extract(&self, markup: &str) -> Vec<RawStatusRecord> {
        let doc = Html::parse_document(markup);
        let records: Vec<_> = self.records(&doc).collect();
        logd!("Extract: {} status records", records.len());
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(label: &str, status: &str) -> RawStatusRecord {
        RawStatusRecord { label: s!(label), status_word: s!(status) }
    }

    #[test]
    fn two_fragment_items_become_records() {
        let html = r#"
            <ul class="list-group">
              <li class="list-group-item">B-Fugleleiken <span class="badge">Åpen</span></li>
              <li class="list-group-item">
                  <strong>11-Ølkorken</strong>
                  <span class="badge badge-danger">Stengt</span>
              </li>
            </ul>
        "#;
        let got = ListItemExtractor::default().extract(html);
        assert_eq!(got, vec![rec("B-Fugleleiken", "Åpen"), rec("11-Ølkorken", "Stengt")]);
    }

    #[test]
    fn one_or_three_fragments_are_skipped() {
        let html = r#"
            <div class="list-group-item">Heiser</div>
            <div class="list-group-item">C-Vestlia <span>Åpen</span> <em>til 16:00</em></div>
            <div class="list-group-item"></div>
            <div class="list-group-item">3-Bakken <span>Open</span></div>
        "#;
        let got = ListItemExtractor::default().extract(html);
        assert_eq!(got, vec![rec("3-Bakken", "Open")]);
    }

    #[test]
    fn no_items_is_an_empty_result() {
        let got = ListItemExtractor::default().extract("<html><body><p>Ingen data</p></body></html>");
        assert!(got.is_empty());
        assert!(ListItemExtractor::default().extract("").is_empty());
    }

    #[test]
    fn document_order_and_duplicates_are_kept() {
        let html = r#"
            <li class="list-group-item">A-Lift <b>Stengt</b></li>
            <li class="list-group-item">A-Lift <b>Åpen</b></li>
        "#;
        let got = ListItemExtractor::default().extract(html);
        assert_eq!(got, vec![rec("A-Lift", "Stengt"), rec("A-Lift", "Åpen")]);
    }

    #[test]
    fn custom_selector() {
        let ex = ListItemExtractor::new("tr.status").unwrap();
        let html = r#"<table><tr class="status"><td>4-Løypa</td><td>open</td></tr></table>"#;
        assert_eq!(ex.extract(html), vec![rec("4-Løypa", "open")]);
    }

    #[test]
    fn bad_selector_is_rejected_up_front() {
        let err = ListItemExtractor::new("li[").unwrap_err();
        assert_eq!(err.selector, "li[");
    }
}
