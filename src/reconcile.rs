// src/reconcile.rs
use std::collections::HashMap;

use serde::Serialize;

use crate::catalogue::Catalogue;
use crate::model::{ ClassifiedStatusRecord, FeatureKind, ReconciledFeature };

/// Merge live state into the catalogue.
///
/// Output has exactly the catalogue's features, in catalogue order. A feature
/// whose `full_name` never appears among `records` is closed. When a name
/// appears more than once, the last record wins.
pub fn reconcile(catalogue: &Catalogue, records: &[ClassifiedStatusRecord]) -> Vec<ReconciledFeature> {
    let live: HashMap<&str, bool> = records
        .iter()
        .map(|r| (r.full_name.as_str(), r.is_open))
        .collect();

    let out: Vec<ReconciledFeature> = catalogue
        .features()
        .iter()
        .map(|f| ReconciledFeature {
            feature: f.clone(),
            is_open: live.get(f.full_name.as_str()).copied().unwrap_or(false),
        })
        .collect();

    let matched = catalogue.features().iter().filter(|f| live.contains_key(f.full_name.as_str())).count();
    logd!("Reconcile: {matched}/{} catalogue features matched {} live records", out.len(), records.len());
    for label in unmatched_labels(catalogue, records) {
        logd!("Reconcile: live label not in catalogue: {label:?}");
    }
    out
}

/// Scraped labels with no catalogue feature, deduplicated, in document order.
pub fn unmatched_labels<'a>(catalogue: &Catalogue, records: &'a [ClassifiedStatusRecord]) -> Vec<&'a str> {
    let mut out: Vec<&str> = Vec::new();
    for r in records {
        if catalogue.get(&r.full_name).is_none() && !out.contains(&r.full_name.as_str()) {
            out.push(&r.full_name);
        }
    }
    out
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct OpenCount {
    pub open: usize,
    pub total: usize,
}

/// Status overview for one map side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SideSummary {
    pub side: String,
    pub lifts: OpenCount,
    pub slopes: OpenCount,
}

/// Per-side open/total counts, sides in first-seen order.
pub fn summarize(features: &[ReconciledFeature]) -> Vec<SideSummary> {
    let mut out: Vec<SideSummary> = Vec::new();
    for f in features {
        let pos = match out.iter().position(|s| s.side == f.feature.side) {
            Some(p) => p,
            None => {
                out.push(SideSummary {
                    side: f.feature.side.clone(),
                    lifts: OpenCount::default(),
                    slopes: OpenCount::default(),
                });
                out.len() - 1
            }
        };
        let count = match f.feature.kind {
            FeatureKind::Lift => &mut out[pos].lifts,
            FeatureKind::Slope => &mut out[pos].slopes,
        };
        count.total += 1;
        if f.is_open { count.open += 1; }
    }
    out
}
