// src/file.rs

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use crate::config::options::{ ExportFormat, ExportOptions, ExportType };
use crate::core::sanitize::sanitize_filename;
use crate::csv::to_export_string;
use crate::error::{ Error, Result };
use serde::Serialize;

use crate::model::ReconciledFeature;

pub const HEADERS: [&str; 10] = [
    "side", "full_name", "kind", "difficulty", "is_open", "x", "y", "colour", "label", "text_colour",
];

/// JSON shape of one exported feature: the reconciled data plus its marker.
#[derive(Serialize)]
struct ExportRecord<'a> {
    #[serde(flatten)]
    feature: &'a ReconciledFeature,
    colour: &'static str,
    label: &'a str,
    text_colour: Option<&'static str>,
}

impl<'a> From<&'a ReconciledFeature> for ExportRecord<'a> {
    fn from(f: &'a ReconciledFeature) -> Self {
        Self {
            feature: f,
            colour: f.marker_colour(),
            label: f.marker_label(),
            text_colour: f.marker_text_colour(),
        }
    }
}

pub fn headers() -> Vec<String> {
    HEADERS.iter().map(|h| s!(*h)).collect()
}

pub fn feature_row(f: &ReconciledFeature) -> Vec<String> {
    let feat = &f.feature;
    vec![
        feat.side.clone(),
        feat.full_name.clone(),
        s!(feat.kind.as_str()),
        feat.difficulty.map(|d| s!(d.as_str())).unwrap_or_default(),
        f.is_open.to_string(),
        format!("{:.2}", feat.coordinate.x),
        format!("{:.2}", feat.coordinate.y),
        s!(f.marker_colour()),
        s!(f.marker_label()),
        f.marker_text_colour().map(|c| s!(c)).unwrap_or_default(),
    ]
}

/// Serialize features in the given format. `include_headers` only applies to
/// delimited formats.
pub fn render(format: ExportFormat, include_headers: bool, features: &[ReconciledFeature]) -> Result<String> {
    match format.delim() {
        Some(sep) => {
            let rows: Vec<Vec<String>> = features.iter().map(feature_row).collect();
            Ok(to_export_string(&headers(), &rows, include_headers, sep))
        }
        None => {
            let records: Vec<ExportRecord> = features.iter().map(ExportRecord::from).collect();
            let mut json = serde_json::to_string_pretty(&records)?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Write features according to the export options. Returns every path written.
pub fn export_features(export: &ExportOptions, features: &[ReconciledFeature]) -> Result<Vec<PathBuf>> {
    match export.export_type {
        ExportType::SingleFile => Ok(vec![write_export_single(export, features)?]),
        ExportType::PerSide => write_export_per_side(export, features),
    }
}

pub fn write_export_single(export: &ExportOptions, features: &[ReconciledFeature]) -> Result<PathBuf> {
    let path = export.out_path();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let contents = render(export.format, export.include_headers, features)?;
    fs::write(&path, contents)?;
    logf!("Export: wrote {} features → {}", features.len(), path.display());
    Ok(path)
}

/// One file per map side inside the directory `export.out_path()`.
pub fn write_export_per_side(export: &ExportOptions, features: &[ReconciledFeature]) -> Result<Vec<PathBuf>> {
    let outdir = export.out_path();
    ensure_directory(&outdir)?;

    // Group by side, keeping first-seen side order
    let mut order: Vec<&str> = Vec::new();
    let mut by_side: HashMap<&str, Vec<ReconciledFeature>> = HashMap::new();
    for f in features {
        let side = f.feature.side.as_str();
        if !by_side.contains_key(side) { order.push(side); }
        by_side.entry(side).or_default().push(f.clone());
    }

    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut written = Vec::with_capacity(order.len());
    let ext = export.format.ext();

    for side in order {
        let stem = sanitize_filename(side, "side");
        let path = resolve_side_filename(&outdir, &stem, &mut seen, ext);
        let side_features = by_side.get(side).map(Vec::as_slice).unwrap_or_default();
        let contents = render(export.format, export.include_headers, side_features)?;
        fs::write(&path, contents)?;
        logf!("Export: {side} → {}", path.display());
        written.push(path);
    }

    Ok(written)
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::Export(format!("Path exists but is not a directory: {}", dir.display())));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// Duplicate handling **only within this run**
pub fn resolve_side_filename(
    dir: &Path,
    stem: &str,                        // already sanitized, no extension
    seen_names: &mut HashMap<String, usize>,
    ext: &str,                         // "csv" | "tsv" | "json"
) -> PathBuf {
    let count = seen_names.entry(stem.to_string()).or_insert(0);

    // First occurrence: "<stem>.ext"
    // Subsequent:       "<stem> (N).ext" with N starting at 2
    let filename = if *count == 0 {
        format!("{stem}.{ext}")
    } else {
        format!("{stem} ({}).{ext}", *count + 1)
    };

    *count += 1;
    dir.join(filename)
}
