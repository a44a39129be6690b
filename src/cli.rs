// src/cli.rs
use std::fmt::Write as _;
use std::io::{ self, Write };
use std::path::PathBuf;
use std::time::Duration;

use clap::{ Parser, ValueEnum };

use crate::{
    board::{ RefreshOutcome, StatusBoard },
    classify::sort_by_prefix,
    config::consts::*,
    config::options::{ AppOptions, ExportFormat, ExportType, Transport },
    error::Result,
    file,
    model::{ FeatureKind, ReconciledFeature },
    pipeline::Pipeline,
    progress::Progress,
    reconcile::summarize,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Table,
    Csv,
    Tsv,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    /// As listed in the catalogue
    Catalogue,
    /// Numbered slopes ascending, then lettered lifts
    Prefix,
}

/// Live lift and slope status, reconciled against the map catalogue.
#[derive(Parser, Debug)]
#[command(name = "slope_status", version, about)]
pub struct Args {
    /// Status page to scrape
    #[arg(long, default_value = STATUS_URL)]
    pub url: String,

    /// Go through a cross-origin proxy (`<PREFIX><encoded url>`)
    #[arg(long, value_name = "PREFIX", num_args = 0..=1, default_missing_value = CORS_PROXY)]
    pub proxy: Option<String>,

    /// Read the page from a saved file instead of the network
    #[arg(long, value_name = "PATH", conflicts_with = "proxy")]
    pub from_file: Option<PathBuf>,

    /// Catalogue CSV (side,full_name,kind,difficulty,x,y); built-in if omitted
    #[arg(long, value_name = "PATH")]
    pub catalogue: Option<PathBuf>,

    /// CSS selector for status list items
    #[arg(long, default_value = LIST_ITEM_SELECTOR)]
    pub selector: String,

    #[arg(long, value_name = "MS", default_value_t = FETCH_TIMEOUT_MS)]
    pub timeout_ms: u64,

    #[arg(long, value_enum, default_value_t = Format::Table)]
    pub format: Format,

    /// Write to this file (or directory with --per-side) instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// One output file per map side
    #[arg(long, requires = "out")]
    pub per_side: bool,

    #[arg(long)]
    pub include_headers: bool,

    /// Print open/total counts per side
    #[arg(long)]
    pub summary: bool,

    #[arg(long, value_enum, default_value_t = SortOrder::Catalogue)]
    pub sort: SortOrder,

    /// Refresh every SECS seconds until Ctrl-C
    #[arg(long, value_name = "SECS")]
    pub watch: Option<u64>,

    /// Debug-level logging to .store/debug.log
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn to_options(&self) -> AppOptions {
        let mut opts = AppOptions::default();

        let src = &mut opts.source;
        src.url = self.url.clone();
        src.selector = self.selector.clone();
        src.timeout_ms = self.timeout_ms;
        src.catalogue = self.catalogue.clone();
        src.transport = match (&self.from_file, &self.proxy) {
            (Some(path), _) => Transport::File(path.clone()),
            (None, Some(prefix)) => Transport::Proxied(prefix.clone()),
            (None, None) => Transport::Direct,
        };

        let export = &mut opts.export;
        export.format = match self.format {
            Format::Table | Format::Csv => ExportFormat::Csv,
            Format::Tsv => ExportFormat::Tsv,
            Format::Json => ExportFormat::Json,
        };
        export.include_headers = self.include_headers;
        if self.per_side {
            export.export_type = ExportType::PerSide;
        }
        if let Some(out) = &self.out {
            export.set_path(&out.to_string_lossy());
        }
        opts
    }
}

/// Stage lines on stderr.
pub struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn begin(&mut self, url: &str) {
        eprintln!("Fetching live status from {url}…");
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
}

pub async fn run(args: Args) -> Result<()> {
    crate::log::init(args.verbose)?;
    let opts = args.to_options();
    logf!("CLI: start url={} transport={:?}", opts.source.url, opts.source.transport);

    let pipeline = Pipeline::from_options(&opts.source)?;
    let board = StatusBoard::new(pipeline);
    let mut progress = ConsoleProgress;

    let Some(secs) = args.watch else {
        return match board.refresh(Some(&mut progress)).await {
            RefreshOutcome::Updated(snap) => emit(&args, &opts, &snap.features),
            RefreshOutcome::Failed(e) => Err(e.into()),
            RefreshOutcome::Busy => Ok(()),
        };
    };

    let period = Duration::from_secs(secs.max(MIN_WATCH_SECS));
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => break,
        }
        tokio::select! {
            outcome = board.refresh(Some(&mut progress)) => match outcome {
                RefreshOutcome::Updated(snap) => emit(&args, &opts, &snap.features)?,
                RefreshOutcome::Failed(_) => {
                    if let crate::board::RefreshStatus::Failed(msg) = board.status() {
                        eprintln!("{msg}");
                    }
                    if board.snapshot().is_some() {
                        eprintln!("Keeping last known status.");
                    }
                }
                RefreshOutcome::Busy => {}
            },
            _ = tokio::signal::ctrl_c() => {
                eprintln!("Refresh abandoned.");
                break;
            }
        }
    }
    Ok(())
}

fn emit(args: &Args, opts: &AppOptions, features: &[ReconciledFeature]) -> Result<()> {
    let mut features = features.to_vec();
    if args.sort == SortOrder::Prefix {
        sort_by_prefix(&mut features, |f| f.feature.full_name.as_str());
    }

    if args.out.is_some() {
        for path in file::export_features(&opts.export, &features)? {
            eprintln!("Wrote {}", path.display());
        }
    } else {
        let text = match args.format {
            Format::Table => render_table(&features),
            _ => file::render(opts.export.format, opts.export.include_headers, &features)?,
        };
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
    }

    if args.summary {
        eprint!("{}", render_summary(&features));
    }
    Ok(())
}

/// Sides in first-seen order; lifts before slopes within a side.
pub fn render_table(features: &[ReconciledFeature]) -> String {
    let width = features.iter().map(|f| f.feature.full_name.chars().count()).max().unwrap_or(0);
    let mut out = s!();
    let mut sides: Vec<&str> = Vec::new();
    for f in features {
        if !sides.contains(&f.feature.side.as_str()) { sides.push(&f.feature.side); }
    }

    for side in sides {
        for (kind, title) in [(FeatureKind::Lift, "Lifts"), (FeatureKind::Slope, "Slopes")] {
            let group: Vec<_> = features.iter()
                .filter(|f| f.feature.side == side && f.feature.kind == kind)
                .collect();
            if group.is_empty() { continue; }
            let _ = writeln!(out, "{side} {title}");
            for f in group {
                let state = if f.is_open { "open" } else { "closed" };
                let tier = f.feature.difficulty.map(|d| d.as_str()).unwrap_or("");
                let _ = writeln!(out, "  {:<width$}  {:<6}  {}", f.feature.full_name, state, tier);
            }
        }
    }
    out
}

pub fn render_summary(features: &[ReconciledFeature]) -> String {
    let mut out = s!();
    for s in summarize(features) {
        let _ = writeln!(
            out,
            "{}: lifts {}/{} open, slopes {}/{} open",
            s.side, s.lifts.open, s.lifts.total, s.slopes.open, s.slopes.total
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ CatalogueFeature, Coordinate, DifficultyTier };

    fn rf(side: &str, name: &str, kind: FeatureKind, open: bool) -> ReconciledFeature {
        ReconciledFeature {
            feature: CatalogueFeature {
                side: s!(side),
                full_name: s!(name),
                kind,
                difficulty: (kind == FeatureKind::Slope).then_some(DifficultyTier::Red),
                coordinate: Coordinate { x: 1.0, y: 2.0 },
            },
            is_open: open,
        }
    }

    #[test]
    fn args_map_onto_options() {
        let args = Args::parse_from([
            "slope_status", "--proxy", "--format", "tsv", "-o", "out/today", "--include-headers",
        ]);
        let opts = args.to_options();
        assert_eq!(opts.source.transport, Transport::Proxied(s!(CORS_PROXY)));
        assert_eq!(opts.export.format, ExportFormat::Tsv);
        assert!(opts.export.include_headers);
        assert_eq!(opts.export.out_path(), PathBuf::from("out").join("today.tsv"));
    }

    #[test]
    fn from_file_wins_and_conflicts_with_proxy() {
        let args = Args::parse_from(["slope_status", "--from-file", "page.html"]);
        assert_eq!(args.to_options().source.transport, Transport::File(PathBuf::from("page.html")));
        assert!(Args::try_parse_from(["slope_status", "--from-file", "a", "--proxy"]).is_err());
        assert!(Args::try_parse_from(["slope_status", "--per-side"]).is_err());
    }

    #[test]
    fn table_groups_by_side_then_kind() {
        let features = vec![
            rf("Nord", "11-Ølkorken", FeatureKind::Slope, false),
            rf("Nord", "B-Fugleleiken", FeatureKind::Lift, true),
            rf("Sør", "3-Bakken", FeatureKind::Slope, true),
        ];
        let table = render_table(&features);
        let lines: Vec<&str> = table.lines().map(str::trim_end).collect();
        assert_eq!(lines, vec![
            "Nord Lifts",
            "  B-Fugleleiken  open",
            "Nord Slopes",
            "  11-Ølkorken    closed  red",
            "Sør Slopes",
            "  3-Bakken       open    red",
        ]);
    }

    #[test]
    fn summary_lines() {
        let features = vec![
            rf("Nord", "B-Fugleleiken", FeatureKind::Lift, true),
            rf("Nord", "11-Ølkorken", FeatureKind::Slope, false),
        ];
        assert_eq!(render_summary(&features), "Nord: lifts 1/1 open, slopes 0/1 open\n");
    }
}
