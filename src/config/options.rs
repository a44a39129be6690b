// src/config/options.rs
use std::ffi::OsString;
use std::path::{ Path, PathBuf };
use super::consts::*;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppOptions {
    pub source: SourceOptions,
    pub export: ExportOptions,
}

/// How the status page is reached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transport {
    Direct,
    /// Prefix the percent-encoded target with this proxy URL.
    Proxied(String),
    /// Read markup from disk instead of the network.
    File(PathBuf),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceOptions {
    pub url: String,
    pub transport: Transport,
    pub selector: String,
    pub timeout_ms: u64,
    /// Replaces the built-in catalogue when set.
    pub catalogue: Option<PathBuf>,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            url: s!(STATUS_URL),
            transport: Transport::Direct,
            selector: s!(LIST_ITEM_SELECTOR),
            timeout_ms: FETCH_TIMEOUT_MS,
            catalogue: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportType {
    SingleFile,
    /// One file per map side.
    PerSide,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
        }
    }

    /// Field separator for delimited formats; `None` for JSON.
    pub fn delim(&self) -> Option<char> {
        match self {
            ExportFormat::Csv => Some(','),
            ExportFormat::Tsv => Some('\t'),
            ExportFormat::Json => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub export_type: ExportType,
    out_path: OutputPath,
    pub include_headers: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            export_type: ExportType::SingleFile,
            out_path: OutputPath::default(),
            include_headers: false,
        }
    }
}

impl ExportOptions {
    pub fn out_path(&self) -> PathBuf {
        let mut path = self.out_path.dir.clone();

        match self.export_type {
            ExportType::SingleFile => {
                let mut name = self.out_path.file_stem.clone();
                match &self.out_path.ext {
                    Some(ext) => { name.push("."); name.push(ext); }
                    None => { name.push("."); name.push(self.format.ext()); }
                }
                path.push(name);
            },
            ExportType::PerSide => { /* directory only */ },
        }
        path
    }

    /// Split user text into dir + stem. An explicit extension is kept even
    /// when the format changes later.
    pub fn set_path(&mut self, text: &str) {
        let s = text.trim();

        match self.export_type {
            ExportType::SingleFile => {
                let p = Path::new(s);
                if let Some(parent) = p.parent() {
                    self.out_path.dir = parent.to_path_buf();
                }
                if let Some(stem) = p.file_stem() {
                    self.out_path.file_stem = stem.to_os_string();
                }
                self.out_path.ext = p.extension().map(|e| e.to_os_string());
            }
            ExportType::PerSide => {
                self.out_path.dir = PathBuf::from(s);
                self.out_path.ext = None;
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPath {
    dir: PathBuf,
    file_stem: OsString, // without extension
    ext: Option<OsString>,
}

impl Default for OutputPath {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_stem: OsString::from(DEFAULT_FILE),
            ext: None,
        }
    }
}
