// src/error.rs
use std::path::PathBuf;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The page could not be obtained. Carries the underlying cause.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: BoxError,
    },

    #[error("{url} responded with HTTP {status}")]
    Status { url: String, status: u16 },
}

impl FetchError {
    pub fn transport(url: impl Into<String>, source: impl Into<BoxError>) -> Self {
        FetchError::Transport { url: url.into(), source: source.into() }
    }

    pub fn url(&self) -> &str {
        match self {
            FetchError::Transport { url, .. } | FetchError::Status { url, .. } => url,
        }
    }

    /// Display text followed by each nested cause it does not already show.
    /// HTTP client errors keep the root reason (refused, DNS, TLS) in the chain.
    pub fn with_causes(&self) -> String {
        let mut msg = self.to_string();
        let mut cause = std::error::Error::source(self);
        while let Some(err) = cause {
            let text = err.to_string();
            if !msg.contains(&text) {
                msg.push_str(": ");
                msg.push_str(&text);
            }
            cause = err.source();
        }
        msg
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogueError {
    #[error("could not read catalogue {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalogue is missing header column `{0}`")]
    MissingColumn(&'static str),

    #[error("catalogue row {row}: {message}")]
    Row { row: usize, message: String },

    #[error("catalogue lists `{0}` more than once")]
    Duplicate(String),
}

#[derive(Debug, thiserror::Error)]
#[error("invalid list item selector `{selector}`: {message}")]
pub struct ExtractorError {
    pub selector: String,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Catalogue(#[from] CatalogueError),

    #[error(transparent)]
    Extractor(#[from] ExtractorError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Export(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
