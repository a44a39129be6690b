// src/core/net.rs
//! Fetch capabilities. The pipeline only ever sees `dyn Fetch`, so the
//! transport (direct, proxied, offline file) is chosen by the host.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::consts::USER_AGENT;
use crate::config::options::{ SourceOptions, Transport };
use crate::error::FetchError;

/// One outbound call per invocation. No retries, no caching.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Plain HTTP(S) GET through reqwest.
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout_ms: u64) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::transport("<client>", e))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        logd!("Fetch: GET {url}");
        let resp = self.client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::transport(url, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: s!(url), status: status.as_u16() });
        }

        let body = resp.text().await.map_err(|e| FetchError::transport(url, e))?;
        logd!("Fetch: {} bytes from {url}", body.len());
        Ok(body)
    }
}

/// Routes every request through a cross-origin proxy of the
/// `<prefix><percent-encoded target>` shape.
pub struct ProxiedFetcher {
    prefix: String,
    inner: Arc<dyn Fetch>,
}

impl ProxiedFetcher {
    pub fn new(prefix: impl Into<String>, inner: Arc<dyn Fetch>) -> Self {
        Self { prefix: prefix.into(), inner }
    }

    pub fn proxied_url(&self, url: &str) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(url.as_bytes()).collect();
        format!("{}{}", self.prefix, encoded)
    }
}

#[async_trait]
impl Fetch for ProxiedFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.inner.fetch(&self.proxied_url(url)).await
    }
}

/// Serves markup from disk, ignoring the requested URL. Used for offline runs
/// against a saved page.
pub struct FileFetcher {
    path: PathBuf,
}

impl FileFetcher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl Fetch for FileFetcher {
    async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| FetchError::transport(self.path.display().to_string(), e))
    }
}

/// Build the capability described by the options.
pub fn from_options(source: &SourceOptions) -> Result<Arc<dyn Fetch>, FetchError> {
    let fetcher: Arc<dyn Fetch> = match &source.transport {
        Transport::Direct => Arc::new(HttpFetcher::new(source.timeout_ms)?),
        Transport::Proxied(prefix) => {
            let direct: Arc<dyn Fetch> = Arc::new(HttpFetcher::new(source.timeout_ms)?);
            Arc::new(ProxiedFetcher::new(prefix.clone(), direct))
        }
        Transport::File(path) => Arc::new(FileFetcher::new(path.clone())),
    };
    Ok(fetcher)
}
