//! Price feeds: resolve a symbol to its `<SYMBOL>.csv` price series.

use crate::config::{FeedConfig, FeedKind};
use crate::error::ProfitError;
use crate::loader::{PriceRecords, resource_name};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::io::{Cursor, ErrorKind};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;
use url::Url;

// ── Feed trait ────────────────────────────────────────────────────────────────

/// Swappable record source.
#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// Raw CSV bytes for `symbol`, or [`ProfitError::RecordSourceNotFound`].
    async fn fetch_source(&self, symbol: &str) -> Result<Vec<u8>, ProfitError>;

    /// Daily price records for `symbol`, parsed lazily in file order.
    async fn fetch_daily_prices(
        &self,
        symbol: &str,
    ) -> Result<PriceRecords<Cursor<Vec<u8>>>, ProfitError> {
        let bytes = self.fetch_source(symbol).await?;
        PriceRecords::new(Cursor::new(bytes), resource_name(symbol))
    }
}

pub fn build_feed(config: &FeedConfig) -> Result<Box<dyn PriceFeed>, ProfitError> {
    match config.kind {
        FeedKind::Directory => Ok(Box::new(DirectoryFeed::new(config.data_dir.clone()))),
        FeedKind::Http => Ok(Box::new(HttpFeed::new(config)?)),
    }
}

// ── Local directory ───────────────────────────────────────────────────────────

pub struct DirectoryFeed {
    data_dir: PathBuf,
}

impl DirectoryFeed {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn path_for(&self, symbol: &str) -> PathBuf {
        self.data_dir.join(resource_name(symbol))
    }
}

#[async_trait]
impl PriceFeed for DirectoryFeed {
    async fn fetch_source(&self, symbol: &str) -> Result<Vec<u8>, ProfitError> {
        let path = self.path_for(symbol);
        debug!("Reading {:?}", path);

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(ProfitError::RecordSourceNotFound(path.display().to_string()))
            }
            Err(e) => Err(ProfitError::Io {
                name: path.display().to_string(),
                source: e,
            }),
        }
    }
}

// ── HTTP ──────────────────────────────────────────────────────────────────────

pub struct HttpFeed {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpFeed {
    pub fn new(config: &FeedConfig) -> Result<Self, ProfitError> {
        let base = config
            .base_url
            .as_deref()
            .ok_or_else(|| ProfitError::InvalidArguments("http feed needs feed.base_url".into()))?;

        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .build()
            .map_err(|e| ProfitError::Http {
                name: base.to_string(),
                source: e,
            })?;

        Self::with_client(client, base)
    }

    /// Feed over a caller-built client, e.g. one with proxies disabled.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self, ProfitError> {
        Ok(Self {
            client,
            base_url: directory_url(base_url)?,
        })
    }

    fn url_for(&self, symbol: &str) -> Result<Url, ProfitError> {
        Ok(self.base_url.join(&resource_name(symbol))?)
    }
}

/// Parse a base URL so that `join` appends to it rather than replacing its
/// last path segment.
fn directory_url(base: &str) -> Result<Url, ProfitError> {
    let base = base.trim();
    if base.ends_with('/') {
        Ok(Url::parse(base)?)
    } else {
        Ok(Url::parse(&format!("{}/", base))?)
    }
}

#[async_trait]
impl PriceFeed for HttpFeed {
    async fn fetch_source(&self, symbol: &str) -> Result<Vec<u8>, ProfitError> {
        let url = self.url_for(symbol)?;
        let name = url.to_string();
        debug!("GET {}", name);

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProfitError::Http {
                name: name.clone(),
                source: e,
            })?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ProfitError::RecordSourceNotFound(name));
        }
        if !status.is_success() {
            return Err(ProfitError::HttpStatus {
                name,
                status: status.as_u16(),
            });
        }

        let body = resp.bytes().await.map_err(|e| ProfitError::Http {
            name: name.clone(),
            source: e,
        })?;
        debug!("{}: {} bytes", name, body.len());
        Ok(body.to_vec())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
