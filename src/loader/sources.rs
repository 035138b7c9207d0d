//! Places the index payload can be fetched from.
//!
//! Every source enforces the configured size limit before handing bytes to
//! the parser. None of them apply a timeout: a slow fetch simply keeps the
//! loader in `Loading`.

use std::future::Future;
use std::path::{Path, PathBuf};

use reqwest::{Client, Url};
use tokio::fs::File;
use tokio::io::AsyncReadExt;

use crate::config::SearchConfig;
use crate::error::LoadError;
use crate::models::IndexEntry;

/// Something that can produce the raw index payload
pub trait IndexSource: Send + Sync + 'static {
    /// Human-readable location used in logs
    fn location(&self) -> String;

    fn fetch(&self) -> impl Future<Output = Result<Vec<u8>, LoadError>> + Send;
}

fn check_size(size: u64, limit: u64) -> Result<(), LoadError> {
    if size > limit {
        return Err(LoadError::TooLarge { size, limit });
    }
    Ok(())
}

/// Fetches the index over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    url: Url,
    max_bytes: u64,
}

impl HttpSource {
    /// Build a source for `config.index_path` resolved against `base_url`
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::InvalidUrl`] if `base_url` is not an absolute URL
    /// or the index path cannot be joined onto it.
    pub fn new(base_url: &str, config: &SearchConfig) -> Result<Self, LoadError> {
        let invalid = |reason: String| LoadError::InvalidUrl { url: base_url.to_string(), reason };
        let base = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        let url = base.join(&config.index_path).map_err(|e| invalid(e.to_string()))?;

        Ok(Self { client: Client::new(), url, max_bytes: config.max_index_bytes })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl IndexSource for HttpSource {
    fn location(&self) -> String {
        self.url.to_string()
    }

    async fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        let transport =
            |source: reqwest::Error| LoadError::Transport { url: self.url.to_string(), source };

        let mut response = self.client.get(self.url.clone()).send().await.map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status { url: self.url.to_string(), status: status.as_u16() });
        }

        let declared = response.content_length();
        if let Some(length) = declared {
            check_size(length, self.max_bytes)?;
        }

        // Content-Length may be absent, so the limit is enforced per chunk as well
        let mut body = Vec::with_capacity(usize::try_from(declared.unwrap_or(0)).unwrap_or_default());
        while let Some(chunk) = response.chunk().await.map_err(transport)? {
            body.extend_from_slice(&chunk);
            check_size(body.len() as u64, self.max_bytes)?;
        }

        Ok(body)
    }
}

/// Reads the index from a built site directory on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    max_bytes: u64,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>, max_bytes: u64) -> Self {
        Self { path: path.into(), max_bytes }
    }

    /// Locate `config.index_path` inside the site output directory
    pub fn from_site_root(root: &Path, config: &SearchConfig) -> Self {
        let relative = config.index_path.trim_start_matches('/');
        Self::new(root.join(relative), config.max_index_bytes)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IndexSource for FileSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        let io = |source: std::io::Error| LoadError::Io { path: self.path.clone(), source };

        // Size is checked on the open handle, not the path, to avoid a TOCTOU race
        let mut file = File::open(&self.path).await.map_err(io)?;
        let size = file.metadata().await.map_err(io)?.len();
        check_size(size, self.max_bytes)?;

        let mut payload = Vec::with_capacity(usize::try_from(size).unwrap_or_default());
        file.read_to_end(&mut payload).await.map_err(io)?;
        check_size(payload.len() as u64, self.max_bytes)?;

        Ok(payload)
    }
}

/// Serves an index payload held in memory, e.g. one embedded at build time
#[derive(Debug, Clone)]
pub struct MemorySource {
    payload: Vec<u8>,
    max_bytes: u64,
}

impl MemorySource {
    pub fn new(payload: impl Into<Vec<u8>>) -> Self {
        Self { payload: payload.into(), max_bytes: u64::MAX }
    }

    /// Serialize `entries` into the same JSON shape the site generator emits
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Parse`] if serialization fails.
    pub fn from_entries(entries: &[IndexEntry]) -> Result<Self, LoadError> {
        Ok(Self::new(serde_json::to_vec(entries)?))
    }

    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }
}

impl IndexSource for MemorySource {
    fn location(&self) -> String {
        format!("memory ({} bytes)", self.payload.len())
    }

    async fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        check_size(self.payload.len() as u64, self.max_bytes)?;
        Ok(self.payload.clone())
    }
}
