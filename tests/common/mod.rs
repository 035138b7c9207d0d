//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Router;
use parking_lot::Mutex;
use site_search::{IndexSource, LoadError, SearchOutcome};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::Notify;

/// Builder for a built site directory containing `search_index.json`
pub struct SiteDirBuilder {
    temp_dir: TempDir,
}

impl SiteDirBuilder {
    /// Create a new builder with an empty site directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    /// Get the path to the site root
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write raw content as the index file
    pub fn with_index(self, content: &str) -> Self {
        fs::write(self.index_path(), content).expect("Failed to write search_index.json");
        self
    }

    /// Write entries built programmatically as the index file
    pub fn with_entries(self, entries: &[EntryBuilder]) -> Self {
        let content = index_json(entries);
        self.with_index(&content)
    }

    fn index_path(&self) -> PathBuf {
        self.temp_dir.path().join("search_index.json")
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for SiteDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for raw index entry JSON, including shapes the site generator may emit
pub struct EntryBuilder {
    slug: String,
    title: Option<String>,
    date: Option<String>,
    tags: Option<Vec<String>>,
}

impl EntryBuilder {
    pub fn new(slug: &str) -> Self {
        Self { slug: slug.to_string(), title: None, date: None, tags: None }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn date(mut self, date: &str) -> Self {
        self.date = Some(date.to_string());
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.tags = Some(tags.iter().map(|t| t.to_string()).collect());
        self
    }

    /// Convert to a JSON object string, omitting unset fields
    pub fn to_json(&self) -> String {
        let mut fields = vec![format!(r#""slug":{}"#, quote(&self.slug))];
        if let Some(title) = &self.title {
            fields.push(format!(r#""title":{}"#, quote(title)));
        }
        if let Some(date) = &self.date {
            fields.push(format!(r#""date":{}"#, quote(date)));
        }
        if let Some(tags) = &self.tags {
            let tags = tags.iter().map(|t| quote(t)).collect::<Vec<_>>().join(",");
            fields.push(format!(r#""tags":[{}]"#, tags));
        }
        format!("{{{}}}", fields.join(","))
    }
}

fn quote(s: &str) -> String {
    serde_json::to_string(s).expect("Failed to quote string")
}

/// Serialize entries as the top-level index array
pub fn index_json(entries: &[EntryBuilder]) -> String {
    format!("[{}]", entries.iter().map(EntryBuilder::to_json).collect::<Vec<_>>().join(","))
}

/// The two-post index used throughout the scenarios
pub fn alpha_beta_index() -> String {
    index_json(&[
        EntryBuilder::new("a").title("Alpha").tags(&["x"]),
        EntryBuilder::new("b").title("Beta").tags(&["x", "y"]),
    ])
}

/// `count` posts all tagged `rust`, slugs `post-0..count`
pub fn many_posts_index(count: usize) -> String {
    let entries: Vec<EntryBuilder> = (0..count)
        .map(|i| {
            EntryBuilder::new(&format!("post-{}", i))
                .title(&format!("Post {}", i))
                .date("2024-01-01")
                .tags(&["rust"])
        })
        .collect();
    index_json(&entries)
}

/// Source that counts fetches and optionally holds each one until released
pub struct CountingSource {
    payload: Vec<u8>,
    fetches: Arc<AtomicUsize>,
    gate: Option<Arc<Notify>>,
}

impl CountingSource {
    pub fn new(payload: &str) -> Self {
        Self { payload: payload.as_bytes().to_vec(), fetches: Arc::default(), gate: None }
    }

    /// Hold every fetch until [`Notify::notify_one`] is called on the returned gate
    pub fn gated(payload: &str) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let source = Self { gate: Some(Arc::clone(&gate)), ..Self::new(payload) };
        (source, gate)
    }

    pub fn fetch_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.fetches)
    }
}

impl IndexSource for CountingSource {
    fn location(&self) -> String {
        "counting".to_string()
    }

    async fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        Ok(self.payload.clone())
    }
}

/// Collects every outcome handed to a render callback
#[derive(Clone, Default)]
pub struct Recorder {
    outcomes: Arc<Mutex<Vec<SearchOutcome>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Callback to pass to `QueryEngine::new`
    pub fn callback(&self) -> impl Fn(SearchOutcome) + Send + Sync + 'static {
        let outcomes = Arc::clone(&self.outcomes);
        move |outcome| outcomes.lock().push(outcome)
    }

    pub fn outcomes(&self) -> Vec<SearchOutcome> {
        self.outcomes.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.outcomes.lock().len()
    }
}

/// Slugs of the hits in a `Results` outcome
pub fn hit_slugs(outcome: &SearchOutcome) -> Vec<String> {
    outcome.results().expect("expected results").hits.iter().map(|e| e.slug.clone()).collect()
}

/// Serve `router` on an ephemeral local port and return its base URL
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind test server");
    let addr = listener.local_addr().expect("Failed to read test server address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Test server failed");
    });
    format!("http://{}", addr)
}

/// Serve `body` with chunked transfer encoding and no Content-Length header
///
/// The body is split into `chunk_size` pieces; every connection gets the same
/// response. Returns the base URL.
pub async fn serve_chunked(body: String, chunk_size: usize) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind test server");
    let addr = listener.local_addr().expect("Failed to read test server address");
    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            let body = body.clone();
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }

                let mut response = String::from(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\
                     Transfer-Encoding: chunked\r\nConnection: close\r\n\r\n",
                );
                for chunk in body.as_bytes().chunks(chunk_size) {
                    let chunk = std::str::from_utf8(chunk).expect("ASCII test body");
                    response.push_str(&format!("{:x}\r\n{}\r\n", chunk.len(), chunk));
                }
                response.push_str("0\r\n\r\n");
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });
    format!("http://{}", addr)
}
