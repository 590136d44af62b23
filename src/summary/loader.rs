//! Summary Loader
//!
//! Reads the summary document from its fixed source: a local file or an
//! HTTP(S) URL. One call to [`SummaryLoader::load`] is one logical read.

use reqwest::Client;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::summary::error::{LoadError, LoadResult};
use crate::summary::types::Summary;

/// Where the summary document lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummarySource {
    /// A JSON file on the local filesystem
    File(PathBuf),
    /// A JSON resource behind an HTTP(S) URL
    Http(String),
}

impl SummarySource {
    /// Interpret a configured source string.
    ///
    /// `http://` and `https://` prefixes select a remote source; anything
    /// else is taken as a file path.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            SummarySource::Http(trimmed.to_string())
        } else {
            SummarySource::File(PathBuf::from(trimmed))
        }
    }

    /// Local path, if this is a file source
    pub fn as_path(&self) -> Option<&PathBuf> {
        match self {
            SummarySource::File(path) => Some(path),
            SummarySource::Http(_) => None,
        }
    }
}

impl fmt::Display for SummarySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummarySource::File(path) => write!(f, "{}", path.display()),
            SummarySource::Http(url) => f.write_str(url),
        }
    }
}

/// Loader behaviour
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Request timeout in milliseconds (HTTP sources)
    pub request_timeout_ms: u64,
    /// Total attempts; 1 means no retry
    pub max_attempts: u32,
    /// Base backoff between attempts, multiplied by attempt²
    pub retry_backoff_ms: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: 5000,
            max_attempts: 1,
            retry_backoff_ms: 1000,
        }
    }
}

/// Reads [`Summary`] documents from a [`SummarySource`]
pub struct SummaryLoader {
    client: Client,
    source: SummarySource,
    config: LoaderConfig,
}

impl SummaryLoader {
    /// Create a loader for the given source
    pub fn new(source: SummarySource, config: LoaderConfig) -> LoadResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| LoadError::Client(e.to_string()))?;

        Ok(Self {
            client,
            source,
            config,
        })
    }

    pub fn source(&self) -> &SummarySource {
        &self.source
    }

    /// Load and parse the summary.
    ///
    /// Transient failures are retried up to `max_attempts` with quadratic
    /// backoff. Parse errors and client errors are returned immediately.
    pub async fn load(&self) -> LoadResult<Summary> {
        let attempts = self.config.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            if attempt > 0 {
                let delay = backoff_delay(self.config.retry_backoff_ms, attempt);
                tracing::debug!(attempt, delay_ms = delay, "Retrying summary load");
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }
            attempt += 1;

            match self.load_once().await {
                Ok(summary) => return Ok(summary),
                Err(e) if e.is_transient() && attempt < attempts => {
                    tracing::warn!(
                        source = %self.source,
                        attempt,
                        error = %e,
                        "Summary load attempt failed"
                    );
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn load_once(&self) -> LoadResult<Summary> {
        let text = match &self.source {
            SummarySource::File(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| LoadError::Io {
                        path: path.clone(),
                        source,
                    })?
            }
            SummarySource::Http(url) => self.fetch(url).await?,
        };

        let summary = Summary::from_json(&text)?;
        tracing::debug!(
            source = %self.source,
            total = summary.customers.total,
            staff = summary.staff_stats.len(),
            paid = summary.paid_customers.len(),
            "Summary parsed"
        );
        Ok(summary)
    }

    async fn fetch(&self, url: &str) -> LoadResult<String> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                LoadError::Timeout
            } else if e.is_connect() {
                LoadError::Unavailable(e.to_string())
            } else {
                LoadError::Request(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                LoadError::Timeout
            } else {
                LoadError::Request(e)
            }
        })
    }
}

/// Wait before the next attempt: `base * attempt²`, saturating
fn backoff_delay(base_ms: u64, attempt: u32) -> u64 {
    let attempt = u64::from(attempt);
    base_ms.saturating_mul(attempt.saturating_mul(attempt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Router};
    use std::io::Write;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    const SAMPLE: &str = r#"{
        "customers": {"total": 10, "individual": 7, "enterprise": 3},
        "businessTypes": {"代理合作伙伴": 5, "代售合作伙伴": 5},
        "staffStats": [{"name": "A", "count": 4}, {"name": "B", "count": 6}],
        "paidCustomers": [{"name": "X", "staff": "A", "amount": 99.5}]
    }"#;

    async fn spawn_server(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn quick_retry(max_attempts: u32) -> LoaderConfig {
        LoaderConfig {
            request_timeout_ms: 2000,
            max_attempts,
            retry_backoff_ms: 10,
        }
    }

    #[test]
    fn test_source_parse() {
        assert_eq!(
            SummarySource::parse("https://example.com/data.json"),
            SummarySource::Http("https://example.com/data.json".to_string())
        );
        assert_eq!(
            SummarySource::parse(" ./public/data.json "),
            SummarySource::File(PathBuf::from("./public/data.json"))
        );
        assert!(SummarySource::parse("data.json").as_path().is_some());
    }

    #[test]
    fn test_backoff_delay() {
        assert_eq!(backoff_delay(1000, 1), 1000);
        assert_eq!(backoff_delay(1000, 2), 4000);
        assert_eq!(backoff_delay(1000, 3), 9000);
        assert_eq!(backoff_delay(u64::MAX, 2), u64::MAX);
        assert_eq!(backoff_delay(2, u32::MAX), u64::MAX);
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let source = SummarySource::File(file.path().to_path_buf());
        let loader = SummaryLoader::new(source, LoaderConfig::default()).unwrap();
        let summary = loader.load().await.unwrap();

        assert_eq!(summary.customers.total, 10);
        assert_eq!(summary.staff_stats[1].name, "B");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = SummarySource::File(dir.path().join("missing.json"));
        let loader = SummaryLoader::new(source, LoaderConfig::default()).unwrap();

        let err = loader.load().await.unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[tokio::test]
    async fn test_malformed_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{\"customers\": ").unwrap();

        let source = SummarySource::File(file.path().to_path_buf());
        let loader = SummaryLoader::new(source, quick_retry(3)).unwrap();

        let err = loader.load().await.unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[tokio::test]
    async fn test_load_over_http() {
        let base = spawn_server(Router::new().route("/data.json", get(|| async { SAMPLE }))).await;

        let source = SummarySource::Http(format!("{}/data.json", base));
        let loader = SummaryLoader::new(source, LoaderConfig::default()).unwrap();
        let summary = loader.load().await.unwrap();

        assert_eq!(summary.customers.enterprise, 3);
        assert_eq!(summary.paid_customers[0].name, "X");
    }

    #[tokio::test]
    async fn test_http_not_found() {
        let base = spawn_server(Router::new()).await;

        let source = SummarySource::Http(format!("{}/data.json", base));
        let loader = SummaryLoader::new(source, quick_retry(3)).unwrap();

        match loader.load().await {
            Err(LoadError::Status { status, .. }) => assert_eq!(status, 404),
            other => panic!("expected status error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_transient_failure_is_retried() {
        let hits = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&hits);
        let router = Router::new().route(
            "/data.json",
            get(move || {
                let counter = Arc::clone(&counter);
                async move {
                    if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                        Err(StatusCode::SERVICE_UNAVAILABLE)
                    } else {
                        Ok(SAMPLE)
                    }
                }
            }),
        );
        let base = spawn_server(router).await;

        let source = SummarySource::Http(format!("{}/data.json", base));
        let loader = SummaryLoader::new(source, quick_retry(2)).unwrap();
        let summary = loader.load().await.unwrap();

        assert_eq!(summary.customers.total, 10);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_single_attempt_by_default() {
        let hits = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&hits);
        let router = Router::new().route(
            "/data.json",
            get(move || {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    StatusCode::SERVICE_UNAVAILABLE
                }
            }),
        );
        let base = spawn_server(router).await;

        let source = SummarySource::Http(format!("{}/data.json", base));
        let loader = SummaryLoader::new(source, LoaderConfig::default()).unwrap();

        assert!(loader.load().await.is_err());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
