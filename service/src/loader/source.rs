//! Where KPI sheets come from: local CSV files or a CSV export URL

use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use rimo_core::{Result, RimoError};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

/// A place the KPI sheet can be read from
#[async_trait]
pub trait SheetSource: Send + Sync {
    /// Human-readable location (path or URL)
    fn describe(&self) -> String;

    /// Fetch the sheet as CSV text
    async fn fetch(&self) -> Result<String>;
}

/// Pick a source for a location string
///
/// `http://` and `https://` locations are fetched over the network, anything
/// else is treated as a local path.
#[must_use]
pub fn source_for(location: &str, timeout: Duration, show_progress: bool) -> Box<dyn SheetSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpSource::new(location, timeout).with_progress(show_progress))
    } else {
        Box::new(FileSource::new(location))
    }
}

/// CSV file on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a file source
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SheetSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<String> {
        debug!("Reading sheet from {}", self.path.display());
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| RimoError::fetch(self.describe(), e.to_string()))
    }
}

/// CSV export served over HTTP, such as a Google Sheet `export?format=csv` URL
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    timeout: Duration,
    show_progress: bool,
}

impl HttpSource {
    /// Create an HTTP source
    #[must_use]
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
            show_progress: false,
        }
    }

    /// Show a spinner while downloading
    #[must_use]
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    fn spinner(&self) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(format!("Fetching {}", self.url));
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    }
}

#[async_trait]
impl SheetSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<String> {
        info!("Fetching sheet from {}", self.url);
        let spinner = self.spinner();

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| RimoError::fetch(&self.url, e.to_string()))?;

        let result = async {
            let response = client
                .get(&self.url)
                .send()
                .await
                .map_err(|e| RimoError::fetch(&self.url, e.to_string()))?;
            let response = response
                .error_for_status()
                .map_err(|e| RimoError::fetch(&self.url, e.to_string()))?;
            response
                .text()
                .await
                .map_err(|e| RimoError::fetch(&self.url, e.to_string()))
        }
        .await;

        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }

        let body = result?;
        debug!("Fetched {} bytes from {}", body.len(), self.url);
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one HTTP response on a local port and return the sheet URL
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0_u8; 2048];
            let _ = socket.read(&mut request).await;
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: text/csv\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{addr}/export?format=csv")
    }

    #[tokio::test]
    async fn test_file_source_reads_csv() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("kpis.csv");
        std::fs::write(&path, "Indicator\nHits\n").unwrap();

        let source = FileSource::new(&path);
        assert_eq!(source.fetch().await.unwrap(), "Indicator\nHits\n");
    }

    #[tokio::test]
    async fn test_missing_file_reports_location() {
        let source = FileSource::new("/definitely/not/here.csv");
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, RimoError::SourceError { .. }));
        assert!(err.to_string().contains("/definitely/not/here.csv"));
    }

    #[tokio::test]
    async fn test_http_source_returns_body() {
        let url = serve_once("200 OK", "Indicator,Description\nHits,Page hits\n").await;
        let source = HttpSource::new(&url, Duration::from_secs(5));
        assert_eq!(source.describe(), url);
        assert_eq!(
            source.fetch().await.unwrap(),
            "Indicator,Description\nHits,Page hits\n"
        );
    }

    #[tokio::test]
    async fn test_http_error_status_names_url() {
        let url = serve_once("404 Not Found", "gone").await;
        let err = HttpSource::new(&url, Duration::from_secs(5))
            .fetch()
            .await
            .unwrap_err();
        match &err {
            RimoError::SourceError { location, reason } => {
                assert_eq!(location, &url);
                assert!(reason.contains("404"), "{reason}");
            }
            other => panic!("expected SourceError, got {other:?}"),
        }
        assert!(err.to_string().contains(&url));
    }

    #[tokio::test]
    async fn test_http_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/export?format=csv", listener.local_addr().unwrap());
        tokio::spawn(async move {
            // Accept and never answer
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        let err = HttpSource::new(&url, Duration::from_millis(300))
            .fetch()
            .await
            .unwrap_err();
        assert!(matches!(err, RimoError::SourceError { ref location, .. } if location == &url));
    }

    #[test]
    fn test_source_selection() {
        let timeout = Duration::from_secs(5);
        let remote = source_for("https://docs.google.com/x/export?format=csv", timeout, false);
        assert!(remote.describe().starts_with("https://"));

        let local = source_for("data/kpis.csv", timeout, false);
        assert_eq!(local.describe(), "data/kpis.csv");
    }
}
