//! Feed fetching - one GeoJSON FeatureCollection per URL
//!
//! `http(s)://` URLs go through a shared reqwest client. `file://` URLs and
//! bare paths are read from disk, which keeps rendering usable offline.

use crate::domain::geojson::FeatureCollection;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("{url} is not a GeoJSON FeatureCollection: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Anything that can resolve a feed URL to a FeatureCollection
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FeatureCollection, FetchError>;
}

/// Where a feed URL points
#[derive(Debug, Clone, PartialEq)]
enum FeedLocation {
    Remote(String),
    Local(PathBuf),
}

impl FeedLocation {
    fn parse(url: &str) -> Self {
        if url.starts_with("http://") || url.starts_with("https://") {
            FeedLocation::Remote(url.to_string())
        } else if let Some(path) = url.strip_prefix("file://") {
            FeedLocation::Local(PathBuf::from(path))
        } else {
            FeedLocation::Local(PathBuf::from(url))
        }
    }
}

/// Feed source backed by reqwest (HTTP) and the filesystem (`file://`)
pub struct HttpFeedSource {
    client: reqwest::Client,
}

impl HttpFeedSource {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        // One client for every fetch (connection pooling)
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("quakemap/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    async fn fetch_remote(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request { url: url.to_string(), source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: url.to_string(), status: status.as_u16() });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Request { url: url.to_string(), source })?;
        Ok(body.to_vec())
    }

    async fn fetch_local(path: &Path) -> Result<Vec<u8>, FetchError> {
        tokio::fs::read(path)
            .await
            .map_err(|source| FetchError::Io { path: path.display().to_string(), source })
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch(&self, url: &str) -> Result<FeatureCollection, FetchError> {
        let start = Instant::now();

        let body = match FeedLocation::parse(url) {
            FeedLocation::Remote(url) => self.fetch_remote(&url).await?,
            FeedLocation::Local(path) => Self::fetch_local(&path).await?,
        };

        let collection = FeatureCollection::from_slice(&body)
            .map_err(|source| FetchError::Decode { url: url.to_string(), source })?;

        debug!(
            url = %url,
            bytes = body.len(),
            features = collection.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "feed_fetched"
        );
        Ok(collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_feed_location_parse() {
        assert_eq!(
            FeedLocation::parse("https://example.org/a.geojson"),
            FeedLocation::Remote("https://example.org/a.geojson".to_string())
        );
        assert_eq!(
            FeedLocation::parse("file:///tmp/plates.json"),
            FeedLocation::Local(PathBuf::from("/tmp/plates.json"))
        );
        assert_eq!(
            FeedLocation::parse("data/plates.json"),
            FeedLocation::Local(PathBuf::from("data/plates.json"))
        );
    }

    #[tokio::test]
    async fn test_fetch_local_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"type":"FeatureCollection","features":[]}"#).unwrap();
        file.flush().unwrap();

        let source = HttpFeedSource::new(Duration::from_secs(1)).unwrap();
        let url = format!("file://{}", file.path().display());
        let collection = source.fetch(&url).await.unwrap();
        assert!(collection.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_missing_file() {
        let source = HttpFeedSource::new(Duration::from_secs(1)).unwrap();
        let err = source.fetch("/nonexistent/quakes.geojson").await.unwrap_err();
        assert!(matches!(err, FetchError::Io { .. }));
    }

    #[tokio::test]
    async fn test_fetch_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"<html>rate limited</html>").unwrap();
        file.flush().unwrap();

        let source = HttpFeedSource::new(Duration::from_secs(1)).unwrap();
        let err = source.fetch(&file.path().display().to_string()).await.unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
        assert!(err.to_string().contains("not a GeoJSON FeatureCollection"));
    }
}
