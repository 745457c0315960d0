//! HTTP transport for the remote game-data service.
//!
//! Every request carries the service credential as a default header and is
//! bounded by a per-request timeout. Status handling is uniform: 404 becomes
//! `NotFound`, 429 becomes `RateLimited`, anything else non-2xx becomes
//! `HttpStatus`.

mod budget;

pub use budget::{InvalidRateWindow, RateBudget, RateWindow};

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, RETRY_AFTER, USER_AGENT};
use reqwest::{Client, StatusCode};
use thiserror::Error;
use url::Url;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-Riot-Token";

/// Errors that can occur during fetching.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("API key is not a valid header value")]
    InvalidApiKey,

    #[error("Rate limited by {host}, retry after {retry_after_secs}s")]
    RateLimited { host: String, retry_after_secs: u64 },

    #[error("Not found: {url}")]
    NotFound { url: String },

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FetchError {
    /// Seconds to wait before retrying, if the failure is a rate limit.
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            FetchError::RateLimited {
                retry_after_secs, ..
            } => Some(*retry_after_secs),
            _ => None,
        }
    }
}

/// Anything that can GET a URL and return the response body.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Transport name for logging.
    fn name(&self) -> &'static str;

    /// GET `url`, returning the body of a 2xx response.
    async fn get(&self, url: &Url) -> Result<String, FetchError>;
}

/// Configuration for the HTTP transport.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Service credential sent with every request
    pub api_key: String,

    /// Request timeout
    pub timeout: Duration,

    /// User agent string
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            timeout: Duration::from_secs(10),
            user_agent: format!("rift-compare/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// `reqwest`-backed transport.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: FetcherConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static("rift-compare")),
        );

        let mut key =
            HeaderValue::from_str(&config.api_key).map_err(|_| FetchError::InvalidApiKey)?;
        key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key);

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn get(&self, url: &Url) -> Result<String, FetchError> {
        let response = self.client.get(url.as_str()).send().await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(1);

            return Err(FetchError::RateLimited {
                host: url.host_str().unwrap_or("unknown").to_string(),
                retry_after_secs: retry_after,
            });
        }

        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound {
                url: url.to_string(),
            });
        }

        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

/// Canned response for `MockTransport`.
#[cfg(test)]
#[derive(Debug, Clone)]
pub enum MockResponse {
    Body(String),
    Status(u16),
    RateLimited(u64),
}

#[cfg(test)]
type MockRoutes =
    std::collections::HashMap<String, std::collections::VecDeque<MockResponse>>;

/// In-memory transport keyed by URL path.
///
/// Each path holds a queue of responses; the last one repeats once the queue
/// drains. Unregistered paths answer 404. Every requested URL is recorded.
#[cfg(test)]
#[derive(Default)]
pub struct MockTransport {
    routes: std::sync::Mutex<MockRoutes>,
    requests: std::sync::Mutex<Vec<Url>>,
}

#[cfg(test)]
impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a JSON body for `path`.
    pub fn with_json(self, path: &str, body: serde_json::Value) -> Self {
        self.with_response(path, MockResponse::Body(body.to_string()))
    }

    pub fn with_status(self, path: &str, status: u16) -> Self {
        self.with_response(path, MockResponse::Status(status))
    }

    pub fn with_response(self, path: &str, response: MockResponse) -> Self {
        self.routes
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(response);
        self
    }

    pub fn requests(&self) -> Vec<Url> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self, path: &str) -> usize {
        self.requests().iter().filter(|u| u.path() == path).count()
    }
}

#[cfg(test)]
#[async_trait]
impl Transport for MockTransport {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn get(&self, url: &Url) -> Result<String, FetchError> {
        self.requests.lock().unwrap().push(url.clone());

        let response = {
            let mut routes = self.routes.lock().unwrap();
            match routes.get_mut(url.path()) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };

        match response {
            Some(MockResponse::Body(body)) => Ok(body),
            Some(MockResponse::Status(404)) | None => Err(FetchError::NotFound {
                url: url.to_string(),
            }),
            Some(MockResponse::Status(status)) => Err(FetchError::HttpStatus {
                status,
                message: "mock".to_string(),
            }),
            Some(MockResponse::RateLimited(secs)) => Err(FetchError::RateLimited {
                host: url.host_str().unwrap_or("unknown").to_string(),
                retry_after_secs: secs,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetcher_config_default() {
        let config = FetcherConfig::default();

        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.user_agent.starts_with("rift-compare/"));
        assert!(config.api_key.is_empty());
    }

    #[test]
    fn test_http_transport_rejects_bad_api_key() {
        let config = FetcherConfig {
            api_key: "bad\nkey".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            HttpTransport::new(config),
            Err(FetchError::InvalidApiKey)
        ));
    }

    #[test]
    fn test_http_transport_builds() {
        let config = FetcherConfig {
            api_key: "RGAPI-test".to_string(),
            ..Default::default()
        };
        let transport = HttpTransport::new(config).unwrap();
        assert_eq!(transport.name(), "http");
    }

    #[test]
    fn test_retry_after() {
        let limited = FetchError::RateLimited {
            host: "na1.api.riotgames.com".to_string(),
            retry_after_secs: 7,
        };
        assert_eq!(limited.retry_after(), Some(7));

        let missing = FetchError::NotFound {
            url: "https://example.com".to_string(),
        };
        assert_eq!(missing.retry_after(), None);
    }

    #[tokio::test]
    async fn test_mock_transport_queue_and_404() {
        let mock = MockTransport::new()
            .with_response("/a", MockResponse::RateLimited(0))
            .with_json("/a", serde_json::json!({"ok": true}));

        let url = Url::parse("https://example.com/a").unwrap();
        assert!(matches!(
            mock.get(&url).await,
            Err(FetchError::RateLimited { .. })
        ));
        assert_eq!(mock.get(&url).await.unwrap(), r#"{"ok":true}"#);
        assert_eq!(mock.get(&url).await.unwrap(), r#"{"ok":true}"#);

        let missing = Url::parse("https://example.com/b").unwrap();
        assert!(matches!(
            mock.get(&missing).await,
            Err(FetchError::NotFound { .. })
        ));
        assert_eq!(mock.request_count("/a"), 3);
    }
}
