//! HTTP transport seam.
//!
//! [`CatalogClient`](super::CatalogClient) only needs authenticated GETs, so the
//! transport is a one-method trait. [`HttpTransport`] is the real `reqwest`
//! implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::RETRY_AFTER;
use reqwest::Client;
use tracing::debug;

use crate::error::Result;

/// Status, advisory wait and body of one upstream response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,

    /// Parsed `Retry-After` header (whole seconds), if present and valid.
    pub retry_after: Option<Duration>,

    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }
}

/// Performs authenticated GET requests against the catalog.
#[async_trait]
pub trait CatalogTransport: Send + Sync {
    async fn get(&self, url: &str, token: &str) -> Result<RawResponse>;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a new transport with a request timeout.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("tracksift/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl CatalogTransport for HttpTransport {
    async fn get(&self, url: &str, token: &str) -> Result<RawResponse> {
        debug!("GET {}", url);

        let response = self.client.get(url).bearer_auth(token).send().await?;
        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_retry_after);
        let body = response.text().await?;

        Ok(RawResponse {
            status,
            retry_after,
            body,
        })
    }
}

/// Parse a `Retry-After` value given in seconds.
pub fn parse_retry_after(value: &str) -> Option<Duration> {
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_retry_after_seconds() {
        assert_eq!(parse_retry_after("3"), Some(Duration::from_secs(3)));
        assert_eq!(parse_retry_after(" 0 "), Some(Duration::ZERO));
    }

    #[test]
    fn test_parse_retry_after_rejects_dates() {
        assert_eq!(parse_retry_after("Wed, 21 Oct 2015 07:28:00 GMT"), None);
        assert_eq!(parse_retry_after(""), None);
    }

    #[test]
    fn test_status_classification() {
        let ok = RawResponse {
            status: 204,
            retry_after: None,
            body: String::new(),
        };
        assert!(ok.is_success());

        let limited = RawResponse {
            status: 429,
            retry_after: None,
            body: String::new(),
        };
        assert!(limited.is_rate_limited());
        assert!(!limited.is_success());
    }
}
