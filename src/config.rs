//! Fetch pacing, batching and filtering settings.

use std::time::Duration;

/// Base URL for the catalog Web API.
pub const DEFAULT_API_BASE: &str = "https://api.spotify.com/v1";

/// Largest id batch accepted by the track lookup endpoint.
pub const TRACK_BATCH_LIMIT: usize = 50;

/// Largest id batch accepted by the album lookup endpoint.
pub const ALBUM_BATCH_LIMIT: usize = 20;

/// Tracks shorter than this are treated as interludes or skits.
pub const MIN_TRACK_DURATION_MS: u64 = 30_000;

/// Settings shared by the fetch engines, the orchestrator and the album path.
///
/// The defaults keep request rates under the upstream limits; tests usually
/// zero the delays with [`FetchConfig::without_delays`].
#[derive(Debug, Clone, PartialEq)]
pub struct FetchConfig {
    /// Base URL all endpoint paths are appended to.
    pub api_base: String,

    /// Pause before every page request.
    pub page_delay: Duration,

    /// Pause before every track hydration batch.
    pub hydrate_delay: Duration,

    /// Pause between album detail batches.
    pub album_batch_delay: Duration,

    /// Wait used when a 429 carries no `Retry-After` header.
    pub default_retry_after: Duration,

    /// Attempt ceiling for a single rate-limited request.
    pub max_retries: u32,

    /// Number of per-release track fetches in flight at once.
    pub release_window: usize,

    /// Ids per track hydration request.
    pub track_batch_size: usize,

    /// Ids per album detail request.
    pub album_batch_size: usize,

    /// Minimum kept track duration in milliseconds.
    pub min_duration_ms: u64,

    /// Target market (ISO country code or `from_token`).
    pub market: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            page_delay: Duration::from_millis(50),
            hydrate_delay: Duration::from_millis(100),
            album_batch_delay: Duration::from_millis(100),
            default_retry_after: Duration::from_secs(1),
            max_retries: 3,
            release_window: 5,
            track_batch_size: TRACK_BATCH_LIMIT,
            album_batch_size: ALBUM_BATCH_LIMIT,
            min_duration_ms: MIN_TRACK_DURATION_MS,
            market: None,
        }
    }
}

impl FetchConfig {
    /// Set the API base URL. A trailing slash is dropped.
    pub fn with_api_base<S: Into<String>>(mut self, base: S) -> Self {
        let base = base.into();
        self.api_base = base.trim_end_matches('/').to_string();
        self
    }

    /// Set the target market.
    pub fn with_market<S: Into<String>>(mut self, market: S) -> Self {
        self.market = Some(market.into());
        self
    }

    /// Set the per-release fetch window. Zero is clamped to one.
    pub fn with_release_window(mut self, window: usize) -> Self {
        self.release_window = window.max(1);
        self
    }

    /// Set the rate-limit attempt ceiling.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Zero every pacing and backoff delay.
    pub fn without_delays(mut self) -> Self {
        self.page_delay = Duration::ZERO;
        self.hydrate_delay = Duration::ZERO;
        self.album_batch_delay = Duration::ZERO;
        self.default_retry_after = Duration::ZERO;
        self
    }

    /// Market used for track discovery, falling back to the token's market.
    pub fn discovery_market(&self) -> &str {
        self.market.as_deref().unwrap_or("from_token")
    }

    /// Build a full URL for an endpoint path.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }
}
