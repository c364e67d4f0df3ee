//! Catalog Web API client.
//!
//! Wraps a [`CatalogTransport`] with status classification, the paginated
//! fetch engine and the batch lookup engines. All rate-limit handling goes
//! through [`with_retry`].

use serde::de::DeserializeOwned;
use tracing::{debug, error};

use super::retry::{advised_or, with_retry};
use super::transport::{CatalogTransport, HttpTransport};
use super::wire::{
    AlbumsBatch, Page, TracksBatch, WireAlbum, WireAlbumFull, WirePlaylistItem, WireSimpleTrack,
    WireTrack,
};
use crate::config::{FetchConfig, ALBUM_BATCH_LIMIT, TRACK_BATCH_LIMIT};
use crate::error::{CatalogError, Result};

/// Field selection for playlist pages.
const PLAYLIST_FIELDS: &str =
    "items(track(id,name,uri,artists,duration_ms,popularity,explicit,is_local)),next";

/// Catalog API client.
///
/// Every operation takes the caller's bearer token; the client itself holds
/// no credentials and no per-call state.
///
/// # Example
///
/// ```rust,no_run
/// use tracksift::{CatalogClient, FetchConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = CatalogClient::new(FetchConfig::default())?;
///     let albums = client
///         .artist_albums("0OdUWJ0sBjDrqHygGUXeCF", &["album", "single"], "token")
///         .await?;
///     println!("{} releases", albums.len());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CatalogClient<T = HttpTransport> {
    transport: T,
    config: FetchConfig,
}

impl CatalogClient<HttpTransport> {
    /// Create a client backed by `reqwest`.
    pub fn new(config: FetchConfig) -> Result<Self> {
        Ok(Self::with_transport(HttpTransport::new()?, config))
    }
}

impl<T: CatalogTransport> CatalogClient<T> {
    /// Create a client over any transport.
    pub fn with_transport(transport: T, config: FetchConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Issue one GET and decode the body.
    ///
    /// 429 maps to [`CatalogError::RateLimited`]; any other non-2xx status
    /// maps to [`CatalogError::UpstreamRequestFailed`].
    pub async fn get_json<R: DeserializeOwned>(&self, url: &str, token: &str) -> Result<R> {
        let response = self.transport.get(url, token).await?;

        if response.is_rate_limited() {
            return Err(CatalogError::RateLimited {
                retry_after: response.retry_after,
            });
        }

        if !response.is_success() {
            let message = upstream_message(&response.body);
            error!("Catalog API error: {} {}", response.status, message);
            return Err(CatalogError::UpstreamRequestFailed {
                status: response.status,
                message,
            });
        }

        Ok(serde_json::from_str(&response.body)?)
    }

    /// Walk a cursor-linked collection from `start_url` to its last page.
    ///
    /// Items come back flattened in page order. A rate-limited page is
    /// re-requested after the advised wait, so no page is skipped or
    /// repeated.
    pub async fn fetch_all_pages<I: DeserializeOwned>(
        &self,
        start_url: &str,
        token: &str,
    ) -> Result<Vec<I>> {
        let mut items = Vec::new();
        let mut next = Some(start_url.to_string());
        let mut pages = 0usize;

        while let Some(url) = next {
            let current = url.as_str();
            let delay = self.config.page_delay;

            let page: Page<I> = with_retry(
                "page fetch",
                self.config.max_retries,
                advised_or(self.config.default_retry_after),
                move || async move {
                    tokio::time::sleep(delay).await;
                    self.get_json(current, token).await
                },
            )
            .await?;

            pages += 1;
            items.extend(page.items);
            next = page.next;
        }

        debug!("Fetched {} items over {} pages", items.len(), pages);
        Ok(items)
    }

    /// Every release of `artist_id` in the given include groups.
    pub async fn artist_albums(
        &self,
        artist_id: &str,
        groups: &[&str],
        token: &str,
    ) -> Result<Vec<WireAlbum>> {
        let mut path = format!(
            "artists/{}/albums?include_groups={}&limit=50",
            artist_id,
            groups.join(",")
        );
        if let Some(market) = &self.config.market {
            path.push_str(&format!("&market={}", market));
        }
        self.fetch_all_pages(&self.config.endpoint(&path), token).await
    }

    /// Full track listing of one release.
    pub async fn album_tracks(&self, album_id: &str, token: &str) -> Result<Vec<WireSimpleTrack>> {
        let path = format!(
            "albums/{}/tracks?market={}&limit=50",
            album_id,
            self.config.discovery_market()
        );
        self.fetch_all_pages(&self.config.endpoint(&path), token).await
    }

    /// Full tracks of a playlist, in playlist order.
    ///
    /// Entries without a track, local files and tracks without an id are
    /// skipped.
    pub async fn playlist_tracks(&self, playlist_id: &str, token: &str) -> Result<Vec<WireTrack>> {
        let path = format!(
            "playlists/{}/tracks?market={}&limit=50&fields={}",
            playlist_id,
            self.config.discovery_market(),
            PLAYLIST_FIELDS
        );
        let items: Vec<WirePlaylistItem> =
            self.fetch_all_pages(&self.config.endpoint(&path), token).await?;

        Ok(items
            .into_iter()
            .filter_map(|item| item.track)
            .filter(|track| !track.is_local && !track.id.is_empty())
            .collect())
    }

    /// Look up a single batch of tracks. Null slots are dropped.
    pub async fn track_batch(&self, ids: &[String], token: &str) -> Result<Vec<WireTrack>> {
        check_batch(ids.len(), TRACK_BATCH_LIMIT)?;

        let path = format!(
            "tracks?ids={}&market={}",
            ids.join(","),
            self.config.discovery_market()
        );
        let batch: TracksBatch = self.get_json(&self.config.endpoint(&path), token).await?;
        Ok(batch.tracks.into_iter().flatten().collect())
    }

    /// Look up a single batch of full albums. Null slots are dropped.
    pub async fn album_batch(
        &self,
        ids: &[String],
        market: Option<&str>,
        token: &str,
    ) -> Result<Vec<WireAlbumFull>> {
        check_batch(ids.len(), ALBUM_BATCH_LIMIT)?;

        let mut path = format!("albums?ids={}", ids.join(","));
        if let Some(market) = market {
            path.push_str(&format!("&market={}", market));
        }
        let batch: AlbumsBatch = self.get_json(&self.config.endpoint(&path), token).await?;
        Ok(batch.albums.into_iter().flatten().collect())
    }

    /// Resolve sparse track ids into full records.
    ///
    /// Ids are chunked to the configured batch size. Each chunk is paced,
    /// retried on rate limiting up to the retry ceiling, and appended in
    /// upstream response order.
    pub async fn hydrate_tracks(&self, ids: &[String], token: &str) -> Result<Vec<WireTrack>> {
        let mut tracks = Vec::with_capacity(ids.len());
        let delay = self.config.hydrate_delay;

        for chunk in ids.chunks(self.config.track_batch_size.max(1)) {
            let batch = with_retry(
                "track hydration",
                self.config.max_retries,
                advised_or(self.config.default_retry_after),
                move || async move {
                    tokio::time::sleep(delay).await;
                    self.track_batch(chunk, token).await
                },
            )
            .await?;

            debug!("Hydrated {} of {} tracks in batch", batch.len(), chunk.len());
            tracks.extend(batch);
        }

        Ok(tracks)
    }

    /// Fetch full album records for `ids`, in batches with pacing between them.
    pub async fn album_details(
        &self,
        ids: &[String],
        market: Option<&str>,
        token: &str,
    ) -> Result<Vec<WireAlbumFull>> {
        let mut albums = Vec::with_capacity(ids.len());

        for (idx, chunk) in ids.chunks(self.config.album_batch_size.max(1)).enumerate() {
            if idx > 0 {
                tokio::time::sleep(self.config.album_batch_delay).await;
            }

            let batch = with_retry(
                "album details",
                self.config.max_retries,
                advised_or(self.config.default_retry_after),
                move || self.album_batch(chunk, market, token),
            )
            .await?;

            debug!("Fetched {} of {} album details in batch", batch.len(), chunk.len());
            albums.extend(batch);
        }

        Ok(albums)
    }
}

fn check_batch(requested: usize, limit: usize) -> Result<()> {
    if requested > limit {
        return Err(CatalogError::BatchSizeExceeded { requested, limit });
    }
    Ok(())
}

/// Pull the human-readable reason out of an upstream error body.
///
/// The catalog wraps errors as `{"error": {"status": 404, "message": "..."}}`;
/// anything else is returned trimmed.
fn upstream_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message").or(Some(e)))
                .and_then(|m| m.as_str())
                .map(|s| s.to_string())
        })
        .unwrap_or_else(|| body.trim().to_string())
}
