//! Artist track collection.
//!
//! [`Collector`] is the high-level entry point: it discovers an artist's
//! releases, gathers their tracks, keeps the ones the artist is primary on,
//! hydrates them and hands the result to the sanitizer. It also exposes the
//! artist album listing with duplicate editions collapsed, and playable track
//! lists for a single album or playlist.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use futures_util::future::join_all;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::albums::{
    collapse_exact_duplicates_fast, collapse_exact_duplicates_prefer_explicit, CollapseOptions,
};
use crate::api::{CatalogClient, CatalogTransport, HttpTransport};
use crate::cache::{api_response_key, artist_tracks_key, ResponseCache};
use crate::config::FetchConfig;
use crate::converters;
use crate::error::Result;
use crate::models::{Album, GameTrack, Track, TrackRelease};
use crate::sanitize::sanitize_tracks;

/// Release groups walked when collecting tracks.
const TRACK_GROUPS: &[&str] = &["album", "single"];

/// Release groups shown in album listings.
const ALBUM_GROUPS: &[&str] = &["album", "compilation"];

/// Collects and cleans an artist's catalog.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use tracksift::{Collector, FetchConfig, MemoryCache};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let collector = Collector::new(FetchConfig::default())?
///         .with_cache(Arc::new(MemoryCache::default()));
///
///     let tracks = collector
///         .collect_primary_tracks("0OdUWJ0sBjDrqHygGUXeCF", "bearer-token")
///         .await?;
///     println!("{} playable tracks", tracks.len());
///     Ok(())
/// }
/// ```
pub struct Collector<T = HttpTransport> {
    client: CatalogClient<T>,
    cache: Option<Arc<dyn ResponseCache>>,
}

impl Collector<HttpTransport> {
    /// Create a collector backed by `reqwest`.
    pub fn new(config: FetchConfig) -> Result<Self> {
        Ok(Self::from_client(CatalogClient::new(config)?))
    }
}

impl<T: CatalogTransport> Collector<T> {
    pub fn from_client(client: CatalogClient<T>) -> Self {
        Self {
            client,
            cache: None,
        }
    }

    /// Attach a response cache.
    pub fn with_cache(mut self, cache: Arc<dyn ResponseCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn client(&self) -> &CatalogClient<T> {
        &self.client
    }

    pub fn config(&self) -> &FetchConfig {
        self.client.config()
    }

    /// Collect every track `artist_id` is the primary artist on, sanitized.
    ///
    /// Any stage failure aborts the whole call; partial lists are never
    /// returned.
    pub async fn collect_primary_tracks(&self, artist_id: &str, token: &str) -> Result<Vec<Track>> {
        let cache_key = artist_tracks_key(artist_id);
        if let Some(tracks) = self.cached::<Vec<Track>>(&cache_key).await {
            debug!("Cache hit for artist {} ({} tracks)", artist_id, tracks.len());
            return Ok(tracks);
        }

        let config = self.client.config();

        // 1. Discover releases.
        let releases: Vec<Album> = self
            .client
            .artist_albums(artist_id, TRACK_GROUPS, token)
            .await?
            .iter()
            .map(converters::parse_album)
            .collect();
        info!("Artist {}: {} releases", artist_id, releases.len());

        // 2. Fetch track listings in fixed-size windows.
        let mut listed: Vec<Track> = Vec::new();
        let mut origin: HashMap<String, TrackRelease> = HashMap::new();

        for window in releases.chunks(config.release_window.max(1)) {
            let fetches = window.iter().map(|release| async move {
                (release, self.client.album_tracks(&release.id, token).await)
            });

            for (release, result) in join_all(fetches).await {
                let tracks = result?;
                let reference = converters::track_release(release);
                for wire in &tracks {
                    origin
                        .entry(wire.id.clone())
                        .or_insert_with(|| reference.clone());
                    listed.push(converters::parse_simple_track(wire));
                }
            }
        }

        // 3. Drop repeated ids, first occurrence wins.
        let mut seen = HashSet::new();
        let unique: Vec<Track> = listed
            .into_iter()
            .filter(|t| seen.insert(t.id.clone()))
            .collect();

        // 4. Primary-credit filter.
        let primary_ids: Vec<String> = unique
            .iter()
            .filter(|t| t.primary_artist_id() == Some(artist_id))
            .map(|t| t.id.clone())
            .collect();
        info!(
            "Artist {}: {} unique tracks, {} as primary artist",
            artist_id,
            unique.len(),
            primary_ids.len()
        );

        // 5. Hydrate for duration and popularity.
        let hydrated = self.client.hydrate_tracks(&primary_ids, token).await?;

        // 6 + 7. Duration floor, then attach the originating release.
        let tracks: Vec<Track> = hydrated
            .iter()
            .filter(|t| t.duration_ms >= config.min_duration_ms)
            .map(|wire| {
                let mut track = converters::parse_track(wire);
                if let Some(release) = origin.get(&track.id) {
                    track.release = Some(release.clone());
                }
                track
            })
            .collect();

        // 8. Sanitize.
        let sanitized = sanitize_tracks(&tracks, artist_id);
        info!(
            "Artist {}: {} hydrated, {} long enough, {} after sanitizing",
            artist_id,
            hydrated.len(),
            tracks.len(),
            sanitized.len()
        );

        self.store(&cache_key, &sanitized).await;
        Ok(sanitized)
    }

    /// [`collect_primary_tracks`](Self::collect_primary_tracks) projected to
    /// the caller-facing shape.
    pub async fn collect_game_tracks(&self, artist_id: &str, token: &str) -> Result<Vec<GameTrack>> {
        let tracks = self.collect_primary_tracks(artist_id, token).await?;
        Ok(tracks.iter().map(GameTrack::from).collect())
    }

    /// Playable tracks of one album, in listing order.
    ///
    /// Listings are sparse, so the ids are hydrated before the duration floor
    /// is applied. No credit filter and no sanitizing: every track on the
    /// album is fair game.
    pub async fn collect_album_tracks(&self, album_id: &str, token: &str) -> Result<Vec<GameTrack>> {
        let listed = self.client.album_tracks(album_id, token).await?;

        let mut seen = HashSet::new();
        let ids: Vec<String> = listed
            .into_iter()
            .map(|t| t.id)
            .filter(|id| seen.insert(id.clone()))
            .collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let hydrated = self.client.hydrate_tracks(&ids, token).await?;
        let tracks = self.playable(hydrated.iter().map(converters::parse_track));
        info!(
            "Album {}: {} listed, {} playable",
            album_id,
            ids.len(),
            tracks.len()
        );
        Ok(tracks)
    }

    /// Playable tracks of one playlist, in playlist order.
    ///
    /// Playlist pages already carry full tracks, so nothing is hydrated.
    /// Local files and entries without a title or artist are skipped.
    pub async fn collect_playlist_tracks(
        &self,
        playlist_id: &str,
        token: &str,
    ) -> Result<Vec<GameTrack>> {
        let listed = self.client.playlist_tracks(playlist_id, token).await?;
        let total = listed.len();

        let tracks = self.playable(
            listed
                .iter()
                .filter(|t| !t.name.is_empty() && !t.artists.is_empty())
                .map(converters::parse_track),
        );
        info!("Playlist {}: {} entries, {} playable", playlist_id, total, tracks.len());
        Ok(tracks)
    }

    /// Apply the duration floor and project to [`GameTrack`].
    fn playable(&self, tracks: impl Iterator<Item = Track>) -> Vec<GameTrack> {
        let min = self.config().min_duration_ms;
        tracks
            .filter(|t| t.duration_ms >= min)
            .map(|t| GameTrack::from(&t))
            .collect()
    }

    /// The artist's albums and compilations with duplicate editions collapsed.
    ///
    /// `prefer_explicit` selects the explicit-preferring strategy, which
    /// looks up full records for duplicate groups.
    pub async fn artist_albums(
        &self,
        artist_id: &str,
        token: &str,
        prefer_explicit: bool,
    ) -> Result<Vec<Album>> {
        let market = self.config().market.clone();
        let cache_key = api_response_key(
            "artist-albums",
            &[
                ("artistId", artist_id),
                ("market", market.as_deref().unwrap_or("")),
            ],
        );

        let albums: Vec<Album> = match self.cached(&cache_key).await {
            Some(albums) => albums,
            None => {
                let albums: Vec<Album> = self
                    .client
                    .artist_albums(artist_id, ALBUM_GROUPS, token)
                    .await?
                    .iter()
                    .map(converters::parse_album)
                    .collect();
                self.store(&cache_key, &albums).await;
                albums
            }
        };

        let opts = CollapseOptions { market };
        if prefer_explicit {
            collapse_exact_duplicates_prefer_explicit(&self.client, token, &albums, &opts).await
        } else {
            Ok(collapse_exact_duplicates_fast(&albums, &opts))
        }
    }

    /// Forget cached results for `artist_id`.
    pub async fn invalidate_artist(&self, artist_id: &str) {
        let Some(cache) = &self.cache else {
            return;
        };

        cache.delete(&artist_tracks_key(artist_id)).await;
        let market = self.config().market.as_deref().unwrap_or("");
        cache
            .delete(&api_response_key(
                "artist-albums",
                &[("artistId", artist_id), ("market", market)],
            ))
            .await;
    }

    async fn cached<V: serde::de::DeserializeOwned>(&self, key: &str) -> Option<V> {
        let value = self.cache.as_ref()?.get(key).await?;
        match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!("Ignoring unreadable cache entry {}: {}", key, e);
                None
            }
        }
    }

    async fn store<V: serde::Serialize>(&self, key: &str, value: &V) {
        let Some(cache) = &self.cache else {
            return;
        };

        match serde_json::to_value(value) {
            Ok(Value::Null) => {}
            Ok(encoded) => cache.set(key, encoded, None).await,
            Err(e) => warn!("Could not cache {}: {}", key, e),
        }
    }
}
