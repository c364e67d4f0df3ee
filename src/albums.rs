//! Album listing deduplication.
//!
//! Releases are grouped by [`AlbumKey`]: title, sorted artist ids, release
//! year, declared track count and release type. Releases with different track
//! counts are different editions and never share a key.
//!
//! Two strategies pick a survivor per group:
//! - [`collapse_exact_duplicates_fast`] ranks on listing data only (market,
//!   release date, id) and never touches the network.
//! - [`collapse_exact_duplicates_prefer_explicit`] fetches full records for
//!   duplicate groups and prefers the release with the most explicit tracks.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use tracing::{debug, info, warn};

use crate::api::{CatalogClient, CatalogTransport};
use crate::converters;
use crate::error::Result;
use crate::models::{release_year, Album, AlbumDetail, ReleaseType};

/// Options shared by both collapse strategies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollapseOptions {
    /// Prefer releases available in this market.
    pub market: Option<String>,
}

impl CollapseOptions {
    pub fn with_market<S: Into<String>>(market: S) -> Self {
        Self {
            market: Some(market.into()),
        }
    }
}

/// Identity of an exact-duplicate album group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlbumKey {
    pub title: String,
    pub artist_ids: String,
    pub year: String,
    pub total_tracks: u32,
    pub release_type: ReleaseType,
}

impl AlbumKey {
    pub fn for_album(album: &Album) -> Self {
        let mut artist_ids: Vec<&str> = album.artists.iter().map(|a| a.id.as_str()).collect();
        artist_ids.sort_unstable();

        Self {
            title: album_title_key(&album.title),
            artist_ids: artist_ids.join(","),
            year: release_year(&album.release_date).to_string(),
            total_tracks: album.total_tracks,
            release_type: album.release_type.clone(),
        }
    }
}

/// Case- and spacing-insensitive title. Qualifiers are kept so that, e.g.,
/// a live album never folds into its studio counterpart.
fn album_title_key(title: &str) -> String {
    title
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Group albums by key, preserving first-encounter order of groups and of
/// members within each group.
fn group_albums(albums: &[Album]) -> Vec<Vec<&Album>> {
    let mut slots: HashMap<AlbumKey, usize> = HashMap::new();
    let mut groups: Vec<Vec<&Album>> = Vec::new();

    for album in albums {
        let key = AlbumKey::for_album(album);
        match slots.get(&key) {
            Some(&slot) => groups[slot].push(album),
            None => {
                slots.insert(key, groups.len());
                groups.push(vec![album]);
            }
        }
    }

    groups
}

/// Available beats unavailable. Without a market this is always `Equal`.
fn compare_market(a: &Album, b: &Album, market: Option<&str>) -> Ordering {
    match market {
        Some(market) => b.is_available_in(market).cmp(&a.is_available_in(market)),
        None => Ordering::Equal,
    }
}

/// Newer first; a missing date sorts after any known date.
fn compare_release_date(a: &Album, b: &Album) -> Ordering {
    match (a.release_date.is_empty(), b.release_date.is_empty()) {
        (false, false) => b.release_date.cmp(&a.release_date),
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        (true, true) => Ordering::Equal,
    }
}

/// Ranking used by the fast path; `Less` means `a` is preferred.
pub fn compare_listing(a: &Album, b: &Album, market: Option<&str>) -> Ordering {
    compare_market(a, b, market)
        .then_with(|| compare_release_date(a, b))
        .then_with(|| a.id.cmp(&b.id))
}

/// Ranking used by the explicit-preferring path; `Less` means `a` is preferred.
pub fn compare_detail(a: &AlbumDetail, b: &AlbumDetail, market: Option<&str>) -> Ordering {
    b.explicit_count()
        .cmp(&a.explicit_count())
        .then_with(|| compare_listing(&a.album, &b.album, market))
}

/// Collapse exact duplicates using listing data only.
///
/// This cannot see per-track explicit flags, so it may keep a clean edition
/// where an explicit one exists.
pub fn collapse_exact_duplicates_fast(albums: &[Album], opts: &CollapseOptions) -> Vec<Album> {
    let market = opts.market.as_deref();

    group_albums(albums)
        .into_iter()
        .filter_map(|group| {
            group
                .into_iter()
                .min_by(|a, b| compare_listing(a, b, market))
                .cloned()
        })
        .collect()
}

/// Collapse exact duplicates, preferring the edition with the most explicit
/// tracks.
///
/// Only members of duplicate groups are looked up, in batches of at most
/// the album batch size. A group none of whose members came back from the
/// lookup keeps its first listed album.
pub async fn collapse_exact_duplicates_prefer_explicit<T: CatalogTransport>(
    client: &CatalogClient<T>,
    token: &str,
    albums: &[Album],
    opts: &CollapseOptions,
) -> Result<Vec<Album>> {
    let groups = group_albums(albums);

    let duplicate_ids: Vec<String> = groups
        .iter()
        .filter(|group| group.len() > 1)
        .flat_map(|group| group.iter().map(|album| album.id.clone()))
        .collect();

    if duplicate_ids.is_empty() {
        debug!("No duplicate albums among {}", albums.len());
        return Ok(albums.to_vec());
    }

    let market = opts.market.as_deref();
    let details: HashMap<String, AlbumDetail> = client
        .album_details(&unique(duplicate_ids), market, token)
        .await?
        .iter()
        .map(converters::parse_album_detail)
        .map(|detail| (detail.album.id.clone(), detail))
        .collect();

    let mut result = Vec::with_capacity(groups.len());
    for group in groups {
        if group.len() == 1 {
            result.push(group[0].clone());
            continue;
        }

        let best = group
            .iter()
            .filter_map(|album| details.get(&album.id))
            .min_by(|a, b| compare_detail(a, b, market));

        match best {
            Some(detail) => result.push(detail.album.clone()),
            None => {
                warn!(
                    "No details resolved for duplicate group of '{}', keeping first entry",
                    group[0].title
                );
                result.push(group[0].clone());
            }
        }
    }

    info!("Collapsed {} albums into {}", albums.len(), result.len());
    Ok(result)
}

/// Drop repeated ids while keeping order.
fn unique(ids: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}
