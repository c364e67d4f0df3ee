//! Wire shapes for catalog API payloads.
//!
//! One struct per endpoint response. These never leave the adapter layer;
//! [`crate::converters`] turns them into [`crate::models`] records.

use serde::{Deserialize, Deserializer};

/// Read `null` as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One page of a cursor-linked collection.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,

    /// Absolute URL of the following page, `null` on the last page.
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireArtist {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireImage {
    pub url: String,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExternalIds {
    #[serde(default)]
    pub isrc: Option<String>,
}

/// Album as listed by `/artists/{id}/albums` and nested in full tracks.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireAlbum {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub album_type: String,
    #[serde(default)]
    pub artists: Vec<WireArtist>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub total_tracks: u32,
    #[serde(default)]
    pub available_markets: Option<Vec<String>>,
    #[serde(default)]
    pub images: Vec<WireImage>,
}

/// Track entry inside an album listing (`/albums/{id}/tracks`).
///
/// Sparse: no popularity and no recording code.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireSimpleTrack {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artists: Vec<WireArtist>,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub explicit: bool,
    #[serde(default)]
    pub uri: String,
}

/// Full track from `/tracks?ids=` and playlist pages.
///
/// Local playlist files carry a `null` id, read as empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireTrack {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub artists: Vec<WireArtist>,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub popularity: Option<u8>,
    #[serde(default)]
    pub explicit: bool,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub external_ids: Option<ExternalIds>,
    #[serde(default)]
    pub album: Option<WireAlbum>,
    #[serde(default)]
    pub is_local: bool,
}

/// Entry of `/playlists/{id}/tracks`. Removed and unsupported items have a
/// `null` track.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WirePlaylistItem {
    #[serde(default)]
    pub track: Option<WireTrack>,
}

/// Full album from `/albums?ids=`.
#[derive(Debug, Clone, Deserialize)]
pub struct WireAlbumFull {
    #[serde(flatten)]
    pub album: WireAlbum,
    #[serde(default = "empty_page")]
    pub tracks: Page<WireSimpleTrack>,
}

fn empty_page<T>() -> Page<T> {
    Page {
        items: Vec::new(),
        next: None,
    }
}

/// Response of `/tracks?ids=`. Removed ids come back as `null`.
#[derive(Debug, Clone, Deserialize)]
pub struct TracksBatch {
    #[serde(default)]
    pub tracks: Vec<Option<WireTrack>>,
}

/// Response of `/albums?ids=`. Removed ids come back as `null`.
#[derive(Debug, Clone, Deserialize)]
pub struct AlbumsBatch {
    #[serde(default)]
    pub albums: Vec<Option<WireAlbumFull>>,
}
