//! Album (release) models.
//!
//! [`Album`] is the listing-level record; [`AlbumDetail`] adds the per-track
//! explicit flags that only the full lookup endpoint returns.

use serde::{Deserialize, Serialize};

use super::common::{ArtistRef, Image, ReleaseType};

/// A release as it appears in artist listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Album {
    /// Catalog album id.
    pub id: String,

    /// Album title.
    pub title: String,

    /// Release type.
    pub release_type: ReleaseType,

    /// Album artists.
    #[serde(default)]
    pub artists: Vec<ArtistRef>,

    /// Release date, possibly partial or empty.
    #[serde(default)]
    pub release_date: String,

    /// Declared number of tracks.
    #[serde(default)]
    pub total_tracks: u32,

    /// Markets the release is available in, when upstream reports them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_markets: Option<Vec<String>>,

    /// Cover images in various sizes.
    #[serde(default)]
    pub images: Vec<Image>,
}

impl Album {
    /// Whether the release can be played in `market`.
    ///
    /// A release without a market list is treated as available.
    pub fn is_available_in(&self, market: &str) -> bool {
        self.available_markets
            .as_ref()
            .map_or(true, |markets| markets.iter().any(|m| m == market))
    }
}

/// A track listed inside an album lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlbumTrack {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub explicit: bool,
}

/// Full album record from the batch lookup endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlbumDetail {
    #[serde(flatten)]
    pub album: Album,

    #[serde(default)]
    pub tracks: Vec<AlbumTrack>,
}

impl AlbumDetail {
    /// Number of tracks flagged explicit.
    pub fn explicit_count(&self) -> usize {
        self.tracks.iter().filter(|t| t.explicit).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_availability() {
        let album = Album {
            available_markets: Some(vec!["US".to_string(), "GB".to_string()]),
            ..Default::default()
        };
        assert!(album.is_available_in("US"));
        assert!(!album.is_available_in("DE"));

        let unknown = Album::default();
        assert!(unknown.is_available_in("DE"));
    }

    #[test]
    fn test_explicit_count() {
        let detail = AlbumDetail {
            album: Album::default(),
            tracks: vec![
                AlbumTrack {
                    id: "1".into(),
                    title: "One".into(),
                    explicit: true,
                },
                AlbumTrack {
                    id: "2".into(),
                    title: "Two".into(),
                    explicit: false,
                },
                AlbumTrack {
                    id: "3".into(),
                    title: "Three".into(),
                    explicit: true,
                },
            ],
        };
        assert_eq!(detail.explicit_count(), 2);
    }
}
