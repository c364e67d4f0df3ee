//! Track-related models.
//!
//! [`Track`] is the pipeline's internal record; [`GameTrack`] is the trimmed
//! shape handed to callers once a track list has been sanitized.

use serde::{Deserialize, Serialize};

use super::common::{ArtistRef, ReleaseType};

/// Release a track was discovered on.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrackRelease {
    /// Release id.
    pub id: String,

    /// Release title.
    pub title: String,

    /// Release type.
    pub release_type: ReleaseType,

    /// Release date, possibly partial (`"2019"`) or empty.
    #[serde(default)]
    pub release_date: String,
}

/// A catalog track record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Track {
    /// Catalog track id.
    pub id: String,

    /// Track title.
    pub title: String,

    /// Credited artists. The first entry is the primary artist.
    #[serde(default)]
    pub artists: Vec<ArtistRef>,

    /// Duration in milliseconds.
    #[serde(default)]
    pub duration_ms: u64,

    /// Popularity score (0-100), absent on sparse listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popularity: Option<u8>,

    /// Canonical playable reference.
    #[serde(default)]
    pub uri: String,

    /// Recording code (ISRC).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isrc: Option<String>,

    /// Whether the track has explicit content.
    #[serde(default)]
    pub explicit: bool,

    /// Containing release.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release: Option<TrackRelease>,
}

impl Track {
    /// Primary credited artist.
    pub fn primary_artist(&self) -> Option<&ArtistRef> {
        self.artists.first()
    }

    /// Id of the primary credited artist.
    pub fn primary_artist_id(&self) -> Option<&str> {
        self.primary_artist().map(|a| a.id.as_str())
    }

    /// Popularity with absent treated as zero.
    pub fn popularity_or_zero(&self) -> u8 {
        self.popularity.unwrap_or(0)
    }

}

/// Minimal track shape returned to callers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameTrack {
    pub id: String,
    pub uri: String,
    pub name: String,
    pub popularity: u8,
    pub artist_ids: Vec<String>,
    pub artist_names: Vec<String>,
    pub duration_ms: u64,
}

impl GameTrack {
    /// Sort in place by descending popularity. Ties keep their order.
    pub fn rank_by_popularity(tracks: &mut [GameTrack]) {
        tracks.sort_by(|a, b| b.popularity.cmp(&a.popularity));
    }
}

impl From<&Track> for GameTrack {
    fn from(track: &Track) -> Self {
        let uri = if track.uri.is_empty() {
            format!("spotify:track:{}", track.id)
        } else {
            track.uri.clone()
        };

        Self {
            id: track.id.clone(),
            uri,
            name: track.title.clone(),
            popularity: track.popularity_or_zero(),
            artist_ids: track.artists.iter().map(|a| a.id.clone()).collect(),
            artist_names: track.artists.iter().map(|a| a.name.clone()).collect(),
            duration_ms: track.duration_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_artist_is_first_credit() {
        let track = Track {
            artists: vec![ArtistRef::new("a1", "Main"), ArtistRef::new("a2", "Guest")],
            ..Default::default()
        };
        assert_eq!(track.primary_artist_id(), Some("a1"));
    }

    #[test]
    fn test_game_track_fills_missing_uri_and_popularity() {
        let track = Track {
            id: "t1".to_string(),
            title: "Song".to_string(),
            artists: vec![ArtistRef::new("a1", "Main")],
            duration_ms: 200_000,
            ..Default::default()
        };

        let game = GameTrack::from(&track);
        assert_eq!(game.uri, "spotify:track:t1");
        assert_eq!(game.popularity, 0);
        assert_eq!(game.artist_ids, vec!["a1".to_string()]);
        assert_eq!(game.artist_names, vec!["Main".to_string()]);
    }

    #[test]
    fn test_rank_by_popularity_is_stable() {
        let mut tracks = vec![
            GameTrack {
                id: "a".into(),
                popularity: 10,
                ..Default::default()
            },
            GameTrack {
                id: "b".into(),
                popularity: 50,
                ..Default::default()
            },
            GameTrack {
                id: "c".into(),
                popularity: 10,
                ..Default::default()
            },
        ];

        GameTrack::rank_by_popularity(&mut tracks);
        let ids: Vec<_> = tracks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }
}
