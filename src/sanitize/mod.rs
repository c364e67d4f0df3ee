//! Track list sanitization.
//!
//! Drops alternate versions, groups the remaining tracks by [`DedupKey`] and
//! keeps one representative per group.
//!
//! Within a group the preferred track is the one with, in order:
//! 1. higher popularity (absent counts as 0)
//! 2. an `album` release over anything else
//! 3. the earlier release date, when both dates are known
//! 4. the shorter title
//!
//! Remaining ties keep the first track encountered.

pub mod classify;
pub mod normalize;

use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::debug;

use crate::models::Track;

pub use classify::is_alternate_version;
pub use normalize::normalize_title;

/// Identity used to group candidate duplicates.
///
/// Both variants carry the primary artist id, so tracks credited to
/// different primary artists never share a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DedupKey {
    /// Same recording code.
    Recording { isrc: String, artist_id: String },
    /// Same normalized title.
    Title { title: String, artist_id: String },
}

impl DedupKey {
    /// Key for `track`. `fallback_artist_id` stands in when the track has no
    /// credited artists.
    pub fn for_track(track: &Track, fallback_artist_id: &str) -> Self {
        let artist_id = track
            .primary_artist_id()
            .unwrap_or(fallback_artist_id)
            .to_string();

        match track.isrc.as_deref().filter(|code| !code.is_empty()) {
            Some(isrc) => DedupKey::Recording {
                isrc: isrc.to_string(),
                artist_id,
            },
            None => DedupKey::Title {
                title: normalize_title(&track.title),
                artist_id,
            },
        }
    }
}

/// Order two duplicates; `Less` means `a` is preferred.
pub fn compare_duplicates(a: &Track, b: &Track) -> Ordering {
    b.popularity_or_zero()
        .cmp(&a.popularity_or_zero())
        .then_with(|| is_album_track(b).cmp(&is_album_track(a)))
        .then_with(|| match (release_date(a), release_date(b)) {
            (Some(da), Some(db)) => da.cmp(db),
            _ => Ordering::Equal,
        })
        .then_with(|| a.title.chars().count().cmp(&b.title.chars().count()))
}

fn is_album_track(track: &Track) -> bool {
    track
        .release
        .as_ref()
        .map_or(false, |r| r.release_type.is_album())
}

fn release_date(track: &Track) -> Option<&str> {
    track
        .release
        .as_ref()
        .map(|r| r.release_date.as_str())
        .filter(|d| !d.is_empty())
}

/// Produce a duplicate-free, alternate-version-free copy of `tracks`.
///
/// Groups appear in the order their first member was encountered.
pub fn sanitize_tracks(tracks: &[Track], primary_artist_id: &str) -> Vec<Track> {
    let mut slots: HashMap<DedupKey, usize> = HashMap::new();
    let mut chosen: Vec<&Track> = Vec::new();
    let mut excluded = 0usize;

    for track in tracks {
        if is_alternate_version(&track.title) {
            excluded += 1;
            continue;
        }

        let key = DedupKey::for_track(track, primary_artist_id);
        match slots.get(&key) {
            Some(&slot) => {
                if compare_duplicates(track, chosen[slot]) == Ordering::Less {
                    chosen[slot] = track;
                }
            }
            None => {
                slots.insert(key, chosen.len());
                chosen.push(track);
            }
        }
    }

    debug!(
        "Sanitized {} tracks: {} alternate versions, {} duplicates dropped",
        tracks.len(),
        excluded,
        tracks.len() - excluded - chosen.len()
    );

    chosen.into_iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArtistRef, ReleaseType, TrackRelease};

    const ARTIST: &str = "artist123";

    fn track(id: &str, title: &str, popularity: Option<u8>) -> Track {
        Track {
            id: id.to_string(),
            title: title.to_string(),
            artists: vec![ArtistRef::new(ARTIST, "Test Artist")],
            duration_ms: 200_000,
            popularity,
            uri: format!("spotify:track:{}", id),
            ..Default::default()
        }
    }

    fn on_release(mut t: Track, release_type: &str, date: &str) -> Track {
        t.release = Some(TrackRelease {
            id: format!("rel-{}", t.id),
            title: "Release".to_string(),
            release_type: ReleaseType::from(release_type),
            release_date: date.to_string(),
        });
        t
    }

    fn with_isrc(mut t: Track, isrc: &str) -> Track {
        t.isrc = Some(isrc.to_string());
        t
    }

    fn ids(tracks: &[Track]) -> Vec<&str> {
        tracks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_excludes_alternate_versions_only() {
        let tracks = vec![
            track("t1", "Song Title - Live at Madison Square Garden", Some(50)),
            track("t2", "Song Title (Live)", Some(50)),
            track("t3", "Live Wire", Some(50)),
            track("t4", "Live It Up", Some(50)),
            track("t5", "Normal Song", Some(50)),
        ];

        let result = sanitize_tracks(&tracks, ARTIST);
        assert_eq!(ids(&result), vec!["t3", "t4", "t5"]);
    }

    #[test]
    fn test_same_isrc_keeps_more_popular() {
        let tracks = vec![
            on_release(with_isrc(track("t1", "Song Title", Some(80)), "USRC17607839"), "album", ""),
            on_release(
                with_isrc(track("t2", "Song Title - Remastered", Some(60)), "USRC17607839"),
                "single",
                "",
            ),
        ];

        let result = sanitize_tracks(&tracks, ARTIST);
        assert_eq!(ids(&result), vec!["t1"]);
    }

    #[test]
    fn test_similar_titles_collapse() {
        let tracks = vec![
            track("t1", "Song Title", Some(70)),
            track("t2", "Song Title - Remastered 2023", Some(60)),
            track("t3", "Song Title (Single Version)", Some(50)),
        ];

        let result = sanitize_tracks(&tracks, ARTIST);
        assert_eq!(ids(&result), vec!["t1"]);
    }

    #[test]
    fn test_bracket_only_title_kept_distinct() {
        let tracks = vec![track("t1", "(Intro)", Some(50)), track("t2", "Normal Song", Some(60))];

        let result = sanitize_tracks(&tracks, ARTIST);
        assert_eq!(ids(&result), vec!["t1", "t2"]);
    }

    #[test]
    fn test_prefers_higher_popularity() {
        let tracks = vec![track("t1", "Song Title", Some(50)), track("t2", "Song Title", Some(80))];
        assert_eq!(ids(&sanitize_tracks(&tracks, ARTIST)), vec!["t2"]);
    }

    #[test]
    fn test_missing_popularity_counts_as_zero() {
        let tracks = vec![track("t1", "Song Title", None), track("t2", "Song Title", Some(1))];
        assert_eq!(ids(&sanitize_tracks(&tracks, ARTIST)), vec!["t2"]);
    }

    #[test]
    fn test_prefers_album_over_single() {
        let tracks = vec![
            on_release(track("t1", "Song Title", Some(70)), "single", ""),
            on_release(track("t2", "Song Title", Some(70)), "album", ""),
        ];
        assert_eq!(ids(&sanitize_tracks(&tracks, ARTIST)), vec!["t2"]);
    }

    #[test]
    fn test_album_beats_missing_release() {
        let tracks = vec![
            track("t1", "Song Title", Some(70)),
            on_release(track("t2", "Song Title", Some(70)), "album", ""),
        ];
        assert_eq!(ids(&sanitize_tracks(&tracks, ARTIST)), vec!["t2"]);
    }

    #[test]
    fn test_prefers_earlier_release_date() {
        let tracks = vec![
            on_release(track("t1", "Song Title", Some(70)), "album", "2023-01-01"),
            on_release(track("t2", "Song Title", Some(70)), "album", "2022-01-01"),
        ];
        assert_eq!(ids(&sanitize_tracks(&tracks, ARTIST)), vec!["t2"]);
    }

    #[test]
    fn test_date_ignored_when_one_side_missing() {
        let tracks = vec![
            on_release(track("t1", "Song Title - Edit", Some(70)), "album", ""),
            on_release(track("t2", "Song Title", Some(70)), "album", "2022-01-01"),
        ];
        // Falls through to title length.
        assert_eq!(ids(&sanitize_tracks(&tracks, ARTIST)), vec!["t2"]);
    }

    #[test]
    fn test_prefers_shorter_title() {
        let tracks = vec![
            track("t1", "Song Title - Extended Version", Some(70)),
            track("t2", "Song Title", Some(70)),
        ];
        assert_eq!(ids(&sanitize_tracks(&tracks, ARTIST)), vec!["t2"]);
    }

    #[test]
    fn test_full_tie_keeps_first() {
        let tracks = vec![track("t1", "Song Title", Some(70)), track("t2", "Song Title", Some(70))];
        assert_eq!(ids(&sanitize_tracks(&tracks, ARTIST)), vec!["t1"]);
    }

    #[test]
    fn test_different_primary_artists_never_merge() {
        let mut other = track("t2", "Song Title", Some(90));
        other.artists = vec![ArtistRef::new("someone-else", "Other")];
        let tracks = vec![track("t1", "Song Title", Some(10)), other];

        assert_eq!(ids(&sanitize_tracks(&tracks, ARTIST)), vec!["t1", "t2"]);
    }

    #[test]
    fn test_group_order_follows_first_encounter() {
        let tracks = vec![
            track("a", "First", Some(10)),
            track("b", "Second", Some(10)),
            track("c", "First - Remastered", Some(90)),
        ];
        // "c" wins the "first" group but the group keeps its original slot.
        assert_eq!(ids(&sanitize_tracks(&tracks, ARTIST)), vec!["c", "b"]);
    }

    #[test]
    fn test_mixed_exclusions_and_duplicates() {
        let tracks = vec![
            track("t1", "Song Title", Some(80)),
            track("t2", "Song Title - Live", Some(70)),
            track("t3", "Song Title (Remastered)", Some(60)),
            track("t4", "Another Song - Remix", Some(90)),
            track("t5", "Different Song", Some(50)),
        ];

        let result = sanitize_tracks(&tracks, ARTIST);
        assert_eq!(ids(&result), vec!["t1", "t5"]);
    }

    #[test]
    fn test_idempotent() {
        let tracks = vec![
            on_release(track("t1", "Song Title", Some(40)), "single", "2020-01-01"),
            on_release(track("t2", "Song Title - Radio Edit", Some(40)), "album", "2021-01-01"),
            with_isrc(track("t3", "Other", Some(10)), "GBAYE0000001"),
            with_isrc(track("t4", "Other (2009 Remaster)", Some(20)), "GBAYE0000001"),
            track("t5", "Song (Acoustic Version)", Some(99)),
            track("t6", "(Interlude)", None),
        ];

        let once = sanitize_tracks(&tracks, ARTIST);
        let twice = sanitize_tracks(&once, ARTIST);
        assert_eq!(once, twice);
        assert_eq!(ids(&once), vec!["t2", "t4", "t6"]);
    }

    #[test]
    fn test_empty_and_sparse_inputs() {
        assert!(sanitize_tracks(&[], ARTIST).is_empty());

        let mut bare = track("t1", "Song Title", None);
        bare.artists.clear();
        bare.release = None;
        assert_eq!(ids(&sanitize_tracks(&[bare], ARTIST)), vec!["t1"]);
    }
}
