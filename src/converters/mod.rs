//! Wire to model converters.
//!
//! Turns decoded [`crate::api::wire`] payloads into the pipeline's
//! [`crate::models`] records.

use crate::api::wire::{WireAlbum, WireAlbumFull, WireArtist, WireImage, WireSimpleTrack, WireTrack};
use crate::models::{
    Album, AlbumDetail, AlbumTrack, ArtistRef, Image, ReleaseType, Track, TrackRelease,
};

fn artist(wire: &WireArtist) -> ArtistRef {
    ArtistRef::new(wire.id.clone(), wire.name.clone())
}

fn image(wire: &WireImage) -> Image {
    Image {
        url: wire.url.clone(),
        height: wire.height,
        width: wire.width,
    }
}

/// Treat blank recording codes as absent and compare them case-insensitively.
fn clean_isrc(isrc: Option<&str>) -> Option<String> {
    isrc.map(|s| s.trim().to_ascii_uppercase())
        .filter(|s| !s.is_empty())
}

/// Parse an album listing entry.
pub fn parse_album(wire: &WireAlbum) -> Album {
    Album {
        id: wire.id.clone(),
        title: wire.name.clone(),
        release_type: ReleaseType::from(wire.album_type.as_str()),
        artists: wire.artists.iter().map(artist).collect(),
        release_date: wire.release_date.clone().unwrap_or_default(),
        total_tracks: wire.total_tracks,
        available_markets: wire.available_markets.clone(),
        images: wire.images.iter().map(image).collect(),
    }
}

/// Parse a full album lookup result, keeping per-track explicit flags.
pub fn parse_album_detail(wire: &WireAlbumFull) -> AlbumDetail {
    AlbumDetail {
        album: parse_album(&wire.album),
        tracks: wire
            .tracks
            .items
            .iter()
            .map(|t| AlbumTrack {
                id: t.id.clone(),
                title: t.name.clone(),
                explicit: t.explicit,
            })
            .collect(),
    }
}

/// Release reference attached to tracks found on `album`.
pub fn track_release(album: &Album) -> TrackRelease {
    TrackRelease {
        id: album.id.clone(),
        title: album.title.clone(),
        release_type: album.release_type.clone(),
        release_date: album.release_date.clone(),
    }
}

/// Parse a sparse album-listing track. Popularity and ISRC stay empty.
pub fn parse_simple_track(wire: &WireSimpleTrack) -> Track {
    Track {
        id: wire.id.clone(),
        title: wire.name.clone(),
        artists: wire.artists.iter().map(artist).collect(),
        duration_ms: wire.duration_ms,
        popularity: None,
        uri: wire.uri.clone(),
        isrc: None,
        explicit: wire.explicit,
        release: None,
    }
}

/// Parse a hydrated track.
pub fn parse_track(wire: &WireTrack) -> Track {
    Track {
        id: wire.id.clone(),
        title: wire.name.clone(),
        artists: wire.artists.iter().map(artist).collect(),
        duration_ms: wire.duration_ms,
        popularity: wire.popularity,
        uri: wire.uri.clone(),
        isrc: clean_isrc(
            wire.external_ids
                .as_ref()
                .and_then(|ids| ids.isrc.as_deref()),
        ),
        explicit: wire.explicit,
        release: wire.album.as_ref().map(|a| track_release(&parse_album(a))),
    }
}
