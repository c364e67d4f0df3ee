//! Data models for catalog tracks and albums.
//!
//! These are the pipeline's internal records. Upstream payloads are decoded
//! into [`crate::api::wire`] shapes first and converted by
//! [`crate::converters`].

pub mod album;
pub mod common;
pub mod track;

// Re-exports for convenience
pub use album::{Album, AlbumDetail, AlbumTrack};
pub use common::{release_year, ArtistRef, Image, ReleaseType};
pub use track::{GameTrack, Track, TrackRelease};
