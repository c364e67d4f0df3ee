//! # Tracksift
//!
//! Collects an artist's catalog from the Spotify Web API and reduces it to a
//! clean, playable track list.
//!
//! ## Quick Start
//!
//! The easiest way to use this library is through the [`Collector`] struct:
//!
//! ```rust,no_run
//! use tracksift::{Collector, FetchConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let collector = Collector::new(FetchConfig::default().with_market("US"))?;
//!
//!     // Primary-artist tracks, alternate versions and duplicates removed
//!     let tracks = collector
//!         .collect_primary_tracks("0OdUWJ0sBjDrqHygGUXeCF", "bearer-token")
//!         .await?;
//!     for track in &tracks {
//!         println!("{} ({})", track.title, track.id);
//!     }
//!
//!     // Albums with re-issued editions collapsed
//!     let albums = collector
//!         .artist_albums("0OdUWJ0sBjDrqHygGUXeCF", "bearer-token", true)
//!         .await?;
//!     println!("{} albums", albums.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Paginated discovery** with rate-limit aware retries
//! - **Batched hydration** of sparse track listings
//! - **Title normalization** and alternate-version detection
//! - **Album edition collapsing**, optionally preferring explicit editions
//!
//! ## Low-Level APIs
//!
//! - [`CatalogClient`] - Typed endpoint access over a pluggable transport
//! - [`sanitize`] - Pure track list cleanup
//! - [`albums`] - Pure and networked album collapsing
//! - [`cache`] - Response cache handle

pub mod albums;
pub mod api;
pub mod cache;
mod collector;
pub mod config;
pub mod converters;
pub mod error;
pub mod link;
pub mod models;
pub mod sanitize;

// Main interface (recommended)
pub use collector::Collector;

// Low-level APIs
pub use albums::{
    collapse_exact_duplicates_fast, collapse_exact_duplicates_prefer_explicit, CollapseOptions,
};
pub use api::{CatalogClient, CatalogTransport, HttpTransport};
pub use cache::{MemoryCache, ResponseCache};
pub use config::FetchConfig;
pub use error::{CatalogError, Result};
pub use link::{parse_link, CatalogLink, LinkKind};
pub use models::{Album, ArtistRef, GameTrack, ReleaseType, Track};
pub use sanitize::{is_alternate_version, normalize_title, sanitize_tracks};
