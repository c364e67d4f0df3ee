//! Catalog link parsing.
//!
//! Accepts `spotify:{kind}:{id}` URIs and `https://open.spotify.com/{kind}/{id}`
//! URLs and turns them into a [`CatalogLink`].

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{CatalogError, Result};

static URI: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^spotify:(artist|album|playlist|track):([A-Za-z0-9]+)$").unwrap());

static URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^https?://open\.spotify\.com/(?:intl-[a-z]{2}(?:-[a-z]{2})?/)?(artist|album|playlist|track)/([A-Za-z0-9]+)/?(?:[?#].*)?$",
    )
    .unwrap()
});

static BARE_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").unwrap());

/// Kind of catalog object a link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    Artist,
    Album,
    Playlist,
    Track,
}

impl LinkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkKind::Artist => "artist",
            LinkKind::Album => "album",
            LinkKind::Playlist => "playlist",
            LinkKind::Track => "track",
        }
    }
}

impl FromStr for LinkKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "artist" => Ok(LinkKind::Artist),
            "album" => Ok(LinkKind::Album),
            "playlist" => Ok(LinkKind::Playlist),
            "track" => Ok(LinkKind::Track),
            other => Err(CatalogError::InvalidLink(other.to_string())),
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed catalog link.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CatalogLink {
    pub kind: LinkKind,
    pub id: String,
}

impl CatalogLink {
    pub fn new<S: Into<String>>(kind: LinkKind, id: S) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }

    /// `spotify:{kind}:{id}`
    pub fn uri(&self) -> String {
        format!("spotify:{}:{}", self.kind, self.id)
    }

    /// `https://open.spotify.com/{kind}/{id}`
    pub fn url(&self) -> String {
        format!("https://open.spotify.com/{}/{}", self.kind, self.id)
    }
}

/// Parse a catalog URI or open URL. Returns `None` for anything else.
pub fn parse_link(input: &str) -> Option<CatalogLink> {
    let input = input.trim();

    let caps = URI.captures(input).or_else(|| URL.captures(input))?;
    let kind = caps.get(1)?.as_str().parse().ok()?;
    let id = caps.get(2)?.as_str();

    Some(CatalogLink::new(kind, id))
}

/// Resolve user input to an id of the expected kind.
///
/// Accepts a bare id or a link; a link of another kind is rejected.
pub fn resolve_id(input: &str, expected: LinkKind) -> Result<String> {
    let trimmed = input.trim();

    if let Some(link) = parse_link(trimmed) {
        if link.kind != expected {
            return Err(CatalogError::InvalidLink(format!(
                "expected {} link, got {}",
                expected,
                link.uri()
            )));
        }
        return Ok(link.id);
    }

    if BARE_ID.is_match(trimmed) {
        return Ok(trimmed.to_string());
    }

    Err(CatalogError::InvalidLink(input.to_string()))
}
