//! Common types shared across all models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Artwork with URL and dimensions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Image {
    /// URL to the image.
    pub url: String,

    /// Height in pixels, when upstream reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    /// Width in pixels, when upstream reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

/// A credited artist, reduced to what the pipeline needs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArtistRef {
    /// Catalog artist id.
    pub id: String,

    /// Display name.
    pub name: String,
}

impl ArtistRef {
    /// Create a new artist reference.
    pub fn new<S1: Into<String>, S2: Into<String>>(id: S1, name: S2) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Release type as reported by the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReleaseType {
    #[default]
    Album,
    Single,
    Compilation,
    /// Anything else upstream may send, kept verbatim.
    Other(String),
}

impl ReleaseType {
    /// Upstream string form.
    pub fn as_str(&self) -> &str {
        match self {
            ReleaseType::Album => "album",
            ReleaseType::Single => "single",
            ReleaseType::Compilation => "compilation",
            ReleaseType::Other(other) => other,
        }
    }

    pub fn is_album(&self) -> bool {
        matches!(self, ReleaseType::Album)
    }
}

impl From<String> for ReleaseType {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "album" => ReleaseType::Album,
            "single" => ReleaseType::Single,
            "compilation" => ReleaseType::Compilation,
            _ => ReleaseType::Other(value),
        }
    }
}

impl From<&str> for ReleaseType {
    fn from(value: &str) -> Self {
        ReleaseType::from(value.to_string())
    }
}

impl From<ReleaseType> for String {
    fn from(value: ReleaseType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Year component of a possibly partial ISO date (`"2023-05-15"`, `"2023"`, `""`).
///
/// Returns an empty string when the date is empty.
pub fn release_year(date: &str) -> &str {
    match date.char_indices().nth(4) {
        Some((idx, _)) => &date[..idx],
        None => date,
    }
}
