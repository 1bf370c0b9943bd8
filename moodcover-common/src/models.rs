//! Track model shared between catalog clients and the session controller

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a track: the (title, artist) pair.
///
/// Catalog results carry no stable ID through the flow, so two distinct
/// recordings with the same title and artist are indistinguishable here.
/// De-duplication and selection both collide on such pairs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackKey {
    pub title: String,
    pub artist: String,
}

impl TrackKey {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
        }
    }
}

impl fmt::Display for TrackKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.title, self.artist)
    }
}

/// A catalog track as shown to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Track title
    pub title: String,
    /// Primary artist name
    pub artist: String,
    /// First album artwork image, if the catalog has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artwork_url: Option<String>,
    /// Short preview clip locator, if one could be resolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
}

impl Track {
    pub fn key(&self) -> TrackKey {
        TrackKey::new(self.title.clone(), self.artist.clone())
    }

    /// Whether `key` identifies this track
    pub fn matches(&self, key: &TrackKey) -> bool {
        self.title == key.title && self.artist == key.artist
    }

    pub fn has_preview(&self) -> bool {
        self.preview_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(preview: Option<&str>) -> Track {
        Track {
            title: "Yesterday".to_string(),
            artist: "The Beatles".to_string(),
            artwork_url: None,
            preview_url: preview.map(str::to_string),
        }
    }

    #[test]
    fn test_key_display() {
        assert_eq!(track(None).key().to_string(), "Yesterday - The Beatles");
    }

    #[test]
    fn test_matches_is_exact() {
        let t = track(None);
        assert!(t.matches(&TrackKey::new("Yesterday", "The Beatles")));
        assert!(!t.matches(&TrackKey::new("yesterday", "The Beatles")));
    }

    #[test]
    fn test_blank_preview_is_not_a_preview() {
        assert!(!track(None).has_preview());
        assert!(!track(Some("  ")).has_preview());
        assert!(track(Some("https://cdn.example/p.mp3")).has_preview());
    }

    #[test]
    fn test_optional_fields_skipped_when_absent() {
        let encoded = toml::to_string(&track(None)).expect("serialize track");
        assert!(!encoded.contains("artwork_url"));
        assert!(!encoded.contains("preview_url"));
    }
}
