//! Service seams for the cover-generation flow
//!
//! Each external collaborator sits behind a trait so the session controller
//! can be driven by the real HTTP clients or by in-process fakes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CoverResult;
use crate::models::AudioFeatures;

/// Track as returned by the search catalog, before preview resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogTrack {
    pub title: String,
    pub artist: String,
    pub artwork_url: Option<String>,
}

/// Candidate returned by the preview catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewCandidate {
    pub title: String,
    pub artist: String,
    pub preview_url: Option<String>,
}

/// Anything the fuzzy matcher can score against a (title, artist) target
pub trait Matchable {
    fn match_title(&self) -> &str;
    fn match_artist(&self) -> &str;
}

impl Matchable for PreviewCandidate {
    fn match_title(&self) -> &str {
        &self.title
    }

    fn match_artist(&self) -> &str {
        &self.artist
    }
}

/// Free-text track search
#[async_trait]
pub trait TrackCatalog: Send + Sync {
    /// Up to `limit` tracks matching `query`, in catalog rank order
    async fn search_tracks(&self, query: &str, limit: u32) -> CoverResult<Vec<CatalogTrack>>;
}

/// Catalog that knows preview clip locators
#[async_trait]
pub trait PreviewCatalog: Send + Sync {
    /// Ranked candidates for a free-text query
    async fn search_previews(&self, query: &str) -> CoverResult<Vec<PreviewCandidate>>;
}

/// Turns a preview locator into audio descriptors
#[async_trait]
pub trait FeatureAnalyzer: Send + Sync {
    async fn analyze(&self, preview_url: &str) -> CoverResult<AudioFeatures>;
}

/// Text-to-image service
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Raw image bytes for `prompt`
    async fn generate(&self, prompt: &str) -> CoverResult<Vec<u8>>;
}
