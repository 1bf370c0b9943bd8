//! Deezer public search client
//!
//! Deezer's search endpoint needs no credential and returns a 30 second
//! preview MP3 locator for most tracks.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::error::{CoverError, CoverResult};
use crate::types::{PreviewCandidate, PreviewCatalog};

pub const DEEZER_BASE_URL: &str = "https://api.deezer.com";
const USER_AGENT: &str = concat!("moodcover/", env!("CARGO_PKG_VERSION"));

/// Search response; error payloads arrive with status 200 and no `data`
#[derive(Debug, Deserialize)]
struct DeezerSearchResponse {
    #[serde(default)]
    data: Vec<DeezerTrack>,
}

#[derive(Debug, Deserialize)]
struct DeezerTrack {
    title: String,
    #[serde(default)]
    preview: Option<String>,
    artist: DeezerArtist,
}

#[derive(Debug, Deserialize)]
struct DeezerArtist {
    name: String,
}

/// Deezer API client
pub struct DeezerClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl DeezerClient {
    pub fn new(base_url: Option<String>) -> CoverResult<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| CoverError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url
                .unwrap_or_else(|| DEEZER_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
        })
    }
}

#[async_trait]
impl PreviewCatalog for DeezerClient {
    async fn search_previews(&self, query: &str) -> CoverResult<Vec<PreviewCandidate>> {
        let url = format!("{}/search", self.base_url);
        tracing::debug!(query = %query, url = %url, "Querying Deezer search");

        let response = self
            .http_client
            .get(&url)
            .query(&[("q", query)])
            .send()
            .await
            .map_err(|e| CoverError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoverError::Network(format!(
                "Deezer search returned {}",
                status.as_u16()
            )));
        }

        let body: DeezerSearchResponse = response
            .json()
            .await
            .map_err(|e| CoverError::Network(format!("Invalid Deezer response: {}", e)))?;

        Ok(body
            .data
            .into_iter()
            .map(|t| PreviewCandidate {
                title: t.title,
                artist: t.artist.name,
                preview_url: t.preview.filter(|p| !p.trim().is_empty()),
            })
            .collect())
    }
}
