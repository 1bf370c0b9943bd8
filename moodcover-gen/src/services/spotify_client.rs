//! Spotify Web API client (track search)
//!
//! Uses the client-credentials flow: an app token is requested on first use
//! and cached until shortly before it expires. Missing credentials surface
//! as a configuration error on the first search, not at startup.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::error::{CoverError, CoverResult};
use crate::types::{CatalogTrack, TrackCatalog};

pub const SPOTIFY_ACCOUNTS_URL: &str = "https://accounts.spotify.com";
pub const SPOTIFY_API_URL: &str = "https://api.spotify.com";
const USER_AGENT: &str = concat!("moodcover/", env!("CARGO_PKG_VERSION"));
/// Refresh the token this long before Spotify says it expires
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    tracks: TrackPage,
}

#[derive(Debug, Deserialize)]
struct TrackPage {
    #[serde(default)]
    items: Vec<SpotifyTrack>,
}

#[derive(Debug, Deserialize)]
struct SpotifyTrack {
    name: String,
    #[serde(default)]
    artists: Vec<SpotifyArtist>,
    album: Option<SpotifyAlbum>,
}

#[derive(Debug, Deserialize)]
struct SpotifyArtist {
    name: String,
}

#[derive(Debug, Deserialize)]
struct SpotifyAlbum {
    #[serde(default)]
    images: Vec<SpotifyImage>,
}

#[derive(Debug, Deserialize)]
struct SpotifyImage {
    url: String,
}

impl From<SpotifyTrack> for CatalogTrack {
    fn from(track: SpotifyTrack) -> Self {
        let artist = track
            .artists
            .into_iter()
            .next()
            .map(|a| a.name)
            .unwrap_or_default();
        let artwork_url = track
            .album
            .and_then(|album| album.images.into_iter().next())
            .map(|image| image.url)
            .filter(|url| !url.is_empty());

        CatalogTrack {
            title: track.name,
            artist,
            artwork_url,
        }
    }
}

struct CachedToken {
    access_token: String,
    refresh_at: Instant,
}

/// Spotify API endpoints
#[derive(Debug, Clone)]
pub struct SpotifyEndpoints {
    pub accounts_url: String,
    pub api_url: String,
}

impl Default for SpotifyEndpoints {
    fn default() -> Self {
        Self {
            accounts_url: SPOTIFY_ACCOUNTS_URL.to_string(),
            api_url: SPOTIFY_API_URL.to_string(),
        }
    }
}

/// Spotify API client
pub struct SpotifyClient {
    http_client: reqwest::Client,
    endpoints: SpotifyEndpoints,
    client_id: Option<String>,
    client_secret: Option<String>,
    token: Mutex<Option<CachedToken>>,
}

impl SpotifyClient {
    pub fn new(
        client_id: Option<String>,
        client_secret: Option<String>,
        endpoints: SpotifyEndpoints,
    ) -> CoverResult<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| CoverError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            endpoints: SpotifyEndpoints {
                accounts_url: endpoints.accounts_url.trim_end_matches('/').to_string(),
                api_url: endpoints.api_url.trim_end_matches('/').to_string(),
            },
            client_id,
            client_secret,
            token: Mutex::new(None),
        })
    }

    /// Cached app token, requesting a new one when missing or stale
    async fn access_token(&self) -> CoverResult<String> {
        let mut cached = self.token.lock().await;

        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.refresh_at {
                return Ok(token.access_token.clone());
            }
        }

        let (client_id, client_secret) = match (&self.client_id, &self.client_secret) {
            (Some(id), Some(secret)) => (id, secret),
            _ => {
                return Err(CoverError::Config(
                    "Spotify credentials not configured. Set SPOTIPY_CLIENT_ID and \
                     SPOTIPY_CLIENT_SECRET, or [credentials] in the config file."
                        .to_string(),
                ))
            }
        };

        let url = format!("{}/api/token", self.endpoints.accounts_url);
        tracing::debug!(url = %url, "Requesting Spotify app token");

        let response = self
            .http_client
            .post(&url)
            .basic_auth(client_id, Some(client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| CoverError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoverError::Network(format!(
                "Spotify token request returned {}",
                status.as_u16()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| CoverError::Network(format!("Invalid Spotify token response: {}", e)))?;

        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(TOKEN_EXPIRY_MARGIN);
        tracing::info!(expires_in = token.expires_in, "Obtained Spotify app token");

        *cached = Some(CachedToken {
            access_token: token.access_token.clone(),
            refresh_at: Instant::now() + lifetime,
        });

        Ok(token.access_token)
    }

    async fn forget_token(&self) {
        *self.token.lock().await = None;
    }
}

#[async_trait]
impl TrackCatalog for SpotifyClient {
    async fn search_tracks(&self, query: &str, limit: u32) -> CoverResult<Vec<CatalogTrack>> {
        let token = self.access_token().await?;
        let url = format!("{}/v1/search", self.endpoints.api_url);
        let limit = limit.to_string();

        tracing::debug!(query = %query, limit = %limit, "Querying Spotify search");

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(token)
            .query(&[("q", query), ("type", "track"), ("limit", limit.as_str())])
            .send()
            .await
            .map_err(|e| CoverError::Network(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            self.forget_token().await;
        }
        if !status.is_success() {
            return Err(CoverError::Network(format!(
                "Spotify search returned {}",
                status.as_u16()
            )));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| CoverError::Network(format!("Invalid Spotify search response: {}", e)))?;

        let tracks: Vec<CatalogTrack> = body.tracks.items.into_iter().map(Into::into).collect();
        tracing::info!(query = %query, results = tracks.len(), "Spotify search complete");
        Ok(tracks)
    }
}
