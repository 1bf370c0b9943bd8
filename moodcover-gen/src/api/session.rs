//! Session API: search, selection and cover generation
//!
//! Every handler holds the session lock for the whole action, so actions
//! run one at a time and in arrival order. A failed action leaves the
//! session exactly as it was.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use moodcover_common::{Track, TrackKey};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::CoverError;
use crate::models::{AggregateFeatures, CoverColor, PromptStyle, SessionState};
use crate::{ApiError, ApiResult, AppState};

/// Session snapshot returned by every state-changing call
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub candidates: Vec<Track>,
    pub selected: Vec<TrackKey>,
    pub past_selections: Vec<Track>,
    /// Profile in effect (UI shows it next to the search box)
    pub profile: String,
}

impl SessionResponse {
    fn new(state: &SessionState, profile: &str) -> Self {
        Self {
            candidates: state.candidates.clone(),
            selected: state.selected.clone(),
            past_selections: state.past_selections.clone(),
            profile: profile.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectionRequest {
    #[serde(default)]
    pub tracks: Vec<TrackKey>,
}

/// Style and color arrive as plain strings so bad values map to 400
#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    pub style: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub prompt: String,
    pub image_base64: String,
    pub content_type: String,
    pub features: AggregateFeatures,
    pub analyzed: Vec<TrackKey>,
    pub skipped: Vec<TrackKey>,
}

/// Record the failure for `/health` and convert it for the response
async fn fail(state: &AppState, err: CoverError) -> ApiError {
    tracing::warn!(error = %err, "Session action failed");
    state.record_error(err.to_string()).await;
    ApiError::from(err)
}

/// GET /api/session
pub async fn get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let session = state.session.lock().await;
    Json(SessionResponse::new(&session, &state.controller.profile().name))
}

/// POST /api/search
///
/// **Request:** `{"query": "yesterday beatles"}`
///
/// **Errors:** 400 for a blank query, 503 when Spotify credentials are
/// missing, 502 when the catalog fails.
pub async fn search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> ApiResult<Json<SessionResponse>> {
    let mut session = state.session.lock().await;

    let next = match state.controller.search(session.clone(), &request.query).await {
        Ok(next) => next,
        Err(e) => return Err(fail(&state, e).await),
    };
    *session = next;

    info!(
        query = %request.query,
        candidates = session.candidates.len(),
        "Search applied to session"
    );
    Ok(Json(SessionResponse::new(&session, &state.controller.profile().name)))
}

/// POST /api/selection
///
/// **Request:** `{"tracks": [{"title": "...", "artist": "..."}]}`
///
/// Unknown tracks are ignored; the response shows what was kept.
pub async fn select(
    State(state): State<AppState>,
    Json(request): Json<SelectionRequest>,
) -> Json<SessionResponse> {
    let mut session = state.session.lock().await;
    let current = std::mem::take(&mut *session);
    *session = state.controller.select(current, request.tracks);
    Json(SessionResponse::new(&session, &state.controller.profile().name))
}

/// POST /api/generate
///
/// **Request:** `{"style": "landscape", "color": "#1db954"}` (both optional)
///
/// **Errors:**
/// - 400: unknown style or malformed color
/// - 422: no selected track yielded audio features
/// - 502: image service refused or catalog unreachable
/// - 503: Hugging Face token missing
pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> ApiResult<Json<GenerateResponse>> {
    let style = match request.style.as_deref() {
        Some(raw) => raw.parse::<PromptStyle>().map_err(ApiError::from)?,
        None => PromptStyle::default(),
    };
    let color = match request.color.as_deref() {
        Some(raw) => CoverColor::parse(raw).map_err(ApiError::from)?,
        None => CoverColor::default(),
    };

    let session = state.session.lock().await;
    let cover = match state.controller.generate(&session, style, &color).await {
        Ok(cover) => cover,
        Err(e) => return Err(fail(&state, e).await),
    };

    Ok(Json(GenerateResponse {
        image_base64: STANDARD.encode(&cover.image),
        content_type: cover.content_type.to_string(),
        prompt: cover.prompt,
        features: cover.features,
        analyzed: cover.analyzed,
        skipped: cover.skipped,
    }))
}

/// Build session routes
pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/api/session", get(get_session))
        .route("/api/search", post(search))
        .route("/api/selection", post(select))
        .route("/api/generate", post(generate))
}
