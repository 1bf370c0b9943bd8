//! Liveness and diagnostics for the cover generator
//!
//! Reports which analysis profile the prompts are built with and the last
//! action failure (search, selection or generation), so a failed cover can
//! be diagnosed without digging through logs.

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "ok" while the server answers
    pub status: String,
    pub module: String,
    pub version: String,
    pub uptime_seconds: u64,
    /// Analysis profile ("classic" or "extended")
    pub profile: String,
    /// Message of the most recent failed session action
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

/// GET /health
///
/// Does not take the session lock, so it answers while a generation runs.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime_seconds = Utc::now()
        .signed_duration_since(state.startup_time)
        .num_seconds()
        .max(0) as u64;

    Json(HealthResponse {
        status: "ok".to_string(),
        module: "moodcover-gen".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds,
        profile: state.controller.profile().name.clone(),
        last_error: state.last_error.read().await.clone(),
    })
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_error_omitted_until_an_action_fails() {
        let mut response = HealthResponse {
            status: "ok".to_string(),
            module: "moodcover-gen".to_string(),
            version: "0.1.0".to_string(),
            uptime_seconds: 3,
            profile: "classic".to_string(),
            last_error: None,
        };

        let healthy = serde_json::to_value(&response).unwrap();
        assert_eq!(healthy["profile"], "classic");
        assert!(healthy.get("last_error").is_none());

        response.last_error = Some("Not enough audio data to analyze the selection".to_string());
        let degraded = serde_json::to_value(&response).unwrap();
        assert_eq!(
            degraded["last_error"],
            "Not enough audio data to analyze the selection"
        );
    }
}
