//! Full flow through the router with the real clients pointed at one stub

mod helpers;

use axum::{
    body::Body,
    extract::Query,
    http::{Request, StatusCode},
    routing::{get, post},
    Json, Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tower::util::ServiceExt;

use helpers::{click_track_wav, spawn_stub, ClickTrack};
use moodcover_gen::models::AnalysisProfile;
use moodcover_gen::services::{
    DeezerClient, FeatureExtractor, HuggingFaceClient, SessionController, SpotifyClient,
    SpotifyEndpoints,
};
use moodcover_gen::AppState;

/// One server standing in for Spotify, Deezer, the CDN and Hugging Face
async fn spawn_upstreams() -> String {
    let wav = click_track_wav(&ClickTrack::default());

    spawn_stub(move |base| {
        let deezer_base = base.clone();
        Router::new()
            .route(
                "/api/token",
                post(|| async { Json(json!({"access_token": "t", "expires_in": 3600})) }),
            )
            .route(
                "/v1/search",
                get(|| async {
                    Json(json!({"tracks": {"items": [
                        {"name": "Pulse", "artists": [{"name": "Metronome"}], "album": {"images": []}},
                        {"name": "Hidden", "artists": [{"name": "Nobody"}], "album": {"images": []}}
                    ]}}))
                }),
            )
            .route(
                "/search",
                get(move |Query(params): Query<HashMap<String, String>>| {
                    let base = deezer_base.clone();
                    async move {
                        let q = params.get("q").cloned().unwrap_or_default();
                        if q.starts_with("Pulse") {
                            Json(json!({"data": [{
                                "title": "Pulse",
                                "preview": format!("{}/cdn/pulse.wav", base),
                                "artist": {"name": "Metronome"}
                            }]}))
                        } else {
                            Json(json!({"data": []}))
                        }
                    }
                }),
            )
            .route("/cdn/pulse.wav", get(move || async move { wav }))
            .route(
                "/hf",
                post(|| async { vec![0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10, b'J', b'F', b'I', b'F'] }),
            )
    })
    .await
}

async fn create_app(base: &str) -> axum::Router {
    let profile = AnalysisProfile::classic();
    let controller = SessionController::new(
        Arc::new(
            SpotifyClient::new(
                Some("id".to_string()),
                Some("secret".to_string()),
                SpotifyEndpoints {
                    accounts_url: base.to_string(),
                    api_url: base.to_string(),
                },
            )
            .unwrap(),
        ),
        Arc::new(DeezerClient::new(Some(base.to_string())).unwrap()),
        Arc::new(FeatureExtractor::new(profile.tempo_correction).unwrap()),
        Arc::new(
            HuggingFaceClient::new(Some("hf".to_string()), Some(format!("{}/hf", base))).unwrap(),
        ),
        profile,
    );
    moodcover_gen::build_router(AppState::new(controller))
}

async fn post_json(app: &axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_generate_cover_from_real_preview() {
    let base = spawn_upstreams().await;
    let app = create_app(&base).await;

    let (status, session) = post_json(&app, "/api/search", json!({"query": "pulse"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["candidates"].as_array().unwrap().len(), 2);
    assert!(session["candidates"][1].get("preview_url").is_none());

    let (status, _) = post_json(
        &app,
        "/api/selection",
        json!({"tracks": [
            {"title": "Pulse", "artist": "Metronome"},
            {"title": "Hidden", "artist": "Nobody"}
        ]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, cover) =
        post_json(&app, "/api/generate", json!({"style": "abstract", "color": "teal"})).await;
    assert_eq!(status, StatusCode::OK, "{}", cover);
    assert_eq!(cover["content_type"], "image/jpeg");
    assert_eq!(cover["analyzed"], json!([{"title": "Pulse", "artist": "Metronome"}]));
    assert_eq!(cover["skipped"], json!([{"title": "Hidden", "artist": "Nobody"}]));

    let tempo = cover["features"]["tempo"].as_f64().unwrap();
    let expected = ClickTrack::default().bpm();
    assert!((tempo - expected).abs() < 5.0, "tempo {}", tempo);

    // ~117 BPM sits between classic's 110 and 130 boundaries
    let prompt = cover["prompt"].as_str().unwrap();
    assert!(prompt.contains("A moderately fast tempo"));
    assert!(prompt.contains("teal"));
}
