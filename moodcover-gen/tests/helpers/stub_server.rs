//! Local stand-ins for the upstream HTTP services

use axum::Router;
use std::collections::BTreeSet;

/// Serve the router built by `build` on an ephemeral local port
///
/// `build` receives the base URL so handlers can hand out links back to
/// the stub (preview locators, for example).
pub async fn spawn_stub<F>(build: F) -> String
where
    F: FnOnce(String) -> Router,
{
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let router = build(base_url.clone());

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    base_url
}

/// Staged preview files currently in the system temp directory
pub fn preview_temp_files() -> BTreeSet<String> {
    std::fs::read_dir(std::env::temp_dir())
        .map(|entries| {
            entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.file_name().to_string_lossy().to_string())
                .filter(|name| name.starts_with("moodcover-preview-"))
                .collect()
        })
        .unwrap_or_default()
}
