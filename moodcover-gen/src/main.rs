//! moodcover-gen - Playlist cover generator service
//!
//! Searches tracks, analyzes their preview clips and turns the mood of the
//! selection into a generated cover image. Serves a single-page UI and a
//! small JSON API on 127.0.0.1:5730 by default.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use moodcover_common::config::{load_toml_config, Credentials};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use moodcover_gen::config::{resolve_profile, ServiceEndpoints};
use moodcover_gen::services::{
    DeezerClient, FeatureExtractor, HuggingFaceClient, SessionController, SpotifyClient,
};
use moodcover_gen::AppState;

/// Command-line arguments for moodcover-gen
#[derive(Parser, Debug)]
#[command(name = "moodcover-gen")]
#[command(about = "Mood-based playlist cover generator")]
#[command(version)]
struct Args {
    /// Port to listen on (overrides [server] port)
    #[arg(short, long, env = "MOODCOVER_PORT")]
    port: Option<u16>,

    /// Address to bind (overrides [server] bind)
    #[arg(short, long)]
    bind: Option<String>,

    /// Config file (default: ~/.config/moodcover/config.toml)
    #[arg(short, long, env = "MOODCOVER_CONFIG")]
    config: Option<PathBuf>,

    /// Analysis profile: classic or extended (overrides [analysis] profile)
    #[arg(long, env = "MOODCOVER_PROFILE")]
    profile: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let loaded = load_toml_config(args.config.as_deref())
        .context("Failed to load configuration")?;
    let config = loaded.config;

    // RUST_LOG wins over [logging] level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("moodcover_gen={0},moodcover_common={0},tower_http=info", config.logging.level)
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting moodcover-gen (Playlist Cover Generator)");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    loaded.source.log();

    let credentials = Credentials::resolve(&config.credentials);
    for (name, present) in credentials.summary() {
        if present {
            info!(credential = name, "Credential configured");
        } else {
            warn!(credential = name, "Credential missing; dependent actions will fail");
        }
    }

    let profile = resolve_profile(&config.analysis, args.profile.as_deref())
        .context("Invalid analysis configuration")?;
    let endpoints = ServiceEndpoints::resolve(&config.endpoints);

    let catalog = SpotifyClient::new(
        credentials.spotify_client_id.clone(),
        credentials.spotify_client_secret.clone(),
        endpoints.spotify.clone(),
    )
    .context("Failed to build Spotify client")?;
    let previews = DeezerClient::new(endpoints.deezer_api_url.clone())
        .context("Failed to build Deezer client")?;
    let analyzer = FeatureExtractor::new(profile.tempo_correction)
        .context("Failed to build feature extractor")?;
    let generator = HuggingFaceClient::new(
        credentials.huggingface_api_key.clone(),
        endpoints.image_generation_url.clone(),
    )
    .context("Failed to build image generation client")?;

    let controller = SessionController::new(
        Arc::new(catalog),
        Arc::new(previews),
        Arc::new(analyzer),
        Arc::new(generator),
        profile,
    );

    let state = AppState::new(controller);
    let app = moodcover_gen::build_router(state);

    let bind = args.bind.unwrap_or(config.server.bind);
    let port = args.port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{}:{}", bind, port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", bind, port))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
