//! moodcover-gen library interface
//!
//! Exposes the services, models and router for the binary and for
//! integration testing.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod types;
pub mod utils;

pub use crate::error::{ApiError, ApiResult, CoverError, CoverResult};

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tower_http::trace::TraceLayer;

use crate::models::SessionState;
use crate::services::SessionController;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Service handles and analysis profile
    pub controller: Arc<SessionController>,
    /// The single user session; held for the whole of each action
    pub session: Arc<Mutex<SessionState>>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
    /// Last error for diagnostic purposes
    pub last_error: Arc<RwLock<Option<String>>>,
}

impl AppState {
    pub fn new(controller: SessionController) -> Self {
        Self {
            controller: Arc::new(controller),
            session: Arc::new(Mutex::new(SessionState::default())),
            startup_time: Utc::now(),
            last_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Remember `message` for `/health`
    pub async fn record_error(&self, message: impl Into<String>) {
        *self.last_error.write().await = Some(message.into());
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // UI routes (HTML page)
        .merge(api::ui_routes())
        // API routes
        .merge(api::session_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
