pub mod capture;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;

use std::sync::Arc;

use axum::Router;
use tokio::sync::Semaphore;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::Config;

/// Shared application state, built once at startup.
pub struct AppState {
    pub config: Config,
    /// Admission control: one permit per simultaneously running browser
    /// instance. Requests past the cap wait here instead of launching.
    pub capture_slots: Semaphore,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let slots = config.max_captures.max(1);
        Self {
            config,
            capture_slots: Semaphore::new(slots),
        }
    }
}

/// Build the service router: the screenshot endpoint plus a static mount
/// of the image folder, so every saved capture is fetchable under the
/// same path the response reports.
pub fn app(state: Arc<AppState>) -> Router {
    let static_mount = format!("/{}", state.config.folder.trim_matches('/'));
    Router::new()
        .merge(handlers::routes())
        .nest_service(&static_mount, ServeDir::new(&state.config.folder))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
