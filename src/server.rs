//! Router assembly and the HTTP listener.

use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::config::Settings;
use crate::handler::{analyze_image, index, AppState};
use crate::provider::OpenAiClient;

pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/grocery", post(analyze_image))
        .route("/api/health", get(|| async { "OK" }))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Builds the provider client from `settings` and serves until the listener fails.
pub async fn run(settings: Settings) -> Result<()> {
    let client = OpenAiClient::new(settings.api_key.clone(), &settings.base_url);
    info!(endpoint = client.endpoint(), "provider configured");

    let view = settings.profile.view;
    let state = AppState::new(Arc::new(client), settings.profile);
    let app = router(state, settings.max_upload_bytes);

    let listener = TcpListener::bind(settings.bind_addr).await?;
    info!(
        "🚀 Server running on http://{} ({} view)",
        listener.local_addr()?,
        view.as_str()
    );

    axum::serve(listener, app).await?;
    Ok(())
}
