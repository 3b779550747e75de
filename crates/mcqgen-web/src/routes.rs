use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::handlers;
use crate::state::AppState;

/// Uploads larger than this are rejected before reaching a handler.
const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

pub fn router(state: Arc<AppState>) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/", get(handlers::index::index))
        .route("/generate", post(handlers::generate::generate))
        .route("/health", get(handlers::index::health))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(trace_layer)
        .with_state(state)
}
