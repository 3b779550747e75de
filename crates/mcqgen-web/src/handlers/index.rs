use axum::extract::{Query, State};
use axum::response::Html;
use serde::Deserialize;
use std::sync::Arc;

use mcqgen_core::SourceKind;

use crate::state::AppState;
use crate::template;

#[derive(Deserialize)]
pub struct IndexQuery {
    pub source_type: Option<String>,
}

pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IndexQuery>,
) -> Html<String> {
    // Unknown selector values fall back to the first choice, like a fresh form.
    let kind = query
        .source_type
        .and_then(|s| s.parse::<SourceKind>().ok())
        .unwrap_or(SourceKind::Pdf);
    template::render_index(kind, state.default_num, state.default_difficulty)
}

pub async fn health() -> &'static str {
    "ok"
}
