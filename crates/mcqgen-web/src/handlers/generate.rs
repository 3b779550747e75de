use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use std::sync::Arc;

use mcqgen_core::{CoreError, Difficulty, GenerationOptions, SourceKind};
use mcqgen_ingest::{GenerateError, Source, generate_mcqs_with_client};

use crate::state::AppState;
use crate::template;
use crate::upload::{self, UploadedFile};

/// An error page with the status it should be served under.
pub struct PageError {
    status: StatusCode,
    message: String,
}

impl PageError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<GenerateError> for PageError {
    fn from(e: GenerateError) -> Self {
        let status = if e.is_config_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self {
            status,
            message: e.to_string(),
        }
    }
}

impl From<CoreError> for PageError {
    fn from(e: CoreError) -> Self {
        GenerateError::from(e).into()
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        tracing::warn!(status = %self.status, error = %self.message, "generation request failed");
        (self.status, template::render_error(&self.message)).into_response()
    }
}

pub async fn generate(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Html<String>, PageError> {
    let fields = upload::parse_multipart(multipart, state.default_num)
        .await
        .map_err(PageError::bad_request)?;

    let kind: SourceKind = fields.source_type.parse()?;
    let difficulty = match fields.difficulty.as_deref() {
        Some(label) => label.parse::<Difficulty>()?,
        None => state.default_difficulty,
    };
    let source = build_source(kind, fields.file, fields.url)?;

    let options = GenerationOptions {
        num: fields.num,
        difficulty,
        learning_objective: fields.learning_objective,
        prompt_template: None,
    };

    let set = generate_mcqs_with_client(
        &source,
        kind.as_str(),
        &state.http,
        state.engine.as_ref(),
        &options,
    )
    .await?;
    let label = source.label();
    tracing::info!(questions = set.questions.len(), source = %label, "generated questions");

    Ok(template::render_result(
        &label,
        &mcqgen_core::format_mcqs(&set.questions),
    ))
}

/// Pick the form input matching the source type.
fn build_source(
    kind: SourceKind,
    file: Option<UploadedFile>,
    url: Option<String>,
) -> Result<Source, PageError> {
    match kind {
        SourceKind::Url => {
            let url = url.ok_or_else(|| PageError::bad_request("Please enter a URL."))?;
            Ok(Source::Url(url))
        }
        SourceKind::Pdf | SourceKind::Text => {
            let file = file.ok_or_else(|| {
                PageError::bad_request(format!("Please choose a {} file to upload.", kind))
            })?;
            Ok(Source::Bytes {
                name: Some(file.filename),
                data: file.data,
            })
        }
    }
}
