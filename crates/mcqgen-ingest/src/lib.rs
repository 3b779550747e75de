use std::path::PathBuf;

use thiserror::Error;

pub mod loader;
pub mod pdf;
pub mod text;
pub mod url;

// Re-export domain types for convenience
pub use mcqgen_core::{Document, GenerationOptions, QuestionSet, SourceKind};
pub use loader::{SourceLoader, load, loader_for, loader_with_client};
pub use pdf::PdfLoader;
pub use text::TextLoader;
pub use url::{UrlLoader, visible_text};

use mcqgen_core::{CoreError, QuestionEngine};

/// Raw input handed to a loader.
#[derive(Debug, Clone)]
pub enum Source {
    /// Uploaded bytes, with the client-side filename when known.
    Bytes { name: Option<String>, data: Vec<u8> },
    /// A file on the local filesystem.
    File(PathBuf),
    /// A web address to fetch.
    Url(String),
}

impl Source {
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        Source::Bytes {
            name: None,
            data: data.into(),
        }
    }

    /// Short label for error messages and logs.
    pub fn describe(&self) -> &'static str {
        match self {
            Source::Bytes { .. } => "uploaded bytes",
            Source::File(_) => "a file path",
            Source::Url(_) => "a URL",
        }
    }

    /// Human-readable name: upload filename, file path, or URL.
    pub fn label(&self) -> String {
        match self {
            Source::Bytes { name, .. } => name.clone().unwrap_or_else(|| "upload".to_string()),
            Source::File(path) => path.display().to_string(),
            Source::Url(url) => url.clone(),
        }
    }
}

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("PDF extraction error: {0}")]
    Pdf(#[from] mcqgen_core::BackendError),
    #[error("text is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{kind} loader cannot read {given}")]
    SourceMismatch {
        kind: SourceKind,
        given: &'static str,
    },
    #[error("PDF support not compiled in (enable the `pdf` feature of mcqgen-ingest)")]
    NoPdfSupport,
    #[error("extraction task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Failure anywhere in the load-then-generate sequence.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Ingest(#[from] IngestError),
}

impl GenerateError {
    /// True when the caller asked for something unsupported (e.g. an unknown source type).
    pub fn is_config_error(&self) -> bool {
        match self {
            GenerateError::Core(e) => e.is_config_error(),
            GenerateError::Ingest(IngestError::SourceMismatch { .. }) => true,
            GenerateError::Ingest(_) => false,
        }
    }
}

/// Load `source` with the loader for `source_type`, then ask `engine` for questions.
///
/// `source_type` must be `"pdf"`, `"text"` or `"url"`; anything else fails
/// with [`CoreError::UnsupportedSourceType`] before any I/O happens.
pub async fn generate_mcqs_from_data(
    source: &Source,
    source_type: &str,
    engine: &dyn QuestionEngine,
    options: &GenerationOptions,
) -> Result<QuestionSet, GenerateError> {
    generate_mcqs_with_client(source, source_type, &reqwest::Client::new(), engine, options).await
}

/// [`generate_mcqs_from_data`] with URL sources fetched through a shared `client`.
pub async fn generate_mcqs_with_client(
    source: &Source,
    source_type: &str,
    client: &reqwest::Client,
    engine: &dyn QuestionEngine,
    options: &GenerationOptions,
) -> Result<QuestionSet, GenerateError> {
    let kind: SourceKind = source_type.parse()?;
    let loader = loader_with_client(kind, client);
    let document = load(loader.as_ref(), source).await?;
    tracing::info!(kind = %kind, source = %source.label(), doc_id = %document.id, "document loaded");
    Ok(mcqgen_core::generate_mcq(engine, &document.content, options).await?)
}
