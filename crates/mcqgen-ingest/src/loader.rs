//! The loader capability shared by every source kind.

use std::future::Future;
use std::pin::Pin;

use mcqgen_core::{Document, SourceKind};

use crate::{IngestError, PdfLoader, Source, TextLoader, UrlLoader};

/// Acquire raw bytes from a source, then turn them into plain text.
///
/// Normalization and fingerprinting are not the loader's concern; [`load`]
/// applies them uniformly.
pub trait SourceLoader: Send + Sync {
    fn kind(&self) -> SourceKind;

    /// Fetch the raw bytes behind `source`.
    fn acquire<'a>(
        &'a self,
        source: &'a Source,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>, IngestError>> + Send + 'a>>;

    /// Extract plain (not yet normalized) text from acquired bytes.
    ///
    /// CPU-bound extractors run on tokio's blocking pool.
    fn extract_text(
        &self,
        raw: Vec<u8>,
    ) -> Pin<Box<dyn Future<Output = Result<String, IngestError>> + Send + '_>>;
}

/// Acquire, extract, normalize, fingerprint.
pub async fn load(loader: &dyn SourceLoader, source: &Source) -> Result<Document, IngestError> {
    let raw = loader.acquire(source).await?;
    let bytes = raw.len();
    let text = loader.extract_text(raw).await?;
    let document = Document::from_text(&text);

    tracing::debug!(
        kind = %loader.kind(),
        source = %source.label(),
        doc_id = %document.id,
        bytes,
        chars = document.content.chars().count(),
        "normalized document"
    );
    if document.content.is_empty() {
        tracing::warn!(kind = %loader.kind(), "document has no text content");
    }

    Ok(document)
}

/// The loader for a given source kind.
///
/// URL loaders get a fresh HTTP client; long-lived callers should hold one
/// client and use [`loader_with_client`].
pub fn loader_for(kind: SourceKind) -> Box<dyn SourceLoader> {
    loader_with_client(kind, &reqwest::Client::new())
}

/// Like [`loader_for`], with URL fetches going through `client`.
pub fn loader_with_client(kind: SourceKind, client: &reqwest::Client) -> Box<dyn SourceLoader> {
    match kind {
        SourceKind::Pdf => Box::new(PdfLoader::default()),
        SourceKind::Text => Box::new(TextLoader),
        SourceKind::Url => Box::new(UrlLoader::with_client(client.clone())),
    }
}

/// Bytes from an upload or a local file; URL sources are rejected.
pub(crate) fn read_local(source: &Source, kind: SourceKind) -> Result<Vec<u8>, IngestError> {
    match source {
        Source::Bytes { data, .. } => Ok(data.clone()),
        Source::File(path) => Ok(std::fs::read(path)?),
        Source::Url(_) => Err(IngestError::SourceMismatch {
            kind,
            given: source.describe(),
        }),
    }
}
