use std::future::Future;
use std::io::Write;
use std::pin::Pin;
use std::sync::Arc;

use mcqgen_core::{PdfBackend, SourceKind};

use crate::loader::{SourceLoader, read_local};
use crate::{IngestError, Source};

/// Loads PDF documents through a [`PdfBackend`].
///
/// Backends read from a path, so uploaded bytes are spilled to a temporary
/// `.pdf` file that is removed once extraction finishes. Both the spill and
/// the backend call happen on the blocking pool (MuPDF is not async).
pub struct PdfLoader {
    backend: Option<Arc<dyn PdfBackend>>,
}

impl PdfLoader {
    pub fn with_backend(backend: Arc<dyn PdfBackend>) -> Self {
        Self {
            backend: Some(backend),
        }
    }
}

#[cfg(feature = "pdf")]
impl Default for PdfLoader {
    fn default() -> Self {
        Self::with_backend(Arc::new(mcqgen_pdf_mupdf::MupdfBackend::default()))
    }
}

#[cfg(not(feature = "pdf"))]
impl Default for PdfLoader {
    fn default() -> Self {
        Self { backend: None }
    }
}

fn extract_blocking(backend: &dyn PdfBackend, raw: &[u8]) -> Result<String, IngestError> {
    let mut file = tempfile::Builder::new()
        .prefix("mcqgen-")
        .suffix(".pdf")
        .tempfile()?;
    file.write_all(raw)?;
    file.flush()?;

    Ok(backend.extract_text(file.path())?)
}

impl SourceLoader for PdfLoader {
    fn kind(&self) -> SourceKind {
        SourceKind::Pdf
    }

    fn acquire<'a>(
        &'a self,
        source: &'a Source,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>, IngestError>> + Send + 'a>> {
        Box::pin(async move { read_local(source, SourceKind::Pdf) })
    }

    fn extract_text(
        &self,
        raw: Vec<u8>,
    ) -> Pin<Box<dyn Future<Output = Result<String, IngestError>> + Send + '_>> {
        let backend = self.backend.clone();
        Box::pin(async move {
            let backend = backend.ok_or(IngestError::NoPdfSupport)?;
            tokio::task::spawn_blocking(move || extract_blocking(backend.as_ref(), &raw)).await?
        })
    }
}
