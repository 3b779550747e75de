use std::future::Future;
use std::pin::Pin;

use mcqgen_core::SourceKind;

use crate::loader::{SourceLoader, read_local};
use crate::{IngestError, Source};

/// Loads UTF-8 plain text from an upload or a local file.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextLoader;

impl SourceLoader for TextLoader {
    fn kind(&self) -> SourceKind {
        SourceKind::Text
    }

    fn acquire<'a>(
        &'a self,
        source: &'a Source,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>, IngestError>> + Send + 'a>> {
        Box::pin(async move { read_local(source, SourceKind::Text) })
    }

    fn extract_text(
        &self,
        raw: Vec<u8>,
    ) -> Pin<Box<dyn Future<Output = Result<String, IngestError>> + Send + '_>> {
        Box::pin(async move { Ok(String::from_utf8(raw)?) })
    }
}
