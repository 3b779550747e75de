use std::future::Future;
use std::pin::Pin;

use mcqgen_core::SourceKind;

use crate::loader::SourceLoader;
use crate::{IngestError, Source};

/// Elements whose text never renders.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Elements that start a new line of text when rendered.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "br", "caption", "dd", "details", "div",
    "dl", "dt", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "head", "header", "hr", "html", "li", "main", "nav", "ol", "option", "p", "pre", "section",
    "summary", "table", "tbody", "td", "tfoot", "th", "thead", "title", "tr", "ul",
];

/// Fetches a web page and extracts its visible text.
///
/// No timeout or retry is configured on the request.
#[derive(Debug, Clone, Default)]
pub struct UrlLoader {
    client: reqwest::Client,
}

impl UrlLoader {
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl SourceLoader for UrlLoader {
    fn kind(&self) -> SourceKind {
        SourceKind::Url
    }

    fn acquire<'a>(
        &'a self,
        source: &'a Source,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>, IngestError>> + Send + 'a>> {
        Box::pin(async move {
            let Source::Url(url) = source else {
                return Err(IngestError::SourceMismatch {
                    kind: SourceKind::Url,
                    given: source.describe(),
                });
            };

            let resp = self.client.get(url.as_str()).send().await?;

            // The page is parsed whatever the status; error pages still have text.
            let status = resp.status();
            if !status.is_success() {
                tracing::warn!(url = %url, status = %status, "non-success response, using body anyway");
            }

            // Decoded with the charset from Content-Type, so the bytes are UTF-8 from here on.
            Ok(resp.text().await?.into_bytes())
        })
    }

    fn extract_text(
        &self,
        raw: Vec<u8>,
    ) -> Pin<Box<dyn Future<Output = Result<String, IngestError>> + Send + '_>> {
        Box::pin(async move {
            // scraper's DOM is !Send, so parsing stays inside one blocking task.
            let text =
                tokio::task::spawn_blocking(move || visible_text(&String::from_utf8_lossy(&raw)))
                    .await?;
            Ok(text)
        })
    }
}

fn is_block(node: &scraper::node::Node) -> bool {
    node.as_element()
        .is_some_and(|el| BLOCK_ELEMENTS.contains(&el.name()))
}

/// Text of an HTML document outside script/style-like elements.
///
/// Text nodes inside the same block run together, so inline markup such as
/// `<b>P</b>aris` stays one word; block boundaries and `<br>` become spaces.
/// Other whitespace is left for the normalizer.
pub fn visible_text(html: &str) -> String {
    let document = scraper::Html::parse_document(html);
    let mut out = String::new();
    let mut last_block = None;
    let mut crossed_block = false;

    for node in document.root_element().descendants() {
        if is_block(node.value()) {
            crossed_block = true;
            continue;
        }
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
        });
        if hidden {
            continue;
        }

        let block = node
            .ancestors()
            .find(|ancestor| is_block(ancestor.value()))
            .map(|ancestor| ancestor.id());
        if !out.is_empty() && (crossed_block || block != last_block) {
            out.push(' ');
        }
        out.push_str(text);
        last_block = block;
        crossed_block = false;
    }

    out
}
