//! Question-generation engine trait and implementations.

pub mod mock;
pub mod openai;

use std::future::Future;
use std::pin::Pin;

use serde::Serialize;
use thiserror::Error;

use crate::QuestionSet;

pub use openai::OpenAiEngine;

/// The request shape handed to an engine: `{topic, num, difficulty_level, prompt_template}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineRequest {
    pub topic: String,
    pub num: u8,
    pub difficulty_level: String,
    pub prompt_template: String,
}

impl EngineRequest {
    /// Substitute `{num}`, `{difficulty_level}` and `{topic}` into the template.
    pub fn render_prompt(&self) -> String {
        self.prompt_template
            .replace("{num}", &self.num.to_string())
            .replace("{difficulty_level}", &self.difficulty_level)
            // Topic last so document text containing braces is left untouched.
            .replace("{topic}", &self.topic)
    }
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("no API key configured (set OPENAI_API_KEY or [engine].api_key)")]
    MissingApiKey,
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("engine returned HTTP {status}: {body}")]
    Api { status: u16, body: String },
    #[error("could not parse engine response: {0}")]
    Parse(String),
}

/// An external service that turns a topic into multiple-choice questions.
pub trait QuestionEngine: Send + Sync {
    /// Short name used in logs (e.g. "OpenAI").
    fn name(&self) -> &str;

    /// Generate questions for the given request.
    fn generate_mcq<'a>(
        &'a self,
        request: &'a EngineRequest,
    ) -> Pin<Box<dyn Future<Output = Result<QuestionSet, EngineError>> + Send + 'a>>;
}
