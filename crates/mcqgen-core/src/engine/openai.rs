use std::future::Future;
use std::pin::Pin;

use serde_json::json;

use super::{EngineError, EngineRequest, QuestionEngine};
use crate::config::EngineConfig;
use crate::{Question, QuestionSet};

const SYSTEM_PROMPT: &str = "You write multiple-choice questions. Respond with a single JSON \
object of the form {\"questions\": [{\"question\": string, \"options\": [string, string, \
string, string], \"correct_answer\": string}]}. The correct_answer must be copied verbatim \
from options. Do not add any other keys or commentary.";

/// Generation engine backed by an OpenAI-compatible chat-completions API.
pub struct OpenAiEngine {
    client: reqwest::Client,
    config: EngineConfig,
}

impl OpenAiEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: EngineConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

impl QuestionEngine for OpenAiEngine {
    fn name(&self) -> &str {
        "OpenAI"
    }

    fn generate_mcq<'a>(
        &'a self,
        request: &'a EngineRequest,
    ) -> Pin<Box<dyn Future<Output = Result<QuestionSet, EngineError>> + Send + 'a>> {
        Box::pin(async move {
            let api_key = self
                .config
                .api_key
                .as_deref()
                .ok_or(EngineError::MissingApiKey)?;

            let body = json!({
                "model": self.config.model,
                "temperature": self.config.temperature,
                "response_format": { "type": "json_object" },
                "messages": [
                    { "role": "system", "content": SYSTEM_PROMPT },
                    { "role": "user", "content": request.render_prompt() },
                ],
            });

            let url = self.endpoint();
            tracing::info!(
                model = %self.config.model,
                num = request.num,
                difficulty = %request.difficulty_level,
                "requesting questions"
            );

            let resp = self
                .client
                .post(&url)
                .bearer_auth(api_key)
                .json(&body)
                .send()
                .await?;

            let status = resp.status();
            if !status.is_success() {
                let body = resp.text().await.unwrap_or_default();
                return Err(EngineError::Api {
                    status: status.as_u16(),
                    body,
                });
            }

            let data: serde_json::Value = resp.json().await?;
            let content = data["choices"][0]["message"]["content"]
                .as_str()
                .ok_or_else(|| EngineError::Parse("missing choices[0].message.content".into()))?;

            let set = parse_question_set(content)?;
            tracing::debug!(questions = set.questions.len(), "engine returned questions");
            Ok(set)
        })
    }
}

/// Parse the model's JSON content into a [`QuestionSet`].
///
/// Accepts `{"questions": [...]}` or a bare array of questions, optionally
/// wrapped in a Markdown code fence.
pub fn parse_question_set(content: &str) -> Result<QuestionSet, EngineError> {
    let trimmed = strip_code_fence(content.trim());

    if let Ok(set) = serde_json::from_str::<QuestionSet>(trimmed) {
        return Ok(set);
    }
    serde_json::from_str::<Vec<Question>>(trimmed)
        .map(|questions| QuestionSet { questions })
        .map_err(|e| EngineError::Parse(e.to_string()))
}

fn strip_code_fence(s: &str) -> &str {
    let Some(rest) = s.strip_prefix("```") else {
        return s;
    };
    // Drop the optional language tag on the opening fence line.
    let rest = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}
