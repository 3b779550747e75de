use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod backend;
pub mod config;
pub mod config_file;
pub mod engine;
pub mod format;
pub mod generate;
pub mod text;

// Re-export for convenience
pub use backend::{BackendError, PdfBackend};
pub use config::EngineConfig;
pub use engine::{EngineError, EngineRequest, QuestionEngine};
pub use format::format_mcqs;
pub use generate::{DEFAULT_PROMPT_TEMPLATE, generate_mcq};
pub use text::{fingerprint, normalize};

/// A loaded document: normalized content plus its content hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    /// Hex SHA-256 of `content`.
    pub id: String,
    pub content: String,
}

impl Document {
    /// Normalize raw extracted text and fingerprint the result.
    pub fn from_text(raw: &str) -> Self {
        let content = normalize(raw);
        let id = fingerprint(&content);
        Self { id, content }
    }
}

/// A single multiple-choice question as produced by the generation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "question", alias = "prompt")]
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl Question {
    /// Whether `correct_answer` is one of `options`. Never enforced by the pipeline.
    pub fn answer_in_options(&self) -> bool {
        self.options.iter().any(|o| o == &self.correct_answer)
    }
}

/// The engine's answer to one generation request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSet {
    pub questions: Vec<Question>,
}

/// Where document content comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Pdf,
    Text,
    Url,
}

impl SourceKind {
    pub const ALL: [SourceKind; 3] = [SourceKind::Pdf, SourceKind::Text, SourceKind::Url];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Pdf => "pdf",
            SourceKind::Text => "text",
            SourceKind::Url => "url",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pdf" => Ok(SourceKind::Pdf),
            "text" => Ok(SourceKind::Text),
            "url" => Ok(SourceKind::Url),
            other => Err(CoreError::UnsupportedSourceType(other.to_string())),
        }
    }
}

/// Difficulty label forwarded to the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(CoreError::UnsupportedDifficulty(s.to_string())),
        }
    }
}

/// Number of questions to request, always within `MIN..=MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QuestionCount(u8);

impl QuestionCount {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(n: i64) -> Result<Self, CoreError> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&n) {
            Ok(Self(n as u8))
        } else {
            Err(CoreError::CountOutOfRange(n))
        }
    }

    /// Clamp any integer into the allowed range.
    pub fn clamped(n: i64) -> Self {
        Self(n.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl Default for QuestionCount {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl fmt::Display for QuestionCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User-chosen parameters for one generation request.
#[derive(Debug, Clone, Default)]
pub struct GenerationOptions {
    pub num: QuestionCount,
    pub difficulty: Difficulty,
    pub learning_objective: Option<String>,
    /// Custom template; `None` selects [`DEFAULT_PROMPT_TEMPLATE`].
    pub prompt_template: Option<String>,
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("unsupported source type '{0}'; use 'pdf', 'text', or 'url'")]
    UnsupportedSourceType(String),
    #[error("unsupported difficulty '{0}'; use 'Easy', 'Medium', or 'Hard'")]
    UnsupportedDifficulty(String),
    #[error("question count {0} is outside 1..=10")]
    CountOutOfRange(i64),
    #[error("generation engine error: {0}")]
    Engine(#[from] EngineError),
}

impl CoreError {
    /// True for errors caused by bad caller configuration rather than I/O.
    pub fn is_config_error(&self) -> bool {
        !matches!(self, CoreError::Engine(_))
    }
}
