use std::sync::Arc;

use mcqgen_core::{Difficulty, QuestionCount, QuestionEngine};

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub engine: Arc<dyn QuestionEngine>,
    /// Shared by every URL fetch so connections are pooled across requests.
    pub http: reqwest::Client,
    pub default_num: QuestionCount,
    pub default_difficulty: Difficulty,
}
