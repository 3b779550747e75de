use crate::engine::{EngineRequest, QuestionEngine};
use crate::{CoreError, GenerationOptions, QuestionSet};

/// Template used when the caller supplies none.
pub const DEFAULT_PROMPT_TEMPLATE: &str = "\
Generate {num} multiple-choice question (MCQ) based on the given topic and level.
Provide the question, four answer options, and the correct answer.

Topic: {topic}
Difficulty Level: {difficulty_level}
";

/// Build the template for a request, folding in the learning objective.
///
/// The default template gains a `Learning Objective:` line; a custom
/// template gets its `{learning_objective}` placeholder filled (or blanked).
pub fn prompt_template_for(options: &GenerationOptions) -> String {
    let objective = options
        .learning_objective
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    match (&options.prompt_template, objective) {
        (Some(custom), obj) => custom.replace("{learning_objective}", obj.unwrap_or("")),
        (None, Some(obj)) => format!("{DEFAULT_PROMPT_TEMPLATE}Learning Objective: {obj}\n"),
        (None, None) => DEFAULT_PROMPT_TEMPLATE.to_string(),
    }
}

/// Ask `engine` for questions about `topic`.
///
/// The engine's question set is returned as-is: no filtering, reordering,
/// or validation of answers.
pub async fn generate_mcq(
    engine: &dyn QuestionEngine,
    topic: &str,
    options: &GenerationOptions,
) -> Result<QuestionSet, CoreError> {
    let request = EngineRequest {
        topic: topic.to_string(),
        num: options.num.get(),
        difficulty_level: options.difficulty.label().to_string(),
        prompt_template: prompt_template_for(options),
    };

    tracing::debug!(
        engine = engine.name(),
        num = request.num,
        topic_chars = topic.chars().count(),
        "generating questions"
    );

    Ok(engine.generate_mcq(&request).await?)
}
