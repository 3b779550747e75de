//! Mock generation engine for testing.

use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{EngineError, EngineRequest, QuestionEngine};
use crate::{Question, QuestionSet};

/// A configurable mock response for [`MockEngine`].
#[derive(Clone, Debug)]
pub enum MockResponse {
    /// Return exactly these questions.
    Questions(Vec<Question>),
    /// Build `num` questions from the request's topic.
    Echo,
    /// Simulate an engine failure.
    Error(String),
}

/// A hand-rolled mock implementing [`QuestionEngine`] for tests.
///
/// Records every request it receives and counts calls.
pub struct MockEngine {
    response: MockResponse,
    requests: Mutex<Vec<EngineRequest>>,
    call_count: AtomicUsize,
}

impl MockEngine {
    pub fn new(response: MockResponse) -> Self {
        Self {
            response,
            requests: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    /// A mock that answers each request with `num` questions about its topic.
    pub fn echo() -> Self {
        Self::new(MockResponse::Echo)
    }

    /// How many times `generate_mcq()` has been called.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<EngineRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

fn echo_questions(request: &EngineRequest) -> Vec<Question> {
    let subject: String = request.topic.chars().take(40).collect();
    (1..=request.num)
        .map(|i| Question {
            prompt: format!("Question {i} about: {subject}"),
            options: vec![
                subject.clone(),
                "None of the above".to_string(),
                "All of the above".to_string(),
                "Cannot be determined".to_string(),
            ],
            correct_answer: subject.clone(),
        })
        .collect()
}

impl QuestionEngine for MockEngine {
    fn name(&self) -> &str {
        "Mock"
    }

    fn generate_mcq<'a>(
        &'a self,
        request: &'a EngineRequest,
    ) -> Pin<Box<dyn Future<Output = Result<QuestionSet, EngineError>> + Send + 'a>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        let response = self.response.clone();

        Box::pin(async move {
            match response {
                MockResponse::Questions(questions) => Ok(QuestionSet { questions }),
                MockResponse::Echo => Ok(QuestionSet {
                    questions: echo_questions(request),
                }),
                MockResponse::Error(msg) => Err(EngineError::Parse(msg)),
            }
        })
    }
}
