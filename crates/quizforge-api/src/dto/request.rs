use serde::Deserialize;

// Fields are optional so a missing key reaches the handler and gets the
// endpoint's own error message.

/// Answer evaluation request body
#[derive(Debug, Default, Deserialize)]
pub struct EvaluateAnswerRequest {
    pub student_answer: Option<String>,
    pub model_answer: Option<String>,
}

impl EvaluateAnswerRequest {
    /// Both answers when both keys are present. Blank answers still count.
    pub fn answers(&self) -> Option<(&str, &str)> {
        Some((self.student_answer.as_deref()?, self.model_answer.as_deref()?))
    }
}

/// Web search request body
#[derive(Debug, Default, Deserialize)]
pub struct WebSearchRequest {
    pub query: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateThreadRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateMessageRequest {
    pub text: Option<String>,
    pub sender: Option<String>,
}
