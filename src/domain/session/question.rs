//! Interview question value object

use std::fmt;

/// A question posed by the coach service.
///
/// Questions are either a plain prompt or a structured prompt carrying an
/// embedded reference answer. The prompt text doubles as the question's
/// identifier on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    reference_answer: Option<String>,
}

impl Question {
    /// Create a plain text question
    pub fn plain(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            reference_answer: None,
        }
    }

    /// Create a question carrying a reference answer
    pub fn with_reference(prompt: impl Into<String>, reference_answer: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            reference_answer: Some(reference_answer.into()),
        }
    }

    /// The prompt shown to the candidate (also the wire identifier)
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// The embedded reference answer, if any
    pub fn reference_answer(&self) -> Option<&str> {
        self.reference_answer.as_deref()
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_question() {
        let q = Question::plain("Tell me about a challenge...");
        assert_eq!(q.prompt(), "Tell me about a challenge...");
        assert!(q.reference_answer().is_none());
    }

    #[test]
    fn structured_question() {
        let q = Question::with_reference("What is ownership?", "Memory safety without GC");
        assert_eq!(q.prompt(), "What is ownership?");
        assert_eq!(q.reference_answer(), Some("Memory safety without GC"));
    }
}
