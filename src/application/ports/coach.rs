//! Coach service port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::audio::AnswerAudio;
use crate::domain::profile::CandidateProfile;
use crate::domain::session::Question;
use crate::domain::summary::InterviewSummary;

/// Errors from the remote coach service
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Service error: {0}")]
    ApiError(String),

    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// Result of starting a session
#[derive(Debug, Clone)]
pub struct SessionStart {
    /// Server-issued session identifier
    pub interview_id: String,
    /// The first question to pose
    pub first_question: Question,
    /// Total number of questions in the session
    pub total_questions: u32,
}

/// Result of submitting an answer.
///
/// Completion is a structured variant here; any wire-level sentinel the
/// service uses is mapped by the adapter and never leaks past this boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerOutcome {
    /// The next question to pose
    Next(Question),
    /// The service marked the session complete
    Completed,
}

/// Port for the remote interview scoring service
#[async_trait]
pub trait CoachService: Send + Sync {
    /// Start a session for the given profile.
    async fn start_interview(
        &self,
        profile: &CandidateProfile,
    ) -> Result<SessionStart, ServiceError>;

    /// Submit an answer for the given question.
    ///
    /// # Arguments
    /// * `interview_id` - The session identifier
    /// * `question` - The question being answered
    /// * `answer_text` - The committed answer text
    /// * `audio` - Optional finalized recording of the spoken answer
    async fn submit_answer(
        &self,
        interview_id: &str,
        question: &Question,
        answer_text: &str,
        audio: Option<&AnswerAudio>,
    ) -> Result<AnswerOutcome, ServiceError>;

    /// Fetch the aggregate feedback summary for a session.
    async fn fetch_summary(&self, interview_id: &str) -> Result<InterviewSummary, ServiceError>;
}
