//! HTTP coach service adapter
//!
//! Talks to the remote interview scoring service. The wire contract's
//! `"Interview completed"` sentinel is mapped to the structured
//! `AnswerOutcome::Completed` here and never exposed further in.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{AnswerOutcome, CoachService, ServiceError, SessionStart};
use crate::domain::audio::AnswerAudio;
use crate::domain::profile::{CandidateProfile, ExperienceLevel, InterviewDomain};
use crate::domain::session::Question;
use crate::domain::summary::{FeedbackScores, InterviewSummary, ResponseReview};

/// Wire value of `next_question` that signals session completion
const COMPLETION_SENTINEL: &str = "Interview completed";

// Request types

#[derive(Debug, Serialize)]
struct StartInterviewRequest<'a> {
    name: &'a str,
    experience_level: &'a str,
    domain: &'a str,
}

// Response types

/// A question on the wire: either a bare prompt string or a structured
/// object carrying a reference answer
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum QuestionDto {
    Structured {
        question: String,
        reference_answer: Option<String>,
    },
    Plain(String),
}

impl From<QuestionDto> for Question {
    fn from(dto: QuestionDto) -> Self {
        match dto {
            QuestionDto::Plain(prompt) => Question::plain(prompt),
            QuestionDto::Structured {
                question,
                reference_answer: Some(reference),
            } => Question::with_reference(question, reference),
            QuestionDto::Structured {
                question,
                reference_answer: None,
            } => Question::plain(question),
        }
    }
}

#[derive(Debug, Deserialize)]
struct StartInterviewResponse {
    interview_id: String,
    question: QuestionDto,
    total_questions: u32,
}

#[derive(Debug, Deserialize)]
struct SubmitAnswerResponse {
    next_question: QuestionDto,
}

#[derive(Debug, Deserialize)]
struct UserProfileDto {
    name: String,
    experience_level: String,
    domain: String,
}

#[derive(Debug, Deserialize)]
struct FeedbackDto {
    clarity_score: f64,
    relevance_score: f64,
    confidence_score: f64,
    #[serde(default)]
    improvement_tips: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseDto {
    question: String,
    answer: String,
    audio_transcription: Option<String>,
    feedback: FeedbackDto,
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    user_profile: UserProfileDto,
    responses: Vec<ResponseDto>,
}

/// Coach service client over HTTP
#[derive(Debug, Clone)]
pub struct HttpCoachService {
    base_url: String,
    client: reqwest::Client,
}

impl HttpCoachService {
    /// Create a client for the service at the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn start_url(&self) -> String {
        format!("{}/start_interview", self.base_url)
    }

    fn submit_url(&self) -> String {
        format!("{}/submit_answer/", self.base_url)
    }

    fn summary_url(&self, interview_id: &str) -> String {
        format!("{}/interview_summary/{}", self.base_url, interview_id)
    }

    /// Surface a non-success status as an API error with the body text
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ServiceError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ServiceError::ApiError(format!("HTTP {}: {}", status, body)));
        }
        Ok(response)
    }

    fn map_outcome(dto: QuestionDto) -> AnswerOutcome {
        if let QuestionDto::Plain(ref text) = dto {
            if text == COMPLETION_SENTINEL {
                return AnswerOutcome::Completed;
            }
        }
        AnswerOutcome::Next(dto.into())
    }

    fn map_summary(dto: SummaryResponse) -> Result<InterviewSummary, ServiceError> {
        let level: ExperienceLevel = dto
            .user_profile
            .experience_level
            .parse()
            .map_err(|e: crate::domain::error::InvalidExperienceLevelError| {
                ServiceError::ParseError(e.to_string())
            })?;
        let domain: InterviewDomain = dto
            .user_profile
            .domain
            .parse()
            .map_err(|e: crate::domain::error::InvalidDomainError| {
                ServiceError::ParseError(e.to_string())
            })?;
        let profile = CandidateProfile::new(dto.user_profile.name, level, domain)
            .map_err(|e| ServiceError::ParseError(e.to_string()))?;

        let responses = dto
            .responses
            .into_iter()
            .map(|r| ResponseReview {
                question: r.question,
                answer: r.answer,
                audio_transcription: r.audio_transcription,
                feedback: FeedbackScores::new(
                    r.feedback.clarity_score,
                    r.feedback.relevance_score,
                    r.feedback.confidence_score,
                    r.feedback.improvement_tips,
                ),
            })
            .collect();

        Ok(InterviewSummary { profile, responses })
    }
}

#[async_trait]
impl CoachService for HttpCoachService {
    async fn start_interview(
        &self,
        profile: &CandidateProfile,
    ) -> Result<SessionStart, ServiceError> {
        let body = StartInterviewRequest {
            name: profile.name(),
            experience_level: profile.experience_level().as_str(),
            domain: profile.domain().as_str(),
        };

        let response = self
            .client
            .post(self.start_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| ServiceError::RequestFailed(e.to_string()))?;

        let response = Self::check_status(response).await?;

        let parsed: StartInterviewResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::ParseError(e.to_string()))?;

        Ok(SessionStart {
            interview_id: parsed.interview_id,
            first_question: parsed.question.into(),
            total_questions: parsed.total_questions,
        })
    }

    async fn submit_answer(
        &self,
        interview_id: &str,
        question: &Question,
        answer_text: &str,
        audio: Option<&AnswerAudio>,
    ) -> Result<AnswerOutcome, ServiceError> {
        let mut form = reqwest::multipart::Form::new()
            .text("interview_id", interview_id.to_string())
            .text("question_id", question.prompt().to_string())
            .text("answer_text", answer_text.to_string());

        if let Some(audio) = audio {
            let part = reqwest::multipart::Part::bytes(audio.data().to_vec())
                .file_name(AnswerAudio::FILE_NAME)
                .mime_str(AnswerAudio::MIME_TYPE)
                .map_err(|e| ServiceError::RequestFailed(e.to_string()))?;
            form = form.part("audio_file", part);
        }

        let response = self
            .client
            .post(self.submit_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| ServiceError::RequestFailed(e.to_string()))?;

        let response = Self::check_status(response).await?;

        let parsed: SubmitAnswerResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::ParseError(e.to_string()))?;

        Ok(Self::map_outcome(parsed.next_question))
    }

    async fn fetch_summary(&self, interview_id: &str) -> Result<InterviewSummary, ServiceError> {
        let response = self
            .client
            .get(self.summary_url(interview_id))
            .send()
            .await
            .map_err(|e| ServiceError::RequestFailed(e.to_string()))?;

        let response = Self::check_status(response).await?;

        let parsed: SummaryResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::ParseError(e.to_string()))?;

        Self::map_summary(parsed)
    }
}
