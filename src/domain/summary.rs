//! Feedback summary value objects

use crate::domain::profile::CandidateProfile;

/// Bound of every score dimension
pub const SCORE_SCALE: f64 = 100.0;

/// Per-answer feedback scores and improvement tips
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackScores {
    clarity: f64,
    relevance: f64,
    confidence: f64,
    improvement_tips: Vec<String>,
}

impl FeedbackScores {
    /// Create scores, clamping each dimension to the 0..=100 scale
    pub fn new(clarity: f64, relevance: f64, confidence: f64, improvement_tips: Vec<String>) -> Self {
        Self {
            clarity: clarity.clamp(0.0, SCORE_SCALE),
            relevance: relevance.clamp(0.0, SCORE_SCALE),
            confidence: confidence.clamp(0.0, SCORE_SCALE),
            improvement_tips,
        }
    }

    pub fn clarity(&self) -> f64 {
        self.clarity
    }

    pub fn relevance(&self) -> f64 {
        self.relevance
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn improvement_tips(&self) -> &[String] {
        &self.improvement_tips
    }
}

/// One answered question with its feedback
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseReview {
    pub question: String,
    pub answer: String,
    pub audio_transcription: Option<String>,
    pub feedback: FeedbackScores,
}

/// Aggregate summary for a completed session, fetched once and read-only
#[derive(Debug, Clone)]
pub struct InterviewSummary {
    pub profile: CandidateProfile,
    pub responses: Vec<ResponseReview>,
}

impl InterviewSummary {
    /// Per-dimension arithmetic means across all answered questions.
    /// An empty response set yields `None` (explicit empty state, never NaN).
    pub fn averages(&self) -> Option<ScoreAverages> {
        ScoreAverages::compute(&self.responses)
    }
}

/// Per-dimension averages, each on the 0..=100 scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreAverages {
    pub clarity: f64,
    pub relevance: f64,
    pub confidence: f64,
}

impl ScoreAverages {
    /// Arithmetic mean per dimension. Returns `None` for an empty slice.
    pub fn compute(responses: &[ResponseReview]) -> Option<Self> {
        if responses.is_empty() {
            return None;
        }
        let count = responses.len() as f64;
        let sum = responses.iter().fold((0.0, 0.0, 0.0), |acc, r| {
            (
                acc.0 + r.feedback.clarity(),
                acc.1 + r.feedback.relevance(),
                acc.2 + r.feedback.confidence(),
            )
        });
        Some(Self {
            clarity: sum.0 / count,
            relevance: sum.1 / count,
            confidence: sum.2 / count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::{CandidateProfile, ExperienceLevel, InterviewDomain};

    fn review(clarity: f64, relevance: f64, confidence: f64) -> ResponseReview {
        ResponseReview {
            question: "Q".to_string(),
            answer: "A".to_string(),
            audio_transcription: None,
            feedback: FeedbackScores::new(clarity, relevance, confidence, vec![]),
        }
    }

    fn summary(responses: Vec<ResponseReview>) -> InterviewSummary {
        InterviewSummary {
            profile: CandidateProfile::new(
                "Alex",
                ExperienceLevel::Entry,
                InterviewDomain::SoftwareEngineering,
            )
            .unwrap(),
            responses,
        }
    }

    #[test]
    fn scores_are_clamped() {
        let scores = FeedbackScores::new(120.0, -5.0, 50.0, vec![]);
        assert_eq!(scores.clarity(), 100.0);
        assert_eq!(scores.relevance(), 0.0);
        assert_eq!(scores.confidence(), 50.0);
    }

    #[test]
    fn single_response_average_equals_its_scores() {
        let s = summary(vec![review(80.0, 70.0, 60.0)]);
        let avg = s.averages().unwrap();
        assert_eq!(avg.clarity, 80.0);
        assert_eq!(avg.relevance, 70.0);
        assert_eq!(avg.confidence, 60.0);
    }

    #[test]
    fn averages_over_multiple_responses() {
        let s = summary(vec![review(80.0, 60.0, 40.0), review(60.0, 80.0, 60.0)]);
        let avg = s.averages().unwrap();
        assert_eq!(avg.clarity, 70.0);
        assert_eq!(avg.relevance, 70.0);
        assert_eq!(avg.confidence, 50.0);
    }

    #[test]
    fn empty_responses_have_no_averages() {
        let s = summary(vec![]);
        assert!(s.averages().is_none());
    }
}
