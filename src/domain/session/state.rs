//! Interview session state machine

use std::fmt;
use thiserror::Error;

use super::question::Question;

/// Session phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionPhase {
    #[default]
    AwaitingAnswer,
    Recording,
    Submitting,
    Completed,
}

impl SessionPhase {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AwaitingAnswer => "awaiting answer",
            Self::Recording => "recording",
            Self::Submitting => "submitting",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid phase transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while in '{current_phase}' phase")]
pub struct InvalidStateTransition {
    pub current_phase: SessionPhase,
    pub action: &'static str,
}

/// Interview session entity.
/// Tracks the server-issued id, the question ordinal, and the answer-loop
/// phase machine.
///
/// Phase machine:
///   AWAITING_ANSWER -> RECORDING   (start_recording)
///   RECORDING -> AWAITING_ANSWER   (stop_recording / cancel_recording)
///   AWAITING_ANSWER -> SUBMITTING  (begin_submit)
///   SUBMITTING -> AWAITING_ANSWER  (advance / submit_failed)
///   SUBMITTING -> COMPLETED        (complete)
///
/// Invariant: the ordinal never exceeds the total question count. Completion
/// is idempotent: `complete` on an already completed session is a no-op.
#[derive(Debug, Clone)]
pub struct InterviewSession {
    id: String,
    question: Question,
    ordinal: u32,
    total: u32,
    phase: SessionPhase,
}

impl InterviewSession {
    /// Create a session positioned at the first question.
    /// A total of zero is clamped to one so the ordinal invariant holds.
    pub fn new(id: impl Into<String>, first_question: Question, total: u32) -> Self {
        Self {
            id: id.into(),
            question: first_question,
            ordinal: 1,
            total: total.max(1),
            phase: SessionPhase::AwaitingAnswer,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    /// 1-based position of the current question
    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_recording(&self) -> bool {
        self.phase == SessionPhase::Recording
    }

    pub fn is_completed(&self) -> bool {
        self.phase == SessionPhase::Completed
    }

    /// Whether the current question is the last one
    pub fn is_final_question(&self) -> bool {
        self.ordinal >= self.total
    }

    fn transition(
        &mut self,
        from: SessionPhase,
        to: SessionPhase,
        action: &'static str,
    ) -> Result<(), InvalidStateTransition> {
        if self.phase != from {
            return Err(InvalidStateTransition {
                current_phase: self.phase,
                action,
            });
        }
        self.phase = to;
        Ok(())
    }

    /// AWAITING_ANSWER -> RECORDING
    pub fn start_recording(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(
            SessionPhase::AwaitingAnswer,
            SessionPhase::Recording,
            "start recording",
        )
    }

    /// RECORDING -> AWAITING_ANSWER
    pub fn stop_recording(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(
            SessionPhase::Recording,
            SessionPhase::AwaitingAnswer,
            "stop recording",
        )
    }

    /// RECORDING -> AWAITING_ANSWER (teardown without keeping audio)
    pub fn cancel_recording(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(
            SessionPhase::Recording,
            SessionPhase::AwaitingAnswer,
            "cancel recording",
        )
    }

    /// AWAITING_ANSWER -> SUBMITTING
    pub fn begin_submit(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(
            SessionPhase::AwaitingAnswer,
            SessionPhase::Submitting,
            "submit answer",
        )
    }

    /// SUBMITTING -> AWAITING_ANSWER, preserving the current question and
    /// ordinal so the answer can be resubmitted
    pub fn submit_failed(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(
            SessionPhase::Submitting,
            SessionPhase::AwaitingAnswer,
            "revert failed submission",
        )
    }

    /// SUBMITTING -> AWAITING_ANSWER, moving to the next question.
    /// Rejected on the final ordinal: the ordinal may never exceed the total.
    pub fn advance(&mut self, next_question: Question) -> Result<(), InvalidStateTransition> {
        if self.is_final_question() {
            return Err(InvalidStateTransition {
                current_phase: self.phase,
                action: "advance past the final question",
            });
        }
        self.transition(
            SessionPhase::Submitting,
            SessionPhase::AwaitingAnswer,
            "advance to next question",
        )?;
        self.ordinal += 1;
        self.question = next_question;
        Ok(())
    }

    /// SUBMITTING -> COMPLETED. Idempotent once completed, so the service's
    /// completion marker and local ordinal exhaustion can both land here.
    pub fn complete(&mut self) -> Result<(), InvalidStateTransition> {
        if self.phase == SessionPhase::Completed {
            return Ok(());
        }
        self.transition(
            SessionPhase::Submitting,
            SessionPhase::Completed,
            "complete session",
        )
    }
}
