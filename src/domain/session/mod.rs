//! Interview session entities

pub mod answer;
pub mod question;
pub mod state;

pub use answer::AnswerDraft;
pub use question::Question;
pub use state::{InterviewSession, InvalidStateTransition, SessionPhase};
