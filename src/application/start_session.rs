//! Session launcher use case

use thiserror::Error;

use crate::domain::profile::CandidateProfile;

use super::ports::{CoachService, ServiceError, SessionStart};

/// Errors from the session launcher
#[derive(Debug, Error)]
pub enum StartSessionError {
    #[error("Failed to start interview: {0}")]
    Service(#[from] ServiceError),
}

/// Launches a session for a validated candidate profile.
///
/// A failed start is terminal for that attempt; the caller keeps the profile
/// and may simply execute again. No retry or backoff here.
pub struct StartSession<S: CoachService> {
    service: S,
}

impl<S: CoachService> StartSession<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    /// Request a new session.
    ///
    /// # Returns
    /// The session id, the first question, and the total question count.
    pub async fn execute(
        &self,
        profile: &CandidateProfile,
    ) -> Result<SessionStart, StartSessionError> {
        Ok(self.service.start_interview(profile).await?)
    }
}
