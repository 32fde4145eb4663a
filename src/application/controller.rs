//! Session controller: drives the question/answer wizard
//!
//! Owns all mutable session state (current question, answer draft, recording
//! lifecycle) and is the only place that mutates it. The microphone stream
//! and the live transcription stream are joined under one recording scope:
//! both are started together and both are torn down together on stop, error,
//! or shutdown.

use thiserror::Error;
use tokio::sync::mpsc;

use crate::domain::session::{
    AnswerDraft, InterviewSession, InvalidStateTransition, Question, SessionPhase,
};
use crate::domain::summary::InterviewSummary;

use super::ports::{
    AnswerOutcome, AudioCue, AudioCueType, CoachService, LiveTranscriber, RecordingError,
    ServiceError, SessionStart, TranscriptEvent, TranscriptStream, TranscriptionError,
    VoiceRecorder,
};

/// Errors from the session controller
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("Recording failed: {0}")]
    Recording(#[from] RecordingError),

    #[error("Transcription failed: {0}")]
    Transcription(#[from] TranscriptionError),

    #[error("Submission failed: {0}")]
    Service(#[from] ServiceError),

    #[error(transparent)]
    State(#[from] InvalidStateTransition),
}

/// Result of a successful answer submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Advanced to the next question
    NextQuestion,
    /// The session is complete; the summary can be fetched
    Completed,
}

/// The interview wizard.
///
/// Phase transitions follow the session state machine; every failure path
/// leaves the controller in `AwaitingAnswer` with the draft preserved so the
/// candidate can retry.
pub struct SessionController<S, R, T, C>
where
    S: CoachService,
    R: VoiceRecorder,
    T: LiveTranscriber,
    C: AudioCue,
{
    service: S,
    recorder: R,
    transcriber: T,
    cue: C,
    session: InterviewSession,
    draft: AnswerDraft,
    transcripts: Option<TranscriptStream>,
}

impl<S, R, T, C> SessionController<S, R, T, C>
where
    S: CoachService,
    R: VoiceRecorder,
    T: LiveTranscriber,
    C: AudioCue,
{
    /// Create a controller positioned at the first question of a freshly
    /// started session.
    pub fn new(service: S, recorder: R, transcriber: T, cue: C, start: SessionStart) -> Self {
        Self {
            service,
            recorder,
            transcriber,
            cue,
            session: InterviewSession::new(
                start.interview_id,
                start.first_question,
                start.total_questions,
            ),
            draft: AnswerDraft::new(),
            transcripts: None,
        }
    }

    pub fn session(&self) -> &InterviewSession {
        &self.session
    }

    pub fn draft(&self) -> &AnswerDraft {
        &self.draft
    }

    /// Whether live transcription will run alongside recordings
    pub fn transcription_available(&self) -> bool {
        self.transcriber.is_available()
    }

    /// Append a typed line to the answer draft
    pub fn append_typed(&mut self, line: &str) {
        self.draft.append_typed(line);
    }

    /// Discard the draft for the current question
    pub fn clear_draft(&mut self) {
        self.draft.clear();
    }

    /// Start recording an answer.
    ///
    /// Acquires the microphone stream and, when a recognizer is available,
    /// a live transcription stream fed from the same capture. Starting while
    /// already recording is a no-op and returns `Ok(false)`.
    pub async fn start_recording(&mut self) -> Result<bool, ControllerError> {
        if self.session.is_recording() {
            return Ok(false);
        }

        if self.transcriber.is_available() {
            let (tap, frames) = mpsc::unbounded_channel();
            self.recorder.start(Some(tap)).await?;
            match self.transcriber.start(frames).await {
                Ok(events) => self.transcripts = Some(events),
                Err(e) => {
                    // Joint scope: the microphone must not outlive a failed
                    // transcription start.
                    let _ = self.recorder.cancel().await;
                    return Err(e.into());
                }
            }
        } else {
            self.recorder.start(None).await?;
        }

        self.session.start_recording()?;
        let _ = self.cue.play(AudioCueType::RecordingStart).await;
        Ok(true)
    }

    /// Stop recording, finalize the captured audio into the draft, and halt
    /// transcription. Safe to call when not recording.
    pub async fn stop_recording(&mut self) -> Result<(), ControllerError> {
        if !self.session.is_recording() {
            return Ok(());
        }

        let audio = self.recorder.stop().await;
        // Torn down together with the recorder, whatever the stop result.
        let _ = self.transcriber.stop().await;
        self.session.stop_recording()?;

        match audio {
            Ok(audio) => {
                self.draft.attach_audio(audio);
                let _ = self.cue.play(AudioCueType::RecordingStop).await;
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Wait for the next live transcript event and fold it into the draft.
    ///
    /// Returns `None` once the current stream has drained; pends forever
    /// when no stream exists, so it can sit in a `select!` arm.
    pub async fn next_transcript(&mut self) -> Option<TranscriptEvent> {
        let Some(rx) = self.transcripts.as_mut() else {
            return std::future::pending().await;
        };
        match rx.recv().await {
            Some(event) => {
                self.apply_transcript(&event);
                Some(event)
            }
            None => {
                self.transcripts = None;
                None
            }
        }
    }

    /// Fold any already-arrived transcript events into the draft
    pub fn drain_transcripts(&mut self) {
        let mut pending = Vec::new();
        if let Some(rx) = self.transcripts.as_mut() {
            while let Ok(event) = rx.try_recv() {
                pending.push(event);
            }
        }
        for event in pending {
            self.apply_transcript(&event);
        }
    }

    fn apply_transcript(&mut self, event: &TranscriptEvent) {
        match event {
            TranscriptEvent::Final(segment) => self.draft.append_final_segment(segment),
            TranscriptEvent::Interim(fragment) => self.draft.set_interim(fragment),
        }
    }

    /// Submit the current draft.
    ///
    /// On success the draft is cleared and the controller either advances to
    /// the next question or completes: the service's structured completion
    /// outcome and local ordinal exhaustion are treated as the same signal.
    /// On failure the phase reverts to `AwaitingAnswer` with the draft
    /// intact for resubmission.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, ControllerError> {
        self.drain_transcripts();
        self.draft.clear_interim();
        self.session.begin_submit()?;

        let result = self
            .service
            .submit_answer(
                self.session.id(),
                self.session.question(),
                self.draft.committed(),
                self.draft.audio(),
            )
            .await;

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                self.session.submit_failed()?;
                return Err(e.into());
            }
        };

        // The final ordinal always completes the session, regardless of
        // what the service returned for next_question.
        if outcome == AnswerOutcome::Completed || self.session.is_final_question() {
            self.session.complete()?;
            self.draft.clear();
            return Ok(SubmitOutcome::Completed);
        }

        match outcome {
            AnswerOutcome::Next(question) => {
                self.session.advance(question)?;
                self.draft.clear();
                Ok(SubmitOutcome::NextQuestion)
            }
            AnswerOutcome::Completed => unreachable!("handled above"),
        }
    }

    /// Fetch the feedback summary. Only valid once the session completed.
    pub async fn fetch_summary(&self) -> Result<InterviewSummary, ControllerError> {
        if !self.session.is_completed() {
            return Err(InvalidStateTransition {
                current_phase: self.session.phase(),
                action: "fetch summary",
            }
            .into());
        }
        Ok(self.service.fetch_summary(self.session.id()).await?)
    }

    /// Release the microphone and recognizer if a recording is still live.
    /// Called on quit and interrupt paths so teardown is guaranteed.
    pub async fn shutdown(&mut self) {
        if self.session.is_recording() {
            let _ = self.recorder.cancel().await;
            let _ = self.transcriber.stop().await;
            let _ = self.session.cancel_recording();
            let _ = self.cue.play(AudioCueType::RecordingCancel).await;
        }
        self.transcripts = None;
    }
}

impl<S, R, T, C> SessionController<S, R, T, C>
where
    S: CoachService,
    R: VoiceRecorder,
    T: LiveTranscriber,
    C: AudioCue,
{
    /// Convenience for status lines
    pub fn position(&self) -> (u32, u32) {
        (self.session.ordinal(), self.session.total())
    }

    pub fn phase(&self) -> SessionPhase {
        self.session.phase()
    }

    /// Elapsed time of the recording in progress, for the live timer
    pub fn elapsed_ms(&self) -> u64 {
        self.recorder.elapsed_ms()
    }

    pub fn question(&self) -> &Question {
        self.session.question()
    }
}
