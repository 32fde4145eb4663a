//! Remote live transcriber backed by the Gemini API
//!
//! Live recognition is approximated by re-recognizing the utterance so far
//! on a short cadence (interim hypotheses) and committing a final segment
//! once trailing silence is detected. Recognition is best-effort: a failed
//! window is dropped and the next one tried.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, Notify};

use crate::application::ports::{
    AudioFrame, LiveTranscriber, TranscriptEvent, TranscriptStream, TranscriptionError,
};
use crate::domain::audio::AnswerAudio;
use crate::infrastructure::recording::encode_answer_wav;

/// Gemini API model to use
const DEFAULT_MODEL: &str = "gemini-2.0-flash-lite";

/// Gemini API base URL
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// How much new audio accumulates before an interim hypothesis is requested
const INTERIM_WINDOW_MS: u64 = 2_500;

/// Trailing silence that finalizes the current utterance
const SILENCE_HOLD_MS: u64 = 900;

/// Normalized RMS below which a frame counts as silence
const SILENCE_RMS: f64 = 0.01;

/// System instruction for the recognizer
const TRANSCRIBE_PROMPT: &str = "You are a speech transcription engine. Transcribe the spoken \
audio verbatim. Output only the transcribed text, with no commentary, labels, or punctuation \
beyond what is spoken. If the audio contains no speech, output nothing.";

// Request types for Gemini API

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    system_instruction: Option<SystemInstruction>,
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct SystemInstruction {
    parts: Vec<TextPart>,
}

#[derive(Debug, Serialize)]
struct TextPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<ThinkingConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: i32,
}

// Response types for Gemini API

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Live transcriber that sends utterance windows to the Gemini API
pub struct RemoteLiveTranscriber {
    api_key: String,
    model: String,
    client: reqwest::Client,
    running: Arc<AtomicBool>,
    stop_signal: Arc<Notify>,
}

impl RemoteLiveTranscriber {
    /// Create a transcriber with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            client: reqwest::Client::new(),
            running: Arc::new(AtomicBool::new(false)),
            stop_signal: Arc::new(Notify::new()),
        }
    }

    /// Create a transcriber with a custom model
    pub fn with_model(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::new(api_key)
        }
    }

    /// Build the API URL
    fn api_url(&self) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            API_BASE_URL, self.model, self.api_key
        )
    }

    /// Build a recognition request for one utterance window
    fn build_request(audio: &AnswerAudio) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: None,
                    inline_data: Some(InlineData {
                        mime_type: AnswerAudio::MIME_TYPE.to_string(),
                        data: audio.to_base64(),
                    }),
                }],
            }],
            system_instruction: Some(SystemInstruction {
                parts: vec![TextPart {
                    text: TRANSCRIBE_PROMPT.to_string(),
                }],
            }),
            generation_config: Some(GenerationConfig {
                thinking_config: Some(ThinkingConfig {
                    thinking_budget: 0, // Disable thinking for faster response
                }),
            }),
        }
    }

    /// Extract text from response
    fn extract_text(response: &GenerateContentResponse) -> Option<String> {
        let parts: Vec<&str> = response
            .candidates
            .as_ref()?
            .first()?
            .content
            .as_ref()?
            .parts
            .as_ref()?
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(""))
        }
    }

    /// Normalized RMS amplitude of a frame, in 0.0..=1.0
    fn frame_rms(samples: &[i16]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        let sum_sq: f64 = samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
        (sum_sq / samples.len() as f64).sqrt() / 32768.0
    }

    /// Recognize one utterance window. Returns `None` when the recognizer
    /// heard nothing.
    async fn recognize(
        client: &reqwest::Client,
        url: &str,
        samples: &[i16],
        sample_rate: u32,
    ) -> Result<Option<String>, TranscriptionError> {
        let audio = encode_answer_wav(samples, sample_rate)
            .map_err(|e| TranscriptionError::RequestFailed(e.to_string()))?;
        let body = Self::build_request(&audio);

        let response = client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| TranscriptionError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TranscriptionError::ApiError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::ParseError(e.to_string()))?;

        if let Some(error) = response.error {
            return Err(TranscriptionError::ApiError(error.message));
        }

        let text = Self::extract_text(&response)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Ok(text)
    }
}

#[async_trait]
impl LiveTranscriber for RemoteLiveTranscriber {
    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn start(
        &self,
        mut frames: mpsc::UnboundedReceiver<AudioFrame>,
    ) -> Result<TranscriptStream, TranscriptionError> {
        if !self.is_available() {
            return Err(TranscriptionError::Unavailable);
        }
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(TranscriptionError::AlreadyRunning);
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let client = self.client.clone();
        let url = self.api_url();
        let running = Arc::clone(&self.running);
        let stop_signal = Arc::clone(&self.stop_signal);

        tokio::spawn(async move {
            let mut utterance: Vec<i16> = Vec::new();
            let mut sample_rate: u32 = 0;
            let mut had_speech = false;
            let mut silence_ms: u64 = 0;
            let mut since_interim_ms: u64 = 0;

            loop {
                let frame = tokio::select! {
                    maybe = frames.recv() => match maybe {
                        Some(frame) => frame,
                        None => break,
                    },
                    _ = stop_signal.notified() => break,
                };

                let frame_ms = frame.duration_ms();
                sample_rate = frame.sample_rate;

                if Self::frame_rms(&frame.samples) >= SILENCE_RMS {
                    had_speech = true;
                    silence_ms = 0;
                } else {
                    silence_ms += frame_ms;
                }

                utterance.extend_from_slice(&frame.samples);
                since_interim_ms += frame_ms;

                if !had_speech {
                    continue;
                }

                if silence_ms >= SILENCE_HOLD_MS {
                    // Utterance over; commit it and start the next one.
                    // Frames keep buffering in the channel while we wait.
                    if let Ok(Some(text)) =
                        Self::recognize(&client, &url, &utterance, sample_rate).await
                    {
                        let _ = tx.send(TranscriptEvent::Final(text));
                    }
                    utterance.clear();
                    had_speech = false;
                    silence_ms = 0;
                    since_interim_ms = 0;
                } else if since_interim_ms >= INTERIM_WINDOW_MS {
                    if let Ok(Some(text)) =
                        Self::recognize(&client, &url, &utterance, sample_rate).await
                    {
                        let _ = tx.send(TranscriptEvent::Interim(text));
                    }
                    since_interim_ms = 0;
                }
            }

            // Finalize whatever was still in flight when the frames ended
            if had_speech && !utterance.is_empty() {
                if let Ok(Some(text)) =
                    Self::recognize(&client, &url, &utterance, sample_rate).await
                {
                    let _ = tx.send(TranscriptEvent::Final(text));
                }
            }

            running.store(false, Ordering::SeqCst);
        });

        Ok(rx)
    }

    async fn stop(&self) -> Result<(), TranscriptionError> {
        self.stop_signal.notify_waiters();
        Ok(())
    }
}
