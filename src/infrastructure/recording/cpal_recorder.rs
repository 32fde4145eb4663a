//! Cross-platform microphone recorder using cpal
//!
//! Captures mono i16 PCM at the device rate. A recording is finalized into
//! a 16kHz WAV on `stop`. An optional frame tap mirrors captured audio to a
//! live transcriber while the recording is running.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SampleRate, StreamConfig};
use tokio::time::Duration as TokioDuration;

use super::wav_encoder::{encode_answer_wav, TARGET_SAMPLE_RATE};
use crate::application::ports::{AudioFrame, FrameSink, RecordingError, VoiceRecorder};
use crate::domain::audio::AnswerAudio;

/// Microphone recorder backed by cpal
///
/// The stream is managed on a dedicated thread to avoid Send/Sync issues
/// with cpal::Stream which is not thread-safe. The stream is dropped as
/// soon as the recording flag clears, releasing the input device.
pub struct CpalRecorder {
    /// Recorded audio samples (mono, i16, at device sample rate)
    audio_buffer: Arc<StdMutex<Vec<i16>>>,
    /// Device sample rate (may differ from target 16kHz)
    device_sample_rate: Arc<AtomicU32>,
    /// Recording state
    is_recording: Arc<AtomicBool>,
    /// Recording start time (stored as millis since epoch for atomic access)
    start_time_ms: Arc<AtomicU64>,
    /// Elapsed time in milliseconds
    elapsed_ms: Arc<AtomicU64>,
    /// Live tap for the current recording, if any
    tap: Arc<StdMutex<Option<FrameSink>>>,
}

impl CpalRecorder {
    /// Create a new cpal-based recorder
    pub fn new() -> Self {
        Self {
            audio_buffer: Arc::new(StdMutex::new(Vec::new())),
            device_sample_rate: Arc::new(AtomicU32::new(0)),
            is_recording: Arc::new(AtomicBool::new(false)),
            start_time_ms: Arc::new(AtomicU64::new(0)),
            elapsed_ms: Arc::new(AtomicU64::new(0)),
            tap: Arc::new(StdMutex::new(None)),
        }
    }

    /// Get the default input device
    fn get_input_device() -> Result<cpal::Device, RecordingError> {
        let host = cpal::default_host();
        host.default_input_device()
            .ok_or(RecordingError::NoAudioDevice)
    }

    /// Get a suitable input configuration
    fn get_input_config(
        device: &cpal::Device,
    ) -> Result<(StreamConfig, SampleFormat), RecordingError> {
        let supported_configs = device
            .supported_input_configs()
            .map_err(|e| RecordingError::StartFailed(format!("Failed to get configs: {}", e)))?;

        // Try to find a config that supports our target sample rate
        // Prefer mono, but accept stereo (we'll mix down)
        let mut best_config: Option<cpal::SupportedStreamConfigRange> = None;

        for config in supported_configs {
            // Only consider i16 or f32 formats
            if config.sample_format() != SampleFormat::I16
                && config.sample_format() != SampleFormat::F32
            {
                continue;
            }

            // Prefer configs that include 16kHz
            let includes_target = config.min_sample_rate().0 <= TARGET_SAMPLE_RATE
                && config.max_sample_rate().0 >= TARGET_SAMPLE_RATE;

            let is_better = match &best_config {
                None => true,
                Some(current) => {
                    // Prefer mono over stereo
                    let fewer_channels = config.channels() < current.channels();
                    // Prefer configs that include our target rate
                    let better_rate =
                        includes_target && current.min_sample_rate().0 > TARGET_SAMPLE_RATE;
                    fewer_channels || better_rate
                }
            };
            if is_better {
                best_config = Some(config);
            }
        }

        let config_range = best_config.ok_or(RecordingError::StartFailed(
            "No suitable config found".into(),
        ))?;

        // Use target sample rate if supported, otherwise use the minimum
        let sample_rate = if config_range.min_sample_rate().0 <= TARGET_SAMPLE_RATE
            && config_range.max_sample_rate().0 >= TARGET_SAMPLE_RATE
        {
            SampleRate(TARGET_SAMPLE_RATE)
        } else {
            config_range.min_sample_rate()
        };

        let sample_format = config_range.sample_format();
        let config = StreamConfig {
            channels: config_range.channels(),
            sample_rate,
            buffer_size: cpal::BufferSize::Default,
        };

        Ok((config, sample_format))
    }

    /// Mix stereo to mono
    fn stereo_to_mono(samples: &[i16], channels: u16) -> Vec<i16> {
        if channels == 1 {
            return samples.to_vec();
        }

        samples
            .chunks(channels as usize)
            .map(|chunk| {
                let sum: i32 = chunk.iter().map(|&s| s as i32).sum();
                (sum / channels as i32) as i16
            })
            .collect()
    }

    /// Buffer a mono chunk and mirror it to the live tap if one is attached
    fn push_samples(
        buffer: &Arc<StdMutex<Vec<i16>>>,
        tap: &Arc<StdMutex<Option<FrameSink>>>,
        mono: Vec<i16>,
        sample_rate: u32,
    ) {
        if let Ok(mut guard) = buffer.lock() {
            guard.extend_from_slice(&mono);
        }
        if let Ok(guard) = tap.lock() {
            if let Some(sink) = guard.as_ref() {
                // Receiver may be gone; stale sends are harmless
                let _ = sink.send(AudioFrame {
                    samples: mono,
                    sample_rate,
                });
            }
        }
    }
}

impl Default for CpalRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VoiceRecorder for CpalRecorder {
    async fn start(&self, tap: Option<FrameSink>) -> Result<(), RecordingError> {
        if self.is_recording.load(Ordering::SeqCst) {
            return Err(RecordingError::AlreadyRecording);
        }

        // Clear buffer and install the tap for this recording
        {
            let mut buffer = self.audio_buffer.lock().unwrap();
            buffer.clear();
        }
        {
            let mut guard = self.tap.lock().unwrap();
            *guard = tap;
        }

        // Mark as recording
        self.is_recording.store(true, Ordering::SeqCst);

        // Store start time
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        self.start_time_ms.store(now, Ordering::SeqCst);

        // Clone Arcs for the background recording thread
        let audio_buffer = Arc::clone(&self.audio_buffer);
        let device_sample_rate = Arc::clone(&self.device_sample_rate);
        let is_recording = Arc::clone(&self.is_recording);
        let elapsed_ms = Arc::clone(&self.elapsed_ms);
        let start_time_ms = Arc::clone(&self.start_time_ms);
        let tap_handle = Arc::clone(&self.tap);

        // The capture thread reports stream acquisition over this channel, so
        // start() resolves exactly when the device is live or has failed.
        let (ready_tx, ready_rx) =
            tokio::sync::oneshot::channel::<Result<(), RecordingError>>();

        // Start recording in a background thread (not spawn_blocking since we don't await it)
        std::thread::spawn(move || {
            let device = match CpalRecorder::get_input_device() {
                Ok(d) => d,
                Err(e) => {
                    is_recording.store(false, Ordering::SeqCst);
                    let _ = ready_tx.send(Err(e));
                    return;
                }
            };

            let (config, sample_format) = match CpalRecorder::get_input_config(&device) {
                Ok(c) => c,
                Err(e) => {
                    is_recording.store(false, Ordering::SeqCst);
                    let _ = ready_tx.send(Err(e));
                    return;
                }
            };

            let sample_rate = config.sample_rate.0;
            let channels = config.channels;
            device_sample_rate.store(sample_rate, Ordering::SeqCst);

            let audio_buffer_clone = Arc::clone(&audio_buffer);
            let is_recording_clone = Arc::clone(&is_recording);
            let tap_clone = Arc::clone(&tap_handle);

            let stream_result = match sample_format {
                SampleFormat::I16 => device.build_input_stream(
                    &config,
                    move |data: &[i16], _: &cpal::InputCallbackInfo| {
                        if is_recording_clone.load(Ordering::SeqCst) {
                            let mono = CpalRecorder::stereo_to_mono(data, channels);
                            CpalRecorder::push_samples(
                                &audio_buffer_clone,
                                &tap_clone,
                                mono,
                                sample_rate,
                            );
                        }
                    },
                    |err| eprintln!("Audio stream error: {}", err),
                    None,
                ),

                SampleFormat::F32 => {
                    let audio_buffer_clone = Arc::clone(&audio_buffer);
                    let is_recording_clone = Arc::clone(&is_recording);
                    let tap_clone = Arc::clone(&tap_handle);

                    device.build_input_stream(
                        &config,
                        move |data: &[f32], _: &cpal::InputCallbackInfo| {
                            if is_recording_clone.load(Ordering::SeqCst) {
                                let i16_data: Vec<i16> =
                                    data.iter().map(|&s| (s * 32767.0) as i16).collect();
                                let mono = CpalRecorder::stereo_to_mono(&i16_data, channels);
                                CpalRecorder::push_samples(
                                    &audio_buffer_clone,
                                    &tap_clone,
                                    mono,
                                    sample_rate,
                                );
                            }
                        },
                        |err| eprintln!("Audio stream error: {}", err),
                        None,
                    )
                }

                _ => {
                    is_recording.store(false, Ordering::SeqCst);
                    let _ = ready_tx.send(Err(RecordingError::StartFailed(
                        "Unsupported sample format".into(),
                    )));
                    return;
                }
            };

            let stream = match stream_result {
                Ok(s) => s,
                Err(e) => {
                    is_recording.store(false, Ordering::SeqCst);
                    let _ = ready_tx.send(Err(RecordingError::StartFailed(format!(
                        "Failed to build stream: {}",
                        e
                    ))));
                    return;
                }
            };

            if let Err(e) = stream.play() {
                is_recording.store(false, Ordering::SeqCst);
                let _ = ready_tx.send(Err(RecordingError::StartFailed(format!(
                    "Failed to start stream: {}",
                    e
                ))));
                return;
            }

            let _ = ready_tx.send(Ok(()));

            // Keep recording until stopped
            while is_recording.load(Ordering::SeqCst) {
                // Update elapsed time
                let now = std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .map(|d| d.as_millis() as u64)
                    .unwrap_or(0);
                let start = start_time_ms.load(Ordering::SeqCst);
                elapsed_ms.store(now.saturating_sub(start), Ordering::SeqCst);

                std::thread::sleep(std::time::Duration::from_millis(100));
            }

            // Dropping the stream releases the microphone
            drop(stream);
        });

        // Wait for the stream to come up (or fail) before reporting success
        match ready_rx.await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => {
                let mut guard = self.tap.lock().unwrap();
                *guard = None;
                Err(e)
            }
            Err(_) => {
                self.is_recording.store(false, Ordering::SeqCst);
                let mut guard = self.tap.lock().unwrap();
                *guard = None;
                Err(RecordingError::StartFailed(
                    "Capture thread exited before the stream started".into(),
                ))
            }
        }
    }

    async fn stop(&self) -> Result<AnswerAudio, RecordingError> {
        if !self.is_recording.load(Ordering::SeqCst) {
            return Err(RecordingError::NotRecording);
        }

        // Stop recording
        self.is_recording.store(false, Ordering::SeqCst);

        // Give the thread a moment to clean up
        tokio::time::sleep(TokioDuration::from_millis(100)).await;

        // Detach the tap; the transcriber's frame stream ends here
        {
            let mut guard = self.tap.lock().unwrap();
            *guard = None;
        }

        self.elapsed_ms.store(0, Ordering::SeqCst);

        // Get sample rate
        let sample_rate = self.device_sample_rate.load(Ordering::SeqCst);
        if sample_rate == 0 {
            return Err(RecordingError::NoAudioCaptured);
        }

        // Get the recorded samples
        let samples = {
            let mut buffer = self.audio_buffer.lock().unwrap();
            std::mem::take(&mut *buffer)
        };

        if samples.is_empty() {
            return Err(RecordingError::NoAudioCaptured);
        }

        // Encode to WAV (in blocking task for CPU-intensive work)
        let encoded =
            tokio::task::spawn_blocking(move || encode_answer_wav(&samples, sample_rate))
                .await
                .map_err(|e| {
                    RecordingError::RecordingFailed(format!("Encode task error: {}", e))
                })??;

        Ok(encoded)
    }

    async fn cancel(&self) -> Result<(), RecordingError> {
        // Stop recording
        self.is_recording.store(false, Ordering::SeqCst);

        // Give the thread a moment to clean up
        tokio::time::sleep(TokioDuration::from_millis(100)).await;

        // Detach the tap and discard captured audio
        {
            let mut guard = self.tap.lock().unwrap();
            *guard = None;
        }
        {
            let mut buffer = self.audio_buffer.lock().unwrap();
            buffer.clear();
        }

        // Reset elapsed time
        self.elapsed_ms.store(0, Ordering::SeqCst);

        Ok(())
    }

    fn is_recording(&self) -> bool {
        self.is_recording.load(Ordering::SeqCst)
    }

    fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn stereo_to_mono_single_channel() {
        let mono = vec![100i16, 200, 300];
        let result = CpalRecorder::stereo_to_mono(&mono, 1);
        assert_eq!(result, mono);
    }

    #[test]
    fn stereo_to_mono_two_channels() {
        let stereo = vec![100i16, 200, 300, 400];
        let result = CpalRecorder::stereo_to_mono(&stereo, 2);
        assert_eq!(result, vec![150, 350]); // Average of each pair
    }

    #[test]
    fn recorder_default_state() {
        let recorder = CpalRecorder::new();
        assert!(!recorder.is_recording());
        assert_eq!(recorder.elapsed_ms(), 0);
    }

    #[test]
    fn push_samples_mirrors_to_tap() {
        let buffer = Arc::new(StdMutex::new(Vec::new()));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let tap = Arc::new(StdMutex::new(Some(tx)));

        CpalRecorder::push_samples(&buffer, &tap, vec![1i16, 2, 3], 16_000);

        assert_eq!(*buffer.lock().unwrap(), vec![1, 2, 3]);
        let frame = rx.try_recv().unwrap();
        assert_eq!(frame.samples, vec![1, 2, 3]);
        assert_eq!(frame.sample_rate, 16_000);
    }

    #[tokio::test]
    async fn start_resolves_and_failure_leaves_recorder_idle() {
        let recorder = CpalRecorder::new();
        let (tap, _frames) = mpsc::unbounded_channel();

        // start() must resolve once the stream is up or has failed; it may
        // legitimately succeed on machines with a microphone.
        let result = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            recorder.start(Some(tap)),
        )
        .await
        .expect("start must not hang on stream acquisition");

        match result {
            Ok(()) => {
                assert!(recorder.is_recording());
                recorder.cancel().await.unwrap();
            }
            Err(_) => {
                assert!(!recorder.is_recording());
                // A failed start must not leave a stale tap installed
                assert!(recorder.tap.lock().unwrap().is_none());
            }
        }
    }

    #[test]
    fn push_samples_without_tap_only_buffers() {
        let buffer = Arc::new(StdMutex::new(Vec::new()));
        let tap = Arc::new(StdMutex::new(None));

        CpalRecorder::push_samples(&buffer, &tap, vec![5i16], 16_000);

        assert_eq!(*buffer.lock().unwrap(), vec![5]);
    }
}
