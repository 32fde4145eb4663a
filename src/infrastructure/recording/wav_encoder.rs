//! WAV encoding for answer uploads
//!
//! The coach service accepts mono 16-bit PCM WAV. Device audio is resampled
//! to 16kHz before encoding to keep uploads small and speech-friendly.

use std::io::Cursor;

use hound::{SampleFormat, WavSpec, WavWriter};
use rubato::{FftFixedIn, Resampler};

use crate::application::ports::RecordingError;
use crate::domain::audio::AnswerAudio;

/// Sample rate of the encoded upload
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

/// Resample mono i16 audio from the device rate to 16kHz if needed
fn resample_to_16k(samples: &[i16], source_rate: u32) -> Result<Vec<i16>, RecordingError> {
    if source_rate == TARGET_SAMPLE_RATE {
        return Ok(samples.to_vec());
    }

    let samples_f32: Vec<f32> = samples.iter().map(|&s| s as f32 / 32768.0).collect();

    let ratio = TARGET_SAMPLE_RATE as f64 / source_rate as f64;
    let output_len = (samples_f32.len() as f64 * ratio).ceil() as usize;

    let mut resampler = FftFixedIn::<f32>::new(
        source_rate as usize,
        TARGET_SAMPLE_RATE as usize,
        1024, // Chunk size
        2,    // Sub-chunks
        1,    // Mono
    )
    .map_err(|e| RecordingError::RecordingFailed(format!("Resampler init failed: {}", e)))?;

    let mut output = Vec::with_capacity(output_len);
    let mut input_pos = 0;

    while input_pos < samples_f32.len() {
        let frames_needed = resampler.input_frames_next();
        let end_pos = (input_pos + frames_needed).min(samples_f32.len());
        let mut chunk = samples_f32[input_pos..end_pos].to_vec();
        if chunk.len() < frames_needed {
            chunk.resize(frames_needed, 0.0);
        }

        let resampled = resampler
            .process(&[chunk], None)
            .map_err(|e| RecordingError::RecordingFailed(format!("Resampling failed: {}", e)))?;

        output.extend(resampled[0].iter().map(|&s| (s * 32767.0) as i16));
        input_pos = end_pos;
    }

    output.truncate(output_len);

    Ok(output)
}

/// Write mono i16 samples into an in-memory WAV container
fn write_wav(samples: &[i16], sample_rate: u32) -> Result<Vec<u8>, RecordingError> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut cursor, spec)
            .map_err(|e| RecordingError::RecordingFailed(format!("WAV init failed: {}", e)))?;
        for &sample in samples {
            writer
                .write_sample(sample)
                .map_err(|e| RecordingError::RecordingFailed(format!("WAV write failed: {}", e)))?;
        }
        writer
            .finalize()
            .map_err(|e| RecordingError::RecordingFailed(format!("WAV finalize failed: {}", e)))?;
    }

    Ok(cursor.into_inner())
}

/// Encode captured PCM samples into the upload format
pub fn encode_answer_wav(samples: &[i16], source_rate: u32) -> Result<AnswerAudio, RecordingError> {
    if samples.is_empty() {
        return Err(RecordingError::NoAudioCaptured);
    }

    let resampled = resample_to_16k(samples, source_rate)?;
    let bytes = write_wav(&resampled, TARGET_SAMPLE_RATE)?;

    Ok(AnswerAudio::new(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_wav_has_riff_header() {
        let samples = vec![0i16; TARGET_SAMPLE_RATE as usize];
        let audio = encode_answer_wav(&samples, TARGET_SAMPLE_RATE).unwrap();
        let bytes = audio.data();

        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");
    }

    #[test]
    fn sixteen_k_input_is_not_resampled() {
        let samples = vec![100i16; 1600];
        let audio = encode_answer_wav(&samples, TARGET_SAMPLE_RATE).unwrap();

        // 44-byte header + 2 bytes per sample
        assert_eq!(audio.size_bytes(), 44 + samples.len() * 2);
    }

    #[test]
    fn downsampling_halves_sample_count() {
        let samples = vec![0i16; 32_000];
        let resampled = resample_to_16k(&samples, 32_000).unwrap();

        assert_eq!(resampled.len(), 16_000);
    }

    #[test]
    fn empty_capture_is_an_error() {
        assert!(matches!(
            encode_answer_wav(&[], TARGET_SAMPLE_RATE),
            Err(RecordingError::NoAudioCaptured)
        ));
    }
}
