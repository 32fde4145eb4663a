//! Recorded answer audio value object

use std::fmt;

/// Value object holding a finalized answer recording.
///
/// The coach service accepts exactly one upload format (16-bit PCM WAV),
/// so the container type is fixed rather than parameterized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerAudio {
    data: Vec<u8>,
}

impl AnswerAudio {
    /// MIME type the service expects for the audio part
    pub const MIME_TYPE: &'static str = "audio/wav";

    /// File name sent with the multipart audio part
    pub const FILE_NAME: &'static str = "recording.wav";

    /// Create from encoded WAV bytes
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Get the encoded bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get the size in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Get human-readable size
    pub fn human_readable_size(&self) -> String {
        let bytes = self.size_bytes();
        if bytes < 1024 {
            format!("{} B", bytes)
        } else if bytes < 1024 * 1024 {
            format!("{:.1} KB", bytes as f64 / 1024.0)
        } else {
            format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
        }
    }

    /// Encode the audio as base64 (inline upload to the recognizer)
    pub fn to_base64(&self) -> String {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }
}

impl fmt::Display for AnswerAudio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", Self::FILE_NAME, self.human_readable_size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_bytes() {
        let audio = AnswerAudio::new(vec![0u8; 1024]);
        assert_eq!(audio.size_bytes(), 1024);
    }

    #[test]
    fn human_readable_size_bytes() {
        let audio = AnswerAudio::new(vec![0u8; 500]);
        assert_eq!(audio.human_readable_size(), "500 B");
    }

    #[test]
    fn human_readable_size_kb() {
        let audio = AnswerAudio::new(vec![0u8; 2048]);
        assert_eq!(audio.human_readable_size(), "2.0 KB");
    }

    #[test]
    fn human_readable_size_mb() {
        let audio = AnswerAudio::new(vec![0u8; 2 * 1024 * 1024]);
        assert_eq!(audio.human_readable_size(), "2.0 MB");
    }

    #[test]
    fn to_base64_round_trip() {
        let audio = AnswerAudio::new(vec![1, 2, 3, 4]);
        use base64::Engine;
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(audio.to_base64())
            .unwrap();
        assert_eq!(decoded, vec![1, 2, 3, 4]);
    }
}
