//! Answer draft value object

use crate::domain::audio::AnswerAudio;

/// The in-progress answer to the current question.
///
/// Holds committed text (typed lines plus finalized transcript segments), a
/// provisional interim transcript that is displayed but never committed, and
/// the finalized audio of the most recent recording. The draft is transient:
/// it is cleared after a successful submission and preserved across a failed
/// one.
#[derive(Debug, Clone, Default)]
pub struct AnswerDraft {
    committed: String,
    interim: String,
    audio: Option<AnswerAudio>,
}

impl AnswerDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed answer text (what gets submitted)
    pub fn committed(&self) -> &str {
        &self.committed
    }

    /// Provisional transcript fragment, not yet finalized
    pub fn interim(&self) -> &str {
        &self.interim
    }

    pub fn audio(&self) -> Option<&AnswerAudio> {
        self.audio.as_ref()
    }

    pub fn has_audio(&self) -> bool {
        self.audio.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.committed.is_empty() && self.audio.is_none()
    }

    /// Append a typed line to the committed text
    pub fn append_typed(&mut self, line: &str) {
        self.push_committed(line.trim_end());
    }

    /// Append a finalized transcript segment to the committed text and drop
    /// the interim fragment it replaces
    pub fn append_final_segment(&mut self, segment: &str) {
        self.push_committed(segment.trim());
        self.interim.clear();
    }

    /// Replace the interim transcript fragment
    pub fn set_interim(&mut self, fragment: &str) {
        self.interim = fragment.trim().to_string();
    }

    pub fn clear_interim(&mut self) {
        self.interim.clear();
    }

    /// Attach the finalized recording, replacing any previous one
    pub fn attach_audio(&mut self, audio: AnswerAudio) {
        self.audio = Some(audio);
    }

    /// Text shown to the candidate: committed text with the interim fragment
    /// appended (but not persisted)
    pub fn display_text(&self) -> String {
        if self.interim.is_empty() {
            self.committed.clone()
        } else if self.committed.is_empty() {
            self.interim.clone()
        } else {
            format!("{} {}", self.committed, self.interim)
        }
    }

    /// Reset the draft for the next question
    pub fn clear(&mut self) {
        self.committed.clear();
        self.interim.clear();
        self.audio = None;
    }

    fn push_committed(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if !self.committed.is_empty() {
            self.committed.push(' ');
        }
        self.committed.push_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_draft_is_empty() {
        let draft = AnswerDraft::new();
        assert!(draft.is_empty());
        assert_eq!(draft.display_text(), "");
    }

    #[test]
    fn typed_lines_accumulate_with_spaces() {
        let mut draft = AnswerDraft::new();
        draft.append_typed("I once led");
        draft.append_typed("a migration.");
        assert_eq!(draft.committed(), "I once led a migration.");
    }

    #[test]
    fn final_segment_commits_and_clears_interim() {
        let mut draft = AnswerDraft::new();
        draft.set_interim("i once");
        draft.append_final_segment("I once led a team.");

        assert_eq!(draft.committed(), "I once led a team.");
        assert_eq!(draft.interim(), "");
    }

    #[test]
    fn interim_is_displayed_but_not_committed() {
        let mut draft = AnswerDraft::new();
        draft.append_typed("My answer.");
        draft.set_interim("and also");

        assert_eq!(draft.display_text(), "My answer. and also");
        assert_eq!(draft.committed(), "My answer.");
    }

    #[test]
    fn interim_only_display() {
        let mut draft = AnswerDraft::new();
        draft.set_interim("hello");
        assert_eq!(draft.display_text(), "hello");
    }

    #[test]
    fn empty_segments_are_ignored() {
        let mut draft = AnswerDraft::new();
        draft.append_typed("   ");
        draft.append_final_segment("");
        assert!(draft.is_empty());
    }

    #[test]
    fn attach_audio_replaces_previous() {
        let mut draft = AnswerDraft::new();
        draft.attach_audio(AnswerAudio::new(vec![1]));
        draft.attach_audio(AnswerAudio::new(vec![2, 3]));

        assert_eq!(draft.audio().unwrap().size_bytes(), 2);
    }

    #[test]
    fn clear_resets_everything() {
        let mut draft = AnswerDraft::new();
        draft.append_typed("text");
        draft.set_interim("more");
        draft.attach_audio(AnswerAudio::new(vec![1]));

        draft.clear();
        assert!(draft.is_empty());
        assert_eq!(draft.interim(), "");
    }
}
