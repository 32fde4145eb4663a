//! CLI presenter for output formatting

use std::io::{self, Write};

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::session::Question;
use crate::domain::summary::{InterviewSummary, ScoreAverages, SCORE_SCALE};

/// Presenter for CLI output formatting
pub struct Presenter {
    spinner: Option<ProgressBar>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self { spinner: None }
    }

    /// Start a spinner with message
    pub fn start_spinner(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    /// Mark spinner as success and finish
    pub fn spinner_success(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✓".green(), message));
        }
    }

    /// Mark spinner as failed and finish
    pub fn spinner_fail(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✗".red(), message));
        }
    }

    /// Stop spinner without status
    pub fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Print the current question header with position
    pub fn question_header(&self, ordinal: u32, total: u32, question: &Question) {
        eprintln!();
        eprintln!(
            "{}",
            format!("Question {} of {}", ordinal, total).bold().cyan()
        );
        eprintln!("{}", question.prompt());
        eprintln!();
    }

    /// Overwrite the current line with an interim transcript hypothesis
    pub fn show_interim(&self, text: &str) {
        eprint!("\r\x1b[2K  {} {}", "…".yellow(), text.dimmed());
        let _ = io::stderr().flush();
    }

    /// Replace the interim line with a committed transcript segment
    pub fn show_committed(&self, text: &str) {
        eprintln!("\r\x1b[2K  {} {}", "»".green(), text);
    }

    /// Clear the interim line
    pub fn clear_interim_line(&self) {
        eprint!("\r\x1b[2K");
        let _ = io::stderr().flush();
    }

    /// Overwrite the current line with the live recording timer.
    /// Shares the interim line; transcript events redraw over it.
    pub fn recording_status(&self, elapsed_ms: u64) {
        eprint!(
            "\r\x1b[2K  {} {} recording (/stop to finish)",
            "●".red(),
            self.format_elapsed(elapsed_ms)
        );
        let _ = io::stderr().flush();
    }

    /// Format elapsed recording time as m:ss
    pub fn format_elapsed(&self, elapsed_ms: u64) -> String {
        let secs = elapsed_ms / 1000;
        format!("{}:{:02}", secs / 60, secs % 60)
    }

    /// Render a score gauge on the 0-100 scale
    pub fn score_gauge(&self, label: &str, score: f64) -> String {
        let bar_width = 20usize;
        let clamped = score.clamp(0.0, SCORE_SCALE);
        let filled = ((clamped / SCORE_SCALE) * bar_width as f64).round() as usize;
        let empty = bar_width - filled;

        format!(
            "{:<12} [{}{}] {:>5.1}",
            label,
            "█".repeat(filled).cyan(),
            "░".repeat(empty),
            clamped
        )
    }

    /// Print the averaged scores block
    fn render_averages(&self, averages: &ScoreAverages) {
        eprintln!("{}", "Overall scores".bold());
        eprintln!("  {}", self.score_gauge("Clarity", averages.clarity));
        eprintln!("  {}", self.score_gauge("Relevance", averages.relevance));
        eprintln!("  {}", self.score_gauge("Confidence", averages.confidence));
    }

    /// Render the full interview summary
    pub fn render_summary(&self, summary: &InterviewSummary) {
        eprintln!();
        eprintln!("{}", "Interview Summary".bold().underline());
        eprintln!(
            "{} ({}, {})",
            summary.profile.name().bold(),
            summary.profile.experience_level().label(),
            summary.profile.domain().label()
        );
        eprintln!();

        match summary.averages() {
            Some(averages) => self.render_averages(&averages),
            None => {
                self.info("No answers were reviewed in this session.");
                return;
            }
        }

        for (index, review) in summary.responses.iter().enumerate() {
            eprintln!();
            eprintln!(
                "{}",
                format!("Q{}: {}", index + 1, review.question).bold()
            );
            eprintln!("  {} {}", "Answer:".cyan(), review.answer);
            if let Some(ref transcription) = review.audio_transcription {
                eprintln!("  {} {}", "Heard:".cyan(), transcription);
            }
            eprintln!("  {}", self.score_gauge("Clarity", review.feedback.clarity()));
            eprintln!(
                "  {}",
                self.score_gauge("Relevance", review.feedback.relevance())
            );
            eprintln!(
                "  {}",
                self.score_gauge("Confidence", review.feedback.confidence())
            );
            for tip in review.feedback.improvement_tips() {
                eprintln!("  {} {}", "Tip:".yellow(), tip);
            }
        }
        eprintln!();
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_elapsed_under_a_minute() {
        let presenter = Presenter::new();
        assert_eq!(presenter.format_elapsed(0), "0:00");
        assert_eq!(presenter.format_elapsed(12_000), "0:12");
    }

    #[test]
    fn format_elapsed_over_a_minute() {
        let presenter = Presenter::new();
        assert_eq!(presenter.format_elapsed(95_000), "1:35");
    }

    #[test]
    fn score_gauge_full() {
        let presenter = Presenter::new();
        let gauge = presenter.score_gauge("Clarity", 100.0);
        assert!(gauge.contains("100.0"));
        assert!(!gauge.contains('░'));
    }

    #[test]
    fn score_gauge_empty() {
        let presenter = Presenter::new();
        let gauge = presenter.score_gauge("Clarity", 0.0);
        assert!(gauge.contains("0.0"));
        assert!(!gauge.contains('█'));
    }

    #[test]
    fn score_gauge_clamps_out_of_range() {
        let presenter = Presenter::new();
        let gauge = presenter.score_gauge("Clarity", 150.0);
        assert!(gauge.contains("100.0"));
    }
}
