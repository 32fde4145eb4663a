//! Main interactive interview runner

use std::io::Write as _;
use std::process::ExitCode;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use tokio::time::MissedTickBehavior;

use crate::application::ports::{
    AudioCue, CoachService, ConfigStore, LiveTranscriber, TranscriptEvent,
};
use crate::application::{SessionController, StartSession, SubmitOutcome};
use crate::domain::config::AppConfig;
use crate::domain::profile::{CandidateProfile, ExperienceLevel, InterviewDomain};
use crate::domain::session::SessionPhase;
use crate::infrastructure::{
    CpalRecorder, HttpCoachService, NoOpAudioCue, NoOpTranscriber, RemoteLiveTranscriber,
    RodioAudioCue, XdgConfigStore,
};

use super::args::Cli;
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

const COMMAND_HINT: &str =
    "Type your answer and press Enter. Commands: /record, /stop, /submit, /show, /clear, /help, /quit";

type StdinLines = Lines<BufReader<tokio::io::Stdin>>;

type Controller =
    SessionController<HttpCoachService, CpalRecorder, Box<dyn LiveTranscriber>, Box<dyn AudioCue>>;

/// How a wizard run ended
enum WizardEnd {
    /// All questions answered; the summary can be fetched
    Completed,
    /// The candidate quit or input closed
    Quit,
}

/// Load and merge configuration from file and CLI.
/// Clap fills CLI fields from the environment when the flags are absent,
/// so env vars ride along with the CLI layer.
pub async fn load_merged_config(cli: &Cli) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|_| AppConfig::empty());

    let cli_config = AppConfig {
        service_url: cli.service_url.clone(),
        transcribe_api_key: cli.transcribe_api_key.clone(),
        audio_cues: if cli.cues {
            Some(true)
        } else if cli.no_cues {
            Some(false)
        } else {
            None
        },
    };

    // Merge: defaults < file < cli
    AppConfig::defaults().merge(file_config).merge(cli_config)
}

/// Prompt on stderr and read one trimmed line
async fn prompt_line(lines: &mut StdinLines, prompt: &str) -> Result<String, String> {
    eprint!("{}: ", prompt);
    let _ = std::io::stderr().flush();

    match lines.next_line().await {
        Ok(Some(line)) => Ok(line.trim().to_string()),
        Ok(None) => Err("Input closed".to_string()),
        Err(e) => Err(format!("Failed to read input: {}", e)),
    }
}

/// Pick an experience level by number or name
async fn prompt_level(
    presenter: &Presenter,
    lines: &mut StdinLines,
) -> Result<ExperienceLevel, String> {
    presenter.info("Experience level:");
    for (index, level) in ExperienceLevel::ALL.iter().enumerate() {
        eprintln!("  {}. {}", index + 1, level.label());
    }

    loop {
        let input = prompt_line(lines, "Choose").await?;
        if let Ok(index) = input.parse::<usize>() {
            if (1..=ExperienceLevel::ALL.len()).contains(&index) {
                return Ok(ExperienceLevel::ALL[index - 1]);
            }
        }
        if let Ok(level) = input.parse::<ExperienceLevel>() {
            return Ok(level);
        }
        presenter.warn("Enter a number from the list.");
    }
}

/// Pick an interview domain by number or name
async fn prompt_domain(
    presenter: &Presenter,
    lines: &mut StdinLines,
) -> Result<InterviewDomain, String> {
    presenter.info("Interview domain:");
    for (index, domain) in InterviewDomain::ALL.iter().enumerate() {
        eprintln!("  {}. {}", index + 1, domain.label());
    }

    loop {
        let input = prompt_line(lines, "Choose").await?;
        if let Ok(index) = input.parse::<usize>() {
            if (1..=InterviewDomain::ALL.len()).contains(&index) {
                return Ok(InterviewDomain::ALL[index - 1]);
            }
        }
        if let Ok(domain) = input.parse::<InterviewDomain>() {
            return Ok(domain);
        }
        presenter.warn("Enter a number from the list.");
    }
}

/// Collect the candidate profile from CLI args, prompting for whatever is
/// missing. Submission is blocked until every field is present.
async fn collect_profile(
    cli: &Cli,
    presenter: &Presenter,
    lines: &mut StdinLines,
) -> Result<CandidateProfile, String> {
    let name = match &cli.name {
        Some(name) => name.clone(),
        None => loop {
            let name = prompt_line(lines, "Your name").await?;
            if !name.is_empty() {
                break name;
            }
            presenter.warn("Name cannot be empty.");
        },
    };

    let level = match cli.level {
        Some(level) => level.into(),
        None => prompt_level(presenter, lines).await?,
    };

    let domain = match cli.domain {
        Some(domain) => domain.into(),
        None => prompt_domain(presenter, lines).await?,
    };

    CandidateProfile::new(name, level, domain).map_err(|e| e.to_string())
}

/// Handle one entered line; returns the wizard end when the line finishes
/// the session.
async fn handle_line(
    line: &str,
    controller: &mut Controller,
    presenter: &mut Presenter,
) -> Option<WizardEnd> {
    let trimmed = line.trim();

    match trimmed {
        "/record" => match controller.start_recording().await {
            Ok(true) => presenter.info("Recording... speak now, /stop to finish"),
            Ok(false) => presenter.warn("Already recording."),
            Err(e) => presenter.error(&e.to_string()),
        },
        "/stop" => {
            if controller.phase() != SessionPhase::Recording {
                presenter.warn("Not recording.");
                return None;
            }
            presenter.clear_interim_line();
            match controller.stop_recording().await {
                Ok(()) => {
                    if let Some(audio) = controller.draft().audio() {
                        presenter.success(&format!(
                            "Recording captured ({})",
                            audio.human_readable_size()
                        ));
                    }
                }
                Err(e) => presenter.error(&e.to_string()),
            }
        }
        "/submit" => {
            if controller.phase() == SessionPhase::Recording {
                presenter.warn("Finish the recording first (/stop).");
                return None;
            }
            if controller.draft().is_empty() {
                presenter.warn("Nothing to submit yet.");
                return None;
            }

            presenter.start_spinner("Submitting answer...");
            match controller.submit().await {
                Ok(SubmitOutcome::NextQuestion) => {
                    presenter.spinner_success("Answer submitted");
                    let (ordinal, total) = controller.position();
                    presenter.question_header(ordinal, total, controller.question());
                }
                Ok(SubmitOutcome::Completed) => {
                    presenter.spinner_success("Interview completed");
                    return Some(WizardEnd::Completed);
                }
                Err(e) => {
                    presenter.spinner_fail("Submission failed");
                    presenter.error(&e.to_string());
                    presenter.info("Your answer is preserved; /submit to retry.");
                }
            }
        }
        "/clear" => {
            controller.clear_draft();
            presenter.info("Draft cleared.");
        }
        "/show" => {
            let draft = controller.draft();
            if draft.is_empty() {
                presenter.info("Draft is empty.");
            } else {
                presenter.info(&format!("Draft: {}", draft.display_text()));
                if draft.has_audio() {
                    presenter.info("A recording is attached.");
                }
            }
        }
        "/help" => presenter.info(COMMAND_HINT),
        "/quit" => {
            controller.shutdown().await;
            return Some(WizardEnd::Quit);
        }
        other if other.starts_with('/') => {
            presenter.warn(&format!("Unknown command '{}'. {}", other, COMMAND_HINT));
        }
        "" => {}
        text => controller.append_typed(text),
    }

    None
}

/// Drive the question/answer wizard until completion or quit
async fn run_wizard(
    controller: &mut Controller,
    presenter: &mut Presenter,
    lines: &mut StdinLines,
) -> WizardEnd {
    let (ordinal, total) = controller.position();
    presenter.question_header(ordinal, total, controller.question());
    presenter.info(COMMAND_HINT);
    presenter.info("Take your time; nothing is captured until you /record or type.");

    let mut timer = tokio::time::interval(Duration::from_millis(500));
    timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            maybe_line = lines.next_line() => {
                let line = match maybe_line {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        controller.shutdown().await;
                        return WizardEnd::Quit;
                    }
                    Err(e) => {
                        presenter.error(&format!("Failed to read input: {}", e));
                        controller.shutdown().await;
                        return WizardEnd::Quit;
                    }
                };
                if let Some(end) = handle_line(&line, controller, presenter).await {
                    return end;
                }
            }
            event = controller.next_transcript() => {
                match event {
                    Some(TranscriptEvent::Interim(text)) => presenter.show_interim(&text),
                    Some(TranscriptEvent::Final(text)) => presenter.show_committed(&text),
                    None => {}
                }
            }
            _ = timer.tick(), if controller.phase() == SessionPhase::Recording => {
                presenter.recording_status(controller.elapsed_ms());
            }
            _ = tokio::signal::ctrl_c() => {
                presenter.clear_interim_line();
                controller.shutdown().await;
                presenter.warn("Interrupted.");
                return WizardEnd::Quit;
            }
        }
    }
}

/// Run the full interactive interview flow
pub async fn run_interview(cli: Cli) -> ExitCode {
    let mut presenter = Presenter::new();
    let config = load_merged_config(&cli).await;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let profile = match collect_profile(&cli, &presenter, &mut lines).await {
        Ok(profile) => profile,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    let service = HttpCoachService::new(config.service_url_or_default());
    let api_key = config.transcribe_api_key.clone().unwrap_or_default();
    if api_key.is_empty() {
        // One-time notice; repeated sessions stay quiet about it
        presenter.info("Live transcription is unavailable; answers can be typed or recorded.");
    }

    loop {
        presenter.start_spinner("Starting interview...");
        let start = match StartSession::new(service.clone()).execute(&profile).await {
            Ok(start) => {
                presenter.spinner_success("Interview started");
                start
            }
            Err(e) => {
                presenter.spinner_fail("Could not start interview");
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
        };

        let transcriber: Box<dyn LiveTranscriber> = if api_key.is_empty() {
            Box::new(NoOpTranscriber)
        } else {
            Box::new(RemoteLiveTranscriber::new(api_key.clone()))
        };
        let cue: Box<dyn AudioCue> = if config.audio_cues_or_default() {
            Box::new(RodioAudioCue::new())
        } else {
            Box::new(NoOpAudioCue)
        };

        let mut controller = SessionController::new(
            service.clone(),
            CpalRecorder::new(),
            transcriber,
            cue,
            start,
        );

        match run_wizard(&mut controller, &mut presenter, &mut lines).await {
            WizardEnd::Completed => {
                presenter.start_spinner("Fetching feedback...");
                match controller.fetch_summary().await {
                    Ok(summary) => {
                        presenter.stop_spinner();
                        presenter.render_summary(&summary);
                    }
                    Err(e) => {
                        presenter.spinner_fail("Could not fetch summary");
                        presenter.error(&e.to_string());
                        return ExitCode::from(EXIT_ERROR);
                    }
                }

                match prompt_line(&mut lines, "Start a new interview? [y/N]").await {
                    Ok(answer) if matches!(answer.to_lowercase().as_str(), "y" | "yes") => continue,
                    _ => return ExitCode::from(EXIT_SUCCESS),
                }
            }
            WizardEnd::Quit => return ExitCode::from(EXIT_SUCCESS),
        }
    }
}

/// Fetch and render the summary of a past interview
pub async fn run_summary(cli: &Cli, interview_id: &str) -> ExitCode {
    let mut presenter = Presenter::new();
    let config = load_merged_config(cli).await;
    let service = HttpCoachService::new(config.service_url_or_default());

    presenter.start_spinner("Fetching summary...");
    match service.fetch_summary(interview_id).await {
        Ok(summary) => {
            presenter.stop_spinner();
            presenter.render_summary(&summary);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.spinner_fail("Could not fetch summary");
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}
