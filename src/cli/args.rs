//! CLI argument definitions using Clap

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::profile::{ExperienceLevel, InterviewDomain};

/// InterviewCoach - mock interview practice from the terminal
#[derive(Parser, Debug)]
#[command(name = "interview-coach")]
#[command(version)]
#[command(about = "Practice mock interviews with AI feedback")]
#[command(long_about = None)]
pub struct Cli {
    /// Candidate name (skips the name prompt)
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Experience level (skips the level prompt)
    #[arg(short = 'l', long, value_name = "LEVEL")]
    pub level: Option<LevelArg>,

    /// Interview domain (skips the domain prompt)
    #[arg(short = 'D', long, value_name = "DOMAIN")]
    pub domain: Option<DomainArg>,

    /// Coach service base URL
    #[arg(long, value_name = "URL", env = "COACH_SERVICE_URL")]
    pub service_url: Option<String>,

    /// Speech recognizer API key for live answer transcription
    #[arg(
        long,
        value_name = "KEY",
        env = "GEMINI_API_KEY",
        hide_env_values = true
    )]
    pub transcribe_api_key: Option<String>,

    /// Play audio cues when recording starts and stops
    #[arg(long)]
    pub cues: bool,

    /// Disable audio cues
    #[arg(long, conflicts_with = "cues")]
    pub no_cues: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Show the summary of a past interview
    Summary {
        /// Interview identifier returned when the session started
        interview_id: String,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Experience level argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LevelArg {
    Entry,
    Intermediate,
    Senior,
}

impl From<LevelArg> for ExperienceLevel {
    fn from(arg: LevelArg) -> Self {
        match arg {
            LevelArg::Entry => ExperienceLevel::Entry,
            LevelArg::Intermediate => ExperienceLevel::Intermediate,
            LevelArg::Senior => ExperienceLevel::Senior,
        }
    }
}

/// Interview domain argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum DomainArg {
    SoftwareEngineering,
    DataScience,
    ProductManagement,
}

impl From<DomainArg> for InterviewDomain {
    fn from(arg: DomainArg) -> Self {
        match arg {
            DomainArg::SoftwareEngineering => InterviewDomain::SoftwareEngineering,
            DomainArg::DataScience => InterviewDomain::DataScience,
            DomainArg::ProductManagement => InterviewDomain::ProductManagement,
        }
    }
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &["service_url", "transcribe_api_key", "audio_cues"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
