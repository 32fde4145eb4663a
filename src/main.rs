use std::process::ExitCode;

use clap::Parser;

use interview_coach::cli::app::{run_interview, run_summary, EXIT_ERROR, EXIT_SUCCESS};
use interview_coach::cli::args::{Cli, Commands};
use interview_coach::cli::config_cmd::handle_config_command;
use interview_coach::cli::presenter::Presenter;
use interview_coach::infrastructure::XdgConfigStore;

#[tokio::main]
async fn main() -> ExitCode {
    let mut cli = Cli::parse();

    match cli.command.take() {
        Some(Commands::Config { action }) => {
            let presenter = Presenter::new();
            let store = XdgConfigStore::new();
            match handle_config_command(action, &store, &presenter).await {
                Ok(()) => ExitCode::from(EXIT_SUCCESS),
                Err(e) => {
                    presenter.error(&e.to_string());
                    ExitCode::from(EXIT_ERROR)
                }
            }
        }
        Some(Commands::Summary { interview_id }) => run_summary(&cli, &interview_id).await,
        None => run_interview(cli).await,
    }
}
