//! InterviewCoach - mock interview practice from the terminal
//!
//! Runs a question/answer wizard against a remote coaching service: the
//! candidate answers by typing or by voice, recordings are transcribed live
//! when a recognizer is configured, and a scored feedback summary is
//! rendered once the session completes.
//!
//! The crate follows a hexagonal layout:
//! - `domain`: entities and value objects, no I/O
//! - `application`: use cases and port interfaces
//! - `infrastructure`: adapter implementations (HTTP, cpal, rodio, config)
//! - `cli`: argument parsing and the interactive terminal front end

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
