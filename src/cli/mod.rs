//! CLI layer: argument parsing, presentation, and the interactive runner

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod presenter;
