//! Domain error types

use thiserror::Error;

/// Error when an invalid experience level is provided
#[derive(Debug, Clone, Error)]
#[error("Invalid experience level: \"{input}\". Valid levels are: entry, intermediate, senior")]
pub struct InvalidExperienceLevelError {
    pub input: String,
}

/// Error when an invalid interview domain is provided
#[derive(Debug, Clone, Error)]
#[error("Invalid domain: \"{input}\". Valid domains are: software_engineering, data_science, product_management")]
pub struct InvalidDomainError {
    pub input: String,
}

/// Error when a candidate profile is incomplete
#[derive(Debug, Clone, Error)]
#[error("Profile field '{field}' must not be empty")]
pub struct EmptyProfileFieldError {
    pub field: &'static str,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
