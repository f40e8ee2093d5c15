use thiserror::Error;

pub type Result<T> = std::result::Result<T, CompanionError>;

#[derive(Error, Debug)]
pub enum CompanionError {
    // Standard library errors with automatic conversion
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] globset::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Host capability errors
    #[error("Edit rejected: {0}")]
    Edit(String),

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<config::ConfigError> for CompanionError {
    fn from(err: config::ConfigError) -> Self {
        CompanionError::Configuration(err.to_string())
    }
}
