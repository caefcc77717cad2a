use std::io;

use thiserror::Error;

/// Library-wide error type for charm operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// A required environment variable is not set.
    #[error("Environment variable {0} is not set")]
    MissingEnv(String),

    /// The hook name does not correspond to any handled event.
    #[error("Unknown hook '{0}'")]
    UnknownHook(String),

    /// Template identifier is not one of the embedded templates.
    #[error("Unknown template '{0}': must be one of config.php, db.php, memcached.php")]
    UnknownTemplate(String),

    /// Orchestrator hook tool execution failed.
    #[error("Hook tool error running '{command}': {details}")]
    HookTool { command: String, details: String },

    /// System command execution failed.
    #[error("Command '{command}' failed: {details}")]
    Command { command: String, details: String },

    /// Template rendering failed.
    #[error("Failed to render template {template}: {reason}")]
    Render { template: String, reason: String },

    /// Parse error.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },

    /// JSON encoding or decoding error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// Provide an `io::ErrorKind`-like view for callers matching on error class.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Configuration(_)
            | AppError::UnknownHook(_)
            | AppError::UnknownTemplate(_)
            | AppError::ParseError { .. }
            | AppError::Json(_) => io::ErrorKind::InvalidInput,
            AppError::MissingEnv(_) => io::ErrorKind::NotFound,
            AppError::Render { .. } => io::ErrorKind::InvalidData,
            AppError::HookTool { .. } | AppError::Command { .. } => io::ErrorKind::Other,
        }
    }
}
