use crate::components::shift_editor::models::TimeInterval;
use miette::Diagnostic;
use rust_i18n::t;
use thiserror::Error;

/// Rejection of a single edit to a working interval set.
///
/// These never end an editing session: the attempted edit is dropped and the
/// previous state is kept.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ValidationError {
    #[error("start time must precede end time in {interval}")]
    #[diagnostic(code(shift_editor::validation::start_not_before_end))]
    StartNotBeforeEnd { interval: TimeInterval },

    #[error("shift times must not overlap: {first} and {second}")]
    #[diagnostic(code(shift_editor::validation::overlap))]
    Overlap {
        first: TimeInterval,
        second: TimeInterval,
    },

    #[error("the last remaining interval cannot be deleted")]
    #[diagnostic(code(shift_editor::validation::last_interval))]
    LastInterval,
}

impl ValidationError {
    /// Localised message shown to the person editing the shift
    pub fn user_message(&self) -> String {
        match self {
            ValidationError::StartNotBeforeEnd { .. } => t!("validation_start_before_end"),
            ValidationError::Overlap { .. } => t!("validation_overlap"),
            ValidationError::LastInterval => t!("validation_last_interval"),
        }
        .to_string()
    }
}

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Validation(#[from] ValidationError),

    #[error("Shift API error: {0}")]
    #[diagnostic(code(shift_editor::persistence))]
    Persistence(String),

    #[error("HTTP error: {0}")]
    #[diagnostic(code(shift_editor::http))]
    Http(#[from] reqwest::Error),

    #[error("Environment error: {0}")]
    #[diagnostic(code(shift_editor::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(shift_editor::config))]
    Config(String),

    #[error(transparent)]
    #[diagnostic(code(shift_editor::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(shift_editor::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(shift_editor::other))]
    Other(String),
}

impl Error {
    /// Localised message for the editor. Remote failures collapse into one
    /// generic "save failed" text.
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation(e) => e.user_message(),
            Error::Persistence(_) | Error::Http(_) => t!("save_failed").to_string(),
            other => other.to_string(),
        }
    }

    /// Whether the session can carry on after this error
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Validation(_) | Error::Persistence(_) | Error::Http(_)
        )
    }
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type EditorResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create shift API errors
pub fn persistence_error(message: &str) -> Error {
    Error::Persistence(message.to_string())
}
