//! Error types for gws-launch.

use thiserror::Error;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Result type for gws-launch operations.
pub type LaunchResult<T> = Result<T, LaunchError>;

/// Error type for gws-launch operations.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// A required config field is absent.
    #[error("Required config field '{field}' is missing")]
    MissingRequiredField { field: String },

    /// Config failed schema validation.
    #[error("Validation failed")]
    ValidationFailed(crate::validate::ValidationResult),

    /// A `-k` flag is not in `KEY=VALUE` form.
    #[error("Invalid config format '{0}'. Expected key=value")]
    InvalidConfigFlag(String),

    /// Config file could not be parsed.
    #[error("Failed to parse configuration: {0}")]
    ConfigParseError(String),

    /// The launch command could not be started.
    #[error("Failed to start '{command}': {source}")]
    ProcessStart {
        /// Command that was spawned.
        command: String,
        /// Underlying spawn error.
        #[source]
        source: std::io::Error,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error.
    #[error("Deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// Generic error.
    #[error("{0}")]
    Generic(String),
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl From<anyhow::Error> for LaunchError {
    fn from(err: anyhow::Error) -> Self {
        LaunchError::Generic(err.to_string())
    }
}
