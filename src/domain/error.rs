use std::io;

use thiserror::Error;

/// Library-wide error type for stepwise operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// The manifest could not be read (missing, unreadable, or over the size cap).
    #[error("Failed to read manifest '{path}': {details}")]
    ManifestReadFailure { path: String, details: String },

    /// No line of the manifest declares a version.
    #[error("Manifest does not declare a version")]
    MissingVersion,

    /// The version line was found but its value is not quoted.
    #[error("Invalid version format: {line}")]
    InvalidVersionFormat { line: String },

    /// Target triple could not be parsed.
    #[error("Invalid target '{0}': expected <arch>-<os>[-<abi>]")]
    InvalidTarget(String),

    /// Optimize mode is not one of the known modes.
    #[error(
        "Invalid optimize mode '{0}': must be one of debug, release-safe, release-fast, release-small"
    )]
    InvalidOptimizeMode(String),

    /// Requested step is not part of the graph.
    #[error("Step '{name}' not found. Available: {available}")]
    UnknownStep { name: String, available: String },

    /// A step with the same name was registered twice.
    #[error("Step '{0}' is already defined")]
    DuplicateStep(String),

    /// Dependency edges form a cycle.
    #[error("Circular dependency detected: {0}")]
    CircularDependency(String),

    /// External tool exited unsuccessfully or could not be spawned.
    #[error("Command '{command}' failed: {details}")]
    ToolFailed { command: String, details: String },

    /// A step action failed; tagged with the originating step.
    #[error("Step '{step}' failed: {details}")]
    StepActionFailure { step: String, details: String },
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// Wrap an action error with the name of the step that produced it.
    pub fn step_failure(step: &str, source: &AppError) -> Self {
        AppError::StepActionFailure { step: step.to_string(), details: source.to_string() }
    }

    /// Provide an `io::ErrorKind`-like view for callers mapping to exit statuses.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Configuration(_)
            | AppError::TomlParse(_)
            | AppError::MissingVersion
            | AppError::InvalidVersionFormat { .. }
            | AppError::InvalidTarget(_)
            | AppError::InvalidOptimizeMode(_)
            | AppError::DuplicateStep(_)
            | AppError::CircularDependency(_) => io::ErrorKind::InvalidInput,
            AppError::ManifestReadFailure { .. } | AppError::UnknownStep { .. } => {
                io::ErrorKind::NotFound
            }
            AppError::ToolFailed { .. } | AppError::StepActionFailure { .. } => {
                io::ErrorKind::Other
            }
        }
    }
}
