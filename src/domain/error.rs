use std::io;

use thiserror::Error;

/// Library-wide error type for ghsched operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Invalid configuration value.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Workflow file does not carry the `.yml` extension.
    #[error("File must be a YAML file: {0}")]
    NotYamlFile(String),

    /// Workflow file is not located under `.github/workflows/`.
    #[error("File must be in the .github/workflows directory: {0}")]
    NotInWorkflowsDir(String),

    /// No `.git/` directory next to the `.github/` tree.
    #[error("Path {0} does not appear to be in a git repository")]
    NotInGitRepository(String),

    /// A job batch was constructed without any jobs.
    #[error("At least one timed job is required")]
    EmptyJobBatch,

    /// Timestamp could not be parsed.
    #[error("Invalid time '{value}': {details}")]
    InvalidTime { value: String, details: String },

    /// Parse error.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },

    /// Serialization error.
    #[error("Failed to serialize {what}: {details}")]
    SerializeError { what: String, details: String },

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),
}

impl AppError {
    /// Provide an `io::ErrorKind`-like view for callers mapping errors to exit states.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::InvalidConfig(_)
            | AppError::NotYamlFile(_)
            | AppError::NotInWorkflowsDir(_)
            | AppError::EmptyJobBatch
            | AppError::InvalidTime { .. }
            | AppError::ParseError { .. }
            | AppError::TomlParseError(_) => io::ErrorKind::InvalidInput,
            AppError::NotInGitRepository(_) => io::ErrorKind::NotFound,
            AppError::SerializeError { .. } => io::ErrorKind::InvalidData,
        }
    }
}
