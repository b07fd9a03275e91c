use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReleaseNotesError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    CommitLookup(String),

    #[error("Unknown AI provider: {name}. Supported providers: {supported}")]
    UnsupportedProvider { name: String, supported: String },

    #[error("{0}")]
    Generation(String),

    #[error("{0}")]
    Publish(String),

    #[error("Invalid config file {path}: {reason}")]
    Config { path: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ReleaseNotesError>;
