use std::io;
use std::path::PathBuf;

/// Errors that can occur during buildium operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A provider's build file could not be parsed
    #[error("Syntax error in {}: {message}", path.display())]
    ConfigSyntax { path: PathBuf, message: String },

    /// Any other failure raised while a provider computed its settings
    #[error("{provider} build provider failed: {message}")]
    Provider { provider: String, message: String },

    #[error("{provider} build provider did not answer within {secs}s")]
    Timeout { provider: String, secs: u64 },

    /// Failure outside individual provider handling
    #[error("Refresh error: {0}")]
    Refresh(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn syntax(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::ConfigSyntax {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether this error means a build file failed to parse
    pub fn is_syntax_error(&self) -> bool {
        matches!(self, Error::ConfigSyntax { .. })
    }
}

/// Result type alias for buildium operations
pub type Result<T> = std::result::Result<T, Error>;
