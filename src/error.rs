use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BruteError>;

/// Errors that stop a run before any probe is issued.
#[derive(Debug, Error)]
pub enum BruteError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("configuration error: cannot read word list {path}: {source}")]
    Wordlist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BruteError {
    pub fn config(msg: impl Into<String>) -> Self {
        BruteError::Configuration(msg.into())
    }

    /// Every variant is a configuration-time failure.
    pub fn is_configuration(&self) -> bool {
        matches!(self, BruteError::Configuration(_) | BruteError::Wordlist { .. })
    }
}

/// Connection-level failure of a single existence request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Request(err.to_string())
        }
    }
}
