use thiserror::Error;

/// Failure of a listings fetch, whether against the upstream or the proxy.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Transport(String),

    /// Non-success status. Carries no upstream body.
    #[error("Upstream responded with status {0}")]
    Status(u16),

    #[error("Malformed listings payload: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => FetchError::Status(status.as_u16()),
            None => FetchError::Transport(err.to_string()),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("No value stored")]
    Missing,

    #[error("Stored value could not be parsed: {0}")]
    Unparsable(String),

    #[error("Write failed: {0}")]
    Write(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}
