use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which remote call an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Register,
    Update,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Register => f.write_str("registration"),
            Stage::Update => f.write_str("update"),
        }
    }
}

/// Coarse classification used by callers and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Network,
    Protocol,
    Serialization,
    Storage,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("missing required parameter: baseUrl (use --baseUrl or BASE_URL)")]
    MissingBaseUrl,

    #[error("failed to build HTTP client: {reason}")]
    HttpClient { reason: String },

    #[error("failed to build {stage} request: {reason}")]
    InvalidRequest { stage: Stage, reason: String },

    #[error("{stage} request failed: {source}")]
    Transport {
        stage: Stage,
        #[source]
        source: reqwest::Error,
    },

    #[error("{stage} returned non-200 status code: {status}")]
    UnexpectedStatus { stage: Stage, status: u16 },

    #[error("failed to read {stage} response body: {source}")]
    Body {
        stage: Stage,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to decode {stage} response: {source}")]
    Decode {
        stage: Stage,
        #[source]
        source: serde_json::Error,
    },

    #[error("{stage} response carried an empty token")]
    EmptyToken { stage: Stage },

    #[error("failed to read state file {}: {source}", .path.display())]
    StateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse state file {}: {source}", .path.display())]
    StateParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("state file {} has no token", .path.display())]
    StateMissingToken { path: PathBuf },

    #[error("failed to encode state: {0}")]
    StateEncode(#[source] serde_json::Error),

    #[error("failed to write state file {}: {source}", .path.display())]
    StateWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingBaseUrl => ErrorKind::Configuration,
            Error::HttpClient { .. }
            | Error::InvalidRequest { .. }
            | Error::Transport { .. }
            | Error::Body { .. } => ErrorKind::Network,
            Error::UnexpectedStatus { .. } | Error::EmptyToken { .. } => ErrorKind::Protocol,
            Error::Decode { .. }
            | Error::StateParse { .. }
            | Error::StateMissingToken { .. }
            | Error::StateEncode(_) => ErrorKind::Serialization,
            Error::StateRead { .. } | Error::StateWrite { .. } => ErrorKind::Storage,
        }
    }

    /// The phase a failure belongs to. State that fails to load or parse
    /// counts as the update phase, since a file was there to read.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Error::MissingBaseUrl | Error::HttpClient { .. } => None,
            Error::InvalidRequest { stage, .. }
            | Error::Transport { stage, .. }
            | Error::UnexpectedStatus { stage, .. }
            | Error::Body { stage, .. }
            | Error::Decode { stage, .. }
            | Error::EmptyToken { stage } => Some(*stage),
            Error::StateRead { .. } | Error::StateParse { .. } | Error::StateMissingToken { .. } => {
                Some(Stage::Update)
            }
            Error::StateEncode(_) | Error::StateWrite { .. } => Some(Stage::Register),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
