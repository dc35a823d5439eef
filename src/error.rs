use thiserror::Error;

use crate::gateway::Table;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// The request was rejected locally and never reached the gateway
    #[error("{0}")]
    Validation(String),
    /// The gateway answered, but with a failure
    #[error("backend rejected the request: {0}")]
    Remote(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest_middleware::Error),
    #[error("malformed {table} record: {source}")]
    Malformed {
        table: Table,
        #[source]
        source: serde_json::Error,
    },
    #[error("local storage: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote(message.into())
    }

    /// Failures that originate from the gateway rather than local checks
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::Remote(_) | Self::Transport(_) | Self::Malformed { .. }
        )
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(reqwest_middleware::Error::from(e))
    }
}
