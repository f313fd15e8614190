//! Classification of operation errors into the kinds reported to the user.

use std::fmt;

use interfaces_github_starred::index::{DeleteStarError, FetchStarredPageError, RequestError};

use crate::config::ConfigError;
use crate::context::OpenContextError;
use crate::stars::{query::QueryError, sync::SyncError, unstar::UnstarError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network failure or non-success HTTP status.
    Transport,
    /// Response body could not be decoded.
    Decode,
    /// Connect, migrate, prepare or execute failure against the mirror.
    Storage,
    /// Unstar of an id that is not mirrored.
    NotFound,
    Config,
    /// Anything else, e.g. failing to initialise logging or write output.
    Internal,
}

impl ErrorKind {
    /// Process exit code.
    pub fn code(self) -> u8 {
        match self {
            ErrorKind::Transport => 2,
            ErrorKind::Decode => 3,
            ErrorKind::Storage => 4,
            ErrorKind::NotFound => 5,
            ErrorKind::Config => 6,
            ErrorKind::Internal => 1,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Transport => "transport",
            ErrorKind::Decode => "decode",
            ErrorKind::Storage => "storage",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Config => "config",
            ErrorKind::Internal => "internal",
        };
        f.write_str(name)
    }
}

fn request_kind(err: &RequestError) -> ErrorKind {
    match err {
        RequestError::InvalidToken { .. } => ErrorKind::Config,
        RequestError::Transport { .. } | RequestError::UnexpectedStatus { .. } => {
            ErrorKind::Transport
        }
        RequestError::DeserializeResponseBody { .. } => ErrorKind::Decode,
    }
}

impl SyncError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SyncError::FetchStarredPage { source, .. } => match source {
                FetchStarredPageError::Request { source } => request_kind(source),
                FetchStarredPageError::EmptyBody { .. }
                | FetchStarredPageError::DeserializeStarredPage { .. } => ErrorKind::Decode,
            },
        }
    }
}

impl QueryError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Storage
    }
}

impl UnstarError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UnstarError::DeleteRepository { .. } | UnstarError::DeleteStar { .. } => {
                ErrorKind::Storage
            }
            UnstarError::RepositoryNotFound { .. } => ErrorKind::NotFound,
            UnstarError::RemoteUnstar {
                source: DeleteStarError::Request { source, .. },
            } => request_kind(source),
        }
    }
}

impl OpenContextError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OpenContextError::EstablishConnection { .. } => ErrorKind::Storage,
            OpenContextError::BuildTransport { .. } => ErrorKind::Transport,
        }
    }
}

impl ConfigError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Config
    }
}
