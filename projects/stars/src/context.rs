use diesel::SqliteConnection;
use interfaces_github_starred::{
    index::GitHubClient,
    transport::{ReqwestTransport, Transport, TransportError},
};
use thiserror::Error;

use crate::config::Config;
use crate::db::{establish, EstablishConnectionError};
use crate::models::Star;
use crate::stars::{
    query::{query_stars, QueryError},
    sync::{sync_stars, SyncError, SyncReport},
    unstar::{unstar, UnstarError, UnstarredRepository},
};

#[derive(Debug, Error)]
pub enum OpenContextError {
    #[error("EstablishConnection: {source}")]
    EstablishConnection {
        #[from]
        source: EstablishConnectionError,
    },

    #[error("BuildTransport: {source}")]
    BuildTransport {
        #[from]
        source: TransportError,
    },
}

/// The mirror connection plus the configured GitHub client.
///
/// Built once per process and dropped at exit; every operation borrows it
/// mutably, so operations never interleave.
pub struct Context<T = ReqwestTransport> {
    pub(crate) conn: SqliteConnection,
    pub(crate) client: GitHubClient<T>,
}

impl Context<ReqwestTransport> {
    pub fn from_config(config: &Config, token: &str) -> Result<Self, OpenContextError> {
        let transport = ReqwestTransport::new(config.timeout)?;
        let client = GitHubClient::new(transport, config.api_root.as_str(), token);
        Self::open(&config.database, client)
    }
}

impl<T: Transport> Context<T> {
    pub fn new(conn: SqliteConnection, client: GitHubClient<T>) -> Self {
        Self { conn, client }
    }

    pub fn open(database: &str, client: GitHubClient<T>) -> Result<Self, OpenContextError> {
        let conn = establish(database)?;
        Ok(Self::new(conn, client))
    }

    pub fn connection(&mut self) -> &mut SqliteConnection {
        &mut self.conn
    }

    pub fn client(&self) -> &GitHubClient<T> {
        &self.client
    }

    pub async fn sync(&mut self) -> Result<SyncReport, SyncError> {
        sync_stars(self).await
    }

    pub fn query(
        &mut self,
        keyword: Option<&str>,
        language: Option<&str>,
    ) -> Result<Vec<Star>, QueryError> {
        query_stars(self, keyword, language)
    }

    pub async fn unstar(&mut self, repo_id: i64) -> Result<UnstarredRepository, UnstarError> {
        unstar(self, repo_id).await
    }
}
