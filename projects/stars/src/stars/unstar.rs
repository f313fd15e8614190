use interfaces_github_starred::{index::DeleteStarError, transport::Transport};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::context::Context;
use crate::db::{
    repository::queries::{delete_repository_returning_name, DeleteRepositoryError},
    star::queries::{delete_star_by_repo_id, DeleteStarByRepoIdError},
};

/// Once `DeleteRepository` has succeeded nothing is rolled back: a later
/// failure leaves the star row and/or the remote star in place until the next
/// sync.
#[derive(Debug, Error)]
pub enum UnstarError {
    #[error("DeleteRepository: {source}")]
    DeleteRepository {
        #[from]
        source: DeleteRepositoryError,
    },

    #[error("RepositoryNotFound: {repo_id} is not in the mirror")]
    RepositoryNotFound {
        repo_id: i64,
    },

    #[error("DeleteStar {full_name}: {source}")]
    DeleteStar {
        full_name: String,
        source: DeleteStarByRepoIdError,
    },

    #[error("RemoteUnstar: {source}")]
    RemoteUnstar {
        #[from]
        source: DeleteStarError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnstarredRepository {
    pub repo_id: i64,
    pub full_name: String,
}

/// Deletes the repository row, then its star row, then the remote star.
/// Each step runs only if the previous one succeeded.
pub async fn unstar<T: Transport>(
    ctx: &mut Context<T>,
    repo_id: i64,
) -> Result<UnstarredRepository, UnstarError> {
    let full_name = delete_repository_returning_name(&mut ctx.conn, repo_id)?
        .ok_or(UnstarError::RepositoryNotFound { repo_id })?;
    info!(repo_id, %full_name, "deleted repository from mirror");

    delete_star_by_repo_id(&mut ctx.conn, repo_id).map_err(|source| UnstarError::DeleteStar {
        full_name: full_name.clone(),
        source,
    })?;

    ctx.client.delete_star(&full_name).await?;
    info!(repo_id, %full_name, "removed remote star");

    Ok(UnstarredRepository { repo_id, full_name })
}
