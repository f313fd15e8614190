use diesel::prelude::*;
use thiserror::Error;
use crate::db::{repository::models::*, schema::repo::dsl::*};

#[derive(Debug, Error)]
pub enum UpsertRepositoryError {
    #[error("UpsertRepository {repo_id}: {source}")]
    UpsertRepository {
        repo_id: i64,
        source: diesel::result::Error,
    },
}

/// Inserts the row or, when the id exists, overwrites every other column.
pub fn upsert_repository(
    conn: &mut SqliteConnection,
    record: &RepoRecord,
) -> Result<usize, UpsertRepositoryError> {
    diesel::insert_into(repo)
        .values(record)
        .on_conflict(id)
        .do_update()
        .set(record)
        .execute(conn)
        .map_err(|source| UpsertRepositoryError::UpsertRepository {
            repo_id: record.id,
            source,
        })
}

#[derive(Debug, Error)]
pub enum DeleteRepositoryError {
    #[error("DeleteRepository {repo_id}: {source}")]
    DeleteRepository {
        repo_id: i64,
        source: diesel::result::Error,
    },
}

/// Deletes the repository and hands back its full name, `None` if no row matched.
pub fn delete_repository_returning_name(
    conn: &mut SqliteConnection,
    repo_id: i64,
) -> Result<Option<String>, DeleteRepositoryError> {
    diesel::delete(repo.find(repo_id))
        .returning(full_name)
        .get_result::<String>(conn)
        .optional()
        .map_err(|source| DeleteRepositoryError::DeleteRepository { repo_id, source })
}

#[derive(Debug, Error)]
pub enum GetRepositoryError {
    #[error("GetRepository {repo_id}: {source}")]
    GetRepository {
        repo_id: i64,
        source: diesel::result::Error,
    },
}

pub fn get_repository(
    conn: &mut SqliteConnection,
    repo_id: i64,
) -> Result<Option<RepoRecord>, GetRepositoryError> {
    repo.find(repo_id)
        .select(RepoRecord::as_select())
        .first(conn)
        .optional()
        .map_err(|source| GetRepositoryError::GetRepository { repo_id, source })
}
