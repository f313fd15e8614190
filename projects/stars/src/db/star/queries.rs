use diesel::{
    prelude::*,
    query_builder::{BoxedSqlQuery, SqlQuery},
    sql_query,
    sql_types::Text,
    sqlite::Sqlite,
    upsert::excluded,
};
use thiserror::Error;
use tracing::debug;
use crate::db::{
    schema::star::dsl::{repo_id as star_repo_id, star, starred_at},
    star::models::*,
};

#[derive(Debug, Error)]
pub enum UpsertStarError {
    #[error("UpsertStar {repo_id}: {source}")]
    UpsertStar {
        repo_id: i64,
        source: diesel::result::Error,
    },
}

/// Inserts the star or, when the repository is already starred, refreshes
/// only `starred_at`.
pub fn upsert_star(
    conn: &mut SqliteConnection,
    record: &StarRecord,
) -> Result<usize, UpsertStarError> {
    diesel::insert_into(star)
        .values(record)
        .on_conflict(star_repo_id)
        .do_update()
        .set(starred_at.eq(excluded(starred_at)))
        .execute(conn)
        .map_err(|source| UpsertStarError::UpsertStar {
            repo_id: record.repo_id,
            source,
        })
}

#[derive(Debug, Error)]
pub enum DeleteStarByRepoIdError {
    #[error("DeleteStarByRepoId {repo_id}: {source}")]
    DeleteStarByRepoId {
        repo_id: i64,
        source: diesel::result::Error,
    },
}

pub fn delete_star_by_repo_id(
    conn: &mut SqliteConnection,
    target: i64,
) -> Result<usize, DeleteStarByRepoIdError> {
    diesel::delete(star.filter(star_repo_id.eq(target)))
        .execute(conn)
        .map_err(|source| DeleteStarByRepoIdError::DeleteStarByRepoId {
            repo_id: target,
            source,
        })
}

#[derive(Debug, Error)]
pub enum GetStarError {
    #[error("GetStar {repo_id}: {source}")]
    GetStar {
        repo_id: i64,
        source: diesel::result::Error,
    },
}

pub fn get_star(
    conn: &mut SqliteConnection,
    target: i64,
) -> Result<Option<StarRecord>, GetStarError> {
    star.find(target)
        .select(StarRecord::as_select())
        .first(conn)
        .optional()
        .map_err(|source| GetStarError::GetStar {
            repo_id: target,
            source,
        })
}

const STAR_VIEW_SELECT: &str = "SELECT id, full_name, description, private, \
    created_at, updated_at, pushed_at, stargazers_count, watchers_count, forks, \
    lang, homepage, starred_at FROM star_view WHERE 1 = 1";
const KEYWORD_CLAUSE: &str =
    " AND (full_name LIKE ? ESCAPE '\\' OR description LIKE ? ESCAPE '\\')";
const LANGUAGE_CLAUSE: &str = " AND lang = ? COLLATE NOCASE";
// The raw UTC column: local time repeats an hour when clocks fall back.
const ORDER_CLAUSE: &str = " ORDER BY starred_at_utc DESC, id DESC";

/// Optional predicates over `star_view`. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StarFilter {
    pub keyword: Option<String>,
    pub language: Option<String>,
}

impl StarFilter {
    pub fn new(keyword: Option<&str>, language: Option<&str>) -> Self {
        let present = |value: Option<&str>| value.filter(|v| !v.is_empty()).map(str::to_string);
        Self {
            keyword: present(keyword),
            language: present(language),
        }
    }

    /// Builds the statement from the fixed clause set; filter values are
    /// only ever bound.
    pub fn to_query(&self) -> BoxedSqlQuery<'static, Sqlite, SqlQuery> {
        let mut query = sql_query(STAR_VIEW_SELECT).into_boxed::<Sqlite>();

        if let Some(keyword) = &self.keyword {
            let pattern = format!("%{}%", escape_like(keyword));
            query = query
                .sql(KEYWORD_CLAUSE)
                .bind::<Text, _>(pattern.clone())
                .bind::<Text, _>(pattern);
        }

        if let Some(language) = &self.language {
            query = query.sql(LANGUAGE_CLAUSE).bind::<Text, _>(language.clone());
        }

        query.sql(ORDER_CLAUSE)
    }
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[derive(Debug, Error)]
pub enum LoadStarViewError {
    #[error("LoadStarView: {source}")]
    LoadStarView {
        #[from]
        source: diesel::result::Error,
    },
}

pub fn load_star_view(
    conn: &mut SqliteConnection,
    filter: &StarFilter,
) -> Result<Vec<StarViewRow>, LoadStarViewError> {
    let query = filter.to_query();
    debug!(query = %diesel::debug_query::<Sqlite, _>(&query), "loading star view");

    query
        .load::<StarViewRow>(conn)
        .map_err(|source| LoadStarViewError::LoadStarView { source })
}
