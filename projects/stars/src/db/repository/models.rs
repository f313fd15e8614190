use diesel::prelude::*;
use crate::db::schema::repo;

/// A `repo` row. Timestamps stay in the UTC RFC 3339 form received remotely.
///
/// `None` fields are written as NULL on update so an upsert overwrites every
/// non-key column.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = repo)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct RepoRecord {
    pub id: i64,
    pub full_name: String,
    pub description: Option<String>,
    pub private: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub pushed_at: Option<String>,
    pub stargazers_count: i64,
    pub watchers_count: i64,
    pub forks: i64,
    pub lang: Option<String>,
    pub homepage: Option<String>,
}
