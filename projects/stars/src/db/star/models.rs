use chrono::NaiveDateTime;
use diesel::prelude::*;
use crate::db::schema::{star, star_view};

#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable)]
#[diesel(table_name = star)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StarRecord {
    pub repo_id: i64,
    pub starred_at: String,
}

/// A `star_view` row; timestamps are already in local time.
#[derive(Debug, Clone, QueryableByName)]
#[diesel(table_name = star_view)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StarViewRow {
    pub id: i64,
    pub full_name: String,
    pub description: Option<String>,
    pub private: bool,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
    pub pushed_at: Option<NaiveDateTime>,
    pub stargazers_count: i64,
    pub watchers_count: i64,
    pub forks: i64,
    pub lang: Option<String>,
    pub homepage: Option<String>,
    pub starred_at: NaiveDateTime,
}
