use chrono::NaiveDateTime;
use serde::Serialize;

/// A mirrored repository as handed to callers. Timestamps are local time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Repository {
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
}

/// "The authenticated user starred `repo` at `starred_at`" (local time).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Star {
    pub starred_at: NaiveDateTime,
    pub repo: Repository,
}
