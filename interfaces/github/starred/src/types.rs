use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One element of `GET /user/starred` when requested with the
/// `application/vnd.github.v3.star+json` media type.
#[derive(Debug, Clone, Deserialize)]
pub struct StarredRepository {
    pub starred_at: DateTime<Utc>,
    pub repo: Repository,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub id: i64,
    pub full_name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub private: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub pushed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub stargazers_count: i64,
    #[serde(default)]
    pub watchers_count: i64,
    #[serde(default)]
    pub forks_count: i64,
    pub language: Option<String>,
    pub homepage: Option<String>,
}
