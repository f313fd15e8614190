//! Conversions between the remote payloads, the stored rows and [`Star`].

use chrono::{DateTime, SecondsFormat, Utc};
use interfaces_github_starred::types::{Repository as RemoteRepository, StarredRepository};

use crate::db::{
    repository::models::RepoRecord,
    star::models::{StarRecord, StarViewRow},
};
use crate::models::{Repository, Star};

/// Stored timestamp form: `2024-03-01T12:30:00Z`, which SQLite's `datetime()`
/// understands.
pub fn utc_text(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl From<&RemoteRepository> for RepoRecord {
    fn from(remote: &RemoteRepository) -> Self {
        Self {
            id: remote.id,
            full_name: remote.full_name.clone(),
            description: remote.description.clone(),
            private: remote.private,
            created_at: remote.created_at.as_ref().map(utc_text),
            updated_at: remote.updated_at.as_ref().map(utc_text),
            pushed_at: remote.pushed_at.as_ref().map(utc_text),
            stargazers_count: remote.stargazers_count,
            watchers_count: remote.watchers_count,
            forks: remote.forks_count,
            lang: remote.language.clone(),
            homepage: remote.homepage.clone(),
        }
    }
}

impl From<&StarredRepository> for StarRecord {
    fn from(remote: &StarredRepository) -> Self {
        Self {
            repo_id: remote.repo.id,
            starred_at: utc_text(&remote.starred_at),
        }
    }
}

impl From<StarViewRow> for Star {
    fn from(row: StarViewRow) -> Self {
        Self {
            starred_at: row.starred_at,
            repo: Repository {
                id: row.id,
                full_name: row.full_name,
                description: row.description,
                private: row.private,
                created_at: row.created_at,
                updated_at: row.updated_at,
                pushed_at: row.pushed_at,
                stargazers_count: row.stargazers_count,
                watchers_count: row.watchers_count,
                forks: row.forks,
                lang: row.lang,
                homepage: row.homepage,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote() -> StarredRepository {
        serde_json::from_value(serde_json::json!({
            "starred_at": "2024-03-01T12:30:00+02:00",
            "repo": {
                "id": 42,
                "full_name": "acme/widget",
                "description": "",
                "private": true,
                "created_at": "2020-01-01T00:00:00Z",
                "updated_at": null,
                "pushed_at": "2024-02-29T23:59:59Z",
                "stargazers_count": 10,
                "watchers_count": 11,
                "forks_count": 3,
                "language": null,
                "homepage": "https://acme.test"
            }
        }))
        .unwrap()
    }

    #[test]
    fn remote_repository_maps_every_column() {
        let record = RepoRecord::from(&remote().repo);
        assert_eq!(
            record,
            RepoRecord {
                id: 42,
                full_name: "acme/widget".into(),
                description: Some(String::new()),
                private: true,
                created_at: Some("2020-01-01T00:00:00Z".into()),
                updated_at: None,
                pushed_at: Some("2024-02-29T23:59:59Z".into()),
                stargazers_count: 10,
                watchers_count: 11,
                forks: 3,
                lang: None,
                homepage: Some("https://acme.test".into()),
            }
        );
    }

    #[test]
    fn star_timestamp_is_normalized_to_utc() {
        let record = StarRecord::from(&remote());
        assert_eq!(record.repo_id, 42);
        assert_eq!(record.starred_at, "2024-03-01T10:30:00Z");
    }
}
