#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use interfaces_github_starred::{
    index::GitHubClient,
    transport::{ApiRequest, ApiResponse, Transport, TransportError},
};
use projects_stars::{
    db::{
        repository::{models::RepoRecord, queries::upsert_repository},
        star::{models::StarRecord, queries::upsert_star},
    },
    Context,
};
use reqwest::StatusCode;
use serde_json::{json, Value};

pub const API_ROOT: &str = "https://api.test";
pub const TOKEN: &str = "test-token";

/// Replies with queued responses in order and records every request.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<(u16, String)>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new(replies: Vec<(u16, String)>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn push(&self, status: u16, body: impl Into<String>) {
        self.replies.lock().unwrap().push_back((status, body.into()));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        let (status, body) = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or((500, r#"{"message":"unscripted request"}"#.to_string()));

        Ok(ApiResponse {
            status: StatusCode::from_u16(status).unwrap(),
            body,
        })
    }
}

pub fn context(replies: Vec<(u16, String)>) -> Context<ScriptedTransport> {
    let client = GitHubClient::new(ScriptedTransport::new(replies), API_ROOT, TOKEN);
    Context::open(":memory:", client).expect("open in-memory mirror")
}

pub fn repo_json(id: i64, full_name: &str, language: Option<&str>, stars: i64) -> Value {
    json!({
        "id": id,
        "full_name": full_name,
        "description": format!("{full_name} description"),
        "private": false,
        "created_at": "2020-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z",
        "pushed_at": "2024-01-02T00:00:00Z",
        "stargazers_count": stars,
        "watchers_count": stars,
        "forks_count": 1,
        "language": language,
        "homepage": null
    })
}

pub fn star_json(repo: Value, starred_at: &str) -> Value {
    json!({ "starred_at": starred_at, "repo": repo })
}

/// A page of `count` stars with ids starting at `first_id`.
pub fn page(first_id: i64, count: usize) -> String {
    let stars: Vec<Value> = (0..count as i64)
        .map(|offset| {
            let id = first_id + offset;
            star_json(
                repo_json(id, &format!("owner/repo-{id}"), Some("Rust"), id),
                &format!("2024-01-01T00:00:{:02}Z", offset % 60),
            )
        })
        .collect();
    Value::Array(stars).to_string()
}

pub fn seed(
    ctx: &mut Context<ScriptedTransport>,
    id: i64,
    full_name: &str,
    description: Option<&str>,
    lang: Option<&str>,
    starred_at: &str,
) {
    let record = RepoRecord {
        id,
        full_name: full_name.to_string(),
        description: description.map(str::to_string),
        private: false,
        created_at: Some("2021-06-01T08:00:00Z".to_string()),
        updated_at: None,
        pushed_at: None,
        stargazers_count: 1,
        watchers_count: 1,
        forks: 0,
        lang: lang.map(str::to_string),
        homepage: None,
    };
    upsert_repository(ctx.connection(), &record).unwrap();
    upsert_star(
        ctx.connection(),
        &StarRecord {
            repo_id: id,
            starred_at: starred_at.to_string(),
        },
    )
    .unwrap();
}
