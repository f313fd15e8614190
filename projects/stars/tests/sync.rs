mod common;

use common::{context, page, repo_json, star_json, API_ROOT, TOKEN};
use diesel::{prelude::*, sql_query};
use projects_stars::{
    db::{
        repository::{models::RepoRecord, queries::get_repository},
        schema::{repo, star},
        star::{models::StarRecord, queries::get_star},
    },
    ErrorKind, SyncReport,
};
use reqwest::header::AUTHORIZATION;
use serde_json::Value;

fn mirror_rows(conn: &mut SqliteConnection) -> (Vec<RepoRecord>, Vec<StarRecord>) {
    let repos = repo::table
        .select(RepoRecord::as_select())
        .order(repo::id)
        .load(conn)
        .unwrap();
    let stars = star::table
        .select(StarRecord::as_select())
        .order(star::repo_id)
        .load(conn)
        .unwrap();
    (repos, stars)
}

#[tokio::test]
async fn stops_after_first_short_page() {
    let mut ctx = context(vec![(200, page(1, 100)), (200, page(101, 100)), (200, page(201, 37))]);

    let report = ctx.sync().await.unwrap();

    assert_eq!(
        report,
        SyncReport {
            pages: 3,
            stars_received: 237,
            repositories_saved: 237,
            stars_saved: 237,
            repositories_skipped: 0,
            stars_skipped: 0,
        }
    );
    assert_eq!(
        ctx.client().transport().urls(),
        (1..=3)
            .map(|n| format!("{API_ROOT}/user/starred?type=all&per_page=100&page={n}"))
            .collect::<Vec<_>>()
    );
    assert_eq!(ctx.query(None, None).unwrap().len(), 237);
}

#[tokio::test]
async fn empty_first_page_ends_sync() {
    let mut ctx = context(vec![(200, "[]".to_string())]);

    let report = ctx.sync().await.unwrap();

    assert_eq!(report.pages, 1);
    assert_eq!(report.stars_received, 0);
    assert_eq!(ctx.client().transport().requests().len(), 1);
    assert!(ctx.query(None, None).unwrap().is_empty());
}

#[tokio::test]
async fn every_request_carries_the_token() {
    let mut ctx = context(vec![(200, page(1, 100)), (200, page(101, 5))]);
    ctx.sync().await.unwrap();

    for request in ctx.client().transport().requests() {
        assert_eq!(request.headers[AUTHORIZATION], format!("Bearer {TOKEN}").as_str());
    }
}

#[tokio::test]
async fn replaying_the_feed_converges() {
    let mut ctx = context(vec![(200, page(1, 100)), (200, page(101, 20))]);
    ctx.sync().await.unwrap();
    let first = mirror_rows(ctx.connection());

    let transport = ctx.client().transport();
    transport.push(200, page(1, 100));
    transport.push(200, page(101, 20));
    let report = ctx.sync().await.unwrap();
    let second = mirror_rows(ctx.connection());

    assert_eq!(report.stars_received, 120);
    assert_eq!(first.0.len(), 120);
    assert_eq!(first.1.len(), 120);
    assert_eq!(first, second);
}

#[tokio::test]
async fn changed_counts_update_in_place() {
    let before = Value::Array(vec![star_json(
        repo_json(42, "acme/widget", Some("Go"), 10),
        "2024-01-01T00:00:00Z",
    )]);
    let after = Value::Array(vec![star_json(
        repo_json(42, "acme/widget", Some("Go"), 15),
        "2024-02-01T00:00:00Z",
    )]);
    let mut ctx = context(vec![(200, before.to_string()), (200, after.to_string())]);

    ctx.sync().await.unwrap();
    ctx.sync().await.unwrap();

    let stored = get_repository(ctx.connection(), 42).unwrap().unwrap();
    assert_eq!(stored.stargazers_count, 15);

    let starred = get_star(ctx.connection(), 42).unwrap().unwrap();
    assert_eq!(starred.starred_at, "2024-02-01T00:00:00Z");

    let (repos, stars) = mirror_rows(ctx.connection());
    assert_eq!(repos.len(), 1);
    assert_eq!(stars.len(), 1);
}

#[tokio::test]
async fn http_failure_aborts_without_writing_that_page() {
    let mut ctx = context(vec![
        (200, page(1, 100)),
        (502, r#"{"message":"bad gateway"}"#.to_string()),
        (200, page(101, 3)),
    ]);

    let err = ctx.sync().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(ctx.client().transport().requests().len(), 2);
    // page 1 was already persisted; nothing from page 2 onwards
    let (repos, _) = mirror_rows(ctx.connection());
    assert_eq!(repos.len(), 100);
}

#[tokio::test]
async fn malformed_page_is_a_decode_error() {
    let mut ctx = context(vec![(200, r#"[{"starred_at": "yesterday"}]"#.to_string())]);

    let err = ctx.sync().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Decode);
    let (repos, stars) = mirror_rows(ctx.connection());
    assert!(repos.is_empty());
    assert!(stars.is_empty());
}

#[tokio::test]
async fn row_failures_are_counted_not_fatal() {
    let mut ctx = context(vec![(200, page(1, 4))]);
    sql_query("DROP VIEW star_view").execute(ctx.connection()).unwrap();
    sql_query("DROP TABLE star").execute(ctx.connection()).unwrap();

    let report = ctx.sync().await.unwrap();

    assert_eq!(report.repositories_saved, 4);
    assert_eq!(report.stars_skipped, 4);
    assert_eq!(report.skipped_rows(), 4);
    assert!(get_repository(ctx.connection(), 1).unwrap().is_some());
}
