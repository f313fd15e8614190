use diesel::SqliteConnection;
use interfaces_github_starred::{
    index::{FetchStarredPageError, PER_PAGE},
    transport::Transport,
    types::StarredRepository,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::context::Context;
use crate::db::{
    repository::{models::RepoRecord, queries::upsert_repository},
    star::{models::StarRecord, queries::upsert_star},
};

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("FetchStarredPage {page}: {source}")]
    FetchStarredPage {
        page: usize,
        source: FetchStarredPageError,
    },
}

/// Outcome of a completed sync. Rows that failed to persist are counted, not
/// fatal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub pages: usize,
    pub stars_received: usize,
    pub repositories_saved: usize,
    pub stars_saved: usize,
    pub repositories_skipped: usize,
    pub stars_skipped: usize,
}

impl SyncReport {
    pub fn skipped_rows(&self) -> usize {
        self.repositories_skipped + self.stars_skipped
    }
}

/// Mirrors every page of `/user/starred` into the local tables.
///
/// Stops after the first page holding fewer than [`PER_PAGE`] items. A fetch or
/// decode failure aborts before anything from that page is written.
pub async fn sync_stars<T: Transport>(ctx: &mut Context<T>) -> Result<SyncReport, SyncError> {
    let mut report = SyncReport::default();
    let mut page = 1;

    loop {
        let stars = ctx
            .client
            .fetch_starred_page(page)
            .await
            .map_err(|source| SyncError::FetchStarredPage { page, source })?;

        report.pages += 1;
        report.stars_received += stars.len();
        save_page(&mut ctx.conn, &stars, &mut report);

        info!(page, received = stars.len(), "synced starred page");

        if stars.len() < PER_PAGE {
            break;
        }
        page += 1;
    }

    info!(
        pages = report.pages,
        stars = report.stars_received,
        skipped = report.skipped_rows(),
        "sync finished"
    );

    Ok(report)
}

// Repositories first: star rows reference them.
fn save_page(conn: &mut SqliteConnection, stars: &[StarredRepository], report: &mut SyncReport) {
    for star in stars {
        let record = RepoRecord::from(&star.repo);
        match upsert_repository(conn, &record) {
            Ok(_) => report.repositories_saved += 1,
            Err(err) => {
                warn!(repo = %record.full_name, error = %err, "skipping repository row");
                report.repositories_skipped += 1;
            }
        }
    }

    for star in stars {
        let record = StarRecord::from(star);
        match upsert_star(conn, &record) {
            Ok(_) => report.stars_saved += 1,
            Err(err) => {
                warn!(repo = %star.repo.full_name, error = %err, "skipping star row");
                report.stars_skipped += 1;
            }
        }
    }
}
