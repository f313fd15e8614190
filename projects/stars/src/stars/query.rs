use diesel::SqliteConnection;
use interfaces_github_starred::transport::Transport;
use thiserror::Error;

use crate::context::Context;
use crate::db::star::queries::{load_star_view, LoadStarViewError, StarFilter};
use crate::models::Star;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("LoadStarView: {source}")]
    LoadStarView {
        #[from]
        source: LoadStarViewError,
    },
}

/// Stars matching both filters, newest first. Absent or empty filters match
/// everything.
pub fn query_stars<T: Transport>(
    ctx: &mut Context<T>,
    keyword: Option<&str>,
    language: Option<&str>,
) -> Result<Vec<Star>, QueryError> {
    query_mirror(&mut ctx.conn, &StarFilter::new(keyword, language))
}

pub fn query_mirror(
    conn: &mut SqliteConnection,
    filter: &StarFilter,
) -> Result<Vec<Star>, QueryError> {
    let rows = load_star_view(conn, filter)?;
    Ok(rows.into_iter().map(Star::from).collect())
}
