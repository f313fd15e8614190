//! Local mirror of the authenticated user's GitHub stars
//!
//! - `stars/`: sync, query and unstar over the mirror
//! - `db/`: SQLite schema, rows and queries (diesel)
//! - `codec`: remote payload <-> row <-> [`models::Star`]
//! - Requires GITHUB_TOKEN for anything that talks to GitHub

pub mod codec;
pub mod config;
pub mod context;
pub mod db;
pub mod error;
pub mod models;
pub mod stars;

pub use config::Config;
pub use context::{Context, OpenContextError};
pub use error::ErrorKind;
pub use models::{Repository, Star};
pub use stars::{
    query::QueryError,
    sync::{SyncError, SyncReport},
    unstar::{UnstarError, UnstarredRepository},
};
