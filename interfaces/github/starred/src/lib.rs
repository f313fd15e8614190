//! GitHub REST client for the authenticated user's starred repositories
//!
//! - `transport`: the request/response capability and its reqwest implementation
//! - `index`: the authenticated client issuing starred-repository calls
//! - `types`: serde shapes of the remote payloads

pub mod index;
pub mod transport;
pub mod types;
