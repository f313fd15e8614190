pub mod query;
pub mod sync;
pub mod unstar;
