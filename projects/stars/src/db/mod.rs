pub mod connection;
pub mod repository;
pub mod schema;
pub mod star;

pub use connection::{establish, EstablishConnectionError, MIGRATIONS};
