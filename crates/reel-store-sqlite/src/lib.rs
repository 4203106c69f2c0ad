//! SQLite backend for the reel documentary catalog.
//!
//! One [`rusqlite::Connection`] is opened per [`SqliteStore`] and held until
//! the store is dropped.

mod encode;
mod query;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
