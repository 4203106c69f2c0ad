//! Core types and trait definitions for the reel documentary catalog.
//!
//! This crate is free of database dependencies. The SQLite backend and the
//! `reel` shell both depend on it.

pub mod documentary;
pub mod error;
pub mod export;
pub mod store;

pub use error::{Error, Result};
