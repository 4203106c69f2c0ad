//! Error type for `reel-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Core(#[from] reel_core::Error),

  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),

  #[error("i/o error: {0}")]
  Io(#[from] std::io::Error),
}

impl Error {
  /// Whether the operation referenced a record that does not exist.
  pub fn is_not_found(&self) -> bool {
    matches!(self, Error::Core(reel_core::Error::NotFound(_)))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
