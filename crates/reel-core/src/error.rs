//! Error types for `reel-core`.

use thiserror::Error;

use crate::documentary::DocumentaryId;

#[derive(Debug, Error)]
pub enum Error {
  /// A required form field was empty (or only whitespace).
  #[error("{0} is required")]
  MissingField(&'static str),

  /// `year` or `rating` could not be parsed as a number.
  #[error("{field} must be a number, got {value:?}")]
  InvalidNumber { field: &'static str, value: String },

  #[error("documentary not found: {0}")]
  NotFound(DocumentaryId),

  #[error("unknown sort key: {0:?}")]
  UnknownSortKey(String),

  #[error("unexpected csv header: {0:?}")]
  CsvHeader(Vec<String>),

  #[error("csv error: {0}")]
  Csv(#[from] csv::Error),

  #[error("i/o error: {0}")]
  Io(#[from] std::io::Error),
}

impl Error {
  /// Whether this error came from form validation rather than storage.
  pub fn is_validation(&self) -> bool {
    matches!(self, Error::MissingField(_) | Error::InvalidNumber { .. })
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
