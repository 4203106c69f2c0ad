//! The `DocumentaryStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `reel-store-sqlite`).
//! The `reel` shell depends on this abstraction for every catalog operation.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
  documentary::{Documentary, DocumentaryId, NewDocumentary},
  Error,
};

// ─── Sort keys ───────────────────────────────────────────────────────────────

/// The fixed set of orderings a listing may request.
///
/// Backends map each key to their own ordering clause; caller-supplied text
/// never reaches a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
  /// Title, A to Z.
  Title,
  /// Year, oldest first.
  Year,
  /// Year, newest first.
  YearDesc,
  /// Rating, lowest first.
  Rating,
  /// Rating, highest first.
  RatingDesc,
}

impl SortKey {
  pub const ALL: [SortKey; 5] = [
    SortKey::Title,
    SortKey::Year,
    SortKey::YearDesc,
    SortKey::Rating,
    SortKey::RatingDesc,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      SortKey::Title => "title",
      SortKey::Year => "year",
      SortKey::YearDesc => "year-desc",
      SortKey::Rating => "rating",
      SortKey::RatingDesc => "rating-desc",
    }
  }

  /// The key after `current` in [`SortKey::ALL`], wrapping through "unsorted".
  pub fn cycle(current: Option<SortKey>) -> Option<SortKey> {
    match current {
      None => Some(SortKey::ALL[0]),
      Some(key) => {
        let pos = SortKey::ALL.iter().position(|k| *k == key).unwrap_or(0);
        SortKey::ALL.get(pos + 1).copied()
      }
    }
  }
}

impl fmt::Display for SortKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for SortKey {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    SortKey::ALL
      .into_iter()
      .find(|k| k.as_str() == s)
      .ok_or_else(|| Error::UnknownSortKey(s.to_owned()))
  }
}

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`DocumentaryStore::list_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
  /// Ordering; `None` keeps insertion order.
  pub order_by: Option<SortKey>,
  /// Exact, case-sensitive category match.
  pub category: Option<String>,
}

impl ListQuery {
  pub fn sorted(mut self, key: SortKey) -> Self {
    self.order_by = Some(key);
    self
  }

  pub fn in_category(mut self, category: impl Into<String>) -> Self {
    self.category = Some(category.into());
    self
  }
}

/// Aggregate figures over the whole catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stats {
  pub count:          u64,
  /// Mean rating, absent when the catalog is empty.
  pub average_rating: Option<f64>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a documentary catalog backend.
///
/// Operations run synchronously, one at a time, on behalf of a single user.
pub trait DocumentaryStore {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new record and return it with its assigned id.
  fn create(&self, input: NewDocumentary) -> Result<Documentary, Self::Error>;

  /// Retrieve a record by id. Returns `None` if not found.
  fn get(&self, id: DocumentaryId) -> Result<Option<Documentary>, Self::Error>;

  /// All records, optionally filtered by category and ordered by `query`.
  fn list_all(&self, query: &ListQuery) -> Result<Vec<Documentary>, Self::Error>;

  /// Records whose title contains `text`. The empty string matches all.
  fn search_by_title(&self, text: &str) -> Result<Vec<Documentary>, Self::Error>;

  /// Overwrite every field of record `id`.
  ///
  /// Returns a not-found error if no such record exists.
  fn update(
    &self,
    id: DocumentaryId,
    input: NewDocumentary,
  ) -> Result<Documentary, Self::Error>;

  /// Remove record `id`. Returns a not-found error if no such record exists.
  fn delete(&self, id: DocumentaryId) -> Result<(), Self::Error>;

  fn aggregate_stats(&self) -> Result<Stats, Self::Error>;

  /// Distinct categories in alphabetical order.
  fn categories(&self) -> Result<Vec<String>, Self::Error>;
}
