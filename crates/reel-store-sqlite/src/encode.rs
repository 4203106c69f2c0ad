//! Mapping between `documentaries` rows and [`Documentary`] values, and
//! between [`SortKey`] and ORDER BY fragments.

use reel_core::{documentary::Documentary, store::SortKey};
use rusqlite::Row;

/// Column list in table order; every SELECT uses it so [`from_row`] can read
/// by position.
pub const COLUMNS: &str = "id, title, director, year, category, rating";

pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Documentary> {
  Ok(Documentary {
    id:       row.get(0)?,
    title:    row.get(1)?,
    director: row.get(2)?,
    year:     row.get(3)?,
    category: row.get(4)?,
    rating:   row.get(5)?,
  })
}

// ─── SortKey ─────────────────────────────────────────────────────────────────

/// ORDER BY body for `key`. Ties fall back to insertion order.
pub fn encode_order(key: Option<SortKey>) -> &'static str {
  match key {
    None => "id ASC",
    Some(SortKey::Title) => "title COLLATE NOCASE ASC, id ASC",
    Some(SortKey::Year) => "year ASC, id ASC",
    Some(SortKey::YearDesc) => "year DESC, id ASC",
    Some(SortKey::Rating) => "rating ASC, id ASC",
    Some(SortKey::RatingDesc) => "rating DESC, id ASC",
  }
}
