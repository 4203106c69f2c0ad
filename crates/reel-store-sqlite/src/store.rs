//! [`SqliteStore`] — the SQLite implementation of [`DocumentaryStore`].

use std::{fs::File, io::BufWriter, path::Path};

use reel_core::{
  documentary::{Documentary, DocumentaryId, NewDocumentary},
  export::write_csv,
  store::{DocumentaryStore, ListQuery, Stats},
};
use rusqlite::{params_from_iter, Connection, OptionalExtension as _};

use crate::{
  encode::{from_row, COLUMNS},
  query::{list_query, title_search_query, SelectQuery},
  schema::SCHEMA,
  Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A documentary catalog backed by a single SQLite file.
///
/// Owns its connection; dropping the store closes the database.
pub struct SqliteStore {
  conn: Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = Connection::open(path)?;
    let store = Self { conn };
    store.init_schema()?;
    tracing::info!(path = %path.display(), "opened catalog");
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub fn open_in_memory() -> Result<Self> {
    let conn = Connection::open_in_memory()?;
    let store = Self { conn };
    store.init_schema()?;
    Ok(store)
  }

  fn init_schema(&self) -> Result<()> {
    self.conn.execute_batch(SCHEMA)?;
    Ok(())
  }

  fn select(&self, query: SelectQuery) -> Result<Vec<Documentary>> {
    let mut stmt = self.conn.prepare(&query.sql)?;
    let rows = stmt
      .query_map(params_from_iter(query.params), from_row)?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
  }

  /// Write the full, unfiltered catalog to `path` as CSV in insertion order.
  /// Returns the number of records written.
  pub fn export_csv(&self, path: impl AsRef<Path>) -> Result<usize> {
    let path = path.as_ref();
    let records = self.list_all(&ListQuery::default())?;
    let file = File::create(path)?;
    let rows = write_csv(&records, BufWriter::new(file))?;
    tracing::info!(path = %path.display(), rows, "exported catalog");
    Ok(rows)
  }
}

// ─── DocumentaryStore impl ───────────────────────────────────────────────────

impl DocumentaryStore for SqliteStore {
  type Error = crate::Error;

  fn create(&self, input: NewDocumentary) -> Result<Documentary> {
    self.conn.execute(
      "INSERT INTO documentaries (title, director, year, category, rating)
       VALUES (?1, ?2, ?3, ?4, ?5)",
      rusqlite::params![
        input.title,
        input.director,
        input.year,
        input.category,
        input.rating,
      ],
    )?;
    let id = self.conn.last_insert_rowid();
    tracing::debug!(id, title = %input.title, "created documentary");
    Ok(input.with_id(id))
  }

  fn get(&self, id: DocumentaryId) -> Result<Option<Documentary>> {
    let found = self
      .conn
      .query_row(
        &format!("SELECT {COLUMNS} FROM documentaries WHERE id = ?1"),
        rusqlite::params![id],
        from_row,
      )
      .optional()?;
    Ok(found)
  }

  fn list_all(&self, query: &ListQuery) -> Result<Vec<Documentary>> {
    let rows = self.select(list_query(query))?;
    tracing::debug!(
      order_by = ?query.order_by,
      category = ?query.category,
      rows = rows.len(),
      "listed documentaries"
    );
    Ok(rows)
  }

  fn search_by_title(&self, text: &str) -> Result<Vec<Documentary>> {
    let rows = self.select(title_search_query(text))?;
    tracing::debug!(text, rows = rows.len(), "searched titles");
    Ok(rows)
  }

  fn update(&self, id: DocumentaryId, input: NewDocumentary) -> Result<Documentary> {
    let changed = self.conn.execute(
      "UPDATE documentaries
       SET title = ?1, director = ?2, year = ?3, category = ?4, rating = ?5
       WHERE id = ?6",
      rusqlite::params![
        input.title,
        input.director,
        input.year,
        input.category,
        input.rating,
        id,
      ],
    )?;
    if changed == 0 {
      return Err(reel_core::Error::NotFound(id).into());
    }
    tracing::debug!(id, "updated documentary");
    Ok(input.with_id(id))
  }

  fn delete(&self, id: DocumentaryId) -> Result<()> {
    let changed = self
      .conn
      .execute("DELETE FROM documentaries WHERE id = ?1", rusqlite::params![id])?;
    if changed == 0 {
      return Err(reel_core::Error::NotFound(id).into());
    }
    tracing::debug!(id, "deleted documentary");
    Ok(())
  }

  fn aggregate_stats(&self) -> Result<Stats> {
    let (count, average_rating): (i64, Option<f64>) = self.conn.query_row(
      "SELECT COUNT(*), AVG(rating) FROM documentaries",
      [],
      |row| Ok((row.get(0)?, row.get(1)?)),
    )?;
    Ok(Stats {
      count: count.max(0) as u64,
      average_rating,
    })
  }

  fn categories(&self) -> Result<Vec<String>> {
    let mut stmt = self
      .conn
      .prepare("SELECT DISTINCT category FROM documentaries ORDER BY category")?;
    let rows = stmt
      .query_map([], |row| row.get(0))?
      .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(rows)
  }
}
