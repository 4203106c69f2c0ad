//! SQL schema for the reel SQLite store.
//!
//! Executed once at connection startup. The version is recorded in
//! `PRAGMA user_version`; there are no migrations.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
pub const SCHEMA: &str = "
-- AUTOINCREMENT keeps ids of deleted rows from being handed out again.
CREATE TABLE IF NOT EXISTS documentaries (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    title     TEXT    NOT NULL,
    director  TEXT    NOT NULL,
    year      INTEGER NOT NULL,
    category  TEXT    NOT NULL,
    rating    REAL    NOT NULL
);

CREATE INDEX IF NOT EXISTS documentaries_category_idx ON documentaries(category);

PRAGMA user_version = 1;
";
