//! Read-query construction.
//!
//! SQL text is assembled only from fixed fragments; every caller-supplied
//! value travels as a bound parameter.

use reel_core::store::ListQuery;
use rusqlite::types::Value;

use crate::encode::{encode_order, COLUMNS};

/// A SELECT statement paired with its positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
  pub sql:    String,
  pub params: Vec<Value>,
}

/// Build the statement behind [`DocumentaryStore::list_all`].
///
/// [`DocumentaryStore::list_all`]: reel_core::store::DocumentaryStore::list_all
pub fn list_query(query: &ListQuery) -> SelectQuery {
  let mut sql = format!("SELECT {COLUMNS} FROM documentaries");
  let mut params = Vec::new();

  if let Some(category) = &query.category {
    sql.push_str(" WHERE category = ?1");
    params.push(Value::Text(category.clone()));
  }

  sql.push_str(" ORDER BY ");
  sql.push_str(encode_order(query.order_by));

  SelectQuery { sql, params }
}

/// Build the statement behind [`DocumentaryStore::search_by_title`].
///
/// `instr` is used instead of `LIKE` so `%`, `_` and `\` in the needle match
/// literally. Matching is case-sensitive.
///
/// [`DocumentaryStore::search_by_title`]: reel_core::store::DocumentaryStore::search_by_title
pub fn title_search_query(text: &str) -> SelectQuery {
  SelectQuery {
    sql:    format!(
      "SELECT {COLUMNS} FROM documentaries
       WHERE ?1 = '' OR instr(title, ?1) > 0
       ORDER BY {}",
      encode_order(None)
    ),
    params: vec![Value::Text(text.to_owned())],
  }
}
