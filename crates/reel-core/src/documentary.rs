//! Documentary records and the form that produces them.
//!
//! A [`Documentary`] is one row of the catalog. User input arrives as a
//! [`DocumentaryForm`] of raw strings and only reaches a store after
//! [`DocumentaryForm::validate`] has turned it into a [`NewDocumentary`].

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Store-assigned row identifier. Unique and stable for the record's lifetime.
pub type DocumentaryId = i64;

// ─── Records ─────────────────────────────────────────────────────────────────

/// A persisted catalog entry.
///
/// Field order matches the table columns and the CSV export header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Documentary {
  pub id:       DocumentaryId,
  pub title:    String,
  pub director: String,
  pub year:     i32,
  pub category: String,
  pub rating:   f64,
}

impl Documentary {
  /// The user-editable fields, without the id.
  pub fn fields(&self) -> NewDocumentary {
    NewDocumentary {
      title:    self.title.clone(),
      director: self.director.clone(),
      year:     self.year,
      category: self.category.clone(),
      rating:   self.rating,
    }
  }
}

/// Validated input for creating or overwriting a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDocumentary {
  pub title:    String,
  pub director: String,
  pub year:     i32,
  pub category: String,
  pub rating:   f64,
}

impl NewDocumentary {
  /// Attach a store-assigned id.
  pub fn with_id(self, id: DocumentaryId) -> Documentary {
    Documentary {
      id,
      title: self.title,
      director: self.director,
      year: self.year,
      category: self.category,
      rating: self.rating,
    }
  }
}

// ─── Form ────────────────────────────────────────────────────────────────────

/// Raw, unvalidated text for each field as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentaryForm {
  pub title:    String,
  pub director: String,
  pub year:     String,
  pub category: String,
  pub rating:   String,
}

impl DocumentaryForm {
  /// Check that every field is present and that `year` and `rating` parse.
  ///
  /// Text fields are trimmed. No range checks are applied to either number.
  pub fn validate(&self) -> Result<NewDocumentary> {
    let title = required("title", &self.title)?;
    let director = required("director", &self.director)?;
    let year = required("year", &self.year)?;
    let category = required("category", &self.category)?;
    let rating = required("rating", &self.rating)?;

    let year: i32 = parse_number("year", year)?;
    let rating: f64 = parse_number("rating", rating)?;
    // SQLite stores NaN as NULL, which would not read back.
    if !rating.is_finite() {
      return Err(Error::InvalidNumber {
        field: "rating",
        value: self.rating.clone(),
      });
    }

    Ok(NewDocumentary {
      title: title.to_owned(),
      director: director.to_owned(),
      year,
      category: category.to_owned(),
      rating,
    })
  }
}

impl From<&Documentary> for DocumentaryForm {
  fn from(d: &Documentary) -> Self {
    Self {
      title:    d.title.clone(),
      director: d.director.clone(),
      year:     d.year.to_string(),
      category: d.category.clone(),
      rating:   d.rating.to_string(),
    }
  }
}

fn required<'a>(field: &'static str, raw: &'a str) -> Result<&'a str> {
  let value = raw.trim();
  if value.is_empty() {
    return Err(Error::MissingField(field));
  }
  Ok(value)
}

fn parse_number<T: FromStr>(field: &'static str, raw: &str) -> Result<T> {
  raw.parse().map_err(|_| Error::InvalidNumber {
    field,
    value: raw.to_owned(),
  })
}
