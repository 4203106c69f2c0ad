//! Handlers for the non-interactive subcommands.
//!
//! Each handler runs one catalog operation against the store and writes its
//! result to `out`.

use std::{io::Write, path::Path};

use anyhow::Context as _;
use clap::Args;
use reel_core::{
  documentary::{Documentary, DocumentaryForm, DocumentaryId},
  store::{DocumentaryStore, ListQuery},
};
use reel_store_sqlite::SqliteStore;

use crate::output::{records_table, stats_table};

const NO_RECORDS: &str = "No documentaries found.";
const NO_MATCHES: &str = "No results found.";

// ─── Arguments ───────────────────────────────────────────────────────────────

/// Every field of a new record. Numbers are taken as text and validated.
#[derive(Args, Debug)]
pub struct AddArgs {
  #[arg(long)]
  pub title:    String,
  #[arg(long)]
  pub director: String,
  #[arg(long)]
  pub year:     String,
  #[arg(long)]
  pub category: String,
  /// Rating, conventionally 1-10.
  #[arg(long)]
  pub rating:   String,
}

impl From<AddArgs> for DocumentaryForm {
  fn from(a: AddArgs) -> Self {
    Self {
      title:    a.title,
      director: a.director,
      year:     a.year,
      category: a.category,
      rating:   a.rating,
    }
  }
}

/// Fields to change; anything omitted keeps its current value.
#[derive(Args, Debug)]
pub struct UpdateArgs {
  pub id:       DocumentaryId,
  #[arg(long)]
  pub title:    Option<String>,
  #[arg(long)]
  pub director: Option<String>,
  #[arg(long)]
  pub year:     Option<String>,
  #[arg(long)]
  pub category: Option<String>,
  #[arg(long)]
  pub rating:   Option<String>,
}

impl UpdateArgs {
  fn apply(self, form: &mut DocumentaryForm) {
    let fields = [
      (self.title, &mut form.title),
      (self.director, &mut form.director),
      (self.year, &mut form.year),
      (self.category, &mut form.category),
      (self.rating, &mut form.rating),
    ];
    for (given, slot) in fields {
      if let Some(value) = given {
        *slot = value;
      }
    }
  }
}

// ─── Handlers ────────────────────────────────────────────────────────────────

pub fn add(store: &SqliteStore, args: AddArgs, out: &mut impl Write) -> anyhow::Result<()> {
  let input = DocumentaryForm::from(args).validate()?;
  let created = store.create(input)?;
  tracing::info!(id = created.id, "added documentary");
  writeln!(out, "Added documentary {}: '{}'", created.id, created.title)?;
  Ok(())
}

pub fn list(
  store: &SqliteStore,
  query: &ListQuery,
  json: bool,
  out: &mut impl Write,
) -> anyhow::Result<()> {
  tracing::debug!(?query, "listing documentaries");
  let records = store.list_all(query)?;
  print_records(&records, json, NO_RECORDS, out)
}

pub fn search(
  store: &SqliteStore,
  text: &str,
  json: bool,
  out: &mut impl Write,
) -> anyhow::Result<()> {
  tracing::debug!(text, "searching titles");
  let records = store.search_by_title(text)?;
  print_records(&records, json, NO_MATCHES, out)
}

pub fn show(
  store: &SqliteStore,
  id: DocumentaryId,
  json: bool,
  out: &mut impl Write,
) -> anyhow::Result<()> {
  let record = store
    .get(id)?
    .ok_or(reel_core::Error::NotFound(id))?;
  print_records(std::slice::from_ref(&record), json, NO_RECORDS, out)
}

pub fn update(store: &SqliteStore, args: UpdateArgs, out: &mut impl Write) -> anyhow::Result<()> {
  let id = args.id;
  let current = store
    .get(id)?
    .ok_or(reel_core::Error::NotFound(id))?;

  let mut form = DocumentaryForm::from(&current);
  args.apply(&mut form);
  let input = form.validate()?;

  let updated = store.update(id, input)?;
  tracing::info!(id, "updated documentary");
  writeln!(out, "Updated documentary {}: '{}'", updated.id, updated.title)?;
  Ok(())
}

pub fn delete(store: &SqliteStore, id: DocumentaryId, out: &mut impl Write) -> anyhow::Result<()> {
  store.delete(id)?;
  tracing::info!(id, "deleted documentary");
  writeln!(out, "Deleted documentary {id}.")?;
  Ok(())
}

pub fn stats(store: &SqliteStore, json: bool, out: &mut impl Write) -> anyhow::Result<()> {
  let stats = store.aggregate_stats()?;
  if json {
    writeln!(out, "{}", serde_json::to_string_pretty(&stats)?)?;
  } else {
    writeln!(out, "{}", stats_table(&stats))?;
  }
  Ok(())
}

pub fn categories(store: &SqliteStore, out: &mut impl Write) -> anyhow::Result<()> {
  for category in store.categories()? {
    writeln!(out, "{category}")?;
  }
  Ok(())
}

pub fn export(store: &SqliteStore, path: &Path, out: &mut impl Write) -> anyhow::Result<()> {
  let rows = store
    .export_csv(path)
    .with_context(|| format!("exporting to {}", path.display()))?;
  tracing::info!(rows, path = %path.display(), "exported catalog");
  writeln!(out, "Exported {rows} documentaries to {}", path.display())?;
  Ok(())
}

fn print_records(
  records: &[Documentary],
  json: bool,
  empty_msg: &str,
  out: &mut impl Write,
) -> anyhow::Result<()> {
  if json {
    writeln!(out, "{}", serde_json::to_string_pretty(records)?)?;
  } else {
    writeln!(out, "{}", records_table(records, empty_msg))?;
  }
  Ok(())
}
