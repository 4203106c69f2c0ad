//! Plain-terminal rendering for the non-interactive subcommands.

use reel_core::{documentary::Documentary, store::Stats};
use tabled::{Table, Tabled, settings::Style};

#[derive(Tabled)]
struct Row<'a> {
  #[tabled(rename = "ID")]
  id:       i64,
  #[tabled(rename = "Title")]
  title:    &'a str,
  #[tabled(rename = "Director")]
  director: &'a str,
  #[tabled(rename = "Year")]
  year:     i32,
  #[tabled(rename = "Category")]
  category: &'a str,
  #[tabled(rename = "Rating")]
  rating:   String,
}

impl<'a> From<&'a Documentary> for Row<'a> {
  fn from(d: &'a Documentary) -> Self {
    Self {
      id:       d.id,
      title:    &d.title,
      director: &d.director,
      year:     d.year,
      category: &d.category,
      rating:   format_rating(d.rating),
    }
  }
}

#[derive(Tabled)]
struct MetricRow {
  #[tabled(rename = "Metric")]
  metric: &'static str,
  #[tabled(rename = "Value")]
  value:  String,
}

/// The stored value, unrounded.
pub fn format_rating(rating: f64) -> String { rating.to_string() }

/// Mean rating to two places, or `n/a` for an empty catalog.
pub fn format_average(stats: &Stats) -> String {
  stats
    .average_rating
    .map(|avg| format!("{avg:.2}"))
    .unwrap_or_else(|| "n/a".to_string())
}

/// Grid table of records, or `empty_msg` when there are none.
pub fn records_table(records: &[Documentary], empty_msg: &str) -> String {
  if records.is_empty() {
    return empty_msg.to_string();
  }
  let rows: Vec<Row<'_>> = records.iter().map(Row::from).collect();
  Table::new(rows).with(Style::modern()).to_string()
}

pub fn stats_table(stats: &Stats) -> String {
  let rows = [
    MetricRow { metric: "Documentaries", value: stats.count.to_string() },
    MetricRow { metric: "Average rating", value: format_average(stats) },
  ];
  Table::new(rows).with(Style::modern()).to_string()
}
