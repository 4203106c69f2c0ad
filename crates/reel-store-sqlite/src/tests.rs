//! Integration tests for `SqliteStore` against an in-memory database.

use std::collections::HashSet;

use reel_core::{
  documentary::{Documentary, NewDocumentary},
  export::read_csv,
  store::{DocumentaryStore, ListQuery, SortKey},
};

use crate::{Error, SqliteStore};

fn store() -> SqliteStore {
  SqliteStore::open_in_memory().expect("in-memory store")
}

fn new_doc(title: &str, year: i32, category: &str, rating: f64) -> NewDocumentary {
  NewDocumentary {
    title: title.into(),
    director: "Agnès Varda".into(),
    year,
    category: category.into(),
    rating,
  }
}

/// Four records with distinct years, ratings and two categories.
fn seeded() -> (SqliteStore, Vec<Documentary>) {
  let s = store();
  let docs = vec![
    s.create(new_doc("The Gleaners and I", 2000, "Society", 8.0)).unwrap(),
    s.create(new_doc("Faces Places", 2017, "Society", 7.9)).unwrap(),
    s.create(new_doc("Daguerréotypes", 1975, "Portrait", 7.3)).unwrap(),
    s.create(new_doc("The Beaches of Agnès", 2008, "Portrait", 8.1)).unwrap(),
  ];
  (s, docs)
}

fn titles(docs: &[Documentary]) -> Vec<&str> {
  docs.iter().map(|d| d.title.as_str()).collect()
}

// ─── Create / list ───────────────────────────────────────────────────────────

#[test]
fn create_then_list_contains_exactly_one_new_entry() {
  let (s, before) = seeded();
  let seen: HashSet<i64> = before.iter().map(|d| d.id).collect();

  let input = new_doc("Vagabond", 1985, "Drama", 7.8);
  let created = s.create(input.clone()).unwrap();
  assert!(!seen.contains(&created.id));
  assert_eq!(created.fields(), input);

  let all = s.list_all(&ListQuery::default()).unwrap();
  assert_eq!(all.len(), before.len() + 1);
  let matching: Vec<_> = all.iter().filter(|d| d.id == created.id).collect();
  assert_eq!(matching.len(), 1);
  assert_eq!(matching[0], &created);
}

#[test]
fn duplicate_records_are_allowed() {
  let s = store();
  let a = s.create(new_doc("Same", 2001, "X", 5.0)).unwrap();
  let b = s.create(new_doc("Same", 2001, "X", 5.0)).unwrap();
  assert_ne!(a.id, b.id);
  assert_eq!(s.list_all(&ListQuery::default()).unwrap().len(), 2);
}

#[test]
fn ids_are_not_reused_after_delete() {
  let s = store();
  let a = s.create(new_doc("First", 2001, "X", 5.0)).unwrap();
  s.delete(a.id).unwrap();
  let b = s.create(new_doc("Second", 2002, "X", 6.0)).unwrap();
  assert!(b.id > a.id);
}

#[test]
fn get_returns_record_or_none() {
  let (s, docs) = seeded();
  assert_eq!(s.get(docs[2].id).unwrap().as_ref(), Some(&docs[2]));
  assert!(s.get(9_999).unwrap().is_none());
}

#[test]
fn list_defaults_to_insertion_order() {
  let (s, docs) = seeded();
  let all = s.list_all(&ListQuery::default()).unwrap();
  assert_eq!(all, docs);
}

// ─── Sorting and filtering ───────────────────────────────────────────────────

#[test]
fn sort_by_year_ascending_and_descending() {
  let (s, _) = seeded();

  let asc = s.list_all(&ListQuery::default().sorted(SortKey::Year)).unwrap();
  let years: Vec<i32> = asc.iter().map(|d| d.year).collect();
  assert_eq!(years, [1975, 2000, 2008, 2017]);

  let desc = s.list_all(&ListQuery::default().sorted(SortKey::YearDesc)).unwrap();
  let years: Vec<i32> = desc.iter().map(|d| d.year).collect();
  assert_eq!(years, [2017, 2008, 2000, 1975]);
}

#[test]
fn sort_by_rating_descending() {
  let (s, _) = seeded();
  let docs = s
    .list_all(&ListQuery::default().sorted(SortKey::RatingDesc))
    .unwrap();
  let ratings: Vec<f64> = docs.iter().map(|d| d.rating).collect();
  assert_eq!(ratings, [8.1, 8.0, 7.9, 7.3]);
}

#[test]
fn sort_by_title_ignores_case() {
  let s = store();
  s.create(new_doc("zebra", 2000, "X", 1.0)).unwrap();
  s.create(new_doc("Apple", 2000, "X", 1.0)).unwrap();
  s.create(new_doc("mango", 2000, "X", 1.0)).unwrap();
  let docs = s.list_all(&ListQuery::default().sorted(SortKey::Title)).unwrap();
  assert_eq!(titles(&docs), ["Apple", "mango", "zebra"]);
}

#[test]
fn ties_keep_insertion_order() {
  let s = store();
  s.create(new_doc("b", 2000, "X", 5.0)).unwrap();
  s.create(new_doc("a", 2000, "X", 5.0)).unwrap();
  let docs = s.list_all(&ListQuery::default().sorted(SortKey::Rating)).unwrap();
  assert_eq!(titles(&docs), ["b", "a"]);
}

#[test]
fn category_filter_is_exact_match() {
  let (s, _) = seeded();
  s.create(new_doc("Lowercase", 2000, "portrait", 1.0)).unwrap();

  let docs = s.list_all(&ListQuery::default().in_category("Portrait")).unwrap();
  assert_eq!(titles(&docs), ["Daguerréotypes", "The Beaches of Agnès"]);

  let none = s.list_all(&ListQuery::default().in_category("Portr")).unwrap();
  assert!(none.is_empty());
}

#[test]
fn category_filter_combined_with_sort() {
  let (s, _) = seeded();
  let docs = s
    .list_all(&ListQuery::default().in_category("Society").sorted(SortKey::YearDesc))
    .unwrap();
  assert_eq!(titles(&docs), ["Faces Places", "The Gleaners and I"]);
}

#[test]
fn hostile_category_matches_nothing_and_leaves_table_intact() {
  let (s, docs) = seeded();
  let hostile = "Society' OR '1'='1";
  assert!(s.list_all(&ListQuery::default().in_category(hostile)).unwrap().is_empty());

  let injected = "x'; DROP TABLE documentaries; --";
  assert!(s.list_all(&ListQuery::default().in_category(injected)).unwrap().is_empty());
  assert_eq!(s.list_all(&ListQuery::default()).unwrap().len(), docs.len());
}

#[test]
fn categories_are_distinct_and_sorted() {
  let (s, _) = seeded();
  assert_eq!(s.categories().unwrap(), ["Portrait", "Society"]);
  assert!(store().categories().unwrap().is_empty());
}

// ─── Search ──────────────────────────────────────────────────────────────────

#[test]
fn empty_search_matches_list_all() {
  let (s, _) = seeded();
  assert_eq!(
    s.search_by_title("").unwrap(),
    s.list_all(&ListQuery::default()).unwrap()
  );
}

#[test]
fn search_returns_exactly_the_titles_containing_needle() {
  let (s, docs) = seeded();
  for needle in ["The", "es", "Agnès", "Gleaners and", "nothing here", "é"] {
    let expected: Vec<&Documentary> =
      docs.iter().filter(|d| d.title.contains(needle)).collect();
    let found = s.search_by_title(needle).unwrap();
    assert_eq!(found.iter().collect::<Vec<_>>(), expected, "needle {needle:?}");
  }
}

#[test]
fn search_treats_wildcards_literally() {
  let s = store();
  s.create(new_doc("100% Arabica", 2000, "X", 1.0)).unwrap();
  s.create(new_doc("1000 Arabica", 2000, "X", 1.0)).unwrap();
  s.create(new_doc("snake_case", 2000, "X", 1.0)).unwrap();
  s.create(new_doc("snakeXcase", 2000, "X", 1.0)).unwrap();
  s.create(new_doc("back\\slash", 2000, "X", 1.0)).unwrap();

  assert_eq!(titles(&s.search_by_title("0%").unwrap()), ["100% Arabica"]);
  assert_eq!(titles(&s.search_by_title("_").unwrap()), ["snake_case"]);
  assert_eq!(titles(&s.search_by_title("\\").unwrap()), ["back\\slash"]);
}

#[test]
fn search_is_case_sensitive() {
  let (s, _) = seeded();
  assert!(s.search_by_title("faces").unwrap().is_empty());
  assert_eq!(titles(&s.search_by_title("Faces").unwrap()), ["Faces Places"]);
}

// ─── Update / delete ─────────────────────────────────────────────────────────

#[test]
fn update_changes_only_the_target_record() {
  let (s, docs) = seeded();
  let target = &docs[1];
  let replacement = new_doc("Visages Villages", 2017, "Road movie", 9.5);

  let updated = s.update(target.id, replacement.clone()).unwrap();
  assert_eq!(updated.id, target.id);
  assert_eq!(updated.fields(), replacement);

  let all = s.list_all(&ListQuery::default()).unwrap();
  assert_eq!(all.len(), docs.len());
  for (before, after) in docs.iter().zip(&all) {
    if before.id == target.id {
      assert_eq!(after, &updated);
    } else {
      assert_eq!(after, before);
    }
  }
}

#[test]
fn update_missing_id_is_not_found() {
  let (s, docs) = seeded();
  let err = s.update(9_999, new_doc("Ghost", 2000, "X", 1.0)).unwrap_err();
  assert!(err.is_not_found());
  assert!(matches!(err, Error::Core(reel_core::Error::NotFound(9_999))));
  assert_eq!(s.list_all(&ListQuery::default()).unwrap(), docs);
}

#[test]
fn delete_removes_only_the_target_record() {
  let (s, docs) = seeded();
  s.delete(docs[0].id).unwrap();

  let all = s.list_all(&ListQuery::default()).unwrap();
  assert_eq!(all, docs[1..]);
  assert!(s.get(docs[0].id).unwrap().is_none());
}

#[test]
fn delete_missing_id_is_not_found() {
  let (s, docs) = seeded();
  s.delete(docs[0].id).unwrap();
  assert!(s.delete(docs[0].id).unwrap_err().is_not_found());
  assert_eq!(s.list_all(&ListQuery::default()).unwrap().len(), docs.len() - 1);
}

// ─── Stats ───────────────────────────────────────────────────────────────────

#[test]
fn stats_on_empty_store() {
  let stats = store().aggregate_stats().unwrap();
  assert_eq!(stats.count, 0);
  assert_eq!(stats.average_rating, None);
}

#[test]
fn stats_average_rating() {
  let s = store();
  s.create(new_doc("a", 2000, "X", 4.0)).unwrap();
  s.create(new_doc("b", 2000, "X", 8.0)).unwrap();
  let stats = s.aggregate_stats().unwrap();
  assert_eq!(stats.count, 2);
  assert_eq!(stats.average_rating, Some(6.0));
}

// ─── File-backed store and export ────────────────────────────────────────────

#[test]
fn reopening_file_keeps_records() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("documentaries.db");

  let created = {
    let s = SqliteStore::open(&path).unwrap();
    s.create(new_doc("Shoah", 1985, "History", 9.0)).unwrap()
  };

  let s = SqliteStore::open(&path).unwrap();
  assert_eq!(s.list_all(&ListQuery::default()).unwrap(), vec![created]);
}

#[test]
fn export_round_trips_current_records() {
  let (s, _) = seeded();
  s.update(2, new_doc("Faces, \"Places\"", 2017, "Society", 7.9)).unwrap();
  s.delete(3).unwrap();

  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("export.csv");
  let rows = s.export_csv(&path).unwrap();
  assert_eq!(rows, 3);

  let back = read_csv(std::fs::File::open(&path).unwrap()).unwrap();
  assert_eq!(back, s.list_all(&ListQuery::default()).unwrap());
}

#[test]
fn export_writes_header_and_every_row() {
  let (s, docs) = seeded();
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("export.csv");
  s.export_csv(&path).unwrap();

  let text = std::fs::read_to_string(&path).unwrap();
  let first = text.lines().next().unwrap();
  assert_eq!(first, "id,title,director,year,category,rating");
  assert_eq!(text.lines().count(), docs.len() + 1);
}

#[test]
fn export_to_missing_directory_is_an_io_error() {
  let (s, _) = seeded();
  let dir = tempfile::tempdir().unwrap();
  let err = s.export_csv(dir.path().join("nope").join("out.csv")).unwrap_err();
  assert!(matches!(err, Error::Io(_)));
  // Store remains usable.
  assert_eq!(s.aggregate_stats().unwrap().count, 4);
}
