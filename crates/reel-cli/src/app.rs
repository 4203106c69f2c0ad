//! Browser state machine and key dispatcher.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use reel_core::{
  documentary::{Documentary, DocumentaryId},
  store::{DocumentaryStore, ListQuery, SortKey, Stats},
};
use reel_store_sqlite::SqliteStore;

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
  /// Focus on the record list; the right pane previews the cursor record.
  List,
  /// Focus on the detail pane.
  Detail,
  /// Waiting for y/n before deleting the given record.
  ConfirmDelete(DocumentaryId),
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level browser state.
pub struct App<'s> {
  pub screen: Screen,

  /// Records for the current sort and category, in display order.
  pub records: Vec<Documentary>,

  pub sort: Option<SortKey>,

  /// Category filter; `None` shows every category.
  pub category: Option<String>,

  /// Current fuzzy title filter (only typed into while `filter_active`).
  pub filter: String,

  pub filter_active: bool,

  /// Cursor position within the *filtered* record list.
  pub list_cursor: usize,

  pub stats: Stats,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  export_path: PathBuf,
  store:       &'s SqliteStore,
}

impl<'s> App<'s> {
  pub fn new(store: &'s SqliteStore, sort: Option<SortKey>, export_path: PathBuf) -> Self {
    Self {
      screen: Screen::List,
      records: Vec::new(),
      sort,
      category: None,
      filter: String::new(),
      filter_active: false,
      list_cursor: 0,
      stats: Stats { count: 0, average_rating: None },
      status_msg: String::new(),
      export_path,
      store,
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Re-read records and stats for the current sort and category.
  pub fn reload(&mut self) -> anyhow::Result<()> {
    self.load(ListQuery {
      order_by: self.sort,
      category: self.category.clone(),
    })
  }

  /// Read `query` and adopt its sort and category. On error the records,
  /// sort and category shown stay as they were.
  fn load(&mut self, query: ListQuery) -> anyhow::Result<()> {
    let records = self.store.list_all(&query)?;
    let stats = self.store.aggregate_stats()?;
    self.sort = query.order_by;
    self.category = query.category;
    self.records = records;
    self.stats = stats;
    let len = self.filtered_records().len();
    if self.list_cursor >= len {
      self.list_cursor = len.saturating_sub(1);
    }
    Ok(())
  }

  /// Run `op`, showing any error in the status bar instead of quitting.
  fn report(&mut self, op: impl FnOnce(&mut Self) -> anyhow::Result<String>) {
    self.status_msg = match op(self) {
      Ok(msg) => msg,
      Err(e) => {
        tracing::warn!(error = %e, "browser action failed");
        format!("Error: {e}")
      }
    };
  }

  // ── Filtered list ─────────────────────────────────────────────────────────

  /// Records whose title fuzzy-matches the current filter.
  pub fn filtered_records(&self) -> Vec<&Documentary> {
    if self.filter.is_empty() {
      return self.records.iter().collect();
    }
    let matcher = SkimMatcherV2::default();
    self
      .records
      .iter()
      .filter(|d| matcher.fuzzy_match(&d.title, &self.filter).is_some())
      .collect()
  }

  /// The record under the list cursor in the filtered view, if any.
  pub fn cursor_record(&self) -> Option<&Documentary> {
    self.filtered_records().get(self.list_cursor).copied()
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    if self.filter_active {
      self.handle_filter_key(key);
      return true;
    }

    match self.screen.clone() {
      Screen::List => self.handle_list_key(key),
      Screen::Detail => self.handle_detail_key(key),
      Screen::ConfirmDelete(id) => {
        self.handle_confirm_key(key, id);
        true
      }
    }
  }

  fn handle_filter_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.filter_active = false;
        self.filter.clear();
        self.list_cursor = 0;
      }
      KeyCode::Enter => {
        self.filter_active = false;
        self.list_cursor = 0;
        if self.filtered_records().len() == 1 {
          self.screen = Screen::Detail;
        }
      }
      KeyCode::Backspace => {
        self.filter.pop();
        self.list_cursor = 0;
      }
      KeyCode::Char(c) => {
        self.filter.push(c);
        self.list_cursor = 0;
      }
      _ => {}
    }
  }

  fn handle_list_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => return false,

      KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
      KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),

      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
        if self.cursor_record().is_some() {
          self.screen = Screen::Detail;
        }
      }

      KeyCode::Char('/') => {
        self.filter_active = true;
        self.filter.clear();
        self.list_cursor = 0;
      }

      _ => return self.handle_common_key(key),
    }
    true
  }

  fn handle_detail_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => return false,

      KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => self.screen = Screen::List,

      KeyCode::Char(']') | KeyCode::PageDown | KeyCode::Down | KeyCode::Char('j') => {
        self.move_cursor(1)
      }
      KeyCode::Char('[') | KeyCode::PageUp | KeyCode::Up | KeyCode::Char('k') => {
        self.move_cursor(-1)
      }

      _ => return self.handle_common_key(key),
    }
    true
  }

  /// Keys available from both the list and the detail pane.
  fn handle_common_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('s') => self.report(|app| {
        app.load(ListQuery {
          order_by: SortKey::cycle(app.sort),
          category: app.category.clone(),
        })?;
        Ok(format!("Sort: {}", sort_label(app.sort)))
      }),
      KeyCode::Char('c') => self.cycle_category(),
      KeyCode::Char('r') => self.report(|app| {
        app.reload()?;
        Ok(format!("Reloaded {} documentaries", app.records.len()))
      }),
      KeyCode::Char('e') => self.report(|app| {
        let rows = app.store.export_csv(&app.export_path)?;
        Ok(format!("Exported {rows} documentaries to {}", app.export_path.display()))
      }),
      KeyCode::Char('d') | KeyCode::Delete => {
        if let Some(id) = self.cursor_record().map(|d| d.id) {
          self.screen = Screen::ConfirmDelete(id);
        }
      }
      _ => {}
    }
    true
  }

  fn handle_confirm_key(&mut self, key: KeyEvent, id: DocumentaryId) {
    self.screen = Screen::List;
    if matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
      self.report(|app| {
        app.store.delete(id)?;
        app.reload()?;
        Ok(format!("Deleted documentary {id}"))
      });
    } else {
      self.status_msg = "Delete cancelled".into();
    }
  }

  fn move_cursor(&mut self, delta: isize) {
    let len = self.filtered_records().len();
    if len == 0 {
      return;
    }
    self.list_cursor = self
      .list_cursor
      .saturating_add_signed(delta)
      .min(len - 1);
  }

  /// Step to the next category filter, wrapping through "all".
  fn cycle_category(&mut self) {
    self.report(|app| {
      let categories = app.store.categories()?;
      let next = match &app.category {
        None => categories.first().cloned(),
        Some(current) => {
          let pos = categories.iter().position(|c| c == current);
          pos.and_then(|p| categories.get(p + 1)).cloned()
        }
      };
      app.load(ListQuery { order_by: app.sort, category: next })?;
      app.list_cursor = 0;
      Ok(format!(
        "Category: {}",
        app.category.as_deref().unwrap_or("all")
      ))
    });
  }
}

pub fn sort_label(sort: Option<SortKey>) -> &'static str {
  sort.map(SortKey::as_str).unwrap_or("added")
}
