//! `reel` — command-line and terminal UI for a personal documentary catalog.
//!
//! # Usage
//!
//! ```text
//! reel add --title "Hoop Dreams" --director "Steve James" --year 1994 \
//!          --category Sport --rating 8.3
//! reel list --sort rating-desc --category Sport
//! reel browse
//! ```

mod app;
mod commands;
mod output;
mod settings;
mod ui;

use std::{
  fs::OpenOptions,
  io,
  path::{Path, PathBuf},
  sync::Mutex,
  time::Duration,
};

use anyhow::{Context, Result};
use app::App;
use clap::{Parser, Subcommand};
use commands::{AddArgs, UpdateArgs};
use crossterm::{
  event::{self, Event, KeyEventKind},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use reel_core::{
  documentary::DocumentaryId,
  store::{ListQuery, SortKey},
};
use reel_store_sqlite::SqliteStore;
use settings::Settings;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "reel", version, about = "Personal documentary catalog")]
struct Args {
  /// Path to a TOML config file (database, export_path, log_file, default_sort).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// SQLite catalog file; overrides the config file.
  #[arg(long, value_name = "FILE")]
  database: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Add a documentary.
  Add(AddArgs),

  /// List documentaries.
  List {
    /// One of: title, year, year-desc, rating, rating-desc.
    #[arg(short, long)]
    sort:     Option<SortKey>,
    /// Only show this category (exact match).
    #[arg(short, long)]
    category: Option<String>,
    #[arg(long)]
    json:     bool,
  },

  /// Find documentaries whose title contains TEXT.
  Search {
    text: String,
    #[arg(long)]
    json: bool,
  },

  /// Show one documentary.
  Show {
    id:   DocumentaryId,
    #[arg(long)]
    json: bool,
  },

  /// Change fields of a documentary.
  Update(UpdateArgs),

  /// Delete a documentary.
  Delete { id: DocumentaryId },

  /// Count and average rating.
  Stats {
    #[arg(long)]
    json: bool,
  },

  /// List the distinct categories.
  Categories,

  /// Write the whole catalog to a CSV file.
  Export {
    /// Output file; defaults to `export_path` from the config.
    path: Option<PathBuf>,
  },

  /// Browse the catalog interactively.
  Browse,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  let args = Args::parse();
  let settings = Settings::load(args.config.as_deref())?;

  let interactive = matches!(args.command, Command::Browse);
  init_tracing(interactive, settings.log_file.as_deref())?;

  let database = args.database.unwrap_or_else(|| settings.database.clone());
  let store = SqliteStore::open(&database)
    .with_context(|| format!("failed to open catalog at {}", database.display()))?;

  tracing::debug!(command = ?args.command, database = %database.display(), "dispatching");
  let mut out = io::stdout().lock();
  match args.command {
    Command::Add(add) => commands::add(&store, add, &mut out)?,
    Command::List { sort, category, json } => {
      let query = ListQuery {
        order_by: sort.or(settings.default_sort),
        category,
      };
      commands::list(&store, &query, json, &mut out)?
    }
    Command::Search { text, json } => commands::search(&store, &text, json, &mut out)?,
    Command::Show { id, json } => commands::show(&store, id, json, &mut out)?,
    Command::Update(update) => commands::update(&store, update, &mut out)?,
    Command::Delete { id } => commands::delete(&store, id, &mut out)?,
    Command::Stats { json } => commands::stats(&store, json, &mut out)?,
    Command::Categories => commands::categories(&store, &mut out)?,
    Command::Export { path } => {
      let path = path.unwrap_or_else(|| settings.export_path.clone());
      commands::export(&store, &path, &mut out)?
    }
    Command::Browse => {
      drop(out);
      browse(&store, &settings)?
    }
  }

  Ok(())
}

/// Log to `log_file` when configured, otherwise to stderr. The browser owns
/// the terminal, so without a log file it runs with logging off.
fn init_tracing(interactive: bool, log_file: Option<&Path>) -> Result<()> {
  let filter = EnvFilter::builder()
    .with_default_directive(LevelFilter::WARN.into())
    .from_env_lossy();

  match log_file {
    Some(path) => {
      let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
      tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    }
    None if interactive => {}
    None => {
      tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    }
  }
  Ok(())
}

// ─── Browser ──────────────────────────────────────────────────────────────────

fn browse(store: &SqliteStore, settings: &Settings) -> Result<()> {
  let mut app = App::new(store, settings.default_sort, settings.export_path.clone());
  app.reload().context("loading catalog")?;

  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  tracing::info!(records = app.records.len(), "browser started");

  // Run the event loop; restore terminal even on error.
  let run_result = run_event_loop(&mut terminal, &mut app);

  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  match &run_result {
    Ok(()) => tracing::info!("browser closed"),
    Err(e) => tracing::error!(error = %e, "browser exited with error"),
  }
  run_result
}

fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    if !event::poll(Duration::from_millis(250))? {
      continue;
    }
    if let Event::Key(key) = event::read()?
      && key.kind == KeyEventKind::Press
      && !app.handle_key(key)
    {
      break;
    }
  }

  Ok(())
}
