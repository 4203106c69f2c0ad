//! Runtime configuration: an optional TOML file layered under `REEL_*`
//! environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use reel_core::store::SortKey;
use serde::Deserialize;

/// Config file read when `--config` is not given. Absent is fine.
pub const DEFAULT_CONFIG: &str = "reel.toml";

/// Prefix of environment variables that override file values.
const ENV_PREFIX: &str = "REEL";

/// Settings deserialised from `reel.toml` and the environment.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  /// SQLite catalog file; created on first use.
  #[serde(default = "default_database")]
  pub database:     PathBuf,
  /// Where `reel export` and the browser's export key write CSV.
  #[serde(default = "default_export_path")]
  pub export_path:  PathBuf,
  /// Append log output here instead of stderr.
  #[serde(default)]
  pub log_file:     Option<PathBuf>,
  /// Ordering applied by `reel list` and the browser when none is given.
  #[serde(default)]
  pub default_sort: Option<SortKey>,
}

fn default_database() -> PathBuf { PathBuf::from("documentaries.db") }

fn default_export_path() -> PathBuf { PathBuf::from("documentaries.csv") }

impl Settings {
  /// Load settings. An explicitly named file must exist; the default one may
  /// be missing.
  pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
    Self::load_layered(path, config::Environment::with_prefix(ENV_PREFIX))
  }

  /// Build settings from the file at `path` with `env` layered on top.
  fn load_layered(path: Option<&Path>, env: config::Environment) -> anyhow::Result<Self> {
    let (file, required) = match path {
      Some(p) => (p.to_path_buf(), true),
      None => (PathBuf::from(DEFAULT_CONFIG), false),
    };

    let raw = config::Config::builder()
      .add_source(config::File::from(file.as_path()).required(required))
      .add_source(env)
      .build()
      .with_context(|| format!("failed to read config file {}", file.display()))?;

    let mut settings: Settings = raw
      .try_deserialize()
      .context("failed to deserialise settings")?;

    settings.database = expand_tilde(&settings.database);
    settings.export_path = expand_tilde(&settings.export_path);
    settings.log_file = settings.log_file.as_deref().map(expand_tilde);
    Ok(settings)
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
