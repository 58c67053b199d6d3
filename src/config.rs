use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_HOST: &str = "dragonball.keepcoding.education";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub api: ApiConfig,
  #[serde(default)]
  pub storage: StorageConfig,
  #[serde(default)]
  pub log: LogConfig,
  /// File the config was read from; `None` when running on defaults.
  #[serde(skip)]
  pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
  #[serde(default = "default_scheme")]
  pub scheme: String,
  #[serde(default = "default_host")]
  pub host: String,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      scheme: default_scheme(),
      host: default_host(),
    }
  }
}

fn default_scheme() -> String {
  "https".to_string()
}

fn default_host() -> String {
  DEFAULT_HOST.to_string()
}

/// Where cached data and the session token live.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
  /// SQLite file (defaults to $XDG_DATA_HOME/dbheroes/heroes.db)
  pub database: Option<PathBuf>,
  /// Directory holding the `jwt` file (defaults to $XDG_DATA_HOME/dbheroes/session)
  pub session_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
  /// Filter directive used when RUST_LOG is unset, e.g. "info" or "dbheroes=debug"
  #[serde(default = "default_level")]
  pub level: String,
  /// Log directory (defaults to the data directory)
  pub dir: Option<PathBuf>,
}

impl Default for LogConfig {
  fn default() -> Self {
    Self {
      level: default_level(),
      dir: None,
    }
  }
}

fn default_level() -> String {
  "info".to_string()
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided (must exist)
  /// 2. ./dbheroes.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/dbheroes/config.yaml
  ///
  /// Falls back to defaults when nothing is found.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    match path {
      Some(p) => Self::load_from_path(&p),
      None => Ok(Self::default()),
    }
  }

  fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("dbheroes.yaml");
    if local.exists() {
      return Some(local);
    }

    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("dbheroes").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    let mut config = Self::parse(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))?;
    config.source = Some(path.to_path_buf());
    Ok(config)
  }

  fn parse(contents: &str) -> Result<Self, serde_yaml::Error> {
    // An empty file is a valid, all-default config
    if contents.trim().is_empty() {
      return Ok(Self::default());
    }
    serde_yaml::from_str(contents)
  }

  /// Base data directory, `$XDG_DATA_HOME/dbheroes`.
  pub fn data_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
      .or_else(|| dirs::home_dir().map(|p| p.join(".local/share")))
      .ok_or_else(|| eyre!("Could not determine data directory"))?;

    Ok(data_dir.join("dbheroes"))
  }

  pub fn database_path(&self) -> Result<PathBuf> {
    match &self.storage.database {
      Some(path) => Ok(path.clone()),
      None => Ok(Self::data_dir()?.join("heroes.db")),
    }
  }

  pub fn session_dir(&self) -> Result<PathBuf> {
    match &self.storage.session_dir {
      Some(path) => Ok(path.clone()),
      None => Ok(Self::data_dir()?.join("session")),
    }
  }

  pub fn log_dir(&self) -> Result<PathBuf> {
    match &self.log.dir {
      Some(path) => Ok(path.clone()),
      None => Self::data_dir(),
    }
  }

  /// Log directory for `--ephemeral` runs, which must not touch the data dir.
  pub fn ephemeral_log_dir(&self) -> PathBuf {
    self
      .log
      .dir
      .clone()
      .unwrap_or_else(|| std::env::temp_dir().join("dbheroes"))
  }

  /// Get the login password from the environment.
  ///
  /// Checks DBHEROES_PASSWORD.
  pub fn get_password() -> Result<String> {
    std::env::var("DBHEROES_PASSWORD")
      .map_err(|_| eyre!("Password not found. Pass --password or set DBHEROES_PASSWORD."))
  }
}
