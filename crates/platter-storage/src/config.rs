use platter_config::{CONFIG_BACKEND, ConfigError, PATHS, TomlConfigBackend};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const SECTION: &str = "storage";

/// `[storage]` section of platter.toml.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct StorageConfig {
  /// SQLite database file. Falls back to `<data_dir>/platter.db`.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub db_path: Option<PathBuf>,
  pub journal_mode: Option<String>,
  /// Leave image sub-records out of every sink.
  pub exclude_images: bool,
}

impl Default for StorageConfig {
  fn default() -> Self {
    StorageConfig { db_path: None, journal_mode: Some("WAL".to_string()), exclude_images: false }
  }
}

impl StorageConfig {
  pub fn load() -> Result<Self, ConfigError> {
    Self::load_from(&CONFIG_BACKEND)
  }

  /// Variante para tests: inyectar un backend distinto.
  pub fn load_from(backend: &TomlConfigBackend) -> Result<Self, ConfigError> {
    backend.load_section_with_default(SECTION)
  }

  pub fn save(&self) -> Result<(), ConfigError> {
    self.save_to(&CONFIG_BACKEND)
  }

  pub fn save_to(&self, backend: &TomlConfigBackend) -> Result<(), ConfigError> {
    use platter_config::ConfigBackend;
    backend.save_section(SECTION, self)
  }

  pub fn resolved_db_path(&self) -> PathBuf {
    self.db_path.clone().unwrap_or_else(|| PATHS.data_dir.join("platter.db"))
  }
}
