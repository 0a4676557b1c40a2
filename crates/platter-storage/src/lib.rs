pub mod config;
pub mod json;
pub mod models;
pub mod schema;
pub mod script;
pub mod sqlite;

pub use config::StorageConfig;
pub use json::JsonSink;
pub use models::{Row, SqlValue, rows_for};
pub use script::{SCHEMA_SQL, SqlScriptSink};
pub use sqlite::SqliteSink;

use platter_config::ConfigError;
use platter_core::SinkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
  #[error("connection error: {0}")]
  Connection(#[from] diesel::ConnectionError),

  #[error("query error: {0}")]
  Query(#[from] diesel::result::Error),

  #[error("migration error: {0}")]
  Migration(String),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("config error: {0}")]
  Config(#[from] ConfigError),

  #[error("invalid journal mode {0:?}")]
  JournalMode(String),
}

impl From<StorageError> for SinkError {
  fn from(err: StorageError) -> Self {
    match err {
      StorageError::Io(e) => SinkError::Io(e),
      StorageError::Json(e) => SinkError::Serialize(e.to_string()),
      other => SinkError::Storage(other.to_string()),
    }
  }
}
