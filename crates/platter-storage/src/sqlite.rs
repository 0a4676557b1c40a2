use std::path::Path;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use platter_core::{Batch, Sink, SinkError};
use tracing::{debug, info, warn};

use crate::models::rows_for;
use crate::{StorageConfig, StorageError, schema};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Writes blocks straight into a SQLite database, one transaction per block.
pub struct SqliteSink {
  conn: Option<SqliteConnection>,
  exclude_images: bool,
}

impl SqliteSink {
  /// Opens the database named by the `[storage]` section.
  pub fn open(config: &StorageConfig) -> Result<Self, StorageError> {
    let path = config.resolved_db_path();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
      std::fs::create_dir_all(parent)?;
    }

    let sink = Self::open_path(&path, config.journal_mode.as_deref())?;
    Ok(sink.with_exclude_images(config.exclude_images))
  }

  pub fn open_path(path: &Path, journal_mode: Option<&str>) -> Result<Self, StorageError> {
    info!(path = %path.display(), "opening sqlite database");
    let conn = establish(&path.to_string_lossy(), journal_mode)?;
    Ok(Self { conn: Some(conn), exclude_images: false })
  }

  pub fn open_in_memory() -> Result<Self, StorageError> {
    let conn = establish(":memory:", None)?;
    Ok(Self { conn: Some(conn), exclude_images: false })
  }

  pub fn with_exclude_images(mut self, exclude_images: bool) -> Self {
    self.exclude_images = exclude_images;
    self
  }

  /// Underlying connection, for callers that want to read back what was written.
  pub fn connection(&mut self) -> Result<&mut SqliteConnection, SinkError> {
    self.conn.as_mut().ok_or(SinkError::Closed)
  }
}

fn establish(url: &str, journal_mode: Option<&str>) -> Result<SqliteConnection, StorageError> {
  let mut conn = SqliteConnection::establish(url)?;

  conn.batch_execute("PRAGMA foreign_keys = ON;")?;
  if let Some(mode) = journal_mode {
    if mode.is_empty() || !mode.chars().all(|c| c.is_ascii_alphabetic()) {
      return Err(StorageError::JournalMode(mode.to_string()));
    }
    conn.batch_execute(&format!("PRAGMA journal_mode = {mode};"))?;
  }

  let applied = conn.run_pending_migrations(MIGRATIONS).map_err(|e| StorageError::Migration(e.to_string()))?;
  if !applied.is_empty() {
    debug!(count = applied.len(), "applied migrations");
  }

  Ok(conn)
}

impl Sink for SqliteSink {
  fn write_batch(&mut self, batch: Batch<'_>) -> Result<(), SinkError> {
    let exclude_images = self.exclude_images;
    let conn = self.connection()?;
    if batch.is_empty() {
      return Ok(());
    }

    let rows = rows_for(batch, exclude_images)?;
    let result = conn.transaction::<_, diesel::result::Error, _>(|conn| {
      for row in &rows {
        row.insert(conn)?;
      }
      Ok(())
    });

    match result {
      Ok(()) => {
        debug!(file_type = %batch.file_type(), entities = batch.len(), rows = rows.len(), "block committed");
        Ok(())
      }
      Err(err) => {
        warn!(file_type = %batch.file_type(), entities = batch.len(), error = %err, "block rolled back");
        Err(StorageError::from(err).into())
      }
    }
  }

  /// Empties every table, children first.
  fn reset(&mut self) -> Result<(), SinkError> {
    let conn = self.connection()?;

    conn
      .transaction::<_, diesel::result::Error, _>(|conn| {
        diesel::delete(schema::images::table).execute(conn)?;
        diesel::delete(schema::videos::table).execute(conn)?;
        diesel::delete(schema::release_companies::table).execute(conn)?;
        diesel::delete(schema::release_identifiers::table).execute(conn)?;
        diesel::delete(schema::release_tracks::table).execute(conn)?;
        diesel::delete(schema::release_formats::table).execute(conn)?;
        diesel::delete(schema::release_labels::table).execute(conn)?;
        diesel::delete(schema::release_artists::table).execute(conn)?;
        diesel::delete(schema::releases::table).execute(conn)?;
        diesel::delete(schema::masters::table).execute(conn)?;
        diesel::delete(schema::label_labels::table).execute(conn)?;
        diesel::delete(schema::labels::table).execute(conn)?;
        diesel::delete(schema::artist_groups::table).execute(conn)?;
        diesel::delete(schema::artist_members::table).execute(conn)?;
        diesel::delete(schema::artist_aliases::table).execute(conn)?;
        diesel::delete(schema::artists::table).execute(conn)?;
        Ok(())
      })
      .map_err(|e| SinkError::from(StorageError::from(e)))?;

    debug!("sqlite sink reset");
    Ok(())
  }

  fn close(&mut self) -> Result<(), SinkError> {
    if self.conn.take().is_some() {
      debug!("sqlite sink closed");
    }
    Ok(())
  }
}
