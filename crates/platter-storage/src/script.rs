use std::io::Write;

use platter_core::{Batch, Sink, SinkError};
use tracing::debug;

use crate::models::{Row, rows_for};

/// DDL of the catalog tables, the same the SQLite sink migrates to.
pub const SCHEMA_SQL: &str = include_str!("../migrations/2024-06-01-000000_create_catalog/up.sql");

/// Renders each block as `INSERT` statements wrapped in `BEGIN;` / `COMMIT;`.
///
/// A block is rendered in memory and written with a single `write_all`, so a
/// rendering failure never leaves half a transaction in the output.
pub struct SqlScriptSink<W: Write> {
  out: Option<W>,
  exclude_images: bool,
  blocks: usize,
}

impl<W: Write> SqlScriptSink<W> {
  pub fn new(out: W) -> Self {
    Self { out: Some(out), exclude_images: false, blocks: 0 }
  }

  pub fn with_exclude_images(mut self, exclude_images: bool) -> Self {
    self.exclude_images = exclude_images;
    self
  }

  /// Emits [`SCHEMA_SQL`] so the script can run against an empty database.
  pub fn write_schema(&mut self) -> Result<(), SinkError> {
    let out = self.out.as_mut().ok_or(SinkError::Closed)?;
    out.write_all(SCHEMA_SQL.as_bytes())?;
    out.write_all(b"\n")?;
    Ok(())
  }

  /// Blocks written since the last reset.
  pub fn blocks(&self) -> usize {
    self.blocks
  }
}

fn render_statement(row: &Row, sql: &mut String) {
  sql.push_str("INSERT INTO ");
  sql.push_str(row.table());
  sql.push_str(" (");
  sql.push_str(&row.columns().join(", "));
  sql.push_str(") VALUES (");
  let values: Vec<String> = row.values().iter().map(ToString::to_string).collect();
  sql.push_str(&values.join(", "));
  sql.push_str(");\n");
}

impl<W: Write> Sink for SqlScriptSink<W> {
  fn write_batch(&mut self, batch: Batch<'_>) -> Result<(), SinkError> {
    let out = self.out.as_mut().ok_or(SinkError::Closed)?;
    if batch.is_empty() {
      return Ok(());
    }

    let rows = rows_for(batch, self.exclude_images)?;
    let mut sql = String::from("BEGIN;\n");
    for row in &rows {
      render_statement(row, &mut sql);
    }
    sql.push_str("COMMIT;\n");

    out.write_all(sql.as_bytes())?;
    self.blocks += 1;
    debug!(block = self.blocks, statements = rows.len(), "sql block rendered");
    Ok(())
  }

  fn reset(&mut self) -> Result<(), SinkError> {
    self.blocks = 0;
    Ok(())
  }

  fn close(&mut self) -> Result<(), SinkError> {
    if let Some(mut out) = self.out.take() {
      out.flush()?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{SqliteSink, schema};
  use diesel::connection::SimpleConnection;
  use diesel::dsl::count_star;
  use diesel::prelude::*;
  use platter_core::discography::{Artist, ArtistRef, Image, Label, LabelRef};

  fn artists() -> Vec<Artist> {
    vec![
      Artist {
        id: "1".into(),
        name: "The Persuader".to_string(),
        profile: "Swedish producer's alias".to_string(),
        images: vec![Image::default()],
        aliases: vec![ArtistRef { id: "239".into(), name: "Jesper Dahlbäck".to_string() }],
        ..Default::default()
      },
      Artist { id: "2".into(), name: "Mr. James Barth & A.D.".to_string(), ..Default::default() },
    ]
  }

  #[test]
  fn block_is_wrapped_in_a_transaction() {
    let mut out = Vec::new();
    let mut sink = SqlScriptSink::new(&mut out);
    sink.write_batch(Batch::Artists(&artists())).unwrap();
    sink.close().unwrap();

    let script = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = script.lines().collect();

    assert_eq!(lines.first(), Some(&"BEGIN;"));
    assert_eq!(lines.last(), Some(&"COMMIT;"));
    assert!(lines[1].starts_with("INSERT INTO artists (id, name, real_name"));
    assert!(lines[1].contains("'Swedish producer''s alias'"));
    assert!(lines[2].starts_with("INSERT INTO images "));
    assert!(lines[2].contains("NULL"));
    assert_eq!(lines.len(), 2 + 4);
  }

  #[test]
  fn script_runs_against_the_schema() {
    let mut out = Vec::new();
    {
      let mut sink = SqlScriptSink::new(&mut out);
      sink.write_batch(Batch::Artists(&artists())).unwrap();
      let labels = [Label {
        id: "1".into(),
        name: "Planet E".to_string(),
        parent_label: Some(LabelRef { id: "9".into(), name: "Parent".to_string() }),
        ..Default::default()
      }];
      sink.write_batch(Batch::Labels(&labels)).unwrap();
      assert_eq!(sink.blocks(), 2);
      sink.close().unwrap();
    }

    let mut db = SqliteSink::open_in_memory().unwrap();
    let conn = db.connection().unwrap();
    conn.batch_execute(std::str::from_utf8(&out).unwrap()).unwrap();

    let artists: i64 = schema::artists::table.select(count_star()).first(conn).unwrap();
    let relations: i64 = schema::label_labels::table.select(count_star()).first(conn).unwrap();
    assert_eq!(artists, 2);
    assert_eq!(relations, 1);
  }

  #[test]
  fn schema_prefix_makes_script_self_contained() {
    let mut out = Vec::new();
    {
      let mut sink = SqlScriptSink::new(&mut out).with_exclude_images(true);
      sink.write_schema().unwrap();
      sink.write_batch(Batch::Artists(&artists())).unwrap();
      sink.close().unwrap();
    }
    let script = String::from_utf8(out).unwrap();
    assert!(!script.contains("INSERT INTO images"));

    let mut conn = SqliteConnection::establish(":memory:").unwrap();
    conn.batch_execute(&script).unwrap();
  }

  #[test]
  fn closed_sink_rejects_writes() {
    let mut sink = SqlScriptSink::new(Vec::new());
    sink.close().unwrap();
    sink.close().unwrap();
    assert!(matches!(sink.write_batch(Batch::Artists(&artists())), Err(SinkError::Closed)));
  }
}
