use std::io::Write;

use platter_core::{Batch, CatalogEntity, Sink, SinkError};
use serde::Serialize;
use tracing::debug;

/// Streams every block of a run into one JSON array.
///
/// The opening bracket goes out with the first block and the closing one on
/// [`Sink::close`], so an empty run still produces `[]`. Each block is
/// serialized into memory before anything reaches the writer.
pub struct JsonSink<W: Write> {
  out: Option<W>,
  exclude_images: bool,
  open: bool,
}

impl<W: Write> JsonSink<W> {
  pub fn new(out: W) -> Self {
    Self { out: Some(out), exclude_images: false, open: false }
  }

  pub fn with_exclude_images(mut self, exclude_images: bool) -> Self {
    self.exclude_images = exclude_images;
    self
  }
}

fn push_items<T>(buf: &mut Vec<u8>, items: &[T], exclude_images: bool) -> Result<(), serde_json::Error>
where
  T: CatalogEntity + Serialize + Clone,
{
  for (i, item) in items.iter().enumerate() {
    if i > 0 {
      buf.push(b',');
    }
    if exclude_images && !item.images().is_empty() {
      let mut stripped = item.clone();
      stripped.images_mut().clear();
      serde_json::to_writer(&mut *buf, &stripped)?;
    } else {
      serde_json::to_writer(&mut *buf, item)?;
    }
  }
  Ok(())
}

impl<W: Write> Sink for JsonSink<W> {
  fn write_batch(&mut self, batch: Batch<'_>) -> Result<(), SinkError> {
    let out = self.out.as_mut().ok_or(SinkError::Closed)?;
    if batch.is_empty() {
      return Ok(());
    }

    let mut buf = Vec::with_capacity(batch.len() * 512);
    buf.push(if self.open { b',' } else { b'[' });

    let rendered = match batch {
      Batch::Artists(items) => push_items(&mut buf, items, self.exclude_images),
      Batch::Labels(items) => push_items(&mut buf, items, self.exclude_images),
      Batch::Masters(items) => push_items(&mut buf, items, self.exclude_images),
      Batch::Releases(items) => push_items(&mut buf, items, self.exclude_images),
    };
    rendered.map_err(|e| SinkError::Serialize(e.to_string()))?;

    out.write_all(&buf)?;
    self.open = true;
    debug!(file_type = %batch.file_type(), entities = batch.len(), bytes = buf.len(), "json block written");
    Ok(())
  }

  /// Terminates the array of the current run, if any; the next block starts
  /// a new one.
  fn reset(&mut self) -> Result<(), SinkError> {
    if self.open {
      if let Some(out) = self.out.as_mut() {
        out.write_all(b"]\n")?;
      }
      self.open = false;
    }
    Ok(())
  }

  fn close(&mut self) -> Result<(), SinkError> {
    let Some(mut out) = self.out.take() else {
      return Ok(());
    };

    let tail: &[u8] = if self.open { b"]\n" } else { b"[]\n" };
    out.write_all(tail)?;
    self.open = false;
    out.flush()?;
    Ok(())
  }
}
