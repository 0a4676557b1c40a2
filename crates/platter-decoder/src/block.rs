//! Block iterator over one open dump.
//!
//! A [`Decoder`] owns its token source, so only one block can be in flight at
//! a time. Each call resumes where the previous one stopped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use platter_core::discography::{Artist, Label, Master, Release, retain_quality};
use platter_core::{FileType, Sink};
use tracing::{debug, info, trace, warn};

use crate::assemble::Assemble;
use crate::cursor::{StartTag, Token, TokenSource, XmlCursor};
use crate::error::DecodeError;
use crate::extract::skip_element;
use crate::options::Options;

/// Counters of a block-driven run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeStats {
  /// Blocks read from the stream, skipped ones included.
  pub blocks: usize,
  /// Entities assembled.
  pub decoded: usize,
  /// Entities that passed the quality filter.
  pub kept: usize,
  /// Entities handed to the sink.
  pub written: usize,
  pub skipped_blocks: usize,
}

pub struct Decoder<C> {
  cursor: C,
  options: Options,
  root: Option<String>,
  /// 0 before the root element, 1 inside it.
  depth: usize,
  exhausted: bool,
}

impl Decoder<XmlCursor<BufReader<File>>> {
  /// Opens the dump at `path`.
  pub fn open(path: &Path, options: Options) -> Result<Self, DecodeError> {
    let reader = platter_fs::open_dump(path)?;
    Ok(Self::from_reader(reader, options))
  }
}

impl<R: BufRead> Decoder<XmlCursor<R>> {
  pub fn from_reader(reader: R, options: Options) -> Self {
    Self::new(XmlCursor::new(reader), options)
  }
}

impl<C: TokenSource> Decoder<C> {
  pub fn new(cursor: C, options: Options) -> Self {
    Self { cursor, options, root: None, depth: 0, exhausted: false }
  }

  /// `true` once the stream has nothing more to give, or failed.
  pub fn is_exhausted(&self) -> bool {
    self.exhausted
  }

  /// Next block of at most `limit` artists (`None` reads the rest of the
  /// stream), filtered by quality.
  ///
  /// Fails with [`DecodeError::EndOfStream`] when no artist is left.
  pub fn artists(&mut self, limit: Option<usize>) -> Result<Vec<Artist>, DecodeError> {
    self.next_block(limit)
  }

  pub fn labels(&mut self, limit: Option<usize>) -> Result<Vec<Label>, DecodeError> {
    self.next_block(limit)
  }

  pub fn masters(&mut self, limit: Option<usize>) -> Result<Vec<Master>, DecodeError> {
    self.next_block(limit)
  }

  pub fn releases(&mut self, limit: Option<usize>) -> Result<Vec<Release>, DecodeError> {
    self.next_block(limit)
  }

  /// Generic form of [`Decoder::artists`] and friends.
  ///
  /// The block may come back shorter than `limit`, or even empty, when the
  /// quality filter drops entities. Exhaustion is only reported by the call
  /// after the one that returned the last entities.
  pub fn next_block<T: Assemble>(&mut self, limit: Option<usize>) -> Result<Vec<T>, DecodeError> {
    let mut items = self.read_block::<T>(limit)?;
    let dropped = retain_quality(&mut items, self.options.quality_level);
    if dropped > 0 {
      trace!(dropped, threshold = %self.options.quality_level, "quality filter");
    }
    Ok(items)
  }

  /// Runs the whole stream through `sink`, one block at a time.
  ///
  /// The sink's lifecycle stays with the caller: this never calls
  /// [`Sink::reset`] or [`Sink::close`].
  pub fn decode<S: Sink + ?Sized>(&mut self, sink: &mut S) -> Result<DecodeStats, DecodeError> {
    self.options.validate()?;

    let file_type = match self.options.file_type {
      Some(file_type) => file_type,
      None => self.detect_file_type()?,
    };

    info!(
      %file_type,
      quality = %self.options.quality_level,
      item_size = self.options.block.item_size,
      skip = self.options.block.skip,
      limit = ?self.options.block.limit,
      "decoding dump"
    );

    let stats = match file_type {
      FileType::Artists => self.drive::<Artist, S>(sink)?,
      FileType::Labels => self.drive::<Label, S>(sink)?,
      FileType::Masters => self.drive::<Master, S>(sink)?,
      FileType::Releases => self.drive::<Release, S>(sink)?,
    };

    info!(
      blocks = stats.blocks,
      decoded = stats.decoded,
      kept = stats.kept,
      written = stats.written,
      skipped_blocks = stats.skipped_blocks,
      "decode finished"
    );
    Ok(stats)
  }

  fn drive<T: Assemble, S: Sink + ?Sized>(&mut self, sink: &mut S) -> Result<DecodeStats, DecodeError> {
    let block = self.options.block.clone();
    let mut stats = DecodeStats::default();

    while block.limit.is_none_or(|limit| stats.blocks < limit) {
      let mut items = match self.read_block::<T>(Some(block.item_size)) {
        Ok(items) => items,
        Err(DecodeError::EndOfStream) => break,
        Err(err) => return Err(err),
      };

      stats.blocks += 1;
      stats.decoded += items.len();
      retain_quality(&mut items, self.options.quality_level);
      stats.kept += items.len();

      if stats.blocks <= block.skip {
        stats.skipped_blocks += 1;
        debug!(block = stats.blocks, entities = items.len(), "block skipped");
        continue;
      }
      if items.is_empty() {
        debug!(block = stats.blocks, "nothing left after quality filter");
        continue;
      }

      sink.write_batch(T::batch(&items))?;
      stats.written += items.len();
      debug!(block = stats.blocks, written = items.len(), "block written");
    }

    Ok(stats)
  }

  fn read_block<T: Assemble>(&mut self, limit: Option<usize>) -> Result<Vec<T>, DecodeError> {
    if limit == Some(0) {
      return Err(DecodeError::InvalidOptions("block size must be greater than zero".to_string()));
    }
    if self.exhausted {
      return Err(DecodeError::EndOfStream);
    }
    self.check_root(T::FILE_TYPE)?;

    let mut items = Vec::new();
    while limit.is_none_or(|limit| items.len() < limit) {
      match self.next_entity::<T>() {
        Ok(Some(item)) => items.push(item),
        Ok(None) => {
          self.exhausted = true;
          break;
        }
        Err(err) => {
          self.exhausted = true;
          if !items.is_empty() {
            warn!(discarded = items.len(), error = %err, "dropping partially decoded block");
          }
          return Err(err);
        }
      }
    }

    if items.is_empty() {
      return Err(DecodeError::EndOfStream);
    }
    Ok(items)
  }

  fn next_entity<T: Assemble>(&mut self) -> Result<Option<T>, DecodeError> {
    let Some(start) = self.next_entity_start(T::FILE_TYPE)? else {
      return Ok(None);
    };
    T::assemble(&mut self.cursor, &start).map(Some)
  }

  /// Advances to the next `<entity>` directly under the root and returns its
  /// start tag, or `None` at end of document.
  fn next_entity_start(&mut self, file_type: FileType) -> Result<Option<StartTag>, DecodeError> {
    let entity = file_type.entity_element();

    loop {
      match self.cursor.next_token()? {
        // Tolerate entities with no wrapping root.
        Token::Start(tag) if self.depth == 0 && tag.name == entity => return Ok(Some(tag)),
        Token::Start(tag) if self.depth == 0 => {
          self.enter_root(tag.name);
          self.check_root(file_type)?;
        }
        Token::Start(tag) if tag.name == entity => return Ok(Some(tag)),
        Token::Start(tag) => skip_element(&mut self.cursor, &tag.name)?,
        Token::End(_) => self.depth = self.depth.saturating_sub(1),
        Token::Text(_) => {}
        Token::Eof => return Ok(None),
      }
    }
  }

  /// Reads up to the root element and maps it to a file type.
  fn detect_file_type(&mut self) -> Result<FileType, DecodeError> {
    if self.root.is_none() {
      loop {
        match self.cursor.next_token()? {
          Token::Start(tag) => {
            self.enter_root(tag.name);
            break;
          }
          Token::Eof => {
            self.exhausted = true;
            return Err(DecodeError::UnknownFileType(String::new()));
          }
          _ => {}
        }
      }
    }

    let root = self.root.as_deref().unwrap_or_default();
    let file_type = FileType::from_root_element(root).ok_or_else(|| DecodeError::UnknownFileType(root.to_string()))?;
    debug!(root, %file_type, "detected dump type");
    Ok(file_type)
  }

  fn enter_root(&mut self, name: String) {
    trace!(root = %name, "entering root element");
    self.root = Some(name);
    self.depth = 1;
  }

  /// A known root of another dump type is a structural mismatch.
  fn check_root(&self, file_type: FileType) -> Result<(), DecodeError> {
    let Some(root) = self.root.as_deref() else {
      return Ok(());
    };
    match FileType::from_root_element(root) {
      Some(found) if found != file_type => {
        Err(DecodeError::Mismatch { expected: file_type.root_element(), found: root.to_string() })
      }
      _ => Ok(()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::options::BlockOptions;
  use platter_core::{Batch, QualityLevel, SinkError};
  use pretty_assertions::assert_eq;
  use std::io::Cursor;

  fn artist_xml(id: usize, quality: &str) -> String {
    format!("<artist><id>{id}</id><name>Artist {id}</name><data_quality>{quality}</data_quality></artist>")
  }

  fn artists_doc(count: usize) -> String {
    let body: String = (1..=count).map(|id| artist_xml(id, "Correct")).collect();
    format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<artists>\n{body}\n</artists>\n")
  }

  fn decoder(xml: &str, options: Options) -> Decoder<XmlCursor<Cursor<Vec<u8>>>> {
    Decoder::from_reader(Cursor::new(xml.as_bytes().to_vec()), options)
  }

  fn ids(items: &[Artist]) -> Vec<String> {
    items.iter().map(|a| a.id.to_string()).collect()
  }

  #[derive(Default)]
  struct RecordingSink {
    batches: Vec<(FileType, Vec<String>)>,
    fail: bool,
  }

  impl Sink for RecordingSink {
    fn write_batch(&mut self, batch: Batch<'_>) -> Result<(), SinkError> {
      if self.fail {
        return Err(SinkError::Storage("disk full".to_string()));
      }
      let ids = match batch {
        Batch::Artists(items) => items.iter().map(|a| a.id.to_string()).collect(),
        Batch::Labels(items) => items.iter().map(|l| l.id.to_string()).collect(),
        Batch::Masters(items) => items.iter().map(|m| m.id.to_string()).collect(),
        Batch::Releases(items) => items.iter().map(|r| r.id.to_string()).collect(),
      };
      self.batches.push((batch.file_type(), ids));
      Ok(())
    }

    fn reset(&mut self) -> Result<(), SinkError> {
      self.batches.clear();
      Ok(())
    }

    fn close(&mut self) -> Result<(), SinkError> {
      Ok(())
    }
  }

  #[test]
  fn two_artists_one_per_call() {
    let mut d = decoder(&artists_doc(2), Options::default());

    assert_eq!(ids(&d.artists(Some(1)).unwrap()), vec!["1"]);
    assert_eq!(ids(&d.artists(Some(1)).unwrap()), vec!["2"]);
    assert!(d.artists(Some(1)).unwrap_err().is_end_of_stream());
  }

  #[test]
  fn short_block_then_end_of_stream() {
    let mut d = decoder(&artists_doc(3), Options::default());

    assert_eq!(d.artists(Some(5)).unwrap().len(), 3);
    assert!(d.is_exhausted());
    assert!(d.artists(Some(5)).unwrap_err().is_end_of_stream());
    assert!(d.artists(None).unwrap_err().is_end_of_stream());
  }

  #[test]
  fn empty_dump_is_exhausted_immediately() {
    let mut d = decoder("<artists></artists>", Options::default());
    assert!(d.artists(Some(10)).unwrap_err().is_end_of_stream());

    let mut d = decoder("<artists/>", Options::default());
    assert!(d.artists(None).unwrap_err().is_end_of_stream());
  }

  #[test]
  fn blocks_concatenate_to_whole_stream() {
    let xml = artists_doc(7);
    let whole = decoder(&xml, Options::default()).artists(None).unwrap();
    assert_eq!(whole.len(), 7);

    for k in 1..=8 {
      let mut d = decoder(&xml, Options::default());
      let mut joined = Vec::new();
      loop {
        match d.artists(Some(k)) {
          Ok(block) => {
            assert!(block.len() <= k);
            joined.extend(block);
          }
          Err(err) => {
            assert!(err.is_end_of_stream(), "k={k}: {err}");
            break;
          }
        }
      }
      assert_eq!(joined, whole, "k={k}");
    }
  }

  #[test]
  fn typed_calls_apply_quality_threshold() {
    let xml = format!(
      "<artists>{}{}{}{}</artists>",
      artist_xml(1, "Complete and Correct"),
      artist_xml(2, "Needs Vote"),
      artist_xml(3, "Correct"),
      artist_xml(4, "")
    );
    let options = Options { quality_level: QualityLevel::Correct, ..Default::default() };
    let mut d = decoder(&xml, options);

    assert_eq!(ids(&d.artists(Some(2)).unwrap()), vec!["1"]);
    assert_eq!(ids(&d.artists(Some(2)).unwrap()), vec!["3"]);
    assert!(d.artists(Some(2)).unwrap_err().is_end_of_stream());
  }

  #[test]
  fn unknown_top_level_elements_are_skipped() {
    let xml = r#"<releases>
      <meta><generated>2024-01-01</generated></meta>
      <release id="1" status="Accepted"><title>A</title></release>
      <notice>x</notice>
      <release id="2" status="Accepted"><title>B</title></release>
    </releases>"#;
    let mut d = decoder(xml, Options::default());

    let titles: Vec<String> = d.releases(None).unwrap().into_iter().map(|r| r.title).collect();
    assert_eq!(titles, vec!["A", "B"]);
  }

  #[test]
  fn wrong_entity_call_is_a_mismatch() {
    let mut d = decoder(&artists_doc(1), Options::default());
    match d.labels(Some(1)) {
      Err(DecodeError::Mismatch { expected, found }) => {
        assert_eq!(expected, "labels");
        assert_eq!(found, "artists");
      }
      other => panic!("expected mismatch, got {other:?}"),
    }
  }

  #[test]
  fn malformed_entity_discards_block_and_stops() {
    let xml = format!("<artists>{}<artist><id>2</id></wrong></artists>", artist_xml(1, "Correct"));
    let mut d = decoder(&xml, Options::default());

    let err = d.artists(Some(10)).unwrap_err();
    assert!(!err.is_end_of_stream());
    assert!(d.artists(Some(10)).unwrap_err().is_end_of_stream());
  }

  #[test]
  fn zero_sized_block_is_rejected() {
    let mut d = decoder(&artists_doc(1), Options::default());
    assert!(matches!(d.artists(Some(0)), Err(DecodeError::InvalidOptions(_))));
  }

  #[test]
  fn decode_skips_and_limits_blocks() {
    let options =
      Options { block: BlockOptions { item_size: 2, limit: Some(3), skip: 1 }, ..Default::default() };
    let mut d = decoder(&artists_doc(7), options);
    let mut sink = RecordingSink::default();

    let stats = d.decode(&mut sink).unwrap();

    assert_eq!(
      sink.batches,
      vec![
        (FileType::Artists, vec!["3".to_string(), "4".to_string()]),
        (FileType::Artists, vec!["5".to_string(), "6".to_string()]),
      ]
    );
    assert_eq!(stats, DecodeStats { blocks: 3, decoded: 6, kept: 6, written: 4, skipped_blocks: 1 });
  }

  #[test]
  fn skipping_every_allowed_block_writes_nothing() {
    let options =
      Options { block: BlockOptions { item_size: 2, limit: Some(2), skip: 2 }, ..Default::default() };
    let mut d = decoder(&artists_doc(7), options);
    let mut sink = RecordingSink::default();

    let stats = d.decode(&mut sink).unwrap();

    assert!(sink.batches.is_empty());
    assert_eq!(stats, DecodeStats { blocks: 2, decoded: 4, kept: 4, written: 0, skipped_blocks: 2 });
  }

  #[test]
  fn decode_runs_to_end_without_limit() {
    let options = Options { block: BlockOptions { item_size: 3, ..Default::default() }, ..Default::default() };
    let mut d = decoder(&artists_doc(7), options);
    let mut sink = RecordingSink::default();

    let stats = d.decode(&mut sink).unwrap();

    let sizes: Vec<usize> = sink.batches.iter().map(|(_, ids)| ids.len()).collect();
    assert_eq!(sizes, vec![3, 3, 1]);
    assert_eq!(stats.blocks, 3);
    assert_eq!(stats.written, 7);
  }

  #[test]
  fn decode_detects_type_from_root() {
    let xml = r#"<labels><label><id>1</id><name>Planet E</name></label><label><id>2</id><name>Earthtones</name></label></labels>"#;
    let mut d = decoder(xml, Options::default());
    let mut sink = RecordingSink::default();

    d.decode(&mut sink).unwrap();
    assert_eq!(sink.batches, vec![(FileType::Labels, vec!["1".to_string(), "2".to_string()])]);
  }

  #[test]
  fn decode_rejects_unknown_root() {
    let mut d = decoder("<collection><item/></collection>", Options::default());
    let mut sink = RecordingSink::default();

    match d.decode(&mut sink) {
      Err(DecodeError::UnknownFileType(root)) => assert_eq!(root, "collection"),
      other => panic!("expected unknown file type, got {other:?}"),
    }
  }

  #[test]
  fn decode_does_not_write_filtered_out_blocks() {
    let xml = format!("<artists>{}{}</artists>", artist_xml(1, "Needs Vote"), artist_xml(2, "Correct"));
    let options = Options {
      quality_level: QualityLevel::Correct,
      block: BlockOptions { item_size: 1, ..Default::default() },
      ..Default::default()
    };
    let mut d = decoder(&xml, options);
    let mut sink = RecordingSink::default();

    let stats = d.decode(&mut sink).unwrap();
    assert_eq!(sink.batches, vec![(FileType::Artists, vec!["2".to_string()])]);
    assert_eq!(stats.decoded, 2);
    assert_eq!(stats.kept, 1);
  }

  #[test]
  fn sink_failure_stops_decode() {
    let mut d = decoder(&artists_doc(4), Options::default());
    let mut sink = RecordingSink { fail: true, ..Default::default() };

    assert!(matches!(d.decode(&mut sink), Err(DecodeError::Sink(SinkError::Storage(_)))));
  }

  #[test]
  fn decode_validates_options() {
    let options = Options { block: BlockOptions { item_size: 0, ..Default::default() }, ..Default::default() };
    let mut d = decoder(&artists_doc(1), options);
    assert!(matches!(d.decode(&mut RecordingSink::default()), Err(DecodeError::InvalidOptions(_))));
  }

  #[test]
  fn opens_dump_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("artists.xml");
    std::fs::write(&path, artists_doc(2)).unwrap();

    let mut d = Decoder::open(&path, Options::default()).unwrap();
    assert_eq!(d.artists(None).unwrap().len(), 2);
  }
}
