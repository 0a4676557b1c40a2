use std::io;
use std::sync::Arc;

use platter_core::SinkError;
use platter_fs::FsError;
use quick_xml::events::attributes::AttrError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
  /// The stream holds no further entities. Expected and terminal.
  #[error("end of stream")]
  EndOfStream,

  #[error("structural mismatch: expected <{expected}>, found <{found}>")]
  Mismatch { expected: &'static str, found: String },

  #[error("document ended inside <{element}>")]
  UnexpectedEof { element: String },

  #[error("xml error: {0}")]
  Xml(quick_xml::Error),

  #[error("attribute error: {0}")]
  Attr(#[from] AttrError),

  /// The underlying reader failed.
  #[error("io error: {0}")]
  Io(#[from] io::Error),

  #[error("cannot open dump: {0}")]
  Open(#[from] FsError),

  #[error("cannot tell the dump type from root element <{0}>")]
  UnknownFileType(String),

  #[error("invalid options: {0}")]
  InvalidOptions(String),

  #[error("sink error: {0}")]
  Sink(#[from] SinkError),
}

impl DecodeError {
  pub fn is_end_of_stream(&self) -> bool {
    matches!(self, DecodeError::EndOfStream)
  }

  pub(crate) fn eof_inside(element: &str) -> Self {
    DecodeError::UnexpectedEof { element: element.to_string() }
  }
}

impl From<quick_xml::Error> for DecodeError {
  fn from(err: quick_xml::Error) -> Self {
    match err {
      quick_xml::Error::Io(shared) => {
        DecodeError::Io(Arc::try_unwrap(shared).unwrap_or_else(|e| io::Error::new(e.kind(), e.to_string())))
      }
      other => DecodeError::Xml(other),
    }
  }
}
