//! Token cursor over the raw XML stream.
//!
//! The assemblers never look at quick-xml events directly: they pull owned
//! [`Token`]s from a [`TokenSource`], one at a time, strictly forward.

use std::io::BufRead;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::DecodeError;

/// Start tag with its local name and unescaped attributes, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartTag {
  pub name: String,
  pub attributes: Vec<(String, String)>,
}

impl StartTag {
  pub fn new(name: impl Into<String>) -> Self {
    Self { name: name.into(), attributes: Vec::new() }
  }

  pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.attributes.push((key.into(), value.into()));
    self
  }

  pub fn attr(&self, key: &str) -> Option<&str> {
    self.attributes.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
  }

  /// Attribute value, or an empty string when the attribute is missing.
  pub fn attr_or_default(&self, key: &str) -> String {
    self.attr(key).unwrap_or_default().to_string()
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
  Start(StartTag),
  End(String),
  /// Character data. Text may arrive split over several tokens.
  Text(String),
  Eof,
}

/// Forward-only supplier of tokens.
///
/// Implementations hold the position in the stream, so a source must be
/// advanced by exactly one caller at a time; the decoder owns its source to
/// guarantee that.
pub trait TokenSource {
  fn next_token(&mut self) -> Result<Token, DecodeError>;
}

impl<T: TokenSource + ?Sized> TokenSource for &mut T {
  fn next_token(&mut self) -> Result<Token, DecodeError> {
    (**self).next_token()
  }
}

/// [`TokenSource`] backed by a quick-xml reader.
///
/// Self-closing elements (`<image …/>`) come out as a start token followed by
/// its end token, so callers see one shape for both forms. Comments,
/// declarations, processing instructions and doctypes are dropped.
pub struct XmlCursor<R: BufRead> {
  reader: Reader<R>,
  buf: Vec<u8>,
  pending_end: Option<String>,
}

impl<R: BufRead> XmlCursor<R> {
  pub fn new(inner: R) -> Self {
    let mut reader = Reader::from_reader(inner);
    reader.config_mut().check_end_names = true;

    Self { reader, buf: Vec::with_capacity(8 * 1024), pending_end: None }
  }
}

impl<R: BufRead> TokenSource for XmlCursor<R> {
  fn next_token(&mut self) -> Result<Token, DecodeError> {
    if let Some(name) = self.pending_end.take() {
      return Ok(Token::End(name));
    }

    loop {
      self.buf.clear();

      let token = match self.reader.read_event_into(&mut self.buf)? {
        Event::Start(e) => Token::Start(start_tag(&e)?),
        Event::Empty(e) => {
          let tag = start_tag(&e)?;
          self.pending_end = Some(tag.name.clone());
          Token::Start(tag)
        }
        Event::End(e) => Token::End(decode_name(e.local_name().as_ref())),
        Event::Text(e) => Token::Text(e.unescape()?.into_owned()),
        Event::CData(e) => Token::Text(String::from_utf8_lossy(&e.into_inner()).into_owned()),
        Event::Eof => Token::Eof,
        _ => continue,
      };

      return Ok(token);
    }
  }
}

fn start_tag(e: &BytesStart<'_>) -> Result<StartTag, DecodeError> {
  let mut tag = StartTag::new(decode_name(e.local_name().as_ref()));

  for attr in e.attributes() {
    let attr = attr?;
    let key = decode_name(attr.key.local_name().as_ref());
    let value = attr.unescape_value()?.into_owned();
    tag.attributes.push((key, value));
  }

  Ok(tag)
}

fn decode_name(raw: &[u8]) -> String {
  String::from_utf8_lossy(raw).into_owned()
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;
  use std::io::Cursor;

  fn tokens(xml: &str) -> Vec<Token> {
    let mut cursor = XmlCursor::new(Cursor::new(xml.as_bytes().to_vec()));
    let mut out = Vec::new();
    loop {
      let token = cursor.next_token().unwrap();
      let done = token == Token::Eof;
      out.push(token);
      if done {
        return out;
      }
    }
  }

  #[test]
  fn self_closing_element_yields_start_and_end() {
    let got = tokens(r#"<images><image type="primary" uri="a.jpg"/></images>"#);

    assert_eq!(
      got,
      vec![
        Token::Start(StartTag::new("images")),
        Token::Start(StartTag::new("image").with_attr("type", "primary").with_attr("uri", "a.jpg")),
        Token::End("image".to_string()),
        Token::End("images".to_string()),
        Token::Eof,
      ]
    );
  }

  #[test]
  fn namespaces_are_stripped_and_entities_unescaped() {
    let got = tokens(r#"<?xml version="1.0"?><d:name x:id="7">Tom &amp; Jerry<!-- c --></d:name>"#);

    assert_eq!(
      got,
      vec![
        Token::Start(StartTag::new("name").with_attr("id", "7")),
        Token::Text("Tom & Jerry".to_string()),
        Token::End("name".to_string()),
        Token::Eof,
      ]
    );
  }

  #[test]
  fn cdata_surfaces_as_text() {
    let got = tokens("<notes><![CDATA[a < b]]></notes>");
    assert_eq!(got[1], Token::Text("a < b".to_string()));
  }

  #[test]
  fn mismatched_end_tag_is_an_error() {
    let mut cursor = XmlCursor::new(Cursor::new(b"<a><b></a>".to_vec()));
    cursor.next_token().unwrap();
    cursor.next_token().unwrap();
    assert!(matches!(cursor.next_token(), Err(DecodeError::Xml(_))));
  }

  struct DroppedConnection {
    sent: bool,
  }

  impl std::io::Read for DroppedConnection {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
      if self.sent {
        return Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "closed"));
      }
      self.sent = true;
      let head = b"<artists><artist>";
      buf[..head.len()].copy_from_slice(head);
      Ok(head.len())
    }
  }

  #[test]
  fn reader_failure_surfaces_as_io_error() {
    let mut cursor = XmlCursor::new(std::io::BufReader::new(DroppedConnection { sent: false }));
    cursor.next_token().unwrap();
    cursor.next_token().unwrap();

    match cursor.next_token() {
      Err(DecodeError::Io(err)) => assert_eq!(err.kind(), std::io::ErrorKind::ConnectionReset),
      other => panic!("expected io error, got {other:?}"),
    }
  }

  #[test]
  fn attribute_lookup_defaults_to_empty() {
    let tag = StartTag::new("label").with_attr("id", "5");
    assert_eq!(tag.attr("id"), Some("5"));
    assert_eq!(tag.attr_or_default("catno"), "");
  }
}
