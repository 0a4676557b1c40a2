//! Small building blocks shared by every assembler.

use tracing::trace;

use crate::cursor::{Token, TokenSource};
use crate::error::DecodeError;

/// Reads the character data of `element` up to its matching end tag.
///
/// The cursor must sit right after `<element>`. Text split across several
/// tokens is concatenated; text of nested elements is dropped.
pub fn extract_text<S: TokenSource + ?Sized>(cursor: &mut S, element: &str) -> Result<String, DecodeError> {
  let mut text = String::new();
  let mut depth = 0usize;

  loop {
    match cursor.next_token()? {
      Token::Text(chunk) if depth == 0 => text.push_str(&chunk),
      Token::Text(_) => {}
      Token::Start(_) => depth += 1,
      Token::End(_) if depth > 0 => depth -= 1,
      Token::End(_) => return Ok(text),
      Token::Eof => return Err(DecodeError::eof_inside(element)),
    }
  }
}

/// Collects the text of every `<child>` directly under `<wrapper>`.
///
/// The cursor must sit right after `<wrapper>`; it is left right after
/// `</wrapper>`. Other children are skipped. Used for genres, styles, urls,
/// name variations and format descriptions.
pub fn extract_child_list<S: TokenSource + ?Sized>(
  cursor: &mut S,
  wrapper: &str,
  child: &str,
) -> Result<Vec<String>, DecodeError> {
  let mut items = Vec::new();

  loop {
    match cursor.next_token()? {
      Token::Start(tag) if tag.name == child => items.push(extract_text(cursor, child)?),
      Token::Start(tag) => skip_element(cursor, &tag.name)?,
      Token::End(_) => return Ok(items),
      Token::Text(_) => {}
      Token::Eof => return Err(DecodeError::eof_inside(wrapper)),
    }
  }
}

/// Consumes the rest of `element`, whatever it contains.
pub fn skip_element<S: TokenSource + ?Sized>(cursor: &mut S, element: &str) -> Result<(), DecodeError> {
  trace!(element, "skipping element");
  let mut depth = 0usize;

  loop {
    match cursor.next_token()? {
      Token::Start(_) => depth += 1,
      Token::End(_) if depth == 0 => return Ok(()),
      Token::End(_) => depth -= 1,
      Token::Text(_) => {}
      Token::Eof => return Err(DecodeError::eof_inside(element)),
    }
  }
}

/// Loops over the children of a wrapper element, handing each start tag to
/// `on_child`, until the wrapper closes.
///
/// `on_child` must consume the child entirely (its own end tag included).
pub fn for_each_child<S, F>(cursor: &mut S, wrapper: &str, mut on_child: F) -> Result<(), DecodeError>
where
  S: TokenSource + ?Sized,
  F: FnMut(&mut S, crate::cursor::StartTag) -> Result<(), DecodeError>,
{
  loop {
    match cursor.next_token()? {
      Token::Start(tag) => on_child(cursor, tag)?,
      Token::End(_) => return Ok(()),
      Token::Text(_) => {}
      Token::Eof => return Err(DecodeError::eof_inside(wrapper)),
    }
  }
}

/// Lenient numeric leaf: empty or malformed text becomes `0`.
pub fn parse_number(raw: &str, field: &'static str) -> u32 {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return 0;
  }

  trimmed.parse().unwrap_or_else(|_| {
    trace!(field, value = trimmed, "unparsable number, using 0");
    0
  })
}

/// `"true"` (any case) or `"1"`.
pub fn parse_flag(raw: &str) -> bool {
  let trimmed = raw.trim();
  trimmed.eq_ignore_ascii_case("true") || trimmed == "1"
}

#[cfg(test)]
pub(crate) mod test_support {
  use std::io::Cursor;

  use crate::cursor::{Token, TokenSource, XmlCursor};

  pub type TestCursor = XmlCursor<Cursor<Vec<u8>>>;

  pub fn cursor(xml: &str) -> TestCursor {
    XmlCursor::new(Cursor::new(xml.as_bytes().to_vec()))
  }

  /// Cursor already positioned right after the first start tag, plus that tag.
  pub fn cursor_at_root(xml: &str) -> (TestCursor, crate::cursor::StartTag) {
    let mut c = cursor(xml);
    loop {
      match c.next_token().unwrap() {
        Token::Start(tag) => return (c, tag),
        Token::Eof => panic!("no start tag in fixture"),
        _ => {}
      }
    }
  }
}
