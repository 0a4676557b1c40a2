//! One assembler per catalog entity.
//!
//! Every assembler receives the cursor right after the entity's start tag
//! together with that tag, and consumes tokens up to the matching end tag.
//! Child elements are dispatched through a field enum resolved once per start
//! tag; names the assembler does not know are skipped whole.

mod artist;
mod label;
mod master;
mod release;
mod shared;

use platter_core::CatalogEntity;

use crate::cursor::{StartTag, TokenSource};
use crate::error::DecodeError;

pub use shared::{artist_refs, images, label_ref, release_artists, videos};

/// Builds one top-level entity from the token stream.
pub trait Assemble: CatalogEntity {
  fn assemble<S: TokenSource + ?Sized>(cursor: &mut S, start: &StartTag) -> Result<Self, DecodeError>;
}

/// Fails with a structural mismatch unless `start` is the entity's own tag.
pub(crate) fn expect_tag<T: CatalogEntity>(start: &StartTag) -> Result<(), DecodeError> {
  let expected = T::FILE_TYPE.entity_element();
  if start.name == expected {
    Ok(())
  } else {
    Err(DecodeError::Mismatch { expected, found: start.name.clone() })
  }
}
