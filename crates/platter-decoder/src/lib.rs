//! Streaming decoder for discography XML dumps.
//!
//! The layers, bottom up:
//!
//! - [`cursor`]: forward-only [`Token`]s over quick-xml.
//! - [`extract`]: text, child lists and subtree skipping.
//! - [`assemble`]: one [`Assemble`] impl per catalog entity.
//! - [`block`]: the [`Decoder`], which pages entities in blocks, filters them
//!   by quality and feeds a [`platter_core::Sink`].

pub mod assemble;
pub mod block;
pub mod cursor;
pub mod error;
pub mod extract;
pub mod options;

pub use assemble::Assemble;
pub use block::{DecodeStats, Decoder};
pub use cursor::{StartTag, Token, TokenSource, XmlCursor};
pub use error::DecodeError;
pub use options::{BlockOptions, DEFAULT_ITEM_SIZE, Options};
