use platter_core::{FileType, QualityLevel};
use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// Entities per block when nothing else is configured.
pub const DEFAULT_ITEM_SIZE: usize = 1000;

/// Decoder settings, stored as the `[decoder]` config section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
  /// Minimum quality an entity needs to be kept. `All` disables filtering.
  pub quality_level: QualityLevel,
  /// Which entity [`crate::Decoder::decode`] drives. Detected from the root
  /// element when unset.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub file_type: Option<FileType>,
  pub block: BlockOptions,
}

/// Pagination of a block-driven run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockOptions {
  /// Entities decoded per block. Must be positive.
  pub item_size: usize,
  /// Maximum number of blocks read, skipped ones included. `None` reads to the end.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub limit: Option<usize>,
  /// Leading blocks decoded but not written.
  pub skip: usize,
}

impl Default for BlockOptions {
  fn default() -> Self {
    Self { item_size: DEFAULT_ITEM_SIZE, limit: None, skip: 0 }
  }
}

impl Options {
  pub fn validate(&self) -> Result<(), DecodeError> {
    if self.block.item_size == 0 {
      return Err(DecodeError::InvalidOptions("block.item_size must be greater than zero".to_string()));
    }
    if self.block.limit == Some(0) {
      return Err(DecodeError::InvalidOptions("block.limit must be greater than zero".to_string()));
    }
    Ok(())
  }
}
