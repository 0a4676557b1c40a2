mod dump;
mod io;

pub use dump::{DUMP_BUFFER_SIZE, guess_file_type, open_dump};
pub use io::{atomic_write, atomic_write_str};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FsError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("{path}: not a regular file")]
  NotAFile { path: String },

  #[error("{path}: compressed dumps are not supported, decompress it first")]
  Compressed { path: String },
}
