use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use platter_core::{FileType, QualityLevel};

/// Decode a discography XML dump into JSON, an SQL script or a SQLite database.
#[derive(Debug, Parser)]
#[command(name = "platter", version = env!("CARGO_PKG_VERSION"), about)]
pub struct Args {
  /// XML dump to decode
  pub input: PathBuf,

  /// Entity type of the dump; guessed from the file name or the root element when omitted
  #[arg(long)]
  pub file_type: Option<FileType>,

  /// Output format
  #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
  pub format: OutputFormat,

  /// Output file (json, sql) or database (sqlite). Defaults to stdout, or to the configured database
  #[arg(short, long)]
  pub output: Option<PathBuf>,

  /// Minimum data quality to keep, e.g. "Correct" or "Complete and Correct"
  #[arg(short, long)]
  pub quality: Option<QualityLevel>,

  /// Entities per block
  #[arg(long)]
  pub block_size: Option<usize>,

  /// Stop after this many blocks, skipped ones included
  #[arg(long)]
  pub block_limit: Option<usize>,

  /// Decode but do not write the first N blocks
  #[arg(long)]
  pub block_skip: Option<usize>,

  /// Leave images out of the output
  #[arg(long)]
  pub exclude_images: bool,

  /// Prefix the SQL script with the table definitions
  #[arg(long)]
  pub with_schema: bool,

  /// Clear the output before decoding (empties every table for sqlite)
  #[arg(long)]
  pub reset: bool,

  /// Persist the effective [decoder] and [storage] settings to platter.toml
  #[arg(long)]
  pub save_config: bool,

  /// More logging (-v debug, -vv trace); RUST_LOG overrides it
  #[arg(short, long, action = ArgAction::Count)]
  pub verbose: u8,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
  Json,
  Sql,
  Sqlite,
}
