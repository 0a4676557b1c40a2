mod args;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use platter_config::{CONFIG_BACKEND, ConfigBackend};
use platter_core::Sink;
use platter_decoder::{DecodeStats, Decoder, Options};
use platter_storage::{JsonSink, SqlScriptSink, SqliteSink, StorageConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::args::{Args, OutputFormat};

fn main() -> Result<()> {
  let args = Args::parse();
  init_tracing(args.verbose);

  let stats = run(&args)?;
  info!(
    blocks = stats.blocks,
    decoded = stats.decoded,
    kept = stats.kept,
    written = stats.written,
    skipped_blocks = stats.skipped_blocks,
    "done"
  );
  Ok(())
}

fn init_tracing(verbose: u8) {
  let default = match verbose {
    0 => "platter=info",
    1 => "platter=debug",
    _ => "platter=trace",
  };

  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
    .with_writer(io::stderr)
    .init();
}

/// Settings from platter.toml with the command line applied on top.
fn effective_config(args: &Args) -> Result<(Options, StorageConfig)> {
  let mut options: Options = CONFIG_BACKEND.load_section_with_default("decoder").context("reading [decoder]")?;
  let mut storage = StorageConfig::load().context("reading [storage]")?;

  if let Some(file_type) = args.file_type {
    options.file_type = Some(file_type);
  }
  if let Some(quality) = args.quality {
    options.quality_level = quality;
  }
  if let Some(size) = args.block_size {
    options.block.item_size = size;
  }
  if args.block_limit.is_some() {
    options.block.limit = args.block_limit;
  }
  if let Some(skip) = args.block_skip {
    options.block.skip = skip;
  }
  if args.exclude_images {
    storage.exclude_images = true;
  }
  if args.format == OutputFormat::Sqlite {
    if let Some(path) = &args.output {
      storage.db_path = Some(path.clone());
    }
  }

  Ok((options, storage))
}

fn run(args: &Args) -> Result<DecodeStats> {
  let (mut options, storage) = effective_config(args)?;

  if args.save_config {
    CONFIG_BACKEND.save_section("decoder", &options).context("saving [decoder]")?;
    storage.save().context("saving [storage]")?;
    info!(path = %CONFIG_BACKEND.paths().config_file().display(), "configuration saved");
  }

  if options.file_type.is_none() {
    options.file_type = platter_fs::guess_file_type(&args.input);
  }

  let mut decoder =
    Decoder::open(&args.input, options).with_context(|| format!("opening {}", args.input.display()))?;
  let mut sink = open_sink(args, &storage)?;

  if args.reset {
    sink.reset().context("resetting output")?;
  }

  let decoded = decoder.decode(&mut sink);
  let closed = sink.close();

  let stats = decoded.with_context(|| format!("decoding {}", args.input.display()))?;
  closed.context("closing output")?;
  Ok(stats)
}

fn open_sink(args: &Args, storage: &StorageConfig) -> Result<Box<dyn Sink>> {
  let sink: Box<dyn Sink> = match args.format {
    OutputFormat::Json => {
      let out = output_writer(args.output.as_deref())?;
      Box::new(JsonSink::new(out).with_exclude_images(storage.exclude_images))
    }
    OutputFormat::Sql => {
      let out = output_writer(args.output.as_deref())?;
      let mut sink = SqlScriptSink::new(out).with_exclude_images(storage.exclude_images);
      if args.with_schema {
        sink.write_schema()?;
      }
      Box::new(sink)
    }
    OutputFormat::Sqlite => Box::new(SqliteSink::open(storage).context("opening database")?),
  };
  Ok(sink)
}

fn output_writer(path: Option<&Path>) -> Result<Box<dyn Write>> {
  let out: Box<dyn Write> = match path {
    Some(path) => {
      let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
      Box::new(BufWriter::new(file))
    }
    None => Box::new(BufWriter::new(io::stdout().lock())),
  };
  Ok(out)
}
