use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use platter_core::FileType;
use tracing::debug;

use crate::FsError;

/// Los dumps pesan varios GB; un buffer grande reduce las llamadas a `read`.
pub const DUMP_BUFFER_SIZE: usize = 1 << 20;

/// Abre un dump XML para lectura secuencial.
///
/// Los dumps se publican como `.xml.gz`; aquí solo se aceptan ya descomprimidos.
pub fn open_dump(path: &Path) -> Result<BufReader<File>, FsError> {
  if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("gz")) {
    return Err(FsError::Compressed { path: path.display().to_string() });
  }

  let meta = std::fs::metadata(path)?;
  if !meta.is_file() {
    return Err(FsError::NotAFile { path: path.display().to_string() });
  }

  debug!(path = %path.display(), bytes = meta.len(), "opening dump");
  let file = File::open(path)?;
  Ok(BufReader::with_capacity(DUMP_BUFFER_SIZE, file))
}

/// Tipo de dump según el nombre del fichero (`discogs_20240101_labels.xml`).
pub fn guess_file_type(path: &Path) -> Option<FileType> {
  let name = path.file_name()?.to_str()?;
  FileType::from_file_name(name)
}
