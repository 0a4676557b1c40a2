use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Escribe `contents` en un fichero temporal hermano y lo renombra encima de
/// `path`, de modo que un lector nunca ve el fichero a medias.
///
/// Crea el directorio padre si aún no existe.
pub fn atomic_write(path: &Path, contents: &[u8]) -> io::Result<()> {
  if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
    fs::create_dir_all(parent)?;
  }

  let tmp_path = path.with_extension("tmp");

  {
    let mut tmp_file = fs::File::create(&tmp_path)?;
    tmp_file.write_all(contents)?;
    tmp_file.sync_all()?;
  }

  fs::rename(&tmp_path, path)
}

pub fn atomic_write_str(path: &Path, contents: &str) -> io::Result<()> {
  atomic_write(path, contents.as_bytes())
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  #[test]
  fn replaces_existing_file_and_leaves_no_tmp() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("platter.toml");
    fs::write(&path, "old").unwrap();

    atomic_write_str(&path, "[decoder]\n").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "[decoder]\n");
    assert!(!path.with_extension("tmp").exists());
  }

  #[test]
  fn creates_missing_parent() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("out.json");

    atomic_write(&path, b"[]").unwrap();
    assert_eq!(fs::read(&path).unwrap(), b"[]");
  }
}
