use crate::paths::{ConfigError, PlatterPaths};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;

use toml_edit::{DocumentMut, Item};

pub trait ConfigBackend {
  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError>;
  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError>;
}

/// Secciones de `platter.toml`.
///
/// Lee con `toml` y escribe con `toml_edit`, de modo que los comentarios y
/// las secciones ajenas del fichero sobreviven a un guardado.
pub struct TomlConfigBackend {
  paths: PlatterPaths,
}

impl TomlConfigBackend {
  pub fn new(paths: PlatterPaths) -> Self {
    Self { paths }
  }

  pub fn paths(&self) -> &PlatterPaths {
    &self.paths
  }

  /// Como [`ConfigBackend::load_section`], pero un fichero o una sección
  /// ausentes devuelven `T::default()`.
  pub fn load_section_with_default<T>(&self, section: &str) -> Result<T, ConfigError>
  where
    T: DeserializeOwned + Default,
  {
    match self.load_section(section) {
      Ok(value) => Ok(value),
      Err(ConfigError::MissingSection(_)) => Ok(T::default()),
      Err(ConfigError::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(T::default()),
      Err(e) => Err(e),
    }
  }
}

impl ConfigBackend for TomlConfigBackend {
  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError> {
    let content = fs::read_to_string(self.paths.config_file())?;
    let toml_val: toml::Value = toml::from_str(&content)?;

    let table = toml_val.get(section).ok_or_else(|| ConfigError::MissingSection(section.to_string()))?;

    table.clone().try_into().map_err(|e| ConfigError::Other(format!("decode section [{section}]: {e}")))
  }

  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError> {
    let path = self.paths.config_file();

    let mut doc: DocumentMut = match fs::read_to_string(&path) {
      Ok(content) => {
        content.parse::<DocumentMut>().map_err(|e| ConfigError::Other(format!("parse {}: {e}", path.display())))?
      }
      Err(e) if e.kind() == ErrorKind::NotFound => DocumentMut::new(),
      Err(e) => return Err(e.into()),
    };

    // `toml` serializa la sección como tabla sin cabecera ("a = 1\nb = 2\n")
    let section_str =
      toml::to_string(value).map_err(|e| ConfigError::Other(format!("encode section [{section}]: {e}")))?;
    let section_item: Item = section_str
      .parse::<DocumentMut>()
      .map_err(|e| ConfigError::Other(format!("parse section [{section}]: {e}")))?
      .into_item();

    doc[section] = section_item;

    platter_fs::atomic_write_str(&path, &doc.to_string())?;
    Ok(())
  }
}
