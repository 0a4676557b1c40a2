// crates/platter-core/src/errors.rs
use thiserror::Error;

/// Error genérico del núcleo de Platter.
///
/// Cubre los valores de configuración que no se pueden interpretar; los errores
/// de lectura del dump y de escritura viven en sus propios crates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
  #[error("invalid quality level: {0}")]
  InvalidQuality(String),

  #[error("invalid file type: {0}")]
  InvalidFileType(String),
}
