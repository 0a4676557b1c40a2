use crate::discography::{Artist, FileType, Label, Master, Release};

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("serialization error: {0}")]
  Serialize(String),

  #[error("storage error: {0}")]
  Storage(String),

  #[error("sink is closed")]
  Closed,
}

/// Bloque ya decodificado y filtrado de un único tipo de entidad.
#[derive(Debug, Clone, Copy)]
pub enum Batch<'a> {
  Artists(&'a [Artist]),
  Labels(&'a [Label]),
  Masters(&'a [Master]),
  Releases(&'a [Release]),
}

impl Batch<'_> {
  pub fn file_type(&self) -> FileType {
    match self {
      Batch::Artists(_) => FileType::Artists,
      Batch::Labels(_) => FileType::Labels,
      Batch::Masters(_) => FileType::Masters,
      Batch::Releases(_) => FileType::Releases,
    }
  }

  pub fn len(&self) -> usize {
    match self {
      Batch::Artists(items) => items.len(),
      Batch::Labels(items) => items.len(),
      Batch::Masters(items) => items.len(),
      Batch::Releases(items) => items.len(),
    }
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

/// Port de escritura de bloques.
///
/// Contrato que toda implementación (JSON, script SQL, base de datos) debe
/// cumplir:
///
/// - `write_batch` persiste el bloque entero o nada: si falla cualquier fila o
///   sub-registro, ninguna entidad del bloque queda visible.
/// - La fila padre se escribe siempre antes que sus sub-registros (imágenes,
///   alias, pistas, compañías…).
/// - `reset` y `close` son idempotentes; `close` es seguro aunque no se haya
///   escrito nada.
/// - Si la implementación excluye imágenes, lo hace al escribir, sin tocar las
///   entidades recibidas.
pub trait Sink {
  fn write_batch(&mut self, batch: Batch<'_>) -> Result<(), SinkError>;

  /// Prepara el destino para una ejecución nueva.
  fn reset(&mut self) -> Result<(), SinkError>;

  /// Libera el destino. Llamarlo varias veces no es un error.
  fn close(&mut self) -> Result<(), SinkError>;
}

impl<S: Sink + ?Sized> Sink for &mut S {
  fn write_batch(&mut self, batch: Batch<'_>) -> Result<(), SinkError> {
    (**self).write_batch(batch)
  }

  fn reset(&mut self) -> Result<(), SinkError> {
    (**self).reset()
  }

  fn close(&mut self) -> Result<(), SinkError> {
    (**self).close()
  }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
  fn write_batch(&mut self, batch: Batch<'_>) -> Result<(), SinkError> {
    (**self).write_batch(batch)
  }

  fn reset(&mut self) -> Result<(), SinkError> {
    (**self).reset()
  }

  fn close(&mut self) -> Result<(), SinkError> {
    (**self).close()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn batch_reports_kind_and_len() {
    let releases = vec![Release::default(), Release::default()];
    let batch = Batch::Releases(&releases);

    assert_eq!(batch.file_type(), FileType::Releases);
    assert_eq!(batch.len(), 2);
    assert!(Batch::Artists(&[]).is_empty());
  }
}
