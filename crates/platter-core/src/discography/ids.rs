use serde::{Deserialize, Serialize};
use std::fmt;

/// Declara un identificador opaco del catálogo.
///
/// Los dumps usan identificadores numéricos en forma de texto, pero el núcleo
/// nunca los interpreta: solo los compara y los copia. Por eso se guardan tal
/// cual llegan, incluida la cadena vacía cuando el elemento falta.
macro_rules! catalog_id {
  ($(#[$meta:meta])* $name:ident) => {
    $(#[$meta])*
    #[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct $name(String);

    impl $name {
      /// Construye el identificador a partir del texto del dump.
      pub fn new(value: impl Into<String>) -> Self {
        $name(value.into())
      }

      /// Devuelve el texto interno.
      pub fn as_str(&self) -> &str {
        &self.0
      }

      /// `true` si el dump no traía valor.
      pub fn is_empty(&self) -> bool {
        self.0.is_empty()
      }
    }

    impl From<String> for $name {
      fn from(value: String) -> Self {
        $name(value)
      }
    }

    impl From<&str> for $name {
      fn from(value: &str) -> Self {
        $name(value.to_string())
      }
    }

    impl From<$name> for String {
      fn from(id: $name) -> Self {
        id.0
      }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
      }
    }
  };
}

catalog_id!(
  /// Identificador de un artista (`<artist><id>`).
  ArtistId
);

catalog_id!(
  /// Identificador de un sello. También lo usan las compañías de un release.
  LabelId
);

catalog_id!(
  /// Identificador de un master.
  MasterId
);

catalog_id!(
  /// Identificador de un release (`<release id="…">`).
  ReleaseId
);

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn ids_serialize_as_plain_strings() {
    let id = ArtistId::new("239");
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"239\"");

    let back: ArtistId = serde_json::from_str("\"239\"").unwrap();
    assert_eq!(back, id);
    assert_eq!(back.to_string(), "239");
  }

  #[test]
  fn default_id_is_empty() {
    assert!(ReleaseId::default().is_empty());
    assert!(!MasterId::from("18500").is_empty());
  }
}
