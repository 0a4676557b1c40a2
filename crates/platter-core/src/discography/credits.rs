use serde::{Deserialize, Serialize};

use crate::discography::ids::{ArtistId, LabelId};

/// Referencia `id` + nombre a otro artista.
///
/// Se usa para alias, miembros y grupos. El `id` apunta a otro registro
/// `Artist` pero nunca se resuelve: es una cadena opaca.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistRef {
  pub id: ArtistId,
  pub name: String,
}

/// Referencia `id` + nombre entre sellos (sello padre o sub-sello).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRef {
  pub id: LabelId,
  pub name: String,
}

/// Crédito de un artista en un master o un release.
///
/// La misma forma sirve para `artists` (intérpretes) y `extraartists`
/// (créditos adicionales); solo cambia la lista en la que aparece.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseArtist {
  pub id: ArtistId,
  pub name: String,
  /// Variación del nombre usada en este crédito (*artist name variation*).
  pub anv: String,
  /// Texto que une este artista con el siguiente (`"&"`, `"feat."`, …).
  pub join: String,
  pub role: String,
  /// Pistas a las que se limita el crédito, en texto libre.
  pub tracks: String,
}

/// Sello que publica un release, con su número de catálogo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseLabel {
  pub id: LabelId,
  pub name: String,
  /// Número de catálogo (`catno`).
  pub category: String,
}

/// Compañía que participó en un release (estudio, prensado, distribución…).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
  pub id: LabelId,
  pub name: String,
  /// Número de catálogo (`catno`).
  pub category: String,
  pub entity_type: String,
  pub entity_type_name: String,
  pub resource_url: String,
}
