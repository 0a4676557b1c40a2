use serde::{Deserialize, Serialize};

use crate::discography::credits::ArtistRef;
use crate::discography::ids::ArtistId;
use crate::discography::media::Image;

/// Artista tal como aparece en el dump `artists`.
///
/// Un artista puede ser una persona o un grupo; en el segundo caso `members`
/// lista a sus integrantes. Los alias y grupos apuntan a otros artistas por
/// `id`, sin resolverlos.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
  /// Identificador del artista en el catálogo.
  pub id: ArtistId,

  /// Nombre principal (canónico).
  pub name: String,

  /// Nombre real, si el artista usa un seudónimo.
  pub real_name: String,

  /// Texto biográfico libre.
  pub profile: String,

  /// Texto de `<data_quality>`, ver [`crate::QualityLevel`].
  pub data_quality: String,

  /// Variaciones conocidas del nombre.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub name_variations: Vec<String>,

  /// Enlaces: web oficial, redes, Wikipedia, etc.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub urls: Vec<String>,

  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub images: Vec<Image>,

  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub aliases: Vec<ArtistRef>,

  /// Integrantes, solo para grupos.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub members: Vec<ArtistRef>,

  /// Grupos de los que forma parte.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub groups: Vec<ArtistRef>,
}
