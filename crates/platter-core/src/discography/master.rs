use serde::{Deserialize, Serialize};

use crate::discography::credits::ReleaseArtist;
use crate::discography::ids::{MasterId, ReleaseId};
use crate::discography::media::{Image, Video};

/// Master: agrupa todas las ediciones de una misma obra.
///
/// `main_release` apunta al release que se considera la edición de referencia.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Master {
  pub id: MasterId,
  pub main_release: ReleaseId,

  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub images: Vec<Image>,

  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub artists: Vec<ReleaseArtist>,

  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub genres: Vec<String>,

  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub styles: Vec<String>,

  /// Año de publicación; `0` cuando el dump no lo trae.
  pub year: u32,

  pub title: String,
  pub data_quality: String,

  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub videos: Vec<Video>,
}
