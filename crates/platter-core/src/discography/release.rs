use serde::{Deserialize, Serialize};

use crate::discography::credits::{Company, ReleaseArtist, ReleaseLabel};
use crate::discography::ids::{MasterId, ReleaseId};
use crate::discography::media::{Image, Video};

/// Representa un lanzamiento concreto (una edición publicada).
///
/// Es la entidad más grande del catálogo: además de la información editorial
/// lleva el tracklist, los formatos físicos, los identificadores impresos
/// (códigos de barras, matrices…) y las compañías involucradas.
///
/// `artists` y `extra_artists` tienen la misma forma pero roles distintos y
/// se rellenan de forma independiente.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
  pub id: ReleaseId,

  /// Estado editorial (`Accepted`, `Draft`, …).
  pub status: String,

  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub images: Vec<Image>,

  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub artists: Vec<ReleaseArtist>,

  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub extra_artists: Vec<ReleaseArtist>,

  pub title: String,

  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub formats: Vec<Format>,

  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub genres: Vec<String>,

  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub styles: Vec<String>,

  pub country: String,

  /// Fecha de publicación tal cual viene (`"1999-03-00"`, `"1999"`, …).
  pub released: String,

  pub notes: String,
  pub data_quality: String,

  /// Master al que pertenece, si lo hay.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub master_id: Option<MasterId>,

  /// `true` si este release es la edición principal de su master.
  pub is_main_release: bool,

  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub tracklist: Vec<Track>,

  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub identifiers: Vec<Identifier>,

  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub videos: Vec<Video>,

  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub labels: Vec<ReleaseLabel>,

  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub companies: Vec<Company>,
}

/// Pista del tracklist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
  /// Posición impresa (`"A1"`, `"2-03"`, …).
  pub position: String,
  pub title: String,
  /// Duración impresa (`"4:45"`); vacía si no se conoce.
  pub duration: String,
}

/// Identificador impreso en el soporte: código de barras, matriz, ISRC…
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
  pub description: String,
  #[serde(rename = "type")]
  pub kind: String,
  pub value: String,
}

/// Formato físico o digital (`Vinyl`, `CD`, `File`…).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Format {
  pub name: String,
  /// Número de unidades (`qty`).
  pub quantity: u32,
  pub text: String,
  /// Descriptores: `12"`, `33 ⅓ RPM`, `Album`…
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub descriptions: Vec<String>,
}
