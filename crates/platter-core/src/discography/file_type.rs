use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Tipo de dump: decide qué ensamblador usa el decodificador.
///
/// Cada dump tiene un elemento raíz en plural (`<artists>`) que envuelve
/// elementos en singular (`<artist>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
  Artists,
  Labels,
  Masters,
  Releases,
}

impl FileType {
  pub const ALL: [FileType; 4] = [FileType::Artists, FileType::Labels, FileType::Masters, FileType::Releases];

  /// Nombre del elemento raíz del dump.
  pub fn root_element(self) -> &'static str {
    match self {
      FileType::Artists => "artists",
      FileType::Labels => "labels",
      FileType::Masters => "masters",
      FileType::Releases => "releases",
    }
  }

  /// Nombre de cada entidad de primer nivel.
  pub fn entity_element(self) -> &'static str {
    match self {
      FileType::Artists => "artist",
      FileType::Labels => "label",
      FileType::Masters => "master",
      FileType::Releases => "release",
    }
  }

  /// Reconoce el tipo a partir del elemento raíz del documento.
  pub fn from_root_element(name: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|t| t.root_element() == name)
  }

  /// Adivina el tipo a partir del nombre del fichero
  /// (`discogs_20240101_releases.xml` → `Releases`).
  pub fn from_file_name(file_name: &str) -> Option<Self> {
    let lower = file_name.to_lowercase();
    Self::ALL.into_iter().find(|t| lower.contains(t.root_element()))
  }
}

impl FromStr for FileType {
  type Err = CoreError;

  /// Acepta singular y plural, sin distinguir mayúsculas.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let normalized = s.trim().to_lowercase();

    Self::ALL
      .into_iter()
      .find(|t| t.root_element() == normalized || t.entity_element() == normalized)
      .ok_or_else(|| CoreError::InvalidFileType(s.to_string()))
  }
}

impl fmt::Display for FileType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.root_element())
  }
}
