use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Imagen asociada a un artista, sello, master o release.
///
/// En el dump todos los datos llegan como atributos de `<image …/>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
  pub height: u32,
  pub width: u32,
  #[serde(rename = "type")]
  pub image_type: ImageType,
  pub uri: String,
  pub uri150: String,
}

/// Papel de la imagen dentro de la ficha.
///
/// Los dumps solo usan `primary` y `secondary`; cualquier otro valor se
/// conserva en [`ImageType::Other`] para no perder información.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ImageType {
  Primary,
  Secondary,
  Other(String),
}

impl Default for ImageType {
  fn default() -> Self {
    ImageType::Other(String::new())
  }
}

impl FromStr for ImageType {
  type Err = std::convert::Infallible;

  /// Parsear nunca falla.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let image_type = match s.trim().to_lowercase().as_str() {
      "primary" => ImageType::Primary,
      "secondary" => ImageType::Secondary,
      _ => ImageType::Other(s.to_string()),
    };

    Ok(image_type)
  }
}

impl ImageType {
  pub fn as_str(&self) -> &str {
    match self {
      ImageType::Primary => "primary",
      ImageType::Secondary => "secondary",
      ImageType::Other(s) => s,
    }
  }
}

impl fmt::Display for ImageType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl Serialize for ImageType {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.as_str())
  }
}

impl<'de> Deserialize<'de> for ImageType {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let raw = String::deserialize(deserializer)?;
    let Ok(image_type) = raw.parse::<ImageType>();
    Ok(image_type)
  }
}

/// Vídeo enlazado desde un master o un release.
///
/// `duration` está en segundos; `embed` indica si el proveedor permite
/// incrustarlo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
  pub duration: u32,
  pub embed: bool,
  pub src: String,
  pub title: String,
  pub description: String,
}
