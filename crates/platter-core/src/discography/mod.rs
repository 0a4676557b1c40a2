pub mod artist;
pub mod credits;
pub mod file_type;
pub mod ids;
pub mod label;
pub mod master;
pub mod media;
pub mod quality;
pub mod release;

pub use artist::Artist;
pub use credits::{ArtistRef, Company, LabelRef, ReleaseArtist, ReleaseLabel};
pub use file_type::FileType;
pub use ids::{ArtistId, LabelId, MasterId, ReleaseId};
pub use label::Label;
pub use master::Master;
pub use media::{Image, ImageType, Video};
pub use quality::QualityLevel;
pub use release::{Format, Identifier, Release, Track};

use crate::ports::Batch;

/// Comportamiento común de las cuatro entidades de primer nivel.
pub trait CatalogEntity: Sized {
  /// Tipo de dump que contiene esta entidad.
  const FILE_TYPE: FileType;

  /// Identificador en forma de texto.
  fn id(&self) -> &str;

  /// Texto crudo de `<data_quality>`.
  fn data_quality(&self) -> &str;

  /// Imágenes de la entidad.
  fn images(&self) -> &[Image];

  /// Acceso mutable a las imágenes, para las salidas que las omiten.
  fn images_mut(&mut self) -> &mut Vec<Image>;

  /// Envuelve un bloque de entidades para entregarlo a un [`crate::Sink`].
  fn batch(items: &[Self]) -> Batch<'_>;

  /// Nivel ordinal de calidad de la entidad.
  fn quality_level(&self) -> QualityLevel {
    QualityLevel::from_data_quality(self.data_quality())
  }
}

/// Quita del bloque las entidades por debajo del umbral, conservando el orden.
///
/// Devuelve cuántas entidades se descartaron.
pub fn retain_quality<T: CatalogEntity>(items: &mut Vec<T>, threshold: QualityLevel) -> usize {
  if threshold == QualityLevel::All {
    return 0;
  }

  let before = items.len();
  items.retain(|item| item.quality_level().meets(threshold));
  before - items.len()
}

macro_rules! catalog_entity {
  ($ty:ty, $file_type:expr, $variant:ident) => {
    impl CatalogEntity for $ty {
      const FILE_TYPE: FileType = $file_type;

      fn id(&self) -> &str {
        self.id.as_str()
      }

      fn data_quality(&self) -> &str {
        &self.data_quality
      }

      fn images(&self) -> &[Image] {
        &self.images
      }

      fn images_mut(&mut self) -> &mut Vec<Image> {
        &mut self.images
      }

      fn batch(items: &[Self]) -> Batch<'_> {
        Batch::$variant(items)
      }
    }
  };
}

catalog_entity!(Artist, FileType::Artists, Artists);
catalog_entity!(Label, FileType::Labels, Labels);
catalog_entity!(Master, FileType::Masters, Masters);
catalog_entity!(Release, FileType::Releases, Releases);

#[cfg(test)]
mod tests {
  use super::*;

  fn artist(id: &str, quality: &str) -> Artist {
    Artist { id: ArtistId::new(id), data_quality: quality.to_string(), ..Default::default() }
  }

  fn ids(items: &[Artist]) -> Vec<&str> {
    items.iter().map(|a| a.id()).collect()
  }

  #[test]
  fn all_threshold_keeps_everything() {
    let mut items = vec![artist("1", ""), artist("2", "Entirely Incorrect"), artist("3", "garbage")];
    assert_eq!(retain_quality(&mut items, QualityLevel::All), 0);
    assert_eq!(items.len(), 3);
  }

  #[test]
  fn correct_threshold_keeps_correct_and_above_in_order() {
    let mut items = vec![
      artist("1", "Complete and Correct"),
      artist("2", "Needs Vote"),
      artist("3", "Correct"),
      artist("4", ""),
      artist("5", "Needs Minor Changes"),
    ];

    assert_eq!(retain_quality(&mut items, QualityLevel::Correct), 3);
    assert_eq!(ids(&items), vec!["1", "3"]);
  }

  #[test]
  fn complete_and_correct_threshold_keeps_only_that_level() {
    let mut items = vec![artist("1", "Correct"), artist("2", "Complete and Correct")];
    retain_quality(&mut items, QualityLevel::CompleteAndCorrect);
    assert_eq!(ids(&items), vec!["2"]);
  }

  #[test]
  fn every_threshold_matches_ordinal_comparison() {
    let levels = [
      "",
      "Entirely Incorrect",
      "Needs Vote",
      "Needs Major Changes",
      "Needs Minor Changes",
      "Correct",
      "Complete and Correct",
    ];

    for threshold in QualityLevel::ALL_LEVELS {
      let mut items: Vec<Artist> =
        levels.iter().enumerate().map(|(i, q)| artist(&i.to_string(), q)).collect();
      retain_quality(&mut items, threshold);

      for item in &items {
        assert!(item.quality_level() >= threshold);
      }
      let expected = levels.iter().filter(|q| QualityLevel::from_data_quality(q) >= threshold).count();
      assert_eq!(items.len(), expected, "threshold {threshold:?}");
    }
  }
}
