use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Nivel de calidad de una entrada del catálogo.
///
/// Los dumps lo publican en `<data_quality>` como texto libre
/// (`"Needs Vote"`, `"Complete and Correct"`, …). El orden de las variantes es
/// el orden ordinal usado por el filtro: una entidad pasa si su nivel es mayor o
/// igual que el umbral configurado.
///
/// [`QualityLevel::All`] es a la vez el umbral "sin filtro" y el nivel que se
/// asigna a los textos vacíos o desconocidos.
///
/// Al deserializar (configuración) se aplican las mismas reglas que en
/// [`FromStr`], así que `"Complete and Correct"` vale igual que
/// `"CompleteAndCorrect"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum QualityLevel {
  #[default]
  All,
  EntirelyIncorrect,
  NeedsVote,
  NeedsMajorChanges,
  NeedsMinorChanges,
  Correct,
  CompleteAndCorrect,
}

impl QualityLevel {
  /// Todos los niveles, de menor a mayor.
  pub const ALL_LEVELS: [QualityLevel; 7] = [
    QualityLevel::All,
    QualityLevel::EntirelyIncorrect,
    QualityLevel::NeedsVote,
    QualityLevel::NeedsMajorChanges,
    QualityLevel::NeedsMinorChanges,
    QualityLevel::Correct,
    QualityLevel::CompleteAndCorrect,
  ];

  /// Traduce el texto de `<data_quality>` a su nivel ordinal.
  ///
  /// Nunca falla: lo que no se reconoce cae en [`QualityLevel::All`].
  pub fn from_data_quality(s: &str) -> Self {
    lookup(s).unwrap_or_default()
  }

  /// `true` si este nivel alcanza el umbral dado.
  pub fn meets(self, threshold: QualityLevel) -> bool {
    self >= threshold
  }

  /// Texto tal y como aparece en los dumps.
  pub fn as_dump_str(self) -> &'static str {
    match self {
      QualityLevel::All => "All",
      QualityLevel::EntirelyIncorrect => "Entirely Incorrect",
      QualityLevel::NeedsVote => "Needs Vote",
      QualityLevel::NeedsMajorChanges => "Needs Major Changes",
      QualityLevel::NeedsMinorChanges => "Needs Minor Changes",
      QualityLevel::Correct => "Correct",
      QualityLevel::CompleteAndCorrect => "Complete and Correct",
    }
  }
}

fn lookup(s: &str) -> Option<QualityLevel> {
  let normalized = s.trim().to_lowercase().replace([' ', '-', '_'], "");

  let level = match normalized.as_str() {
    "all" => QualityLevel::All,
    "entirelyincorrect" | "entirelyincorrectedit" => QualityLevel::EntirelyIncorrect,
    "needsvote" => QualityLevel::NeedsVote,
    "needsmajorchanges" => QualityLevel::NeedsMajorChanges,
    "needsminorchanges" => QualityLevel::NeedsMinorChanges,
    "correct" => QualityLevel::Correct,
    "completeandcorrect" => QualityLevel::CompleteAndCorrect,
    _ => return None,
  };

  Some(level)
}

impl FromStr for QualityLevel {
  type Err = CoreError;

  /// Versión estricta para configuración y línea de comandos.
  ///
  /// Acepta tanto `"CompleteAndCorrect"` como `"Complete and Correct"`.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    lookup(s).ok_or_else(|| CoreError::InvalidQuality(s.to_string()))
  }
}

impl TryFrom<String> for QualityLevel {
  type Error = CoreError;

  fn try_from(s: String) -> Result<Self, Self::Error> {
    s.parse()
  }
}

impl fmt::Display for QualityLevel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_dump_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn dump_strings_map_to_levels() {
    assert_eq!(QualityLevel::from_data_quality("Needs Vote"), QualityLevel::NeedsVote);
    assert_eq!(QualityLevel::from_data_quality("Complete and Correct"), QualityLevel::CompleteAndCorrect);
    assert_eq!(QualityLevel::from_data_quality("Entirely Incorrect Edit"), QualityLevel::EntirelyIncorrect);
    assert_eq!(QualityLevel::from_data_quality(" correct "), QualityLevel::Correct);
  }

  #[test]
  fn unknown_and_empty_map_to_all() {
    assert_eq!(QualityLevel::from_data_quality(""), QualityLevel::All);
    assert_eq!(QualityLevel::from_data_quality("Pretty Good"), QualityLevel::All);
  }

  #[test]
  fn strict_parse_rejects_unknown() {
    assert_eq!("CompleteAndCorrect".parse::<QualityLevel>(), Ok(QualityLevel::CompleteAndCorrect));
    assert_eq!(
      "Pretty Good".parse::<QualityLevel>(),
      Err(CoreError::InvalidQuality("Pretty Good".to_string()))
    );
  }

  #[test]
  fn ordinal_order_drives_inclusion() {
    for threshold in QualityLevel::ALL_LEVELS {
      for level in QualityLevel::ALL_LEVELS {
        assert_eq!(level.meets(threshold), level >= threshold, "{level:?} vs {threshold:?}");
      }
      assert!(threshold.meets(QualityLevel::All));
    }

    assert!(QualityLevel::CompleteAndCorrect.meets(QualityLevel::Correct));
    assert!(!QualityLevel::NeedsVote.meets(QualityLevel::Correct));
  }

  #[test]
  fn deserializes_both_spellings() {
    let dump: QualityLevel = serde_json::from_str("\"Complete and Correct\"").unwrap();
    let config: QualityLevel = serde_json::from_str("\"CompleteAndCorrect\"").unwrap();
    assert_eq!(dump, QualityLevel::CompleteAndCorrect);
    assert_eq!(config, QualityLevel::CompleteAndCorrect);

    assert_eq!(serde_json::to_string(&QualityLevel::NeedsVote).unwrap(), "\"NeedsVote\"");
    assert!(serde_json::from_str::<QualityLevel>("\"Pretty Good\"").is_err());
  }

  #[test]
  fn display_round_trips_through_parse() {
    for level in QualityLevel::ALL_LEVELS {
      assert_eq!(level.to_string().parse::<QualityLevel>(), Ok(level));
    }
  }
}
