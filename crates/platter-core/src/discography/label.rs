use serde::{Deserialize, Serialize};

use crate::discography::credits::LabelRef;
use crate::discography::ids::LabelId;
use crate::discography::media::Image;

/// Sello discográfico del dump `labels`.
///
/// Un sello tiene como mucho un sello padre y cualquier número de sub-sellos,
/// en el orden en que aparecen en el documento. Un sello sin sub-sellos tiene
/// `sub_labels` vacío, nunca ausente.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
  pub id: LabelId,
  pub name: String,

  /// Datos de contacto en texto libre (`<contactinfo>`).
  pub contact_info: String,

  pub profile: String,
  pub data_quality: String,

  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub urls: Vec<String>,

  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub images: Vec<Image>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub parent_label: Option<LabelRef>,

  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub sub_labels: Vec<LabelRef>,
}
