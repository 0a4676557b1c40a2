use platter_core::discography::Label;

use super::{Assemble, expect_tag, shared};
use crate::cursor::{StartTag, TokenSource};
use crate::error::DecodeError;
use crate::extract::{extract_child_list, extract_text, for_each_child, skip_element};

#[derive(Clone, Copy)]
enum LabelField {
  Id,
  Name,
  ContactInfo,
  Profile,
  DataQuality,
  Urls,
  Images,
  ParentLabel,
  SubLabels,
}

impl LabelField {
  fn from_name(name: &str) -> Option<Self> {
    let field = match name {
      "id" => LabelField::Id,
      "name" => LabelField::Name,
      "contactinfo" => LabelField::ContactInfo,
      "profile" => LabelField::Profile,
      "data_quality" => LabelField::DataQuality,
      "urls" => LabelField::Urls,
      "images" => LabelField::Images,
      "parentLabel" => LabelField::ParentLabel,
      "sublabels" => LabelField::SubLabels,
      _ => return None,
    };
    Some(field)
  }
}

impl Assemble for Label {
  fn assemble<S: TokenSource + ?Sized>(cursor: &mut S, start: &StartTag) -> Result<Self, DecodeError> {
    expect_tag::<Label>(start)?;
    let mut label = Label::default();

    for_each_child(cursor, "label", |cursor, tag| {
      let Some(field) = LabelField::from_name(&tag.name) else {
        return skip_element(cursor, &tag.name);
      };

      match field {
        LabelField::Id => label.id = extract_text(cursor, "id")?.into(),
        LabelField::Name => label.name = extract_text(cursor, "name")?,
        LabelField::ContactInfo => label.contact_info = extract_text(cursor, "contactinfo")?,
        LabelField::Profile => label.profile = extract_text(cursor, "profile")?,
        LabelField::DataQuality => label.data_quality = extract_text(cursor, "data_quality")?,
        LabelField::Urls => label.urls = extract_child_list(cursor, "urls", "url")?,
        LabelField::Images => label.images = shared::images(cursor)?,
        LabelField::ParentLabel => label.parent_label = Some(shared::label_ref(cursor, &tag)?),
        LabelField::SubLabels => {
          for_each_child(cursor, "sublabels", |cursor, child| {
            if child.name == "label" {
              label.sub_labels.push(shared::label_ref(cursor, &child)?);
              Ok(())
            } else {
              skip_element(cursor, &child.name)
            }
          })?;
        }
      }
      Ok(())
    })?;

    Ok(label)
  }
}
