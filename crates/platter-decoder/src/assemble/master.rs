use platter_core::discography::Master;

use super::{Assemble, expect_tag, shared};
use crate::cursor::{StartTag, TokenSource};
use crate::error::DecodeError;
use crate::extract::{extract_child_list, extract_text, for_each_child, parse_number, skip_element};

#[derive(Clone, Copy)]
enum MasterField {
  MainRelease,
  Images,
  Artists,
  Genres,
  Styles,
  Year,
  Title,
  DataQuality,
  Videos,
}

impl MasterField {
  fn from_name(name: &str) -> Option<Self> {
    let field = match name {
      "main_release" => MasterField::MainRelease,
      "images" => MasterField::Images,
      "artists" => MasterField::Artists,
      "genres" => MasterField::Genres,
      "styles" => MasterField::Styles,
      "year" => MasterField::Year,
      "title" => MasterField::Title,
      "data_quality" => MasterField::DataQuality,
      "videos" => MasterField::Videos,
      _ => return None,
    };
    Some(field)
  }
}

impl Assemble for Master {
  fn assemble<S: TokenSource + ?Sized>(cursor: &mut S, start: &StartTag) -> Result<Self, DecodeError> {
    expect_tag::<Master>(start)?;
    let mut master = Master { id: start.attr_or_default("id").into(), ..Default::default() };

    for_each_child(cursor, "master", |cursor, tag| {
      let Some(field) = MasterField::from_name(&tag.name) else {
        return skip_element(cursor, &tag.name);
      };

      match field {
        MasterField::MainRelease => master.main_release = extract_text(cursor, "main_release")?.into(),
        MasterField::Images => master.images = shared::images(cursor)?,
        MasterField::Artists => master.artists = shared::release_artists(cursor, "artists")?,
        MasterField::Genres => master.genres = extract_child_list(cursor, "genres", "genre")?,
        MasterField::Styles => master.styles = extract_child_list(cursor, "styles", "style")?,
        MasterField::Year => master.year = parse_number(&extract_text(cursor, "year")?, "master.year"),
        MasterField::Title => master.title = extract_text(cursor, "title")?,
        MasterField::DataQuality => master.data_quality = extract_text(cursor, "data_quality")?,
        MasterField::Videos => master.videos = shared::videos(cursor)?,
      }
      Ok(())
    })?;

    Ok(master)
  }
}
