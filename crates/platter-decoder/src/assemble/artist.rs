use platter_core::discography::Artist;

use super::{Assemble, expect_tag, shared};
use crate::cursor::{StartTag, TokenSource};
use crate::error::DecodeError;
use crate::extract::{extract_child_list, extract_text, for_each_child, skip_element};

#[derive(Clone, Copy)]
enum ArtistField {
  Id,
  Name,
  RealName,
  Profile,
  DataQuality,
  NameVariations,
  Urls,
  Images,
  Aliases,
  Members,
  Groups,
}

impl ArtistField {
  fn from_name(name: &str) -> Option<Self> {
    let field = match name {
      "id" => ArtistField::Id,
      "name" => ArtistField::Name,
      "realname" => ArtistField::RealName,
      "profile" => ArtistField::Profile,
      "data_quality" => ArtistField::DataQuality,
      "namevariations" => ArtistField::NameVariations,
      "urls" => ArtistField::Urls,
      "images" => ArtistField::Images,
      "aliases" => ArtistField::Aliases,
      "members" => ArtistField::Members,
      "groups" => ArtistField::Groups,
      _ => return None,
    };
    Some(field)
  }
}

impl Assemble for Artist {
  fn assemble<S: TokenSource + ?Sized>(cursor: &mut S, start: &StartTag) -> Result<Self, DecodeError> {
    expect_tag::<Artist>(start)?;
    let mut artist = Artist::default();

    for_each_child(cursor, "artist", |cursor, tag| {
      let Some(field) = ArtistField::from_name(&tag.name) else {
        return skip_element(cursor, &tag.name);
      };

      match field {
        ArtistField::Id => artist.id = extract_text(cursor, "id")?.into(),
        ArtistField::Name => artist.name = extract_text(cursor, "name")?,
        ArtistField::RealName => artist.real_name = extract_text(cursor, "realname")?,
        ArtistField::Profile => artist.profile = extract_text(cursor, "profile")?,
        ArtistField::DataQuality => artist.data_quality = extract_text(cursor, "data_quality")?,
        ArtistField::NameVariations => {
          artist.name_variations = extract_child_list(cursor, "namevariations", "name")?
        }
        ArtistField::Urls => artist.urls = extract_child_list(cursor, "urls", "url")?,
        ArtistField::Images => artist.images = shared::images(cursor)?,
        ArtistField::Aliases => artist.aliases = shared::artist_refs(cursor, "aliases")?,
        ArtistField::Members => artist.members = shared::artist_refs(cursor, "members")?,
        ArtistField::Groups => artist.groups = shared::artist_refs(cursor, "groups")?,
      }
      Ok(())
    })?;

    Ok(artist)
  }
}
