use platter_core::discography::{ArtistRef, Image, LabelRef, ReleaseArtist, Video};

use crate::cursor::{StartTag, TokenSource};
use crate::error::DecodeError;
use crate::extract::{extract_text, for_each_child, parse_flag, parse_number, skip_element};

/// `<images><image …/>…</images>`; every value comes from attributes.
pub fn images<S: TokenSource + ?Sized>(cursor: &mut S) -> Result<Vec<Image>, DecodeError> {
  let mut out = Vec::new();

  for_each_child(cursor, "images", |cursor, tag| {
    if tag.name == "image" {
      out.push(image(&tag));
    }
    skip_element(cursor, &tag.name)
  })?;

  Ok(out)
}

fn image(tag: &StartTag) -> Image {
  Image {
    height: parse_number(tag.attr("height").unwrap_or_default(), "image.height"),
    width: parse_number(tag.attr("width").unwrap_or_default(), "image.width"),
    image_type: tag.attr("type").unwrap_or_default().parse().unwrap_or_default(),
    uri: tag.attr_or_default("uri"),
    uri150: tag.attr_or_default("uri150"),
  }
}

/// `<videos><video duration embed src><title/><description/></video>…</videos>`.
pub fn videos<S: TokenSource + ?Sized>(cursor: &mut S) -> Result<Vec<Video>, DecodeError> {
  let mut out = Vec::new();

  for_each_child(cursor, "videos", |cursor, tag| {
    if tag.name != "video" {
      return skip_element(cursor, &tag.name);
    }

    let mut video = Video {
      duration: parse_number(tag.attr("duration").unwrap_or_default(), "video.duration"),
      embed: parse_flag(tag.attr("embed").unwrap_or_default()),
      src: tag.attr_or_default("src"),
      ..Default::default()
    };

    for_each_child(cursor, "video", |cursor, child| match child.name.as_str() {
      "title" => {
        video.title = extract_text(cursor, "title")?;
        Ok(())
      }
      "description" => {
        video.description = extract_text(cursor, "description")?;
        Ok(())
      }
      _ => skip_element(cursor, &child.name),
    })?;

    out.push(video);
    Ok(())
  })?;

  Ok(out)
}

#[derive(Clone, Copy)]
enum CreditField {
  Id,
  Name,
  Anv,
  Join,
  Role,
  Tracks,
}

impl CreditField {
  fn from_name(name: &str) -> Option<Self> {
    let field = match name {
      "id" => CreditField::Id,
      "name" => CreditField::Name,
      "anv" => CreditField::Anv,
      "join" => CreditField::Join,
      "role" => CreditField::Role,
      "tracks" => CreditField::Tracks,
      _ => return None,
    };
    Some(field)
  }
}

/// `<artists>` or `<extraartists>`: a list of `<artist>` credits.
pub fn release_artists<S: TokenSource + ?Sized>(
  cursor: &mut S,
  wrapper: &str,
) -> Result<Vec<ReleaseArtist>, DecodeError> {
  let mut out = Vec::new();

  for_each_child(cursor, wrapper, |cursor, tag| {
    if tag.name != "artist" {
      return skip_element(cursor, &tag.name);
    }

    let mut credit = ReleaseArtist::default();
    for_each_child(cursor, "artist", |cursor, child| {
      let Some(field) = CreditField::from_name(&child.name) else {
        return skip_element(cursor, &child.name);
      };

      let text = extract_text(cursor, &child.name)?;
      match field {
        CreditField::Id => credit.id = text.into(),
        CreditField::Name => credit.name = text,
        CreditField::Anv => credit.anv = text,
        CreditField::Join => credit.join = text,
        CreditField::Role => credit.role = text,
        CreditField::Tracks => credit.tracks = text,
      }
      Ok(())
    })?;

    out.push(credit);
    Ok(())
  })?;

  Ok(out)
}

/// `<aliases>`, `<members>`, `<groups>`: `<name id="…">text</name>` entries.
///
/// Members wrappers also carry bare `<id>` children; only `<name>` counts.
pub fn artist_refs<S: TokenSource + ?Sized>(cursor: &mut S, wrapper: &str) -> Result<Vec<ArtistRef>, DecodeError> {
  let mut out = Vec::new();

  for_each_child(cursor, wrapper, |cursor, tag| {
    if tag.name != "name" {
      return skip_element(cursor, &tag.name);
    }

    let name = extract_text(cursor, "name")?;
    out.push(ArtistRef { id: tag.attr_or_default("id").into(), name });
    Ok(())
  })?;

  Ok(out)
}

/// Mixed attribute + text element: `<parentLabel id="…">Name</parentLabel>`
/// or a `<label id="…">Name</label>` inside `<sublabels>`.
pub fn label_ref<S: TokenSource + ?Sized>(cursor: &mut S, tag: &StartTag) -> Result<LabelRef, DecodeError> {
  let name = extract_text(cursor, &tag.name)?;
  Ok(LabelRef { id: tag.attr_or_default("id").into(), name })
}
