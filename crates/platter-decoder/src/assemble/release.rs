use platter_core::discography::{Company, Format, Identifier, Release, ReleaseLabel, Track};

use super::{Assemble, expect_tag, shared};
use crate::cursor::{StartTag, TokenSource};
use crate::error::DecodeError;
use crate::extract::{extract_child_list, extract_text, for_each_child, parse_flag, parse_number, skip_element};

#[derive(Clone, Copy)]
enum ReleaseField {
  Images,
  Artists,
  ExtraArtists,
  Title,
  Labels,
  Formats,
  Genres,
  Styles,
  Country,
  Released,
  Notes,
  DataQuality,
  MasterId,
  Tracklist,
  Identifiers,
  Videos,
  Companies,
}

impl ReleaseField {
  fn from_name(name: &str) -> Option<Self> {
    let field = match name {
      "images" => ReleaseField::Images,
      "artists" => ReleaseField::Artists,
      "extraartists" => ReleaseField::ExtraArtists,
      "title" => ReleaseField::Title,
      "labels" => ReleaseField::Labels,
      "formats" => ReleaseField::Formats,
      "genres" => ReleaseField::Genres,
      "styles" => ReleaseField::Styles,
      "country" => ReleaseField::Country,
      "released" => ReleaseField::Released,
      "notes" => ReleaseField::Notes,
      "data_quality" => ReleaseField::DataQuality,
      "master_id" => ReleaseField::MasterId,
      "tracklist" => ReleaseField::Tracklist,
      "identifiers" => ReleaseField::Identifiers,
      "videos" => ReleaseField::Videos,
      "companies" => ReleaseField::Companies,
      _ => return None,
    };
    Some(field)
  }
}

impl Assemble for Release {
  fn assemble<S: TokenSource + ?Sized>(cursor: &mut S, start: &StartTag) -> Result<Self, DecodeError> {
    expect_tag::<Release>(start)?;
    let mut release = Release {
      id: start.attr_or_default("id").into(),
      status: start.attr_or_default("status"),
      ..Default::default()
    };

    for_each_child(cursor, "release", |cursor, tag| {
      let Some(field) = ReleaseField::from_name(&tag.name) else {
        return skip_element(cursor, &tag.name);
      };

      match field {
        ReleaseField::Images => release.images = shared::images(cursor)?,
        ReleaseField::Artists => release.artists = shared::release_artists(cursor, "artists")?,
        ReleaseField::ExtraArtists => release.extra_artists = shared::release_artists(cursor, "extraartists")?,
        ReleaseField::Title => release.title = extract_text(cursor, "title")?,
        ReleaseField::Labels => release.labels = labels(cursor)?,
        ReleaseField::Formats => release.formats = formats(cursor)?,
        ReleaseField::Genres => release.genres = extract_child_list(cursor, "genres", "genre")?,
        ReleaseField::Styles => release.styles = extract_child_list(cursor, "styles", "style")?,
        ReleaseField::Country => release.country = extract_text(cursor, "country")?,
        ReleaseField::Released => release.released = extract_text(cursor, "released")?,
        ReleaseField::Notes => release.notes = extract_text(cursor, "notes")?,
        ReleaseField::DataQuality => release.data_quality = extract_text(cursor, "data_quality")?,
        ReleaseField::MasterId => {
          release.is_main_release = parse_flag(tag.attr("is_main_release").unwrap_or_default());
          let id = extract_text(cursor, "master_id")?;
          let id = id.trim();
          release.master_id = (!id.is_empty()).then(|| id.into());
        }
        ReleaseField::Tracklist => release.tracklist = tracklist(cursor)?,
        ReleaseField::Identifiers => release.identifiers = identifiers(cursor)?,
        ReleaseField::Videos => release.videos = shared::videos(cursor)?,
        ReleaseField::Companies => release.companies = companies(cursor)?,
      }
      Ok(())
    })?;

    Ok(release)
  }
}

/// `<labels><label name catno id/>…</labels>`.
fn labels<S: TokenSource + ?Sized>(cursor: &mut S) -> Result<Vec<ReleaseLabel>, DecodeError> {
  let mut out = Vec::new();

  for_each_child(cursor, "labels", |cursor, tag| {
    if tag.name == "label" {
      out.push(ReleaseLabel {
        id: tag.attr_or_default("id").into(),
        name: tag.attr_or_default("name"),
        category: tag.attr_or_default("catno"),
      });
    }
    skip_element(cursor, &tag.name)
  })?;

  Ok(out)
}

/// `<formats><format name qty text><descriptions>…</descriptions></format>…</formats>`.
fn formats<S: TokenSource + ?Sized>(cursor: &mut S) -> Result<Vec<Format>, DecodeError> {
  let mut out = Vec::new();

  for_each_child(cursor, "formats", |cursor, tag| {
    if tag.name != "format" {
      return skip_element(cursor, &tag.name);
    }

    let mut format = Format {
      name: tag.attr_or_default("name"),
      quantity: parse_number(tag.attr("qty").unwrap_or_default(), "format.qty"),
      text: tag.attr_or_default("text"),
      descriptions: Vec::new(),
    };

    for_each_child(cursor, "format", |cursor, child| {
      if child.name == "descriptions" {
        format.descriptions = extract_child_list(cursor, "descriptions", "description")?;
        Ok(())
      } else {
        skip_element(cursor, &child.name)
      }
    })?;

    out.push(format);
    Ok(())
  })?;

  Ok(out)
}

/// `<tracklist><track><position/><title/><duration/></track>…</tracklist>`.
///
/// Per-track credits and sub-tracks are not part of [`Track`] and are skipped.
fn tracklist<S: TokenSource + ?Sized>(cursor: &mut S) -> Result<Vec<Track>, DecodeError> {
  let mut out = Vec::new();

  for_each_child(cursor, "tracklist", |cursor, tag| {
    if tag.name != "track" {
      return skip_element(cursor, &tag.name);
    }

    let mut track = Track::default();
    for_each_child(cursor, "track", |cursor, child| {
      match child.name.as_str() {
        "position" => track.position = extract_text(cursor, "position")?,
        "title" => track.title = extract_text(cursor, "title")?,
        "duration" => track.duration = extract_text(cursor, "duration")?,
        other => skip_element(cursor, other)?,
      }
      Ok(())
    })?;

    out.push(track);
    Ok(())
  })?;

  Ok(out)
}

/// `<identifiers><identifier type description value/>…</identifiers>`.
fn identifiers<S: TokenSource + ?Sized>(cursor: &mut S) -> Result<Vec<Identifier>, DecodeError> {
  let mut out = Vec::new();

  for_each_child(cursor, "identifiers", |cursor, tag| {
    if tag.name == "identifier" {
      out.push(Identifier {
        description: tag.attr_or_default("description"),
        kind: tag.attr_or_default("type"),
        value: tag.attr_or_default("value"),
      });
    }
    skip_element(cursor, &tag.name)
  })?;

  Ok(out)
}

/// `<companies><company><id/><name/><catno/>…</company>…</companies>`.
fn companies<S: TokenSource + ?Sized>(cursor: &mut S) -> Result<Vec<Company>, DecodeError> {
  let mut out = Vec::new();

  for_each_child(cursor, "companies", |cursor, tag| {
    if tag.name != "company" {
      return skip_element(cursor, &tag.name);
    }

    let mut company = Company::default();
    for_each_child(cursor, "company", |cursor, child| {
      match child.name.as_str() {
        "id" => company.id = extract_text(cursor, "id")?.into(),
        "name" => company.name = extract_text(cursor, "name")?,
        "catno" => company.category = extract_text(cursor, "catno")?,
        "entity_type" => company.entity_type = extract_text(cursor, "entity_type")?,
        "entity_type_name" => company.entity_type_name = extract_text(cursor, "entity_type_name")?,
        "resource_url" => company.resource_url = extract_text(cursor, "resource_url")?,
        other => skip_element(cursor, other)?,
      }
      Ok(())
    })?;

    out.push(company);
    Ok(())
  })?;

  Ok(out)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::extract::test_support::cursor_at_root;
  use platter_core::discography::ReleaseArtist;
  use pretty_assertions::assert_eq;

  const STOCKHOLM: &str = r#"<release id="1" status="Accepted">
    <images><image height="600" type="primary" uri="" uri150="" width="600"/></images>
    <artists><artist><id>1</id><name>The Persuader</name><anv/><join/><role/><tracks/></artist></artists>
    <title>Stockholm</title>
    <labels><label name="Svek" catno="SK032" id="5"/></labels>
    <extraartists>
      <artist><id>239</id><name>Jesper Dahlbäck</name><anv/><join/><role>Music By [All Tracks By]</role><tracks/></artist>
    </extraartists>
    <formats><format name="Vinyl" qty="2" text=""><descriptions><description>12"</description><description>33 ⅓ RPM</description></descriptions></format></formats>
    <genres><genre>Electronic</genre></genres>
    <styles><style>Deep House</style></styles>
    <country>Sweden</country>
    <released>1999-03-00</released>
    <notes>The song titles are the names of six Stockholm districts.</notes>
    <data_quality>Needs Vote</data_quality>
    <master_id is_main_release="true">5427</master_id>
    <tracklist>
      <track><position>A</position><title>Östermalm</title><duration>4:45</duration></track>
      <track><position>B1</position><title>Vasastaden</title><duration>6:11</duration>
        <extraartists><artist><id>2</id><name>X</name></artist></extraartists></track>
    </tracklist>
    <identifiers>
      <identifier description="A-Side Runout" type="Matrix / Runout" value="MPO SK 032 A1"/>
      <identifier type="Barcode" value="7 3 2 9 9 3 2"/>
    </identifiers>
    <videos><video duration="296" embed="true" src="https://www.youtube.com/watch?v=5rA8CTKKEP4">
      <title>The Persuader - Vasastaden</title><description>The Persuader - Vasastaden</description></video></videos>
    <companies>
      <company><id>271046</id><name>The Globe Studios</name><catno></catno><entity_type>23</entity_type>
        <entity_type_name>Recorded At</entity_type_name><resource_url>https://api.discogs.com/labels/271046</resource_url></company>
    </companies>
  </release>"#;

  #[test]
  fn assembles_full_release() {
    let (mut c, tag) = cursor_at_root(STOCKHOLM);
    let release = Release::assemble(&mut c, &tag).unwrap();

    assert_eq!(release.id.as_str(), "1");
    assert_eq!(release.status, "Accepted");
    assert_eq!(release.title, "Stockholm");
    assert_eq!(release.country, "Sweden");
    assert_eq!(release.released, "1999-03-00");
    assert_eq!(release.data_quality, "Needs Vote");
    assert_eq!(release.master_id, Some("5427".into()));
    assert!(release.is_main_release);
    assert_eq!(release.images.len(), 1);
    assert_eq!(release.artists[0].name, "The Persuader");
    assert_eq!(release.extra_artists[0].role, "Music By [All Tracks By]");
    assert_eq!(
      release.labels,
      vec![ReleaseLabel { id: "5".into(), name: "Svek".to_string(), category: "SK032".to_string() }]
    );
    assert_eq!(
      release.formats,
      vec![Format {
        name: "Vinyl".to_string(),
        quantity: 2,
        text: String::new(),
        descriptions: vec!["12\"".to_string(), "33 ⅓ RPM".to_string()],
      }]
    );
    assert_eq!(release.genres, vec!["Electronic"]);
    assert_eq!(release.styles, vec!["Deep House"]);
    assert_eq!(release.videos.len(), 1);
  }

  #[test]
  fn main_and_extra_credits_stay_apart() {
    let (mut c, tag) = cursor_at_root(STOCKHOLM);
    let release = Release::assemble(&mut c, &tag).unwrap();

    let credit_ids = |credits: &[ReleaseArtist]| credits.iter().map(|a| a.id.to_string()).collect::<Vec<_>>();
    assert_eq!(credit_ids(&release.artists), vec!["1"]);
    assert_eq!(credit_ids(&release.extra_artists), vec!["239"]);
    assert_eq!(release.artists[0].role, "");
    assert_eq!(release.extra_artists[0].name, "Jesper Dahlbäck");

    // the credit nested in track B1 belongs to no release-level list
    let mut everyone = release.artists.iter().chain(&release.extra_artists);
    assert!(everyone.clone().all(|a| a.id.as_str() != "2"));
    assert!(everyone.all(|a| a.name != "X"));
  }

  #[test]
  fn tracks_identifiers_and_companies_keep_order() {
    let (mut c, tag) = cursor_at_root(STOCKHOLM);
    let release = Release::assemble(&mut c, &tag).unwrap();

    let positions: Vec<&str> = release.tracklist.iter().map(|t| t.position.as_str()).collect();
    assert_eq!(positions, vec!["A", "B1"]);
    assert_eq!(release.tracklist[1].duration, "6:11");

    assert_eq!(
      release.identifiers,
      vec![
        Identifier {
          description: "A-Side Runout".to_string(),
          kind: "Matrix / Runout".to_string(),
          value: "MPO SK 032 A1".to_string(),
        },
        Identifier { description: String::new(), kind: "Barcode".to_string(), value: "7 3 2 9 9 3 2".to_string() },
      ]
    );

    assert_eq!(
      release.companies,
      vec![Company {
        id: "271046".into(),
        name: "The Globe Studios".to_string(),
        category: String::new(),
        entity_type: "23".to_string(),
        entity_type_name: "Recorded At".to_string(),
        resource_url: "https://api.discogs.com/labels/271046".to_string(),
      }]
    );
  }

  #[test]
  fn release_without_master() {
    let (mut c, tag) = cursor_at_root(r#"<release id="9" status="Draft"><title>Solo</title></release>"#);
    let release = Release::assemble(&mut c, &tag).unwrap();

    assert_eq!(release.master_id, None);
    assert!(!release.is_main_release);
    assert!(release.tracklist.is_empty());
  }

  #[test]
  fn truncated_release_is_an_error() {
    let (mut c, tag) = cursor_at_root(r#"<release id="9"><title>Solo</title><tracklist><track>"#);
    assert!(Release::assemble(&mut c, &tag).is_err());
  }
}
