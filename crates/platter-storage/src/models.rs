//! Relational flattening of decoded blocks.
//!
//! Every table has one insertable row type. [`Row`] wraps them so a block
//! can be turned into an ordered list of inserts and handed to either the
//! SQLite sink or the SQL script renderer.

use std::fmt;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use platter_core::Batch;
use platter_core::discography::{Artist, ArtistRef, Image, Label, Master, Release, ReleaseArtist, Video};
use uuid::Uuid;

use crate::StorageError;
use crate::schema;

/// Literal value of one column, as rendered into an SQL script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
  Null,
  Integer(i64),
  Text(String),
}

impl From<&String> for SqlValue {
  fn from(value: &String) -> Self {
    SqlValue::Text(value.clone())
  }
}

impl From<&Option<String>> for SqlValue {
  fn from(value: &Option<String>) -> Self {
    value.as_ref().map_or(SqlValue::Null, SqlValue::from)
  }
}

impl From<&i64> for SqlValue {
  fn from(value: &i64) -> Self {
    SqlValue::Integer(*value)
  }
}

impl From<&bool> for SqlValue {
  fn from(value: &bool) -> Self {
    SqlValue::Integer(i64::from(*value))
  }
}

impl fmt::Display for SqlValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SqlValue::Null => f.write_str("NULL"),
      SqlValue::Integer(n) => write!(f, "{n}"),
      SqlValue::Text(s) => write!(f, "'{}'", s.replace('\'', "''")),
    }
  }
}

macro_rules! rows {
  ($($variant:ident($row:ident) => $table:ident { $($field:ident: $ty:ty),* $(,)? })*) => {
    $(
      #[derive(Debug, Clone, PartialEq, Eq, Insertable)]
      #[diesel(table_name = schema::$table)]
      pub struct $row {
        $(pub $field: $ty,)*
      }
    )*

    /// One insert, in the order it has to be executed.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Row {
      $($variant($row),)*
    }

    impl Row {
      pub fn table(&self) -> &'static str {
        match self {
          $(Row::$variant(_) => stringify!($table),)*
        }
      }

      pub fn columns(&self) -> &'static [&'static str] {
        match self {
          $(Row::$variant(_) => &[$(stringify!($field)),*],)*
        }
      }

      pub fn values(&self) -> Vec<SqlValue> {
        match self {
          $(Row::$variant(row) => vec![$(SqlValue::from(&row.$field)),*],)*
        }
      }

      pub fn insert(&self, conn: &mut SqliteConnection) -> QueryResult<usize> {
        match self {
          $(Row::$variant(row) => diesel::insert_into(schema::$table::table).values(row).execute(conn),)*
        }
      }
    }
  };
}

rows! {
  Artist(NewArtistRow) => artists {
    id: String,
    name: String,
    real_name: String,
    profile: String,
    data_quality: String,
    name_variations: String,
    urls: String,
  }
  ArtistAlias(NewArtistAliasRow) => artist_aliases {
    id: String,
    artist_id: String,
    alias_id: String,
    name: String,
    seq: i64,
  }
  ArtistMember(NewArtistMemberRow) => artist_members {
    id: String,
    artist_id: String,
    member_id: String,
    name: String,
    seq: i64,
  }
  ArtistGroup(NewArtistGroupRow) => artist_groups {
    id: String,
    artist_id: String,
    group_id: String,
    name: String,
    seq: i64,
  }
  Label(NewLabelRow) => labels {
    id: String,
    name: String,
    contact_info: String,
    profile: String,
    data_quality: String,
    urls: String,
  }
  LabelLabel(NewLabelLabelRow) => label_labels {
    id: String,
    label_id: String,
    related_id: String,
    name: String,
    relation: String,
    seq: i64,
  }
  Master(NewMasterRow) => masters {
    id: String,
    main_release: String,
    year: i64,
    title: String,
    data_quality: String,
    genres: String,
    styles: String,
  }
  Release(NewReleaseRow) => releases {
    id: String,
    status: String,
    title: String,
    country: String,
    released: String,
    notes: String,
    data_quality: String,
    master_id: Option<String>,
    is_main_release: bool,
    genres: String,
    styles: String,
  }
  ReleaseArtist(NewReleaseArtistRow) => release_artists {
    id: String,
    master_id: Option<String>,
    release_id: Option<String>,
    artist_id: String,
    name: String,
    anv: String,
    join_string: String,
    role: String,
    tracks: String,
    extra: bool,
    seq: i64,
  }
  ReleaseLabel(NewReleaseLabelRow) => release_labels {
    id: String,
    release_id: String,
    label_id: String,
    name: String,
    category: String,
    seq: i64,
  }
  ReleaseFormat(NewReleaseFormatRow) => release_formats {
    id: String,
    release_id: String,
    name: String,
    quantity: i64,
    format_text: String,
    descriptions: String,
    seq: i64,
  }
  ReleaseTrack(NewReleaseTrackRow) => release_tracks {
    id: String,
    release_id: String,
    position: String,
    title: String,
    duration: String,
    seq: i64,
  }
  ReleaseIdentifier(NewReleaseIdentifierRow) => release_identifiers {
    id: String,
    release_id: String,
    description: String,
    kind: String,
    value: String,
    seq: i64,
  }
  ReleaseCompany(NewReleaseCompanyRow) => release_companies {
    id: String,
    release_id: String,
    company_id: String,
    name: String,
    category: String,
    entity_type: String,
    entity_type_name: String,
    resource_url: String,
    seq: i64,
  }
  Video(NewVideoRow) => videos {
    id: String,
    master_id: Option<String>,
    release_id: Option<String>,
    duration: i64,
    embed: bool,
    src: String,
    title: String,
    description: String,
    seq: i64,
  }
  Image(NewImageRow) => images {
    id: String,
    artist_id: Option<String>,
    label_id: Option<String>,
    master_id: Option<String>,
    release_id: Option<String>,
    height: i64,
    width: i64,
    image_type: String,
    uri: String,
    uri150: String,
    seq: i64,
  }
}

/// Which parent a shared sub-record (image, video, credit) hangs from.
#[derive(Debug, Clone, Copy)]
enum Owner<'a> {
  Artist(&'a str),
  Label(&'a str),
  Master(&'a str),
  Release(&'a str),
}

impl Owner<'_> {
  fn artist_id(self) -> Option<String> {
    match self {
      Owner::Artist(id) => Some(id.to_string()),
      _ => None,
    }
  }

  fn label_id(self) -> Option<String> {
    match self {
      Owner::Label(id) => Some(id.to_string()),
      _ => None,
    }
  }

  fn master_id(self) -> Option<String> {
    match self {
      Owner::Master(id) => Some(id.to_string()),
      _ => None,
    }
  }

  fn release_id(self) -> Option<String> {
    match self {
      Owner::Release(id) => Some(id.to_string()),
      _ => None,
    }
  }
}

fn new_id() -> String {
  Uuid::new_v4().to_string()
}

fn seq(index: usize) -> i64 {
  i64::try_from(index).unwrap_or(i64::MAX)
}

fn json_list(items: &[String]) -> Result<String, StorageError> {
  Ok(serde_json::to_string(items)?)
}

/// Flattens a block into inserts: each entity's own row first, then its
/// sub-records in document order.
///
/// With `exclude_images` no image row is produced; the entities themselves
/// are left untouched.
pub fn rows_for(batch: Batch<'_>, exclude_images: bool) -> Result<Vec<Row>, StorageError> {
  let mut rows = Vec::new();

  match batch {
    Batch::Artists(items) => {
      for artist in items {
        artist_rows(artist, exclude_images, &mut rows)?;
      }
    }
    Batch::Labels(items) => {
      for label in items {
        label_rows(label, exclude_images, &mut rows)?;
      }
    }
    Batch::Masters(items) => {
      for master in items {
        master_rows(master, exclude_images, &mut rows)?;
      }
    }
    Batch::Releases(items) => {
      for release in items {
        release_rows(release, exclude_images, &mut rows)?;
      }
    }
  }

  Ok(rows)
}

fn artist_rows(artist: &Artist, exclude_images: bool, rows: &mut Vec<Row>) -> Result<(), StorageError> {
  let id = artist.id.as_str();

  rows.push(Row::Artist(NewArtistRow {
    id: id.to_string(),
    name: artist.name.clone(),
    real_name: artist.real_name.clone(),
    profile: artist.profile.clone(),
    data_quality: artist.data_quality.clone(),
    name_variations: json_list(&artist.name_variations)?,
    urls: json_list(&artist.urls)?,
  }));

  if !exclude_images {
    image_rows(Owner::Artist(id), &artist.images, rows);
  }

  let refs = |list: &[ArtistRef]| -> Vec<(String, String, String, i64)> {
    list.iter().enumerate().map(|(i, r)| (new_id(), r.id.to_string(), r.name.clone(), seq(i))).collect()
  };

  for (row_id, alias_id, name, seq) in refs(&artist.aliases) {
    rows.push(Row::ArtistAlias(NewArtistAliasRow { id: row_id, artist_id: id.to_string(), alias_id, name, seq }));
  }
  for (row_id, member_id, name, seq) in refs(&artist.members) {
    rows.push(Row::ArtistMember(NewArtistMemberRow { id: row_id, artist_id: id.to_string(), member_id, name, seq }));
  }
  for (row_id, group_id, name, seq) in refs(&artist.groups) {
    rows.push(Row::ArtistGroup(NewArtistGroupRow { id: row_id, artist_id: id.to_string(), group_id, name, seq }));
  }

  Ok(())
}

fn label_rows(label: &Label, exclude_images: bool, rows: &mut Vec<Row>) -> Result<(), StorageError> {
  let id = label.id.as_str();

  rows.push(Row::Label(NewLabelRow {
    id: id.to_string(),
    name: label.name.clone(),
    contact_info: label.contact_info.clone(),
    profile: label.profile.clone(),
    data_quality: label.data_quality.clone(),
    urls: json_list(&label.urls)?,
  }));

  if !exclude_images {
    image_rows(Owner::Label(id), &label.images, rows);
  }

  let related = label.parent_label.iter().map(|r| (r, "parent")).chain(label.sub_labels.iter().map(|r| (r, "sub")));
  for (i, (related, relation)) in related.enumerate() {
    rows.push(Row::LabelLabel(NewLabelLabelRow {
      id: new_id(),
      label_id: id.to_string(),
      related_id: related.id.to_string(),
      name: related.name.clone(),
      relation: relation.to_string(),
      seq: seq(i),
    }));
  }

  Ok(())
}

fn master_rows(master: &Master, exclude_images: bool, rows: &mut Vec<Row>) -> Result<(), StorageError> {
  let id = master.id.as_str();

  rows.push(Row::Master(NewMasterRow {
    id: id.to_string(),
    main_release: master.main_release.to_string(),
    year: i64::from(master.year),
    title: master.title.clone(),
    data_quality: master.data_quality.clone(),
    genres: json_list(&master.genres)?,
    styles: json_list(&master.styles)?,
  }));

  if !exclude_images {
    image_rows(Owner::Master(id), &master.images, rows);
  }
  credit_rows(Owner::Master(id), &master.artists, false, rows);
  video_rows(Owner::Master(id), &master.videos, rows);

  Ok(())
}

fn release_rows(release: &Release, exclude_images: bool, rows: &mut Vec<Row>) -> Result<(), StorageError> {
  let id = release.id.as_str();
  let owner = Owner::Release(id);

  rows.push(Row::Release(NewReleaseRow {
    id: id.to_string(),
    status: release.status.clone(),
    title: release.title.clone(),
    country: release.country.clone(),
    released: release.released.clone(),
    notes: release.notes.clone(),
    data_quality: release.data_quality.clone(),
    master_id: release.master_id.as_ref().map(ToString::to_string),
    is_main_release: release.is_main_release,
    genres: json_list(&release.genres)?,
    styles: json_list(&release.styles)?,
  }));

  if !exclude_images {
    image_rows(owner, &release.images, rows);
  }
  credit_rows(owner, &release.artists, false, rows);
  credit_rows(owner, &release.extra_artists, true, rows);

  for (i, label) in release.labels.iter().enumerate() {
    rows.push(Row::ReleaseLabel(NewReleaseLabelRow {
      id: new_id(),
      release_id: id.to_string(),
      label_id: label.id.to_string(),
      name: label.name.clone(),
      category: label.category.clone(),
      seq: seq(i),
    }));
  }

  for (i, format) in release.formats.iter().enumerate() {
    rows.push(Row::ReleaseFormat(NewReleaseFormatRow {
      id: new_id(),
      release_id: id.to_string(),
      name: format.name.clone(),
      quantity: i64::from(format.quantity),
      format_text: format.text.clone(),
      descriptions: json_list(&format.descriptions)?,
      seq: seq(i),
    }));
  }

  for (i, track) in release.tracklist.iter().enumerate() {
    rows.push(Row::ReleaseTrack(NewReleaseTrackRow {
      id: new_id(),
      release_id: id.to_string(),
      position: track.position.clone(),
      title: track.title.clone(),
      duration: track.duration.clone(),
      seq: seq(i),
    }));
  }

  for (i, identifier) in release.identifiers.iter().enumerate() {
    rows.push(Row::ReleaseIdentifier(NewReleaseIdentifierRow {
      id: new_id(),
      release_id: id.to_string(),
      description: identifier.description.clone(),
      kind: identifier.kind.clone(),
      value: identifier.value.clone(),
      seq: seq(i),
    }));
  }

  video_rows(owner, &release.videos, rows);

  for (i, company) in release.companies.iter().enumerate() {
    rows.push(Row::ReleaseCompany(NewReleaseCompanyRow {
      id: new_id(),
      release_id: id.to_string(),
      company_id: company.id.to_string(),
      name: company.name.clone(),
      category: company.category.clone(),
      entity_type: company.entity_type.clone(),
      entity_type_name: company.entity_type_name.clone(),
      resource_url: company.resource_url.clone(),
      seq: seq(i),
    }));
  }

  Ok(())
}

fn image_rows(owner: Owner<'_>, images: &[Image], rows: &mut Vec<Row>) {
  for (i, image) in images.iter().enumerate() {
    rows.push(Row::Image(NewImageRow {
      id: new_id(),
      artist_id: owner.artist_id(),
      label_id: owner.label_id(),
      master_id: owner.master_id(),
      release_id: owner.release_id(),
      height: i64::from(image.height),
      width: i64::from(image.width),
      image_type: image.image_type.to_string(),
      uri: image.uri.clone(),
      uri150: image.uri150.clone(),
      seq: seq(i),
    }));
  }
}

fn video_rows(owner: Owner<'_>, videos: &[Video], rows: &mut Vec<Row>) {
  for (i, video) in videos.iter().enumerate() {
    rows.push(Row::Video(NewVideoRow {
      id: new_id(),
      master_id: owner.master_id(),
      release_id: owner.release_id(),
      duration: i64::from(video.duration),
      embed: video.embed,
      src: video.src.clone(),
      title: video.title.clone(),
      description: video.description.clone(),
      seq: seq(i),
    }));
  }
}

fn credit_rows(owner: Owner<'_>, credits: &[ReleaseArtist], extra: bool, rows: &mut Vec<Row>) {
  for (i, credit) in credits.iter().enumerate() {
    rows.push(Row::ReleaseArtist(NewReleaseArtistRow {
      id: new_id(),
      master_id: owner.master_id(),
      release_id: owner.release_id(),
      artist_id: credit.id.to_string(),
      name: credit.name.clone(),
      anv: credit.anv.clone(),
      join_string: credit.join.clone(),
      role: credit.role.clone(),
      tracks: credit.tracks.clone(),
      extra,
      seq: seq(i),
    }));
  }
}
