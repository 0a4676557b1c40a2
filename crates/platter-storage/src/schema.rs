// Mirrors migrations/2024-06-01-000000_create_catalog/up.sql.

diesel::table! {
    artists (id) {
        id -> Text,
        name -> Text,
        real_name -> Text,
        profile -> Text,
        data_quality -> Text,
        name_variations -> Text,
        urls -> Text,
    }
}

diesel::table! {
    artist_aliases (id) {
        id -> Text,
        artist_id -> Text,
        alias_id -> Text,
        name -> Text,
        seq -> BigInt,
    }
}

diesel::table! {
    artist_members (id) {
        id -> Text,
        artist_id -> Text,
        member_id -> Text,
        name -> Text,
        seq -> BigInt,
    }
}

diesel::table! {
    artist_groups (id) {
        id -> Text,
        artist_id -> Text,
        group_id -> Text,
        name -> Text,
        seq -> BigInt,
    }
}

diesel::table! {
    labels (id) {
        id -> Text,
        name -> Text,
        contact_info -> Text,
        profile -> Text,
        data_quality -> Text,
        urls -> Text,
    }
}

diesel::table! {
    label_labels (id) {
        id -> Text,
        label_id -> Text,
        related_id -> Text,
        name -> Text,
        relation -> Text,
        seq -> BigInt,
    }
}

diesel::table! {
    masters (id) {
        id -> Text,
        main_release -> Text,
        year -> BigInt,
        title -> Text,
        data_quality -> Text,
        genres -> Text,
        styles -> Text,
    }
}

diesel::table! {
    releases (id) {
        id -> Text,
        status -> Text,
        title -> Text,
        country -> Text,
        released -> Text,
        notes -> Text,
        data_quality -> Text,
        master_id -> Nullable<Text>,
        is_main_release -> Bool,
        genres -> Text,
        styles -> Text,
    }
}

diesel::table! {
    release_artists (id) {
        id -> Text,
        master_id -> Nullable<Text>,
        release_id -> Nullable<Text>,
        artist_id -> Text,
        name -> Text,
        anv -> Text,
        join_string -> Text,
        role -> Text,
        tracks -> Text,
        extra -> Bool,
        seq -> BigInt,
    }
}

diesel::table! {
    release_labels (id) {
        id -> Text,
        release_id -> Text,
        label_id -> Text,
        name -> Text,
        category -> Text,
        seq -> BigInt,
    }
}

diesel::table! {
    release_formats (id) {
        id -> Text,
        release_id -> Text,
        name -> Text,
        quantity -> BigInt,
        format_text -> Text,
        descriptions -> Text,
        seq -> BigInt,
    }
}

diesel::table! {
    release_tracks (id) {
        id -> Text,
        release_id -> Text,
        position -> Text,
        title -> Text,
        duration -> Text,
        seq -> BigInt,
    }
}

diesel::table! {
    release_identifiers (id) {
        id -> Text,
        release_id -> Text,
        description -> Text,
        kind -> Text,
        value -> Text,
        seq -> BigInt,
    }
}

diesel::table! {
    release_companies (id) {
        id -> Text,
        release_id -> Text,
        company_id -> Text,
        name -> Text,
        category -> Text,
        entity_type -> Text,
        entity_type_name -> Text,
        resource_url -> Text,
        seq -> BigInt,
    }
}

diesel::table! {
    videos (id) {
        id -> Text,
        master_id -> Nullable<Text>,
        release_id -> Nullable<Text>,
        duration -> BigInt,
        embed -> Bool,
        src -> Text,
        title -> Text,
        description -> Text,
        seq -> BigInt,
    }
}

diesel::table! {
    images (id) {
        id -> Text,
        artist_id -> Nullable<Text>,
        label_id -> Nullable<Text>,
        master_id -> Nullable<Text>,
        release_id -> Nullable<Text>,
        height -> BigInt,
        width -> BigInt,
        image_type -> Text,
        uri -> Text,
        uri150 -> Text,
        seq -> BigInt,
    }
}

diesel::joinable!(artist_aliases -> artists (artist_id));
diesel::joinable!(artist_members -> artists (artist_id));
diesel::joinable!(artist_groups -> artists (artist_id));
diesel::joinable!(label_labels -> labels (label_id));
diesel::joinable!(release_labels -> releases (release_id));
diesel::joinable!(release_formats -> releases (release_id));
diesel::joinable!(release_tracks -> releases (release_id));
diesel::joinable!(release_identifiers -> releases (release_id));
diesel::joinable!(release_companies -> releases (release_id));

diesel::allow_tables_to_appear_in_same_query!(
  artists,
  artist_aliases,
  artist_members,
  artist_groups,
  labels,
  label_labels,
  masters,
  releases,
  release_artists,
  release_labels,
  release_formats,
  release_tracks,
  release_identifiers,
  release_companies,
  videos,
  images,
);
