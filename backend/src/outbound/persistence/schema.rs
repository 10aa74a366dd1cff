//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `backend/migrations`
//! exactly. Regenerate with `diesel print-schema` when a migration changes.

diesel::table! {
    /// Shared city lookup.
    cities (id) {
        id -> Int4,
        name -> Varchar,
        image_url -> Text,
        wiki_url -> Nullable<Text>,
    }
}

diesel::table! {
    event_types (id) {
        id -> Int4,
        name -> Varchar,
    }
}

diesel::table! {
    package_items (id) {
        id -> Int4,
        name -> Varchar,
    }
}

diesel::table! {
    /// Tour root rows. Collections live in the `tour_*` child tables.
    tours (id) {
        id -> Int4,
        title -> Varchar,
        description -> Text,
        short_description -> Text,
        image_url -> Text,
        early_bird_regular_price -> Nullable<Int8>,
        early_bird_returning_price -> Nullable<Int8>,
        standard_regular_price -> Int8,
        standard_returning_price -> Nullable<Int8>,
        /// Free-form display date shown to visitors.
        display_date -> Varchar,
        location -> Varchar,
        duration -> Varchar,
        tour_dates -> Text,
        customize -> Text,
        early_bird_deadline -> Nullable<Date>,
        standard_deadline -> Nullable<Date>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    tour_cities (tour_id, city_id) {
        tour_id -> Int4,
        city_id -> Int4,
        position -> Int4,
    }
}

diesel::table! {
    tour_event_types (tour_id, event_type_id) {
        tour_id -> Int4,
        event_type_id -> Int4,
        position -> Int4,
    }
}

diesel::table! {
    tour_package_items (tour_id, package_item_id) {
        tour_id -> Int4,
        package_item_id -> Int4,
        position -> Int4,
    }
}

diesel::table! {
    tour_additional_images (id) {
        id -> Int4,
        tour_id -> Int4,
        image_url -> Text,
        position -> Int4,
    }
}

diesel::table! {
    /// Page documents keyed by page name; `content` is serialized JSON.
    page_contents (id) {
        id -> Int4,
        page_name -> Varchar,
        content -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    content_items (id) {
        id -> Varchar,
        kind -> Varchar,
        content -> Text,
        /// Serialized JSON object, if any.
        metadata -> Nullable<Text>,
        page_name -> Varchar,
        section_name -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    content_translations (content_item_id, language) {
        content_item_id -> Varchar,
        language -> Varchar,
        content -> Text,
        metadata -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    static_translations (key) {
        key -> Varchar,
        en -> Text,
        vi -> Text,
        category -> Nullable<Varchar>,
        description -> Nullable<Text>,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(tour_cities -> tours (tour_id));
diesel::joinable!(tour_cities -> cities (city_id));
diesel::joinable!(tour_event_types -> tours (tour_id));
diesel::joinable!(tour_event_types -> event_types (event_type_id));
diesel::joinable!(tour_package_items -> tours (tour_id));
diesel::joinable!(tour_package_items -> package_items (package_item_id));
diesel::joinable!(tour_additional_images -> tours (tour_id));
diesel::joinable!(content_translations -> content_items (content_item_id));

diesel::allow_tables_to_appear_in_same_query!(
    cities,
    content_items,
    content_translations,
    event_types,
    package_items,
    page_contents,
    static_translations,
    tour_additional_images,
    tour_cities,
    tour_event_types,
    tour_package_items,
    tours,
);
