//! Shared helper utilities for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`; this
//! module is included by each repository suite with `mod support;`.

pub mod cluster_skip;
pub mod embedded_postgres;

use postgres::{Client, NoTls};

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::provision_template_database;

/// Describe a `postgres` error, preferring the server-side message, detail
/// and hint over the terse `db error` display.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    error.as_db_error().map_or_else(
        || error.to_string(),
        |db| {
            let extras = [("detail", db.detail()), ("hint", db.hint())]
                .into_iter()
                .filter_map(|(label, text)| text.map(|text| format!("; {label}: {text}")))
                .collect::<String>();
            format!("postgres error {}: {}{extras}", db.code().code(), db.message())
        },
    )
}

/// Count the rows of `table` with a plain `postgres` client, bypassing the
/// adapter under test.
pub fn count_rows(url: &str, table: &str) -> Result<i64, String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    let escaped = table.replace('"', "\"\"");
    let row = client
        .query_one(format!(r#"SELECT COUNT(*) FROM "{escaped}""#).as_str(), &[])
        .map_err(|err| format_postgres_error(&err))?;
    Ok(row.get(0))
}
