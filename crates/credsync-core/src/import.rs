//! CSV import adapters for the two exporter formats.
//!
//! Both parsers read a header row and map columns by name, so column order
//! and extra columns do not matter. Ids are assigned by row position before
//! unusable rows are dropped.

use std::io::Read;

use csv::{ReaderBuilder, Trim};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::models::{Origin, Record};
use crate::util::normalize_text_option;
use crate::{Error, Result};

/// One row of an Apple Passwords export.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AppleRow {
    #[serde(rename = "Title", alias = "title")]
    title: String,
    #[serde(rename = "URL", alias = "url")]
    url: String,
    #[serde(rename = "Username", alias = "username")]
    username: String,
    #[serde(rename = "Password", alias = "password")]
    password: String,
    #[serde(rename = "Notes", alias = "notes")]
    notes: Option<String>,
    #[serde(rename = "OTPAuth", alias = "otpauth")]
    otp_auth: Option<String>,
}

/// One row of a Google Password Manager export.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GoogleRow {
    name: String,
    url: String,
    username: String,
    password: String,
    note: Option<String>,
}

/// Parse an Apple Passwords CSV export.
pub fn parse_apple_csv(reader: impl Read) -> Result<Vec<Record>> {
    parse_rows(reader, Origin::Apple, |id, row: AppleRow| {
        Record::new(id, Origin::Apple)
            .with_title(row.title)
            .with_url(row.url)
            .with_username(row.username)
            .with_password(row.password)
            .with_notes(normalize_text_option(row.notes))
            .with_otp_auth(normalize_text_option(row.otp_auth))
    })
}

/// Parse a Google Password Manager CSV export.
pub fn parse_google_csv(reader: impl Read) -> Result<Vec<Record>> {
    parse_rows(reader, Origin::Google, |id, row: GoogleRow| {
        Record::new(id, Origin::Google)
            .with_title(row.name)
            .with_url(row.url)
            .with_username(row.username)
            .with_password(row.password)
            .with_notes(normalize_text_option(row.note))
    })
}

fn parse_rows<R, T, F>(reader: R, origin: Origin, to_record: F) -> Result<Vec<Record>>
where
    R: Read,
    T: DeserializeOwned,
    F: Fn(String, T) -> Record,
{
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut dropped = 0usize;

    for (row, parsed) in csv_reader.deserialize::<T>().enumerate() {
        let parsed = parsed.map_err(|error| parse_error(origin, row, &error))?;
        let record = to_record(format!("{}-{row}", origin.tag()), parsed);
        if record.is_unusable() {
            dropped += 1;
            continue;
        }
        records.push(record);
    }

    debug!(
        "Parsed {} {origin} record(s), dropped {dropped} without url or username",
        records.len()
    );
    Ok(records)
}

fn parse_error(origin: Origin, row: usize, error: &csv::Error) -> Error {
    Error::Parse {
        origin: origin.to_string(),
        message: format!("row {}: {error}", row + 1),
    }
}
