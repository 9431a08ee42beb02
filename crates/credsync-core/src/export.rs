//! CSV export renderers shared by every client.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::Record;
use crate::Error;

const APPLE_HEADERS: [&str; 6] = ["Title", "URL", "Username", "Password", "Notes", "OTPAuth"];
const GOOGLE_HEADERS: [&str; 4] = ["name", "url", "username", "password"];

/// Column layout of an exported file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Importable by Apple Passwords
    Apple,
    /// Importable by Google Password Manager
    Google,
    /// Apple columns plus the record's origin
    #[default]
    Generic,
}

impl ExportFormat {
    pub const ALL: [Self; 3] = [Self::Apple, Self::Google, Self::Generic];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Apple => "apple",
            Self::Google => "google",
            Self::Generic => "generic",
        }
    }

    #[must_use]
    pub const fn extension(self) -> &'static str {
        "csv"
    }

    fn headers(self) -> &'static [&'static str] {
        match self {
            Self::Apple => &APPLE_HEADERS,
            Self::Google => &GOOGLE_HEADERS,
            Self::Generic => &[
                "Title", "URL", "Username", "Password", "Notes", "OTPAuth", "Source",
            ],
        }
    }

    fn row(self, record: &Record) -> Vec<&str> {
        let notes = record.notes.as_deref().unwrap_or_default();
        let otp_auth = record.otp_auth.as_deref().unwrap_or_default();
        match self {
            Self::Apple => vec![
                record.title.as_str(),
                record.url.as_str(),
                record.username.as_str(),
                record.password.as_str(),
                notes,
                otp_auth,
            ],
            Self::Google => vec![
                record.title.as_str(),
                record.url.as_str(),
                record.username.as_str(),
                record.password.as_str(),
            ],
            Self::Generic => vec![
                record.title.as_str(),
                record.url.as_str(),
                record.username.as_str(),
                record.password.as_str(),
                notes,
                otp_auth,
                record.origin.tag(),
            ],
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == value)
            .ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "unknown export format '{}' (expected apple, google or generic)",
                    s.trim()
                ))
            })
    }
}

/// Quote a field when it contains a comma, a double quote or a newline.
#[must_use]
pub fn escape_csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Render records as CSV: a header line, then one line per record.
///
/// Lines are joined with `\n` and the output has no trailing newline.
#[must_use]
pub fn render_csv_export(records: &[Record], format: ExportFormat) -> String {
    let header = format.headers().join(",");
    let rows = records.iter().map(|record| {
        format
            .row(record)
            .into_iter()
            .map(escape_csv_field)
            .collect::<Vec<_>>()
            .join(",")
    });

    std::iter::once(header)
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build a deterministic default file name for export flows.
#[must_use]
pub fn suggested_export_file_name(format: ExportFormat, timestamp_ms: i64) -> String {
    format!("credsync-{format}-{timestamp_ms}.{}", format.extension())
}
