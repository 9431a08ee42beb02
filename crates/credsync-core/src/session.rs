//! Serialized merge sessions.
//!
//! A session wraps a [`SyncResult`] with a schema version and a save time so
//! conflicts can be reviewed and resolved across invocations.

use serde::{Deserialize, Serialize};

use crate::models::SyncResult;
use crate::{Error, Result};

/// Schema version written by this build.
pub const SESSION_SCHEMA_VERSION: u32 = 1;

/// On-disk session document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionFile {
    pub schema_version: u32,
    /// Unix milliseconds
    pub saved_at: i64,
    pub result: SyncResult,
}

#[derive(Deserialize)]
struct SessionHeader {
    schema_version: Option<u32>,
}

/// Render a result as a pretty-printed session document.
pub fn render_session(result: &SyncResult, saved_at_ms: i64) -> Result<String> {
    #[derive(Serialize)]
    struct Borrowed<'a> {
        schema_version: u32,
        saved_at: i64,
        result: &'a SyncResult,
    }

    let payload = serde_json::to_string_pretty(&Borrowed {
        schema_version: SESSION_SCHEMA_VERSION,
        saved_at: saved_at_ms,
        result,
    })?;
    Ok(payload)
}

/// Parse a session document, rejecting unknown schema versions.
pub fn parse_session(payload: &str) -> Result<SessionFile> {
    let header = serde_json::from_str::<SessionHeader>(payload)
        .map_err(|error| Error::Session(format!("unreadable session: {error}")))?;

    match header.schema_version {
        Some(SESSION_SCHEMA_VERSION) => {}
        Some(version) => {
            return Err(Error::Session(format!(
                "unsupported schema_version {version} (expected {SESSION_SCHEMA_VERSION})"
            )));
        }
        None => return Err(Error::Session("missing schema_version".to_string())),
    }

    Ok(serde_json::from_str(payload)?)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::merge::merge;
    use crate::models::{MergeDirection, Resolution, Side};
    use crate::resolve::apply_resolutions;
    use crate::test_support::{apple, google};

    fn sample_result() -> SyncResult {
        let left = vec![apple(0, "example.com", "bob", "x1")];
        let right = vec![
            google(0, "example.com", "bob", "x2"),
            google(1, "mail.com", "carol", "m"),
        ];
        merge(&left, &right, MergeDirection::Bidirectional).unwrap()
    }

    #[test]
    fn session_preserves_result_and_resolution_state() {
        let result = apply_resolutions(
            sample_result(),
            &[Resolution::new("conflict-0", Side::Right)],
        );

        let rendered = render_session(&result, 1_700_000_000_000).unwrap();
        let session = parse_session(&rendered).unwrap();

        assert_eq!(session.schema_version, SESSION_SCHEMA_VERSION);
        assert_eq!(session.saved_at, 1_700_000_000_000);
        assert_eq!(session.result, result);
    }

    #[test]
    fn session_rejects_future_schema_versions() {
        let rendered = render_session(&sample_result(), 1).unwrap();
        let bumped = rendered.replacen("\"schema_version\": 1", "\"schema_version\": 2", 1);

        let error = parse_session(&bumped).unwrap_err();
        assert!(matches!(error, Error::Session(_)));
        assert!(error.to_string().contains("unsupported schema_version 2"));
    }

    #[test]
    fn session_requires_schema_version() {
        let error = parse_session(r#"{"saved_at": 1}"#).unwrap_err();
        assert!(error.to_string().contains("missing schema_version"));
    }

    #[test]
    fn session_rejects_non_json() {
        assert!(matches!(
            parse_session("not json"),
            Err(Error::Session(_))
        ));
    }
}
