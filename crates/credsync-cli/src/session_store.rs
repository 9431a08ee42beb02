//! Session file persistence between CLI invocations.

use std::io::ErrorKind;
use std::path::Path;

use chrono::Utc;
use credsync_core::session::{parse_session, render_session, SessionFile};
use credsync_core::SyncResult;
use tracing::debug;

use crate::error::CliError;

pub async fn load_session(path: &Path) -> Result<SessionFile, CliError> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(error) if error.kind() == ErrorKind::NotFound => {
            return Err(CliError::NoSession(path.display().to_string()));
        }
        Err(error) => return Err(error.into()),
    };

    let session = parse_session(&raw)?;
    debug!("Loaded session from {}", path.display());
    Ok(session)
}

pub async fn save_session(path: &Path, result: &SyncResult) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let rendered = render_session(result, Utc::now().timestamp_millis())?;
    tokio::fs::write(path, rendered).await?;
    debug!("Saved session to {}", path.display());
    Ok(())
}
