//! Read both exports and merge them, reporting progress milestones.

use std::path::Path;

use credsync_core::import::{parse_apple_csv, parse_google_csv};
use credsync_core::{merge, MergeDirection, Record, Result as CoreResult, SyncResult};
use tracing::debug;

use crate::error::CliError;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Stage {
    ParsingApple,
    ParsingGoogle,
    Syncing,
    Complete,
}

impl Stage {
    pub const fn label(self) -> &'static str {
        match self {
            Self::ParsingApple => "Parsing Apple passwords...",
            Self::ParsingGoogle => "Parsing Google passwords...",
            Self::Syncing => "Syncing passwords...",
            Self::Complete => "Complete!",
        }
    }

    pub const fn percent(self) -> u8 {
        match self {
            Self::ParsingApple => 25,
            Self::ParsingGoogle => 50,
            Self::Syncing => 75,
            Self::Complete => 100,
        }
    }
}

pub async fn run_pipeline(
    apple_path: &Path,
    google_path: &Path,
    direction: MergeDirection,
    mut on_progress: impl FnMut(Stage),
) -> Result<SyncResult, CliError> {
    on_progress(Stage::ParsingApple);
    let apple = read_records(apple_path, |bytes| parse_apple_csv(bytes)).await?;

    on_progress(Stage::ParsingGoogle);
    let google = read_records(google_path, |bytes| parse_google_csv(bytes)).await?;

    on_progress(Stage::Syncing);
    let result =
        tokio::task::spawn_blocking(move || merge(&apple, &google, direction)).await??;

    on_progress(Stage::Complete);
    Ok(result)
}

async fn read_records(
    path: &Path,
    parse: impl Fn(&[u8]) -> CoreResult<Vec<Record>>,
) -> Result<Vec<Record>, CliError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| CliError::ReadInput {
            path: path.display().to_string(),
            source,
        })?;
    let records = parse(&bytes)?;
    debug!("Read {} record(s) from {}", records.len(), path.display());
    Ok(records)
}
