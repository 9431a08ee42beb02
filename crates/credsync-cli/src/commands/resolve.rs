use std::path::Path;

use credsync_core::{apply_resolutions, resolve_all, Resolution, Side, SyncResult};

use crate::commands::common::load_result;
use crate::error::CliError;
use crate::session_store::save_session;

pub async fn run_resolve(
    side: Side,
    conflict_ids: &[String],
    all: bool,
    session_path: &Path,
) -> Result<(), CliError> {
    let result = load_result(session_path).await?;

    let (updated, decided) = if all {
        let pending = result.stats.unresolved_conflicts;
        (resolve_all(result, side), pending)
    } else {
        let resolutions = build_resolutions(&result, conflict_ids, side)?;
        let decided = resolutions.len();
        (apply_resolutions(result, &resolutions), decided)
    };

    save_session(session_path, &updated).await?;
    println!(
        "Kept {side} for {decided} conflict(s); {} unresolved",
        updated.stats.unresolved_conflicts
    );
    Ok(())
}

/// Validate ids against the session before building resolutions.
pub fn build_resolutions(
    result: &SyncResult,
    conflict_ids: &[String],
    side: Side,
) -> Result<Vec<Resolution>, CliError> {
    conflict_ids
        .iter()
        .map(|id| {
            let id = id.trim();
            result
                .conflict(id)
                .map(|conflict| Resolution::new(conflict.id.clone(), side))
                .ok_or_else(|| CliError::ConflictNotFound(id.to_string()))
        })
        .collect()
}
