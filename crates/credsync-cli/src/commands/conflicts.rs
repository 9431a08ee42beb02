use std::path::Path;

use credsync_core::Conflict;

use crate::commands::common::{conflict_to_item, format_conflict_lines, load_result, ConflictItem};
use crate::error::CliError;

pub async fn run_conflicts(
    include_resolved: bool,
    reveal: bool,
    as_json: bool,
    session_path: &Path,
) -> Result<(), CliError> {
    let result = load_result(session_path).await?;
    let conflicts = result
        .conflicts
        .iter()
        .filter(|conflict| include_resolved || !conflict.resolved)
        .collect::<Vec<&Conflict>>();

    if as_json {
        let json_items = conflicts
            .iter()
            .map(|conflict| conflict_to_item(conflict, reveal))
            .collect::<Vec<ConflictItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
        return Ok(());
    }

    if conflicts.is_empty() {
        if include_resolved {
            println!("No conflicts recorded.");
        } else {
            println!("No unresolved conflicts.");
        }
        return Ok(());
    }

    for line in format_conflict_lines(&conflicts, reveal) {
        println!("{line}");
    }
    Ok(())
}
