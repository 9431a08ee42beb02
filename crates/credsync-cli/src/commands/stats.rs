use std::path::Path;

use crate::commands::common::{format_stats_lines, format_timestamp};
use crate::error::CliError;
use crate::session_store::load_session;

pub async fn run_stats(as_json: bool, session_path: &Path) -> Result<(), CliError> {
    let session = load_session(session_path).await?;
    let stats = &session.result.stats;

    if as_json {
        println!("{}", serde_json::to_string_pretty(stats)?);
        return Ok(());
    }

    println!(
        "Session {} ({}, saved {})",
        session_path.display(),
        session.result.direction,
        format_timestamp(session.saved_at)
    );
    for line in format_stats_lines(stats) {
        println!("{line}");
    }
    Ok(())
}
