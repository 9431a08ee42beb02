use std::path::Path;

use credsync_core::MergeDirection;

use crate::commands::common::format_stats_lines;
use crate::error::CliError;
use crate::pipeline::run_pipeline;
use crate::session_store::save_session;

pub async fn run_merge(
    apple_path: &Path,
    google_path: &Path,
    direction: MergeDirection,
    session_path: &Path,
) -> Result<(), CliError> {
    let result = run_pipeline(apple_path, google_path, direction, |stage| {
        eprintln!("[{:>3}%] {}", stage.percent(), stage.label());
    })
    .await?;

    save_session(session_path, &result).await?;

    println!("Merged ({direction}) into {}", session_path.display());
    for line in format_stats_lines(&result.stats) {
        println!("{line}");
    }
    if result.stats.unresolved_conflicts > 0 {
        println!(
            "{} conflict(s) need review. Run `credsync conflicts`.",
            result.stats.unresolved_conflicts
        );
    }

    Ok(())
}
