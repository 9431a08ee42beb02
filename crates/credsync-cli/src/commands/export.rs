use std::path::{Path, PathBuf};

use chrono::Utc;
use credsync_core::export::{render_csv_export, suggested_export_file_name, ExportFormat};
use tracing::warn;

use crate::commands::common::load_result;
use crate::error::CliError;

pub async fn run_export(
    format: ExportFormat,
    output_path: Option<&Path>,
    session_path: &Path,
) -> Result<(), CliError> {
    let result = load_result(session_path).await?;
    if !result.is_fully_resolved() {
        warn!(
            "{} conflict(s) unresolved; exporting the records currently kept",
            result.stats.unresolved_conflicts
        );
    }

    let rendered = render_csv_export(&result.merged, format);

    if let Some(output_path) = output_path {
        let path = export_destination(output_path, format, Utc::now().timestamp_millis()).await;
        tokio::fs::write(&path, rendered).await?;
        println!("{}", path.display());
    } else {
        println!("{rendered}");
    }

    Ok(())
}

/// File to write: `output` itself, or a generated name inside it when it is a directory.
pub async fn export_destination(output: &Path, format: ExportFormat, now_ms: i64) -> PathBuf {
    let is_dir = tokio::fs::metadata(output)
        .await
        .is_ok_and(|metadata| metadata.is_dir());
    if is_dir {
        output.join(suggested_export_file_name(format, now_ms))
    } else {
        output.to_path_buf()
    }
}
