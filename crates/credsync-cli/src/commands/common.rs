use std::path::{Path, PathBuf};

use credsync_core::session::SessionFile;
use credsync_core::util::mask_secret;
use credsync_core::{Conflict, Record, SyncResult, SyncStats};
use serde::Serialize;

use crate::cli_config::CliConfig;
use crate::error::CliError;
use crate::session_store::load_session;

#[derive(Debug, Serialize)]
pub struct ConflictSideItem {
    pub id: String,
    pub origin: String,
    pub title: String,
    pub url: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct ConflictItem {
    pub id: String,
    pub title: String,
    pub reason: String,
    pub strategy: String,
    pub resolved: bool,
    pub chosen_side: Option<String>,
    pub left: ConflictSideItem,
    pub right: ConflictSideItem,
}

pub fn load_config() -> Result<CliConfig, CliError> {
    CliConfig::load().map_err(CliError::Config)
}

pub fn resolve_session_path(
    config: &CliConfig,
    explicit: Option<PathBuf>,
) -> Result<PathBuf, CliError> {
    config
        .resolve_session_path(explicit)
        .map_err(CliError::Config)
}

pub async fn load_result(session_path: &Path) -> Result<SyncResult, CliError> {
    let SessionFile { result, .. } = load_session(session_path).await?;
    Ok(result)
}

fn render_password(password: &str, reveal: bool) -> String {
    if reveal {
        password.to_string()
    } else {
        mask_secret(password)
    }
}

fn side_to_item(record: &Record, reveal: bool) -> ConflictSideItem {
    ConflictSideItem {
        id: record.id.clone(),
        origin: record.origin.to_string(),
        title: record.title.clone(),
        url: record.url.clone(),
        username: record.username.clone(),
        password: render_password(&record.password, reveal),
    }
}

pub fn conflict_to_item(conflict: &Conflict, reveal: bool) -> ConflictItem {
    ConflictItem {
        id: conflict.id.clone(),
        title: conflict.display_title().to_string(),
        reason: conflict.reason.clone(),
        strategy: conflict.strategy.to_string(),
        resolved: conflict.resolved,
        chosen_side: conflict.chosen_side.map(|side| side.to_string()),
        left: side_to_item(&conflict.left, reveal),
        right: side_to_item(&conflict.right, reveal),
    }
}

pub fn format_conflict_lines(conflicts: &[&Conflict], reveal: bool) -> Vec<String> {
    let mut lines = Vec::new();
    for conflict in conflicts {
        let status = conflict
            .chosen_side
            .map_or_else(|| "unresolved".to_string(), |side| format!("kept {side}"));
        lines.push(format!(
            "{}  {}  [{}]  {status}",
            conflict.id,
            conflict.display_title(),
            conflict.strategy
        ));
        for (label, record) in [("left ", &conflict.left), ("right", &conflict.right)] {
            lines.push(format!(
                "    {label}  {:<6}  {}  {}  {}",
                record.origin.to_string(),
                record.url,
                record.username,
                render_password(&record.password, reveal)
            ));
        }
    }
    lines
}

pub fn format_stats_lines(stats: &SyncStats) -> Vec<String> {
    vec![
        format!("Apple records:        {}", stats.apple_count),
        format!("Google records:       {}", stats.google_count),
        format!("Merged records:       {}", stats.merged_count),
        format!("Matched pairs:        {}", stats.matched_pairs),
        format!("Only in Apple:        {}", stats.unique_from_apple),
        format!("Only in Google:       {}", stats.unique_from_google),
        format!(
            "Conflicts:            {} ({} resolved, {} unresolved)",
            stats.conflict_count, stats.resolved_conflicts, stats.unresolved_conflicts
        ),
    ]
}

pub fn format_timestamp(timestamp_ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(timestamp_ms).map_or_else(
        || timestamp_ms.to_string(),
        |date_time| date_time.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    )
}
