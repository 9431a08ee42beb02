//! Apply user decisions to a merge result.
//!
//! A decision replaces the content of the merged entry that represents the
//! conflict with the chosen side's fields and marks the conflict resolved.
//! Applying the same decision again leaves the result unchanged.

use tracing::{debug, info, warn};

use crate::models::{AuditNote, Conflict, Record, Resolution, Side, SyncResult};
use crate::stats::compute_stats;

/// Apply `resolutions` in order and recompute the stats.
///
/// Unknown conflict ids are skipped: callers may resubmit stale decisions.
#[must_use]
pub fn apply_resolutions(mut result: SyncResult, resolutions: &[Resolution]) -> SyncResult {
    let mut applied = 0usize;

    for resolution in resolutions {
        let Some(position) = result
            .conflicts
            .iter()
            .position(|conflict| conflict.id == resolution.conflict_id)
        else {
            debug!(
                "Ignoring resolution for unknown conflict {}",
                resolution.conflict_id
            );
            continue;
        };

        let conflict = &result.conflicts[position];
        if let Some(entry) = locate_entry(&result.merged, conflict) {
            let chosen = conflict.side(resolution.side).clone();
            apply_choice(
                &mut result.merged[entry],
                &chosen,
                &conflict.id,
                resolution.side,
            );
        } else {
            warn!("No merged entry represents {}", conflict.id);
        }

        let conflict = &mut result.conflicts[position];
        conflict.resolved = true;
        conflict.chosen_side = Some(resolution.side);
        applied += 1;
    }

    result.stats = compute_stats(&result);
    info!(
        "Applied {applied} resolution(s); {} conflict(s) left",
        result.stats.unresolved_conflicts
    );
    result
}

/// Resolve every still-unresolved conflict in favour of `side`.
#[must_use]
pub fn resolve_all(result: SyncResult, side: Side) -> SyncResult {
    let resolutions = result
        .unresolved_conflicts()
        .map(|conflict| Resolution::new(conflict.id.clone(), side))
        .collect::<Vec<_>>();
    apply_resolutions(result, &resolutions)
}

/// Index of the merged entry standing for `conflict`.
///
/// The entry carrying this conflict's note wins. Sessions written without
/// conflict ids fall back to entries sharing the normalized url and username
/// of either side: one already resolved for this conflict, then one still
/// flagged as a conflict, then the first key match.
fn locate_entry(merged: &[Record], conflict: &Conflict) -> Option<usize> {
    let flagged_here = |record: &Record| {
        record.audit.iter().any(|note| {
            matches!(note, AuditNote::Conflict { conflict_id, .. } if *conflict_id == conflict.id)
        })
    };
    if let Some(position) = merged.iter().position(flagged_here) {
        return Some(position);
    }

    let keys = [conflict.left.exact_key(), conflict.right.exact_key()];
    let candidates = merged
        .iter()
        .enumerate()
        .filter(|(_, record)| keys.contains(&record.exact_key()))
        .collect::<Vec<_>>();

    let resolved_here = |record: &Record| {
        record.audit.iter().any(|note| {
            matches!(note, AuditNote::Resolved { conflict_id, .. } if *conflict_id == conflict.id)
        })
    };
    let pending_conflict = |record: &Record| {
        record
            .audit
            .iter()
            .any(|note| matches!(note, AuditNote::Conflict { .. }))
            && !record
                .audit
                .iter()
                .any(|note| matches!(note, AuditNote::Resolved { .. }))
    };

    candidates
        .iter()
        .find(|&&(_, record)| resolved_here(record))
        .or_else(|| {
            candidates
                .iter()
                .find(|&&(_, record)| pending_conflict(record))
        })
        .or_else(|| candidates.first())
        .map(|&(position, _)| position)
}

fn apply_choice(entry: &mut Record, chosen: &Record, conflict_id: &str, side: Side) {
    entry.title.clone_from(&chosen.title);
    entry.url.clone_from(&chosen.url);
    entry.username.clone_from(&chosen.username);
    entry.password.clone_from(&chosen.password);
    entry.notes.clone_from(&chosen.notes);
    entry.otp_auth.clone_from(&chosen.otp_auth);
    entry.origin = chosen.origin;

    entry.audit.retain(|note| {
        !matches!(note, AuditNote::Resolved { conflict_id: id, .. } if id == conflict_id)
    });
    entry.audit.push(AuditNote::Resolved {
        conflict_id: conflict_id.to_string(),
        side,
        origin: chosen.origin,
    });
}
