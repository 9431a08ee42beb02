//! Merge engine: reconciles two record collections under one direction.
//!
//! # Directions
//!
//! - `bidirectional`: index the right collection and walk the left one. A
//!   matched pair collapses into a single record (the left side wins on
//!   conflict); unmatched records from both sides are kept.
//! - `a-to-b` / `b-to-a`: the target collection is kept as is and indexed;
//!   every source record without a counterpart in the target is appended.
//!
//! Every matched pair with different passwords yields exactly one
//! [`Conflict`]. Pairing is one-to-one: an indexed record claimed by an
//! earlier probe is not offered again. Merged ids are assigned once the
//! merged order is final, so identical inputs give identical output.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use crate::index::LookupIndex;
use crate::matcher::{Claimed, MatchOutcome, MatchStrategy, Matcher};
use crate::models::{
    AuditNote, Conflict, MergeDirection, Origin, OriginCounts, Record, SyncResult, SyncStats,
};
use crate::stats::compute_stats;
use crate::util::is_blank;
use crate::{Error, Result};

/// Merge `left` and `right` under `direction`.
///
/// Contract violations (duplicate ids inside a collection, mixed origins in
/// one collection, or both collections from the same exporter) fail before
/// any work is done.
pub fn merge(left: &[Record], right: &[Record], direction: MergeDirection) -> Result<SyncResult> {
    validate_collection(left, "left")?;
    validate_collection(right, "right")?;
    validate_origins(left, right)?;

    let matcher = Matcher::standard();
    let draft = match direction {
        MergeDirection::Bidirectional => merge_bidirectional(&matcher, left, right),
        MergeDirection::AToB => merge_into(&matcher, Target::Right, left, right),
        MergeDirection::BToA => merge_into(&matcher, Target::Left, left, right),
    };

    let result = draft.finish(direction, OriginCounts::tally(left.iter().chain(right)));
    info!(
        "Merged {} + {} records ({direction}): {} merged, {} conflicts",
        left.len(),
        right.len(),
        result.merged.len(),
        result.conflicts.len()
    );
    Ok(result)
}

/// Which input collection a directional merge keeps verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Left,
    Right,
}

#[derive(Debug, Default)]
struct Draft {
    merged: Vec<Record>,
    conflicts: Vec<Conflict>,
}

impl Draft {
    /// Record a conflict and return the note for the merged entry standing for it.
    fn push_conflict(
        &mut self,
        left: &Record,
        right: &Record,
        strategy: MatchStrategy,
        kept: Origin,
    ) -> AuditNote {
        let id = format!("conflict-{}", self.conflicts.len());
        debug!(
            "{id}: {} vs {} differ ({strategy})",
            left.id, right.id
        );
        self.conflicts.push(Conflict::new(
            id.clone(),
            left.clone(),
            right.clone(),
            strategy,
        ));
        AuditNote::Conflict {
            conflict_id: id,
            strategy,
            kept,
        }
    }

    fn finish(mut self, direction: MergeDirection, source_counts: OriginCounts) -> SyncResult {
        for (position, record) in self.merged.iter_mut().enumerate() {
            record.id = format!("merged-{position}");
        }

        let mut result = SyncResult {
            direction,
            source_counts,
            merged: self.merged,
            conflicts: self.conflicts,
            stats: SyncStats::default(),
        };
        result.stats = compute_stats(&result);
        result
    }
}

fn merge_bidirectional(matcher: &Matcher<'_>, left: &[Record], right: &[Record]) -> Draft {
    let index = LookupIndex::build(right);
    let mut claimed = Claimed::new();
    let mut draft = Draft::default();

    for record in left {
        let outcome = matcher.find_unclaimed(record, &index, &claimed);
        log_outcome(record, &outcome);

        let Some(counterpart) = outcome.record else {
            draft.merged.push(record.clone().with_audit(AuditNote::OnlyIn {
                origin: record.origin,
            }));
            continue;
        };
        claimed.insert(counterpart.id.as_str());

        if record.password == counterpart.password {
            draft
                .merged
                .push(combine(record, counterpart, outcome.strategy));
        } else {
            let note = draft.push_conflict(record, counterpart, outcome.strategy, record.origin);
            draft.merged.push(record.clone().with_audit(note));
        }
    }

    draft.merged.extend(
        right
            .iter()
            .filter(|record| !claimed.contains(record.id.as_str()))
            .map(|record| {
                record.clone().with_audit(AuditNote::OnlyIn {
                    origin: record.origin,
                })
            }),
    );

    draft
}

fn merge_into(matcher: &Matcher<'_>, target: Target, left: &[Record], right: &[Record]) -> Draft {
    let (target_records, source_records) = match target {
        Target::Left => (left, right),
        Target::Right => (right, left),
    };

    let index = LookupIndex::build(target_records);
    let positions = target_records
        .iter()
        .enumerate()
        .map(|(position, record)| (record.id.as_str(), position))
        .collect::<HashMap<&str, usize>>();
    let mut claimed = Claimed::new();
    let mut draft = Draft {
        merged: target_records.to_vec(),
        conflicts: Vec::new(),
    };

    for record in source_records {
        let outcome = matcher.find_unclaimed(record, &index, &claimed);
        log_outcome(record, &outcome);

        let Some(existing) = outcome.record else {
            draft.merged.push(record.clone().with_audit(AuditNote::AddedFrom {
                origin: record.origin,
            }));
            continue;
        };
        claimed.insert(existing.id.as_str());

        let Some(&position) = positions.get(existing.id.as_str()) else {
            continue;
        };

        if existing.password == record.password {
            draft.merged[position].audit.push(AuditNote::Matched {
                strategy: outcome.strategy,
                counterpart: record.origin,
            });
        } else {
            let (pair_left, pair_right) = match target {
                Target::Left => (existing, record),
                Target::Right => (record, existing),
            };
            let note =
                draft.push_conflict(pair_left, pair_right, outcome.strategy, existing.origin);
            draft.merged[position].audit.push(note);
        }
    }

    draft
}

/// One record out of an equal-password pair: `primary` wins every field it
/// fills, `secondary` fills the gaps.
fn combine(primary: &Record, secondary: &Record, strategy: MatchStrategy) -> Record {
    let mut merged = primary.clone();

    if merged.title.trim().is_empty() {
        merged.title.clone_from(&secondary.title);
    }
    if is_blank(merged.notes.as_deref()) {
        merged.notes.clone_from(&secondary.notes);
    }
    if is_blank(merged.otp_auth.as_deref()) {
        merged.otp_auth.clone_from(&secondary.otp_auth);
    }

    merged.with_audit(AuditNote::Matched {
        strategy,
        counterpart: secondary.origin,
    })
}

fn log_outcome(record: &Record, outcome: &MatchOutcome<'_>) {
    match outcome.record {
        Some(counterpart) => debug!(
            "{} matched {} by {}",
            record.id, counterpart.id, outcome.strategy
        ),
        None => debug!("{} has no counterpart", record.id),
    }
}

fn validate_collection(records: &[Record], label: &str) -> Result<()> {
    let mut seen = HashSet::with_capacity(records.len());
    if let Some(duplicate) = records
        .iter()
        .find(|record| !seen.insert(record.id.as_str()))
    {
        return Err(Error::InvalidArgument(format!(
            "{label} collection contains duplicate record id '{}'",
            duplicate.id
        )));
    }

    if let Some(first) = records.first() {
        if records.iter().any(|record| record.origin != first.origin) {
            return Err(Error::InvalidArgument(format!(
                "{label} collection mixes Apple and Google records"
            )));
        }
    }

    Ok(())
}

fn collection_origin(records: &[Record]) -> Option<Origin> {
    records.first().map(|record| record.origin)
}

fn validate_origins(left: &[Record], right: &[Record]) -> Result<()> {
    match (collection_origin(left), collection_origin(right)) {
        (Some(left_origin), Some(right_origin)) if left_origin == right_origin => {
            Err(Error::InvalidArgument(format!(
                "both collections contain {left_origin} records"
            )))
        }
        _ => Ok(()),
    }
}
