//! Summary counts over a merge result.

use std::collections::HashSet;

use crate::models::{Origin, Record, SyncResult, SyncStats};

/// Derive [`SyncStats`] from a result; no state beyond the result is read.
///
/// A merged entry is unique to its origin when the merge did not pair it and
/// no entry of the other origin shares its exact key.
#[must_use]
pub fn compute_stats(result: &SyncResult) -> SyncStats {
    let resolved_conflicts = result
        .conflicts
        .iter()
        .filter(|conflict| conflict.resolved)
        .count();

    SyncStats {
        apple_count: result.source_counts.get(Origin::Apple),
        google_count: result.source_counts.get(Origin::Google),
        merged_count: result.merged.len(),
        matched_pairs: result.merged.iter().filter(|record| record.was_paired()).count(),
        conflict_count: result.conflicts.len(),
        resolved_conflicts,
        unresolved_conflicts: result.conflicts.len() - resolved_conflicts,
        unique_from_apple: unique_count(&result.merged, Origin::Apple),
        unique_from_google: unique_count(&result.merged, Origin::Google),
    }
}

fn unique_count(merged: &[Record], origin: Origin) -> usize {
    let other_keys = merged
        .iter()
        .filter(|record| record.origin == origin.other())
        .map(Record::exact_key)
        .collect::<HashSet<String>>();

    merged
        .iter()
        .filter(|record| record.origin == origin)
        .filter(|record| !record.was_paired())
        .filter(|record| !other_keys.contains(&record.exact_key()))
        .count()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::merge::merge;
    use crate::models::MergeDirection;
    use crate::test_support::{apple, google};

    #[test]
    fn stats_count_inputs_conflicts_and_unique_entries() {
        let left = vec![
            apple(0, "https://example.com", "bob", "x1"),
            apple(1, "a.com", "carol", "p"),
            apple(2, "only-apple.com", "erin", "e"),
        ];
        let right = vec![
            google(0, "example.com/", "Bob", "x2"),
            google(1, "www.a.com", "carol", "p"),
            google(2, "only-google.com", "gina", "g"),
            google(3, "also-google.com", "hank", "h"),
        ];

        let result = merge(&left, &right, MergeDirection::Bidirectional).unwrap();

        assert_eq!(
            compute_stats(&result),
            SyncStats {
                apple_count: 3,
                google_count: 4,
                merged_count: 5,
                matched_pairs: 2,
                conflict_count: 1,
                resolved_conflicts: 0,
                unresolved_conflicts: 1,
                unique_from_apple: 1,
                unique_from_google: 2,
            }
        );
    }

    #[test]
    fn stats_follow_source_counts_when_inputs_are_swapped() {
        let left = vec![google(0, "b.com", "dan", "p")];
        let result = merge(&left, &[], MergeDirection::Bidirectional).unwrap();
        let stats = compute_stats(&result);

        assert_eq!(stats.google_count, 1);
        assert_eq!(stats.apple_count, 0);
        assert_eq!(stats.unique_from_google, 1);
    }

    #[test]
    fn directional_targets_are_not_unique_once_paired() {
        let left = vec![apple(0, "a.com", "carol", "p")];
        let right = vec![google(0, "a.com", "carol", "p")];

        let result = merge(&left, &right, MergeDirection::AToB).unwrap();
        let stats = compute_stats(&result);

        assert_eq!(stats.merged_count, 1);
        assert_eq!(stats.unique_from_apple, 0);
        assert_eq!(stats.unique_from_google, 0);
    }

    #[test]
    fn stats_are_stored_on_the_result() {
        let left = vec![apple(0, "a.com", "carol", "p")];
        let result = merge(&left, &[], MergeDirection::BToA).unwrap();
        assert_eq!(result.stats, compute_stats(&result));
    }
}
