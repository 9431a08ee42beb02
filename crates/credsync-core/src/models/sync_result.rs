//! Merge output model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::{Conflict, Origin, Record};
use crate::Error;

/// Which collection is authoritative during a merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MergeDirection {
    /// Merge both collections; the left record wins a conflict
    #[default]
    #[serde(rename = "bidirectional")]
    Bidirectional,
    /// Add missing left records into the right collection
    #[serde(rename = "a-to-b")]
    AToB,
    /// Add missing right records into the left collection
    #[serde(rename = "b-to-a")]
    BToA,
}

impl MergeDirection {
    pub const ALL: [Self; 3] = [Self::Bidirectional, Self::AToB, Self::BToA];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bidirectional => "bidirectional",
            Self::AToB => "a-to-b",
            Self::BToA => "b-to-a",
        }
    }
}

impl fmt::Display for MergeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MergeDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|direction| direction.as_str() == value)
            .ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "unknown merge direction '{}' (expected bidirectional, a-to-b or b-to-a)",
                    s.trim()
                ))
            })
    }
}

/// Number of input records per exporter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginCounts {
    pub apple: usize,
    pub google: usize,
}

impl OriginCounts {
    /// Count records by their origin tag
    pub fn tally<'a>(records: impl IntoIterator<Item = &'a Record>) -> Self {
        records
            .into_iter()
            .fold(Self::default(), |mut counts, record| {
                match record.origin {
                    Origin::Apple => counts.apple += 1,
                    Origin::Google => counts.google += 1,
                }
                counts
            })
    }

    #[must_use]
    pub const fn get(&self, origin: Origin) -> usize {
        match origin {
            Origin::Apple => self.apple,
            Origin::Google => self.google,
        }
    }
}

/// Summary counts derived from a [`SyncResult`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncStats {
    pub apple_count: usize,
    pub google_count: usize,
    pub merged_count: usize,
    pub matched_pairs: usize,
    pub conflict_count: usize,
    pub resolved_conflicts: usize,
    pub unresolved_conflicts: usize,
    pub unique_from_apple: usize,
    pub unique_from_google: usize,
}

/// Output of one merge invocation.
///
/// Merged ids are unique and stable only within one instance; merging again
/// renumbers them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncResult {
    pub direction: MergeDirection,
    pub source_counts: OriginCounts,
    pub merged: Vec<Record>,
    pub conflicts: Vec<Conflict>,
    pub stats: SyncStats,
}

impl SyncResult {
    /// Look up a conflict by id
    #[must_use]
    pub fn conflict(&self, id: &str) -> Option<&Conflict> {
        self.conflicts.iter().find(|conflict| conflict.id == id)
    }

    /// Conflicts still waiting for a decision, in creation order
    pub fn unresolved_conflicts(&self) -> impl Iterator<Item = &Conflict> {
        self.conflicts.iter().filter(|conflict| !conflict.resolved)
    }

    /// True once every conflict carries a decision
    #[must_use]
    pub fn is_fully_resolved(&self) -> bool {
        self.conflicts.iter().all(|conflict| conflict.resolved)
    }
}
