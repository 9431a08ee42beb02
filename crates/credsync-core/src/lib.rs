//! credsync-core - Core library for credsync
//!
//! This crate contains the record model and the reconciliation engine used by
//! the `credsync` CLI: key normalization, lookup indexes, the cascading
//! matcher, the three merge directions, conflict resolution, and statistics.
//! CSV import/export adapters and session persistence live here as well so
//! every client renders the same output.

pub mod error;
pub mod export;
pub mod import;
pub mod index;
pub mod matcher;
pub mod merge;
pub mod models;
pub mod normalize;
pub mod resolve;
pub mod session;
pub mod stats;
pub mod util;

pub use error::{Error, Result};
pub use matcher::{find_best_match, MatchOutcome, MatchStrategy};
pub use merge::merge;
pub use models::{
    AuditNote, Conflict, MergeDirection, Origin, OriginCounts, Record, Resolution, Side,
    SyncResult, SyncStats,
};
pub use resolve::{apply_resolutions, resolve_all};
pub use stats::compute_stats;

#[cfg(test)]
pub(crate) mod test_support;
