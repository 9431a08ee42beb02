//! Data models for credsync

mod conflict;
mod record;
mod sync_result;

pub use conflict::{Conflict, Resolution, Side};
pub use record::{AuditNote, Origin, Record};
pub use sync_result::{MergeDirection, OriginCounts, SyncResult, SyncStats};
