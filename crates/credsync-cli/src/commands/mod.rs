pub mod common;
pub mod completions;
pub mod config;
pub mod conflicts;
pub mod export;
pub mod merge;
pub mod resolve;
pub mod stats;
