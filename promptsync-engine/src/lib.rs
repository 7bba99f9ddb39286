//! # promptsync-engine
//!
//! Checksum-guarded sync engine: classifies a changed file against the two
//! watched roots, runs the matching transformer, and writes the result to
//! the paired location unless the target already holds identical content.
//!
//! Call [`sync_path`] once per filesystem event; it returns `None` for
//! files that belong to neither root (silent ignore) and a [`SyncEvent`]
//! describing the outcome otherwise.

pub mod checksum;
pub mod engine;
pub mod error;
pub mod roots;

pub use engine::{sync_path, WriteOutcome};
pub use error::EngineError;
pub use roots::WatchRoots;
