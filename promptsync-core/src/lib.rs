//! Promptsync core library — shared domain types.
//!
//! Public API surface:
//! - [`types`] — sync direction, event status, and the activity log record

pub mod types;

pub use types::{SyncDirection, SyncEvent, SyncStatus};
