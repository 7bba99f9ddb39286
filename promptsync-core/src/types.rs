//! Domain types shared between the sync engine, the daemon, and the CLI.
//!
//! [`SyncEvent`] is the one record that crosses the presentation boundary;
//! everything in here is serializable via serde.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SyncDirection
// ---------------------------------------------------------------------------

/// One of the two halves of the bidirectional mapping.
///
/// Each variant permanently binds a source extension and a target extension;
/// there is no third direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SyncDirection {
    /// `.gemini/commands/*.toml` → `.agent/workflows/*.md`
    TomlToMd,
    /// `.agent/workflows/*.md` → `.gemini/commands/*.toml`
    MdToToml,
}

impl SyncDirection {
    /// File extension (without dot) a source file must carry.
    pub fn source_ext(self) -> &'static str {
        match self {
            SyncDirection::TomlToMd => "toml",
            SyncDirection::MdToToml => "md",
        }
    }

    /// File extension (without dot) the paired target file gets.
    pub fn target_ext(self) -> &'static str {
        match self {
            SyncDirection::TomlToMd => "md",
            SyncDirection::MdToToml => "toml",
        }
    }
}

impl fmt::Display for SyncDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncDirection::TomlToMd => write!(f, "TOML->MD"),
            SyncDirection::MdToToml => write!(f, "MD->TOML"),
        }
    }
}

// ---------------------------------------------------------------------------
// SyncStatus
// ---------------------------------------------------------------------------

/// Outcome of handling a single file event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    /// Transformed content was written to the target path.
    Success,
    /// The event was handled but something failed; see the message.
    Error,
    /// Target already held identical content; the write was suppressed.
    Skipped,
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncStatus::Success => write!(f, "success"),
            SyncStatus::Error => write!(f, "error"),
            SyncStatus::Skipped => write!(f, "skipped"),
        }
    }
}

// ---------------------------------------------------------------------------
// SyncEvent
// ---------------------------------------------------------------------------

static NEXT_EVENT_ID: AtomicU64 = AtomicU64::new(1);

/// Immutable activity log record emitted once per handled file event.
///
/// Ids are process-wide and strictly increasing; timestamps are UTC.
/// The presentation layer owns the bounded history these land in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncEvent {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub direction: SyncDirection,
    pub filename: String,
    pub status: SyncStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SyncEvent {
    /// Stamp a new record with the next sequence id and the current time.
    pub fn record(
        direction: SyncDirection,
        filename: impl Into<String>,
        status: SyncStatus,
        message: Option<String>,
    ) -> Self {
        Self {
            id: NEXT_EVENT_ID.fetch_add(1, Ordering::Relaxed),
            timestamp: Utc::now(),
            direction,
            filename: filename.into(),
            status,
            message,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
