//! Per-event sync handling and the checksum-guarded write.
//!
//! ## Guarded write protocol
//!
//! 1. Transform source content (done by caller).
//! 2. If the target exists, read it and compare SHA-256 digests of the
//!    existing vs the new content → skip when identical.
//! 3. Ensure the parent directory exists.
//! 4. Write to `<path>.promptsync.tmp`.
//! 5. Rename to the final path (atomic on POSIX).
//!
//! Step 2 is what prevents write loops: the write a sync performs raises a
//! change event on the other root, whose re-transform produces content
//! identical to the file that triggered it, so the echo lands on the guard
//! and stops there.

use std::fs;
use std::path::{Path, PathBuf};

use promptsync_core::{SyncDirection, SyncEvent, SyncStatus};
use promptsync_transform::{markdown_to_toml, toml_to_markdown};

use crate::checksum::checksum;
use crate::error::{io_err, EngineError};
use crate::roots::WatchRoots;

/// Outcome of an individual guarded write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Target was written (content changed or did not previously exist).
    Written { path: PathBuf },
    /// Target already held identical content; nothing was written.
    Skipped { path: PathBuf },
}

/// Handle one filesystem event.
///
/// Returns `None` when the path belongs to neither watched root (silent
/// ignore). Otherwise runs read → transform → guard → write and reports
/// the outcome as a [`SyncEvent`]; per-file failures become `error`
/// events, never panics.
pub fn sync_path(roots: &WatchRoots, path: &Path) -> Option<SyncEvent> {
    let direction = roots.classify(path)?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let event = match sync_file(roots, direction, path) {
        Ok(WriteOutcome::Written { .. }) => {
            SyncEvent::record(direction, filename, SyncStatus::Success, None)
        }
        Ok(WriteOutcome::Skipped { .. }) => SyncEvent::record(
            direction,
            filename,
            SyncStatus::Skipped,
            Some("identical content".to_string()),
        ),
        Err(err) => SyncEvent::record(direction, filename, SyncStatus::Error, Some(err.to_string())),
    };
    Some(event)
}

fn sync_file(
    roots: &WatchRoots,
    direction: SyncDirection,
    path: &Path,
) -> Result<WriteOutcome, EngineError> {
    let source = fs::read_to_string(path).map_err(|e| io_err(path, e))?;

    let converted = match direction {
        SyncDirection::TomlToMd => toml_to_markdown(&source)?,
        SyncDirection::MdToToml => markdown_to_toml(&source)?,
    };

    let target = roots.target_path(direction, path).ok_or_else(|| {
        io_err(path, std::io::Error::other("source path has no usable file stem"))
    })?;

    guarded_write(&target, &converted)
}

/// Write `content` to `target` unless the file already holds it.
pub fn guarded_write(target: &Path, content: &str) -> Result<WriteOutcome, EngineError> {
    if target.exists() {
        let existing = fs::read_to_string(target).map_err(|e| io_err(target, e))?;
        if checksum(&existing) == checksum(content) {
            tracing::debug!("unchanged: {}", target.display());
            return Ok(WriteOutcome::Skipped {
                path: target.to_path_buf(),
            });
        }
    }

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }

    let tmp = PathBuf::from(format!("{}.promptsync.tmp", target.display()));
    fs::write(&tmp, content).map_err(|e| io_err(&tmp, e))?;
    if let Err(e) = fs::rename(&tmp, target) {
        let _ = fs::remove_file(&tmp);
        return Err(io_err(target, e));
    }

    tracing::info!("wrote: {}", target.display());
    Ok(WriteOutcome::Written {
        path: target.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
