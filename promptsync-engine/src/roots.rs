//! The static pairing between the two watched roots.
//!
//! Each root is permanently bound to one file extension and one sync
//! direction; classification and target-path derivation are pure lookups
//! against this pairing.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use promptsync_core::SyncDirection;

/// Directory of Format A command files, relative to the watch base.
pub const COMMANDS_DIR: &str = ".gemini/commands";

/// Directory of Format B workflow files, relative to the watch base.
pub const WORKFLOWS_DIR: &str = ".agent/workflows";

/// The two watched roots and the bidirectional mapping between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchRoots {
    pub commands: PathBuf,
    pub workflows: PathBuf,
}

impl WatchRoots {
    /// Roots at their standard locations under `base`.
    pub fn at(base: &Path) -> Self {
        Self {
            commands: base.join(COMMANDS_DIR),
            workflows: base.join(WORKFLOWS_DIR),
        }
    }

    /// Classify an event path into a sync direction.
    ///
    /// A path under the commands root with a `toml` extension syncs
    /// TOML→MD; a path under the workflows root with an `md` extension
    /// syncs MD→TOML. Everything else — wrong extension, wrong root,
    /// no extension — is `None` and must be ignored without any log entry.
    pub fn classify(&self, path: &Path) -> Option<SyncDirection> {
        let ext = path.extension().and_then(OsStr::to_str)?;
        if path.starts_with(&self.commands)
            && ext.eq_ignore_ascii_case(SyncDirection::TomlToMd.source_ext())
        {
            Some(SyncDirection::TomlToMd)
        } else if path.starts_with(&self.workflows)
            && ext.eq_ignore_ascii_case(SyncDirection::MdToToml.source_ext())
        {
            Some(SyncDirection::MdToToml)
        } else {
            None
        }
    }

    /// The root that `direction` writes into.
    pub fn target_root(&self, direction: SyncDirection) -> &Path {
        match direction {
            SyncDirection::TomlToMd => &self.workflows,
            SyncDirection::MdToToml => &self.commands,
        }
    }

    /// Target path for a source file: the other root, same file stem, the
    /// paired extension. Sources in nested directories land at the target
    /// root's top level.
    pub fn target_path(&self, direction: SyncDirection, source: &Path) -> Option<PathBuf> {
        let stem = source.file_stem().and_then(OsStr::to_str)?;
        Some(
            self.target_root(direction)
                .join(format!("{stem}.{}", direction.target_ext())),
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
