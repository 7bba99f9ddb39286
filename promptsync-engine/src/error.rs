//! Error types for promptsync-engine.

use std::path::PathBuf;

use thiserror::Error;

use promptsync_transform::TransformError;

/// All errors that can arise while handling a single file event.
///
/// None of these are fatal to the watcher; the engine converts them into
/// `status: error` log entries and keeps going.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A transformer rejected the source content.
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`EngineError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> EngineError {
    EngineError::Io {
        path: path.into(),
        source,
    }
}
