//! Promptsync daemon runtime: filesystem watcher + per-event dispatch.

mod error;
mod runtime;

pub use error::DaemonError;
pub use runtime::{run, start_blocking, EventSink, DEBOUNCE_WINDOW};
