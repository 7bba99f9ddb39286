//! Activity log presentation: bounded history plus colored line rendering.
//!
//! The log owns the most recent [`ActivityLog::CAPACITY`] events, newest
//! first; older entries are evicted. Rendering is one line per event:
//! dimmed local-time timestamp, direction tag (blue for TOML→MD, magenta
//! for MD→TOML, red on error), the filename, and an error message or
//! skip marker where applicable.

use std::collections::VecDeque;

use chrono::Local;
use colored::Colorize;

use promptsync_core::{SyncDirection, SyncEvent, SyncStatus};

/// Bounded, newest-first history of sync events.
#[derive(Debug, Default)]
pub struct ActivityLog {
    entries: VecDeque<SyncEvent>,
}

impl ActivityLog {
    pub const CAPACITY: usize = 10;

    pub fn new() -> Self {
        Self::default()
    }

    /// Insert at the front, evicting the oldest entry past capacity.
    pub fn push(&mut self, event: SyncEvent) {
        self.entries.push_front(event);
        self.entries.truncate(Self::CAPACITY);
    }

    /// Entries newest-first.
    pub fn entries(&self) -> impl Iterator<Item = &SyncEvent> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rendered lines for the whole history, newest first.
    pub fn render(&self) -> Vec<String> {
        self.entries.iter().map(format_entry).collect()
    }
}

/// Screen-refresh frame for the current history: an ANSI prefix that moves
/// back over the `previous_lines` of the prior frame and clears them, then
/// the rendered history, newest first. Print with `print!`, not `println!`.
pub fn render_frame(log: &ActivityLog, previous_lines: usize) -> String {
    let mut frame = String::new();
    if previous_lines > 0 {
        frame.push_str(&format!("\x1b[{previous_lines}A\x1b[0J"));
    }
    for line in log.render() {
        frame.push_str(&line);
        frame.push('\n');
    }
    frame
}

/// One colored activity line for an event.
pub fn format_entry(event: &SyncEvent) -> String {
    let timestamp = event
        .timestamp
        .with_timezone(&Local)
        .format("%H:%M:%S")
        .to_string();

    let text = match event.direction {
        SyncDirection::TomlToMd => "TOML -> MD",
        SyncDirection::MdToToml => "MD -> TOML",
    };
    let tag = match (event.status, event.direction) {
        (SyncStatus::Error, _) => text.red().bold(),
        (_, SyncDirection::TomlToMd) => text.blue().bold(),
        (_, SyncDirection::MdToToml) => text.magenta().bold(),
    };

    let mut line = format!(
        "{} {} {}",
        format!("[{timestamp}]").dimmed(),
        tag,
        event.filename
    );

    match event.status {
        SyncStatus::Error => {
            let message = event.message.as_deref().unwrap_or("unknown error");
            line.push(' ');
            line.push_str(&format!("Error: {message}").red().to_string());
        }
        SyncStatus::Skipped => {
            line.push(' ');
            line.push_str(&"(skipped)".yellow().to_string());
        }
        SyncStatus::Success => {}
    }

    line
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
