//! Promptsync — bidirectional TOML↔Markdown command sync daemon.
//!
//! # Usage
//!
//! ```text
//! promptsync
//! ```
//!
//! Runs in the foreground, watching `.gemini/commands/` and
//! `.agent/workflows/` under the current directory. Edits to either side
//! propagate to the other; press ctrl-c to exit.

mod activity;

use std::io::{self, Write};
use std::thread;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tokio::sync::mpsc;

use activity::{render_frame, ActivityLog};
use promptsync_core::SyncEvent;

#[derive(Parser, Debug)]
#[command(
    name = "promptsync",
    version,
    about = "Keep Gemini command files and agent workflow files in sync",
    long_about = None,
)]
struct Cli {}

fn main() -> Result<()> {
    let _cli = Cli::parse();

    let base = std::env::current_dir().context("could not determine working directory")?;

    let (events_tx, events_rx) = mpsc::unbounded_channel::<SyncEvent>();
    let render_handle = thread::spawn(move || render_loop(events_rx));

    promptsync_daemon::start_blocking(&base, events_tx).context("daemon exited with error")?;

    // The daemon dropped the sender on shutdown; the render thread drains
    // remaining events and exits.
    if render_handle.join().is_err() {
        anyhow::bail!("render thread panicked");
    }
    Ok(())
}

fn render_loop(mut events: mpsc::UnboundedReceiver<SyncEvent>) {
    println!("{}", "promptsync".green().bold());
    println!("{}", "watching .gemini/commands and .agent/workflows".dimmed());
    println!("{}", "press ctrl-c to exit".dimmed());

    let mut log = ActivityLog::new();
    let mut rendered_lines = 0usize;
    while let Some(event) = events.blocking_recv() {
        log.push(event);
        print!("{}", render_frame(&log, rendered_lines));
        let _ = io::stdout().flush();
        rendered_lines = log.len();
    }
}
