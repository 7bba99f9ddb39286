use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{recommended_watcher, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::{broadcast, mpsc};
use tokio::time::Instant;

use promptsync_core::SyncEvent;
use promptsync_engine::{sync_path, WatchRoots};

use crate::error::{io_err, DaemonError};

/// Window inside which repeat events for one path collapse to one sync.
///
/// Leading edge wins: the first event of a burst dispatches and the rest
/// are dropped, so a write landing late in the window stays unsynced until
/// the next event on that path.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

/// Where handled sync outcomes are delivered. Unbounded so the engine is
/// never blocked by a slow or absent display.
pub type EventSink = mpsc::UnboundedSender<SyncEvent>;

/// Start the daemon runtime and block the current thread until it exits.
pub fn start_blocking(base: &Path, events: EventSink) -> Result<(), DaemonError> {
    init_tracing();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| io_err("tokio-runtime", e))?;
    runtime.block_on(run(base.to_path_buf(), events))
}

/// Run the daemon runtime until ctrl-c or watcher failure.
pub async fn run(base: PathBuf, events: EventSink) -> Result<(), DaemonError> {
    let roots = ensure_watch_roots(&base)?;
    tracing::info!(
        commands = %roots.commands.display(),
        workflows = %roots.workflows.display(),
        "watching",
    );

    let (shutdown_tx, _) = broadcast::channel::<()>(16);

    let watcher_handle = {
        let shutdown = shutdown_tx.clone();
        let events = events.clone();
        tokio::spawn(async move {
            let result = watcher_task(roots, events, shutdown.subscribe()).await;
            let _ = shutdown.send(());
            result
        })
    };

    let signal_handle = {
        let shutdown = shutdown_tx.clone();
        tokio::spawn(async move {
            let mut shutdown_rx = shutdown.subscribe();
            tokio::select! {
                _ = shutdown_rx.recv() => Ok(()),
                signal = tokio::signal::ctrl_c() => {
                    match signal {
                        Ok(()) => {
                            tracing::info!("received ctrl-c, shutting down");
                            let _ = shutdown.send(());
                            Ok(())
                        }
                        Err(err) => Err(DaemonError::Task(format!("ctrl-c handler failed: {err}"))),
                    }
                }
            }
        })
    };

    let (watcher_result, signal_result) = tokio::join!(watcher_handle, signal_handle);
    handle_join("watcher", watcher_result)?;
    handle_join("signal_handler", signal_result)?;
    Ok(())
}

async fn watcher_task(
    roots: WatchRoots,
    events: EventSink,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> Result<(), DaemonError> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<notify::Result<Event>>();
    let mut watcher: RecommendedWatcher = recommended_watcher(move |event| {
        let _ = event_tx.send(event);
    })?;
    watcher.watch(&roots.commands, RecursiveMode::Recursive)?;
    watcher.watch(&roots.workflows, RecursiveMode::Recursive)?;

    // Initial pass: files that appeared while the daemon was down still
    // get synced before live events are consumed.
    for path in existing_files(&roots)? {
        dispatch(roots.clone(), path, events.clone());
    }

    let mut debounce = HashMap::<PathBuf, Instant>::new();

    loop {
        tokio::select! {
            _ = shutdown_rx.recv() => break,
            event = event_rx.recv() => {
                let Some(event) = event else { break };
                let event = match event {
                    Ok(event) => event,
                    Err(err) => {
                        tracing::warn!(error = %err, "watcher event error");
                        continue;
                    }
                };
                if !is_relevant_event_kind(&event.kind) {
                    continue;
                }

                for path in event.paths {
                    // Cheap pre-filter; the engine classifies again before
                    // acting, so a false positive here costs nothing.
                    if roots.classify(&path).is_none() {
                        continue;
                    }
                    if !should_process_event(&mut debounce, &path, Instant::now()) {
                        continue;
                    }
                    dispatch(roots.clone(), path, events.clone());
                }
            }
        }
    }

    Ok(())
}

/// Handle one path on its own task so a slow handler never blocks the
/// event loop. Two racing events on the same target are last-write-wins.
fn dispatch(roots: WatchRoots, path: PathBuf, events: EventSink) {
    tokio::spawn(async move {
        let handled = tokio::task::spawn_blocking(move || sync_path(&roots, &path)).await;
        match handled {
            Ok(Some(event)) => {
                // A closed sink means the display went away; not our problem.
                let _ = events.send(event);
            }
            Ok(None) => {}
            Err(err) => tracing::error!(error = %err, "sync task join failure"),
        }
    });
}

/// Create both watched roots if absent, then canonicalize so watcher event
/// paths (which arrive as real paths, e.g. `/private/var/...` on macOS)
/// match the prefix checks in classification.
fn ensure_watch_roots(base: &Path) -> Result<WatchRoots, DaemonError> {
    let roots = WatchRoots::at(base);
    for root in [&roots.commands, &roots.workflows] {
        if !root.exists() {
            fs::create_dir_all(root).map_err(|e| io_err(root, e))?;
        }
    }
    Ok(WatchRoots {
        commands: fs::canonicalize(&roots.commands).unwrap_or(roots.commands),
        workflows: fs::canonicalize(&roots.workflows).unwrap_or(roots.workflows),
    })
}

/// Breadth-first walk of both roots, returning every file found.
fn existing_files(roots: &WatchRoots) -> Result<Vec<PathBuf>, DaemonError> {
    let mut files = Vec::new();
    let mut dirs = vec![roots.commands.clone(), roots.workflows.clone()];
    let mut cursor = 0;
    while cursor < dirs.len() {
        let current = dirs[cursor].clone();
        cursor += 1;
        let entries = match fs::read_dir(&current) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => continue,
            Err(err) => return Err(io_err(&current, err)),
        };
        for entry in entries {
            let entry = entry.map_err(|e| io_err(&current, e))?;
            let ty = entry.file_type().map_err(|e| io_err(entry.path(), e))?;
            if ty.is_dir() {
                dirs.push(entry.path());
            } else {
                files.push(entry.path());
            }
        }
    }
    files.sort();
    Ok(files)
}

fn is_relevant_event_kind(kind: &EventKind) -> bool {
    matches!(kind, EventKind::Create(_) | EventKind::Modify(_))
}

fn should_process_event(
    debounce: &mut HashMap<PathBuf, Instant>,
    path: &Path,
    now: Instant,
) -> bool {
    should_process_event_with_threshold(debounce, path, now, DEBOUNCE_WINDOW)
}

fn should_process_event_with_threshold(
    debounce: &mut HashMap<PathBuf, Instant>,
    path: &Path,
    now: Instant,
    threshold: Duration,
) -> bool {
    debounce.retain(|_, seen_at| now.duration_since(*seen_at) <= Duration::from_secs(30));
    match debounce.get(path) {
        Some(last_seen) if now.duration_since(*last_seen) < threshold => false,
        _ => {
            debounce.insert(path.to_path_buf(), now);
            true
        }
    }
}

fn handle_join(
    task: &str,
    result: Result<Result<(), DaemonError>, tokio::task::JoinError>,
) -> Result<(), DaemonError> {
    match result {
        Ok(inner) => inner,
        Err(err) => Err(DaemonError::Task(format!("{task} task join failure: {err}"))),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}
