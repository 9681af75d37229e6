//! File log of dispatch decisions.
//!
//! Each process writes one file, `~/.evchain/logs/evchain_<timestamp>.log`.
//! Until `init` succeeds every call here is a no-op, which keeps tests and
//! read-only environments quiet.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Local;
use once_cell::sync::Lazy;

use crate::events::Event;
use crate::handlers::Dispatch;

static LOG_FILE: Lazy<Mutex<Option<File>>> = Lazy::new(|| Mutex::new(None));

fn default_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".evchain")
        .join("logs")
}

/// Open a fresh log file in the default directory.
pub fn init() -> io::Result<PathBuf> {
    init_in(&default_dir())
}

/// Open a fresh log file in `dir`, replacing any file opened earlier.
pub fn init_in(dir: &Path) -> io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;

    let name = format!("evchain_{}.log", Local::now().format("%Y%m%d_%H%M%S"));
    let path = dir.join(name);
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&path)?;

    if let Ok(mut guard) = LOG_FILE.lock() {
        *guard = Some(file);
    }
    log("=== evchain started ===");

    Ok(path)
}

pub fn log(msg: &str) {
    let line = format!("[{}] {}\n", Local::now().format("%H:%M:%S%.3f"), msg);

    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(file) = guard.as_mut() {
            let _ = file.write_all(line.as_bytes()).and_then(|_| file.flush());
        }
    }
}

fn dispatch_line(event: &Event, dispatch: Dispatch) -> String {
    match dispatch {
        Dispatch::Consumed(kind) => format!("[DISPATCH] {} -> {} handler", event, kind),
        Dispatch::Discarded => format!("[DISPATCH] {} -> discarded", event),
    }
}

/// Record where an event ended up.
pub fn log_dispatch(event: &Event, dispatch: Dispatch) {
    log(&dispatch_line(event, dispatch));
}

/// Record an event seen by a debug handler.
pub fn log_debug(event: &Event) {
    log(&format!("[DEBUG] {}", event));
}
