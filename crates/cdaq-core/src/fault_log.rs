//! Process-wide append-only fault log.
//!
//! Swallowed read faults are recorded here so the "never crash the read
//! loop" policy leaves a trace. One line per failure:
//!
//! ```text
//! 2024-05-17 14:03:21 - Error occurred: driver read fault: buffer overrun
//! ```
//!
//! The file is a shared append target: several sessions may fault at once,
//! so writers take a lock and emit the whole line in a single `write_all`.
//! Recording never fails; if the file itself cannot be written the failure
//! is reported through `tracing` and dropped.

use chrono::Local;
use parking_lot::Mutex;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

const LOG_FILE_NAME: &str = "error_log.txt";

/// Timestamped, line-atomic, append-only error log.
#[derive(Debug)]
pub struct FaultLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FaultLog {
    /// Log next to the running executable (`<exe dir>/error_log.txt`).
    pub fn new() -> Self {
        Self::at_path(Self::default_path())
    }

    /// Log at an explicit path. Tests point this at a temp directory.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Parent directory of the running executable, falling back to the
    /// working directory when the executable path cannot be resolved.
    pub fn default_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
            .join(LOG_FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one timestamped failure line. Never fails.
    pub fn record(&self, message: &str) {
        let line = format!(
            "{} - Error occurred: {}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            message
        );

        let _guard = self.lock.lock();
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(line.as_bytes()));

        if let Err(err) = result {
            tracing::error!(path = %self.path.display(), %err, "failed to append to fault log");
        }
    }
}

impl Default for FaultLog {
    fn default() -> Self {
        Self::new()
    }
}
