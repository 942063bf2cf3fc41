//! Append-only record of unit labels the normalizer could not classify.
//!
//! The file is consumed offline to extend the unit table.

use parking_lot::Mutex;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Side channel receiving unclassified unit labels
pub trait UnknownUnitLog: Send + Sync + std::fmt::Debug {
    /// Record one label. Never fails the caller.
    fn record(&self, label: &str);
}

/// File-backed log, one label per line
#[derive(Debug)]
pub struct FileUnknownUnitLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileUnknownUnitLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, label: &str) -> std::io::Result<()> {
        let _guard = self.write_lock.lock();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{label}")
    }
}

impl UnknownUnitLog for FileUnknownUnitLog {
    fn record(&self, label: &str) {
        info!(unit = %label, path = %self.path.display(), "Saving not found unit");
        if let Err(e) = self.append(label) {
            warn!(
                unit = %label,
                path = %self.path.display(),
                error = %e,
                "Failed to append unknown unit"
            );
        }
    }
}

/// In-memory log, inspectable from tests
#[derive(Debug, Default)]
pub struct InMemoryUnknownUnitLog {
    entries: Mutex<Vec<String>>,
}

impl InMemoryUnknownUnitLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }
}

impl UnknownUnitLog for InMemoryUnknownUnitLog {
    fn record(&self, label: &str) {
        self.entries.lock().push(label.to_string());
    }
}
