//! Storage layer for tasklog
//!
//! One JSON file holds the whole task list envelope:
//!
//! ```text
//! data/                                   # Config::data_dir
//!   tasks.json                            # Current envelope
//!   tasks.json.<uuid>.tmp                 # Transient, only during a save
//!   tasks.json.<timestamp>.corrupted      # Quarantined unparseable file
//! ```
//!
//! Reads never fail: a missing, empty or unparseable file loads as an empty
//! list, and an unparseable one is renamed aside first. Writes go to a unique
//! temp file in the same directory and are renamed over the target, so a
//! reader sees either the previous complete file or the new one.

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;
use uuid::Uuid;

use crate::config::{Config, DEFAULT_FILE_NAME};
use crate::error::Result;
use crate::normalize::normalize_task_list;
use crate::task::{timestamp, TaskList, SCHEMA_VERSION};

/// Load/save seam between the repository and the backing medium
pub trait TaskListStore {
    /// Current envelope. Storage anomalies degrade to an empty list.
    fn load(&self) -> TaskList;

    /// Persist `list`, replacing whatever was stored before.
    fn save(&self, list: &TaskList) -> Result<()>;
}

/// File-backed task list store
#[derive(Debug, Clone)]
pub struct Storage {
    data_dir: PathBuf,
    file_path: PathBuf,
}

impl Storage {
    /// Store at `data_dir/file_name`
    pub fn new(data_dir: impl Into<PathBuf>, file_name: impl Into<String>) -> Result<Self> {
        let config = Config::default()
            .with_data_dir(data_dir)
            .with_file_name(file_name);
        Self::from_config(&config)
    }

    /// Store at `data_dir/tasks.json`
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Result<Self> {
        Self::new(data_dir, DEFAULT_FILE_NAME)
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let file_path = config.file_path()?;
        let data_dir = config.resolved_data_dir()?;
        Ok(Self {
            data_dir,
            file_path,
        })
    }

    // =========================================================================
    // Path accessors
    // =========================================================================

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path to the backing task file
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    // =========================================================================
    // Load path
    // =========================================================================

    fn ensure_data_dir(&self) -> io::Result<()> {
        fs::create_dir_all(&self.data_dir)
    }

    fn read_envelope(&self) -> TaskList {
        let bytes = match fs::read(&self.file_path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return TaskList::empty(),
            Err(err) => {
                tracing::warn!(path = %self.file_path.display(), error = %err, "task file unreadable");
                self.quarantine();
                return TaskList::empty();
            }
        };

        let text = match std::str::from_utf8(&bytes) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(path = %self.file_path.display(), error = %err, "task file is not valid UTF-8");
                self.quarantine();
                return TaskList::empty();
            }
        };

        if is_blank(text) {
            return TaskList::empty();
        }

        match serde_json::from_str::<Value>(text) {
            Ok(value) => normalize_task_list(&value),
            Err(err) => {
                tracing::warn!(path = %self.file_path.display(), error = %err, "task file is not valid JSON");
                self.quarantine();
                TaskList::empty()
            }
        }
    }

    /// Move the current file aside as `<file>.<timestamp>.corrupted`.
    ///
    /// Returns the quarantine path on success. A failed rename is logged and
    /// otherwise ignored.
    pub fn quarantine(&self) -> Option<PathBuf> {
        if fs::symlink_metadata(&self.file_path).is_err() {
            return None;
        }

        let target = quarantine_path(&self.file_path, &timestamp());
        match fs::rename(&self.file_path, &target) {
            Ok(()) => {
                tracing::warn!(
                    path = %self.file_path.display(),
                    quarantine = %target.display(),
                    "quarantined corrupted task file"
                );
                Some(target)
            }
            Err(err) => {
                tracing::warn!(
                    path = %self.file_path.display(),
                    error = %err,
                    "failed to quarantine corrupted task file"
                );
                None
            }
        }
    }

    // =========================================================================
    // Save path
    // =========================================================================

    /// Normalized, stamped snapshot of `list` as it would be written
    pub fn snapshot(list: &TaskList) -> Result<TaskList> {
        let mut snapshot = normalize_task_list(&serde_json::to_value(list)?);
        snapshot.version = SCHEMA_VERSION.to_string();
        snapshot.last_modified = timestamp();
        Ok(snapshot)
    }

    /// Serialized file contents: two-space indented JSON plus trailing newline
    pub fn render(snapshot: &TaskList) -> Result<String> {
        let mut json = serde_json::to_string_pretty(snapshot)?;
        json.push('\n');
        Ok(json)
    }
}

impl TaskListStore for Storage {
    fn load(&self) -> TaskList {
        if let Err(err) = self.ensure_data_dir() {
            tracing::warn!(dir = %self.data_dir.display(), error = %err, "cannot create data directory");
        }

        let list = self.read_envelope();
        tracing::debug!(path = %self.file_path.display(), tasks = list.tasks.len(), "loaded task list");
        list
    }

    fn save(&self, list: &TaskList) -> Result<()> {
        self.ensure_data_dir()?;

        let snapshot = Self::snapshot(list)?;
        let json = Self::render(&snapshot)?;
        write_atomic(&self.file_path, json.as_bytes())?;

        tracing::debug!(path = %self.file_path.display(), tasks = snapshot.tasks.len(), "saved task list");
        Ok(())
    }
}

/// Empty or whitespace-only contents, a leading byte order mark included
fn is_blank(text: &str) -> bool {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
        .is_empty()
}

// =============================================================================
// Atomic write helpers
// =============================================================================

/// Sibling quarantine path: `<path>.<timestamp with ':' replaced>.corrupted`
pub fn quarantine_path(path: &Path, stamp: &str) -> PathBuf {
    with_suffix(path, &format!(".{}.corrupted", stamp.replace(':', "-")))
}

/// Fresh sibling temp path: `<path>.<uuid>.tmp`
pub fn temp_path(path: &Path) -> PathBuf {
    with_suffix(path, &format!(".{}.tmp", Uuid::new_v4().simple()))
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Write `data` to a new temp file next to `path` and flush it to disk.
///
/// The target itself is untouched until [`commit_temp`] runs.
pub fn stage_temp(path: &Path, data: &[u8]) -> Result<PathBuf> {
    let temp = temp_path(path);
    let written = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&temp)
        .and_then(|mut file| {
            file.write_all(data)?;
            file.sync_all()
        });

    if let Err(err) = written {
        let _ = fs::remove_file(&temp);
        return Err(err.into());
    }
    Ok(temp)
}

/// Rename a staged temp file over `path`
pub fn commit_temp(temp: &Path, path: &Path) -> Result<()> {
    if let Err(err) = fs::rename(temp, path) {
        let _ = fs::remove_file(temp);
        return Err(err.into());
    }
    Ok(())
}

/// Write data atomically using temp file + rename in the same directory
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let temp = stage_temp(path, data)?;
    commit_temp(&temp, path)
}
