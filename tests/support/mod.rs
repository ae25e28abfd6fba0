#![allow(dead_code)]

use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};

use tasklog::storage::{Storage, TaskListStore};
use tasklog::{Result, TaskList, TaskRepository};
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

/// Install a test-writer subscriber; opt in to output with `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Storage wrapper counting how many saves reach the file
pub struct CountingStore {
    inner: Storage,
    saves: Cell<usize>,
}

impl CountingStore {
    pub fn new(inner: Storage) -> Self {
        Self {
            inner,
            saves: Cell::new(0),
        }
    }

    pub fn saves(&self) -> usize {
        self.saves.get()
    }

    pub fn inner(&self) -> &Storage {
        &self.inner
    }
}

impl TaskListStore for CountingStore {
    fn load(&self) -> TaskList {
        self.inner.load()
    }

    fn save(&self, list: &TaskList) -> Result<()> {
        self.saves.set(self.saves.get() + 1);
        self.inner.save(list)
    }
}

/// Isolated store directory that is removed on drop
pub struct TestStore {
    dir: TempDir,
    storage: Storage,
}

impl TestStore {
    pub fn new() -> Self {
        init_tracing();
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let storage = Storage::in_dir(dir.path().join("data")).expect("storage");
        Self { dir, storage }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn storage(&self) -> Storage {
        self.storage.clone()
    }

    pub fn file_path(&self) -> &Path {
        self.storage.file_path()
    }

    pub fn repo(&self) -> TaskRepository {
        TaskRepository::new(self.storage())
    }

    pub fn counting_repo(&self) -> TaskRepository<CountingStore> {
        TaskRepository::new(CountingStore::new(self.storage()))
    }

    pub fn write_raw(&self, contents: &str) {
        fs::create_dir_all(self.storage.data_dir()).expect("create data dir");
        fs::write(self.file_path(), contents).expect("write task file");
    }

    pub fn read_raw(&self) -> String {
        fs::read_to_string(self.file_path()).expect("read task file")
    }

    pub fn read_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.read_raw()).expect("task file is valid JSON")
    }

    /// Files next to the task file whose names end with `suffix`
    pub fn siblings_with_suffix(&self, suffix: &str) -> Vec<PathBuf> {
        let mut found: Vec<PathBuf> = fs::read_dir(self.storage.data_dir())
            .expect("read data dir")
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.ends_with(suffix))
            })
            .collect();
        found.sort();
        found
    }
}
