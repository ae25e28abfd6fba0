//! tasklog - durable task tracking in a single JSON file
//!
//! Callers add tasks, complete them, list, look up and delete them. All state
//! lives in one file on disk that is reloaded on every operation.
//!
//! # Core Concepts
//!
//! - **Envelope**: the persisted `TaskList` wrapping tasks plus schema metadata
//! - **Normalization**: coercing loosely-typed JSON into well-formed records,
//!   dropping anything unsalvageable
//! - **Atomic replace**: write to a sibling temp file, then rename over the target
//! - **Quarantine**: renaming an unparseable file aside instead of deleting it
//!
//! # Module Organization
//!
//! - `config`: Store location (data directory and file name)
//! - `error`: Error types and result aliases
//! - `normalize`: Record and envelope normalization
//! - `repository`: Public add/list/complete/get/delete operations
//! - `storage`: File-backed store with atomic writes and quarantine
//! - `task`: Task, status, filter and envelope types

pub mod config;
pub mod error;
pub mod normalize;
pub mod repository;
pub mod storage;
pub mod task;

pub use config::Config;
pub use error::{Error, Result};
pub use repository::TaskRepository;
pub use storage::{Storage, TaskListStore};
pub use task::{Task, TaskFilter, TaskList, TaskStatus};
