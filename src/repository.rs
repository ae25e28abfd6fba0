//! Public task operations.
//!
//! Every call loads the list fresh from the store, mutates it in memory and
//! saves only when something changed. Nothing is cached between calls, so two
//! repositories over the same file stay consistent as long as calls do not
//! overlap. Overlapping writers race: last save wins.

use uuid::Uuid;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::storage::{Storage, TaskListStore};
use crate::task::{timestamp, Task, TaskFilter, TaskStatus, MAX_DESCRIPTION_LENGTH};

pub struct TaskRepository<S = Storage> {
    store: S,
}

impl TaskRepository<Storage> {
    /// Repository over the file described by `config`
    pub fn open(config: &Config) -> Result<Self> {
        Ok(Self::new(Storage::from_config(config)?))
    }
}

impl<S: TaskListStore> TaskRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create a pending task and persist it.
    pub fn add(&self, description: &str, created_by: &str) -> Result<Task> {
        let description = description.trim();
        let created_by = created_by.trim();

        if description.is_empty() {
            return Err(Error::validation("Task description cannot be empty."));
        }
        if description.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(Error::validation(format!(
                "Task description must be {MAX_DESCRIPTION_LENGTH} characters or less."
            )));
        }
        if created_by.is_empty() {
            return Err(Error::validation("createdBy must be provided."));
        }

        let mut list = self.store.load();
        let task = Task {
            id: Uuid::new_v4().to_string(),
            description: description.to_string(),
            status: TaskStatus::Pending,
            created_at: timestamp(),
            created_by: created_by.to_string(),
            completed_at: None,
        };
        list.tasks.push(task.clone());
        self.store.save(&list)?;

        tracing::debug!(id = %task.id, created_by = %task.created_by, "added task");
        Ok(task)
    }

    /// Tasks matching `filter`, in stored order
    pub fn list(&self, filter: TaskFilter) -> Vec<Task> {
        self.store
            .load()
            .tasks
            .into_iter()
            .filter(|task| filter.matches(task))
            .collect()
    }

    /// Mark a task completed.
    ///
    /// Already-completed tasks are only rewritten when `completedAt` is
    /// missing. Returns `None` when no task has this id.
    pub fn complete(&self, id: &str) -> Result<Option<Task>> {
        let id = normalize_id(id)?;
        let mut list = self.store.load();
        let Some(task) = list.find_mut(id) else {
            return Ok(None);
        };

        let changed = if !task.is_completed() {
            task.status = TaskStatus::Completed;
            task.completed_at = Some(timestamp());
            true
        } else if task.completed_at.is_none() {
            task.completed_at = Some(timestamp());
            true
        } else {
            false
        };

        let task = task.clone();
        if changed {
            self.store.save(&list)?;
            tracing::debug!(id = %task.id, "completed task");
        }
        Ok(Some(task))
    }

    pub fn get(&self, id: &str) -> Result<Option<Task>> {
        let id = normalize_id(id)?;
        Ok(self.store.load().find(id).cloned())
    }

    /// Remove the first task with this id. Returns whether one was removed.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let id = normalize_id(id)?;
        let mut list = self.store.load();
        if list.remove(id).is_none() {
            return Ok(false);
        }
        self.store.save(&list)?;

        tracing::debug!(id, "deleted task");
        Ok(true)
    }
}

fn normalize_id(id: &str) -> Result<&str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(Error::validation("A valid task id must be provided."));
    }
    Ok(id)
}
