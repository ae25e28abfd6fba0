//! Coercion of loosely-typed input into well-formed task records.
//!
//! Both functions are total: anything that cannot be salvaged is dropped, never
//! reported. A task missing `id`, `description`, `createdAt` or `createdBy` is
//! discarded whole rather than repaired.

use serde_json::{Map, Value};

use crate::task::{timestamp, Task, TaskList, TaskStatus, MAX_DESCRIPTION_LENGTH, SCHEMA_VERSION};

/// Normalize an arbitrary decoded value into a task list envelope.
///
/// Non-objects yield a fresh empty envelope. `tasks` is only read when it is
/// an array; surviving tasks keep their relative order.
pub fn normalize_task_list(input: &Value) -> TaskList {
    let Some(object) = input.as_object() else {
        return TaskList::empty();
    };

    let candidates = object
        .get("tasks")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    let tasks: Vec<Task> = candidates.iter().filter_map(normalize_task).collect();

    let dropped = candidates.len() - tasks.len();
    if dropped > 0 {
        tracing::warn!(dropped, kept = tasks.len(), "dropped malformed task records");
    }

    TaskList {
        tasks,
        version: non_empty_str(object, "version")
            .unwrap_or(SCHEMA_VERSION)
            .to_string(),
        last_modified: non_empty_str(object, "lastModified")
            .map(str::to_string)
            .unwrap_or_else(timestamp),
    }
}

/// Validate and coerce a single candidate record.
///
/// Returns `None` when the candidate is not an object or lacks a required
/// field. Long descriptions are truncated, unknown statuses become pending,
/// and an empty `completedAt` is omitted.
pub fn normalize_task(candidate: &Value) -> Option<Task> {
    let object = candidate.as_object()?;

    let id = non_empty_str(object, "id")?;
    let description = object.get("description")?.as_str()?.trim();
    if description.is_empty() {
        return None;
    }
    let created_at = non_empty_str(object, "createdAt")?;
    let created_by = non_empty_str(object, "createdBy")?;

    let status = match object.get("status").and_then(Value::as_str) {
        Some("completed") => TaskStatus::Completed,
        _ => TaskStatus::Pending,
    };

    Some(Task {
        id: id.to_string(),
        description: truncate_chars(description, MAX_DESCRIPTION_LENGTH),
        status,
        created_at: created_at.to_string(),
        created_by: created_by.to_string(),
        completed_at: non_empty_str(object, "completedAt").map(str::to_string),
    })
}

fn non_empty_str<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    object
        .get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text.to_string(),
    }
}
