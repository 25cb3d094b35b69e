use std::{collections::HashSet, fs, path::Path};

use anyhow::{bail, Context};
use tracing::{debug, info};

use crate::task::Task;

pub const SORT_VALUES: &[&str] = &["", "completed", "title", "createdAt", "dueDate", "priority"];
pub const SEARCH_VALUES: &[&str] = &["", "title", "description"];
pub const GROUP_VALUES: &[&str] = &["", "priority", "priority.status", "dueDate", "checked"];
pub const PRIORITY_VALUES: &[&str] = &["low", "medium", "high"];

const BUNDLED_TODOS: &str = include_str!("../data/todos.json");

pub fn bundled_tasks() -> anyhow::Result<Vec<Task>> {
    parse_tasks(BUNDLED_TODOS).context("bundled task list is malformed")
}

pub fn load_from_file(path: &Path) -> anyhow::Result<Vec<Task>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read task list {}", path.display()))?;
    let tasks = parse_tasks(&data)
        .with_context(|| format!("failed to parse task list {}", path.display()))?;
    info!(path = %path.display(), count = tasks.len(), "loaded task list");
    Ok(tasks)
}

fn parse_tasks(data: &str) -> anyhow::Result<Vec<Task>> {
    let tasks: Vec<Task> = serde_json::from_str(data)?;
    let mut seen = HashSet::new();
    for task in &tasks {
        if !seen.insert(task.id) {
            bail!("duplicate task id {}", task.id);
        }
    }
    debug!(count = tasks.len(), "parsed tasks");
    Ok(tasks)
}
