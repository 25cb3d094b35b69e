use std::cmp::Ordering;

use crate::task::{Task, FIELD_KEYS};

#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub key: String,
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum VisibleCollection {
    Flat(Vec<Task>),
    Grouped(Vec<Group>),
}

impl VisibleCollection {
    pub fn len(&self) -> usize {
        match self {
            VisibleCollection::Flat(tasks) => tasks.len(),
            VisibleCollection::Grouped(groups) => groups.iter().map(|g| g.tasks.len()).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn tasks(&self) -> Vec<&Task> {
        match self {
            VisibleCollection::Flat(tasks) => tasks.iter().collect(),
            VisibleCollection::Grouped(groups) => {
                groups.iter().flat_map(|g| g.tasks.iter()).collect()
            }
        }
    }
}

impl Default for VisibleCollection {
    fn default() -> Self {
        VisibleCollection::Flat(Vec::new())
    }
}

/// `None` if `field` is not a task field.
pub fn filter_by_search(tasks: &[Task], field: &str, text: &str) -> Option<Vec<Task>> {
    if !FIELD_KEYS.contains(&field) {
        return None;
    }
    let needle = text.to_lowercase();
    let matches = tasks
        .iter()
        .filter(|task| {
            task.field_text(field)
                .is_some_and(|value| value.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect();
    Some(matches)
}

pub fn group_by(tasks: &[Task], field: &str) -> Option<Vec<Group>> {
    if !FIELD_KEYS.contains(&field) {
        return None;
    }
    let mut groups: Vec<Group> = Vec::new();
    for task in tasks {
        let key = task.field_text(field).unwrap_or_default();
        match groups.iter_mut().find(|g| g.key == key) {
            Some(group) => group.tasks.push(task.clone()),
            None => groups.push(Group {
                key,
                tasks: vec![task.clone()],
            }),
        }
    }
    Some(groups)
}

fn by_completed(a: &Task, b: &Task) -> Ordering {
    b.checked.cmp(&a.checked)
}

fn by_title(a: &Task, b: &Task) -> Ordering {
    a.title.cmp(&b.title)
}

fn by_created_desc(a: &Task, b: &Task) -> Ordering {
    b.created_at.cmp(&a.created_at)
}

fn by_priority(a: &Task, b: &Task) -> Ordering {
    a.priority.rank().cmp(&b.priority.rank())
}

fn unordered(_: &Task, _: &Task) -> Ordering {
    Ordering::Equal
}

pub fn comparator(sort_by: &str) -> fn(&Task, &Task) -> Ordering {
    match sort_by {
        "completed" => by_completed,
        "title" => by_title,
        "createdAt" => by_created_desc,
        // dueDate has no ordering of its own and shares the priority one.
        "dueDate" | "priority" => by_priority,
        _ => unordered,
    }
}

pub fn sort_tasks(tasks: &mut [Task], sort_by: &str) {
    tasks.sort_by(comparator(sort_by));
}
