use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Keys accepted by [`Task::field_text`].
pub const FIELD_KEYS: &[&str] = &[
    "title",
    "description",
    "dueDate",
    "createdAt",
    "priority",
    "priority.status",
    "checked",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Nothing picked yet in the form.
    #[default]
    #[serde(rename = "")]
    Unset,
    Low,
    Medium,
    High,
}

impl Priority {
    /// Maps a select value onto a priority. Anything that isn't `medium` or
    /// `high` counts as low.
    pub fn from_label(label: &str) -> Self {
        match label {
            "medium" => Priority::Medium,
            "high" => Priority::High,
            _ => Priority::Low,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::Unset => "",
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn rank(self) -> u8 {
        match self {
            Priority::Unset => 0,
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Unset => write!(f, "none"),
            other => write!(f, "{} ({})", other.label(), other.rank()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Task {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub checked: bool,
}

impl Task {
    pub fn new(
        title: String,
        description: String,
        due_date: String,
        priority: Priority,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            created_at: now,
            due_date,
            priority,
            checked: false,
        }
    }

    /// Text value of the field named by a search/group key, `None` when the
    /// key names no field.
    pub fn field_text(&self, key: &str) -> Option<String> {
        let text = match key {
            "title" => self.title.clone(),
            "description" => self.description.clone(),
            "dueDate" => self.due_date.clone(),
            "createdAt" => self.created_at.to_rfc3339(),
            "priority" => self.priority.label().to_string(),
            "priority.status" => self.priority.rank().to_string(),
            "checked" => self.checked.to_string(),
            _ => return None,
        };
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_labels_map_to_ranks() {
        assert_eq!(Priority::from_label("low").rank(), 1);
        assert_eq!(Priority::from_label("medium").rank(), 2);
        assert_eq!(Priority::from_label("high").rank(), 3);
        assert_eq!(Priority::from_label("urgent"), Priority::Low);
        assert_eq!(Priority::from_label(""), Priority::Low);
        assert_eq!(Priority::default().rank(), 0);
    }

    #[test]
    fn new_tasks_start_unchecked_with_distinct_ids() {
        let now = Utc::now();
        let a = Task::new("a".into(), String::new(), String::new(), Priority::Low, now);
        let b = Task::new("a".into(), String::new(), String::new(), Priority::Low, now);
        assert!(!a.checked);
        assert_ne!(a.id, b.id);
        assert_eq!(a.created_at, now);
    }

    #[test]
    fn field_text_covers_known_keys_only() {
        let mut task = Task::new(
            "Buy milk".into(),
            "2 litres".into(),
            "2026-10-20".into(),
            Priority::Medium,
            Utc::now(),
        );
        task.checked = true;

        assert_eq!(task.field_text("title").as_deref(), Some("Buy milk"));
        assert_eq!(task.field_text("description").as_deref(), Some("2 litres"));
        assert_eq!(task.field_text("dueDate").as_deref(), Some("2026-10-20"));
        assert_eq!(task.field_text("priority").as_deref(), Some("medium"));
        assert_eq!(task.field_text("priority.status").as_deref(), Some("2"));
        assert_eq!(task.field_text("checked").as_deref(), Some("true"));
        assert!(task.field_text("createdAt").is_some());
        assert_eq!(task.field_text("owner"), None);
        assert!(FIELD_KEYS.iter().all(|key| task.field_text(key).is_some()));
    }

    #[test]
    fn seed_entries_fill_in_defaults() {
        let task: Task = serde_json::from_str(r#"{"title": "Walk dog"}"#).unwrap();
        assert_eq!(task.title, "Walk dog");
        assert_eq!(task.priority, Priority::Unset);
        assert!(!task.checked);
        assert!(task.description.is_empty());

        let task: Task =
            serde_json::from_str(r#"{"title": "Pay rent", "priority": "high", "checked": true}"#)
                .unwrap();
        assert_eq!(task.priority, Priority::High);
        assert!(task.checked);
    }
}
