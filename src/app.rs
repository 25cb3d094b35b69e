use chrono::{Local, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::task::{Priority, Task};
use crate::visible::{self, VisibleCollection};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    TitleChanged(String),
    DescriptionChanged(String),
    DueDateChanged(String),
    PriorityChanged(String),
    SortByChanged(String),
    SearchByChanged(String),
    GroupByChanged(String),
    SearchTextChanged(String),
    Submit,
    ToggleChecked(Uuid),
    Remove(Uuid),
    FocusNext,
    FocusPrev,
    CursorUp,
    CursorDown,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    SortBy,
    SearchBy,
    GroupBy,
    SearchText,
    Title,
    Description,
    Priority,
    DueDate,
    Submit,
    List,
}

/// Values currently typed into the creation form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormValues {
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub priority: Priority,
}

impl Default for FormValues {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            due_date: Local::now().format("%Y-%m-%d").to_string(),
            priority: Priority::Unset,
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub todos: Vec<Task>,
    pub form: FormValues,
    pub sort_by: String,
    pub search_by: String,
    pub search_text: String,
    pub group_by: String,
    pub visible: VisibleCollection,
    /// The view is the whole master list, so it shares its order.
    pub shows_master: bool,
    pub focus: Focus,
    /// Index into the visible tasks, in display order.
    pub cursor: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(todos: Vec<Task>) -> Self {
        let visible = VisibleCollection::Flat(todos.clone());
        Self {
            todos,
            form: FormValues::default(),
            sort_by: String::new(),
            search_by: String::new(),
            search_text: String::new(),
            group_by: String::new(),
            visible,
            shows_master: true,
            focus: Focus::Title,
            cursor: 0,
            should_quit: false,
        }
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::TitleChanged(value) => self.form.title = value,
            Message::DescriptionChanged(value) => self.form.description = value,
            Message::DueDateChanged(value) => self.form.due_date = value,
            Message::PriorityChanged(value) => self.form.priority = Priority::from_label(&value),
            Message::SortByChanged(key) => self.set_sort_by(key),
            Message::SearchByChanged(key) => self.set_search_by(key),
            Message::GroupByChanged(key) => self.set_group_by(key),
            Message::SearchTextChanged(text) => self.set_search_text(text),
            Message::Submit => {
                let form = self.form.clone();
                self.add_task(form.title, form.description, form.due_date, form.priority);
            }
            // The checkbox and the Remove control are drawn but do nothing yet.
            Message::ToggleChecked(id) => debug!(%id, "completion toggle is not wired"),
            Message::Remove(id) => debug!(%id, "task removal is not wired"),
            Message::FocusNext => self.move_focus(1),
            Message::FocusPrev => self.move_focus(-1),
            Message::CursorUp => self.cursor = self.cursor.saturating_sub(1),
            Message::CursorDown => self.cursor += 1,
            Message::Quit => self.should_quit = true,
        }
        self.clamp_cursor();
    }

    pub fn add_task(
        &mut self,
        title: String,
        description: String,
        due_date: String,
        priority: Priority,
    ) {
        let task = Task::new(title, description, due_date, priority, Utc::now());
        info!(id = %task.id, title = %task.title, priority = %task.priority, "task added");
        self.todos.push(task);
        self.reset_visible();
    }

    /// Reorders the master list. A filtered or grouped view keeps its old
    /// order until something resets it from the master list.
    pub fn set_sort_by(&mut self, key: String) {
        debug!(sort_by = %key, "sort selection changed");
        self.sort_by = key;
        if self.sort_by.is_empty() {
            return;
        }
        visible::sort_tasks(&mut self.todos, &self.sort_by);
        if self.shows_master {
            self.reset_visible();
        }
    }

    pub fn set_search_by(&mut self, key: String) {
        debug!(search_by = %key, "search selection changed");
        self.search_by = key;
        if self.search_by.is_empty() && self.focus == Focus::SearchText {
            self.focus = Focus::SearchBy;
        }
        self.apply_search();
    }

    pub fn set_search_text(&mut self, text: String) {
        self.search_text = text;
        self.apply_search();
    }

    pub fn set_group_by(&mut self, key: String) {
        debug!(group_by = %key, "group selection changed");
        self.group_by = key;
        if self.group_by.is_empty() {
            self.reset_visible();
            return;
        }
        match visible::group_by(&self.todos, &self.group_by) {
            Some(groups) => {
                self.visible = VisibleCollection::Grouped(groups);
                self.shows_master = false;
            }
            None => debug!(group_by = %self.group_by, "unknown group field, view unchanged"),
        }
    }

    fn apply_search(&mut self) {
        if self.search_by.is_empty() {
            return;
        }
        match visible::filter_by_search(&self.todos, &self.search_by, &self.search_text) {
            Some(tasks) => {
                self.visible = VisibleCollection::Flat(tasks);
                self.shows_master = false;
            }
            None => debug!(search_by = %self.search_by, "unknown search field, view unchanged"),
        }
    }

    fn reset_visible(&mut self) {
        self.visible = VisibleCollection::Flat(self.todos.clone());
        self.shows_master = true;
    }

    pub fn focus_order(&self) -> Vec<Focus> {
        let mut order = vec![Focus::SortBy, Focus::SearchBy, Focus::GroupBy];
        if !self.search_by.is_empty() {
            order.push(Focus::SearchText);
        }
        order.extend([
            Focus::Title,
            Focus::Description,
            Focus::Priority,
            Focus::DueDate,
            Focus::Submit,
            Focus::List,
        ]);
        order
    }

    fn move_focus(&mut self, step: isize) {
        let order = self.focus_order();
        let len = order.len() as isize;
        let current = order.iter().position(|f| *f == self.focus).unwrap_or(0) as isize;
        self.focus = order[(current + step).rem_euclid(len) as usize];
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.visible.len().saturating_sub(1));
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.visible.tasks().get(self.cursor).copied()
    }
}
