use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};
use tracing::trace;

use crate::app::{App, Focus, Message};
use crate::controls::{Button, ButtonKind, Control, ControlEvent, Input, InputKind, Select};
use crate::data::PRIORITY_VALUES;

#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    Text,
    Date,
    Select(&'static [&'static str]),
}

#[derive(Debug, Clone)]
pub struct FormField<'a> {
    pub focus: Focus,
    pub label: &'static str,
    pub kind: FieldKind,
    pub value: &'a str,
    pub on_change: fn(String) -> Message,
}

impl<'a> FormField<'a> {
    fn control(&self) -> Box<dyn Control + 'a> {
        match self.kind {
            FieldKind::Text => Box::new(Input::new(self.label, self.value)),
            FieldKind::Date => Box::new(Input::new(self.label, self.value).kind(InputKind::Date)),
            FieldKind::Select(values) => Box::new(Select::new(self.label, self.value, values)),
        }
    }
}

pub struct Form<'a> {
    fields: Vec<FormField<'a>>,
    submit: Button<'static>,
}

impl<'a> Form<'a> {
    pub fn new(app: &'a App) -> Self {
        let form = &app.form;
        let fields = vec![
            FormField {
                focus: Focus::Title,
                label: "title",
                kind: FieldKind::Text,
                value: &form.title,
                on_change: Message::TitleChanged,
            },
            FormField {
                focus: Focus::Description,
                label: "description",
                kind: FieldKind::Text,
                value: &form.description,
                on_change: Message::DescriptionChanged,
            },
            FormField {
                focus: Focus::Priority,
                label: "priority",
                kind: FieldKind::Select(PRIORITY_VALUES),
                value: form.priority.label(),
                on_change: Message::PriorityChanged,
            },
            FormField {
                focus: Focus::DueDate,
                label: "due date",
                kind: FieldKind::Date,
                value: &form.due_date,
                on_change: Message::DueDateChanged,
            },
        ];
        Self {
            fields,
            submit: Button::new("Add todo", ButtonKind::Submit),
        }
    }

    pub fn fields(&self) -> &[FormField<'a>] {
        &self.fields
    }

    // Enter anywhere in the form submits.
    pub fn handle_key(&self, focus: Focus, key: KeyEvent) -> Option<Message> {
        if focus == Focus::Submit {
            return match self.submit.handle_key(key)? {
                ControlEvent::Clicked => Some(Message::Submit),
                ControlEvent::Changed(_) => None,
            };
        }
        let field = self.fields.iter().find(|f| f.focus == focus)?;
        if key.code == KeyCode::Enter {
            return Some(Message::Submit);
        }
        let control = field.control();
        match control.handle_key(key)? {
            ControlEvent::Changed(value) => {
                trace!(field = control.label(), from = control.value(), to = %value, "form field edited");
                Some((field.on_change)(value))
            }
            ControlEvent::Clicked => None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focus: Focus) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![
                Constraint::Fill(5),
                Constraint::Fill(5),
                Constraint::Fill(3),
                Constraint::Fill(4),
                Constraint::Length(12),
            ])
            .split(area);

        let buf = frame.buffer_mut();
        for (field, chunk) in self.fields().iter().zip(chunks.iter()) {
            field.control().render(*chunk, buf, field.focus == focus);
        }
        self.submit.render(chunks[4], buf, focus == Focus::Submit);
    }
}
