use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlEvent {
    Changed(String),
    Clicked,
}

pub trait Control {
    fn label(&self) -> &str;
    fn value(&self) -> &str;
    fn handle_key(&self, key: KeyEvent) -> Option<ControlEvent>;
    fn render(&self, area: Rect, buf: &mut Buffer, focused: bool);
}

fn frame(label: &str, show_label: bool, focused: bool) -> Block<'static> {
    let block = Block::default().borders(Borders::ALL).border_style(if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    });
    if show_label {
        block.title(label.to_string())
    } else {
        block
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    #[default]
    Text,
    Date,
}

#[derive(Debug, Clone)]
pub struct Input<'a> {
    pub label: &'a str,
    pub value: &'a str,
    pub kind: InputKind,
    pub show_label: bool,
}

impl<'a> Input<'a> {
    pub fn new(label: &'a str, value: &'a str) -> Self {
        Self {
            label,
            value,
            kind: InputKind::Text,
            show_label: true,
        }
    }

    pub fn kind(mut self, kind: InputKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn show_label(mut self, show_label: bool) -> Self {
        self.show_label = show_label;
        self
    }
}

impl Control for Input<'_> {
    fn label(&self) -> &str {
        self.label
    }

    fn value(&self) -> &str {
        self.value
    }

    fn handle_key(&self, key: KeyEvent) -> Option<ControlEvent> {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let mut value = self.value.to_string();
                value.push(c);
                Some(ControlEvent::Changed(value))
            }
            KeyCode::Backspace => {
                let mut value = self.value.to_string();
                value.pop()?;
                Some(ControlEvent::Changed(value))
            }
            _ => None,
        }
    }

    fn render(&self, area: Rect, buf: &mut Buffer, focused: bool) {
        let mut spans = Vec::new();
        if self.value.is_empty() {
            let placeholder = match self.kind {
                InputKind::Date => "YYYY-MM-DD",
                InputKind::Text if !self.show_label => self.label,
                InputKind::Text => "",
            };
            spans.push(Span::styled(placeholder, Style::default().fg(Color::DarkGray)));
        } else {
            spans.push(Span::raw(self.value));
        }
        if focused {
            spans.push(Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)));
        }
        Paragraph::new(Line::from(spans))
            .block(frame(self.label, self.show_label, focused))
            .render(area, buf);
    }
}

#[derive(Debug, Clone)]
pub struct Select<'a> {
    pub label: &'a str,
    pub value: &'a str,
    pub values: &'a [&'a str],
    pub show_label: bool,
}

impl<'a> Select<'a> {
    pub fn new(label: &'a str, value: &'a str, values: &'a [&'a str]) -> Self {
        Self {
            label,
            value,
            values,
            show_label: true,
        }
    }

    fn step(&self, forward: bool) -> Option<&'a str> {
        let len = self.values.len();
        if len == 0 {
            return None;
        }
        let next = match self.values.iter().position(|v| *v == self.value) {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None if forward => 0,
            None => len - 1,
        };
        Some(self.values[next])
    }
}

impl Control for Select<'_> {
    fn label(&self) -> &str {
        self.label
    }

    fn value(&self) -> &str {
        self.value
    }

    fn handle_key(&self, key: KeyEvent) -> Option<ControlEvent> {
        let forward = match key.code {
            KeyCode::Right | KeyCode::Down => true,
            KeyCode::Left | KeyCode::Up => false,
            _ => return None,
        };
        let next = self.step(forward)?;
        Some(ControlEvent::Changed(next.to_string()))
    }

    fn render(&self, area: Rect, buf: &mut Buffer, focused: bool) {
        let shown = if self.value.is_empty() {
            Span::styled("(none)", Style::default().fg(Color::DarkGray))
        } else {
            Span::styled(self.value, Style::default().fg(Color::White))
        };
        Paragraph::new(Line::from(vec![Span::raw("< "), shown, Span::raw(" >")]))
            .block(frame(self.label, self.show_label, focused))
            .render(area, buf);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Submit,
    Button,
}

#[derive(Debug, Clone)]
pub struct Button<'a> {
    pub label: &'a str,
    pub kind: ButtonKind,
}

impl<'a> Button<'a> {
    pub fn new(label: &'a str, kind: ButtonKind) -> Self {
        Self { label, kind }
    }

    pub fn span(&self, focused: bool) -> Span<'a> {
        let color = match self.kind {
            ButtonKind::Submit => Color::Cyan,
            ButtonKind::Button => Color::Red,
        };
        let style = if focused {
            Style::default().fg(Color::Black).bg(color)
        } else {
            Style::default().fg(color)
        };
        Span::styled(format!("[{}]", self.label), style)
    }
}

impl Control for Button<'_> {
    fn label(&self) -> &str {
        self.label
    }

    fn value(&self) -> &str {
        ""
    }

    fn handle_key(&self, key: KeyEvent) -> Option<ControlEvent> {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(ControlEvent::Clicked),
            _ => None,
        }
    }

    fn render(&self, area: Rect, buf: &mut Buffer, focused: bool) {
        Paragraph::new(Line::from(self.span(focused)))
            .block(frame(self.label, false, focused))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn input_appends_and_deletes() {
        let input = Input::new("title", "Buy");
        assert_eq!(
            input.handle_key(key(KeyCode::Char('s'))),
            Some(ControlEvent::Changed("Buys".into()))
        );
        assert_eq!(
            input.handle_key(key(KeyCode::Backspace)),
            Some(ControlEvent::Changed("Bu".into()))
        );
        assert_eq!(input.handle_key(key(KeyCode::Enter)), None);
    }

    #[test]
    fn backspace_on_empty_input_emits_nothing() {
        let input = Input::new("title", "");
        assert_eq!(input.handle_key(key(KeyCode::Backspace)), None);
    }

    #[test]
    fn ctrl_chords_are_not_typed() {
        let input = Input::new("title", "");
        let chord = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(input.handle_key(chord), None);
    }

    #[test]
    fn select_steps_and_wraps() {
        let values = ["", "title", "description"];
        let select = Select::new("Search By", "", &values);
        assert_eq!(
            select.handle_key(key(KeyCode::Right)),
            Some(ControlEvent::Changed("title".into()))
        );
        assert_eq!(
            select.handle_key(key(KeyCode::Left)),
            Some(ControlEvent::Changed("description".into()))
        );

        let select = Select::new("Search By", "description", &values);
        assert_eq!(
            select.handle_key(key(KeyCode::Right)),
            Some(ControlEvent::Changed(String::new()))
        );
    }

    #[test]
    fn select_starts_from_first_option_when_value_is_foreign() {
        let values = ["low", "medium", "high"];
        let select = Select::new("priority", "", &values);
        assert_eq!(
            select.handle_key(key(KeyCode::Down)),
            Some(ControlEvent::Changed("low".into()))
        );
        assert_eq!(
            select.handle_key(key(KeyCode::Up)),
            Some(ControlEvent::Changed("high".into()))
        );
    }

    #[test]
    fn button_clicks_on_enter() {
        let button = Button::new("Add", ButtonKind::Submit);
        assert_eq!(button.handle_key(key(KeyCode::Enter)), Some(ControlEvent::Clicked));
        assert_eq!(button.handle_key(key(KeyCode::Char('x'))), None);
        assert_eq!(button.value(), "");
    }

    #[test]
    fn hidden_label_input_uses_label_as_placeholder() {
        let input = Input::new("Search by title", "").show_label(false);
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        input.render(area, &mut buf, false);
        let text: String = buf.content.iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Search by title"));
    }
}
