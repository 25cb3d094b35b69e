use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use std::io;
use tracing::{debug, info};

use crate::app::{App, Focus, Message};
use crate::controls::{Control, ControlEvent, Input, Select};
use crate::data::{GROUP_VALUES, SEARCH_VALUES, SORT_VALUES};
use crate::form::Form;
use crate::todos;

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    info!(tasks = app.todos.len(), "event loop started");
    loop {
        terminal.draw(|f| draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(message) = message_for_key(app, key) {
                debug!(?message, "dispatching");
                app.update(message);
            }
        }
        if app.should_quit {
            info!("quitting");
            return Ok(());
        }
    }
}

fn search_label(app: &App) -> String {
    format!("Search by {}", app.search_by)
}

fn filter_selects(app: &App) -> [(Focus, Select<'_>, fn(String) -> Message); 3] {
    [
        (
            Focus::SortBy,
            Select::new("Sort By", &app.sort_by, SORT_VALUES),
            Message::SortByChanged,
        ),
        (
            Focus::SearchBy,
            Select::new("Search By", &app.search_by, SEARCH_VALUES),
            Message::SearchByChanged,
        ),
        (
            Focus::GroupBy,
            Select::new("Group By", &app.group_by, GROUP_VALUES),
            Message::GroupByChanged,
        ),
    ]
}

/// Translates a key press into a message for the application, going through
/// whichever control has focus.
pub fn message_for_key(app: &App, key: KeyEvent) -> Option<Message> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => return Some(Message::Quit),
        KeyCode::Char('c') if ctrl => return Some(Message::Quit),
        KeyCode::Tab => return Some(Message::FocusNext),
        KeyCode::BackTab => return Some(Message::FocusPrev),
        _ => {}
    }

    match app.focus {
        Focus::SortBy | Focus::SearchBy | Focus::GroupBy => {
            let (_, select, on_change) = filter_selects(app)
                .into_iter()
                .find(|(focus, _, _)| *focus == app.focus)?;
            match select.handle_key(key)? {
                ControlEvent::Changed(value) => Some(on_change(value)),
                ControlEvent::Clicked => None,
            }
        }
        Focus::SearchText => {
            let label = search_label(app);
            let input = Input::new(&label, &app.search_text).show_label(false);
            match input.handle_key(key)? {
                ControlEvent::Changed(value) => Some(Message::SearchTextChanged(value)),
                ControlEvent::Clicked => None,
            }
        }
        Focus::List => {
            let task = app.selected_task();
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => Some(Message::CursorUp),
                KeyCode::Down | KeyCode::Char('j') => Some(Message::CursorDown),
                KeyCode::Char(' ') => task.map(|t| Message::ToggleChecked(t.id)),
                KeyCode::Delete | KeyCode::Char('d') => task.map(|t| Message::Remove(t.id)),
                _ => None,
            }
        }
        focus => Form::new(app).handle_key(focus, key),
    }
}

pub fn draw(frame: &mut Frame, app: &App) {
    let searching = !app.search_by.is_empty();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(if searching { 3 } else { 0 }),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Todo App",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))),
        chunks[0],
    );

    draw_filters(frame, chunks[1], app);

    if searching {
        let label = search_label(app);
        Input::new(&label, &app.search_text).show_label(false).render(
            chunks[2],
            frame.buffer_mut(),
            app.focus == Focus::SearchText,
        );
    }

    Form::new(app).render(frame, chunks[3], app.focus);
    todos::render(frame, chunks[4], &app.visible, app.cursor, app.focus == Focus::List);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" next field  "),
            Span::styled("←/→", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" choose  "),
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" add todo  "),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" quit"),
        ]))
        .style(Style::default().fg(Color::DarkGray)),
        chunks[5],
    );
}

fn draw_filters(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![
            Constraint::Percentage(33),
            Constraint::Percentage(33),
            Constraint::Percentage(34),
        ])
        .split(area);

    for ((focus, select, _), chunk) in filter_selects(app).iter().zip(chunks.iter()) {
        select.render(*chunk, frame.buffer_mut(), app.focus == *focus);
    }
}
