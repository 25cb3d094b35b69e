use chrono::Local;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::controls::{Button, ButtonKind};
use crate::task::Task;
use crate::visible::VisibleCollection;

fn task_item(task: &Task) -> ListItem<'_> {
    let checkbox = if task.checked { "[x] " } else { "[ ] " };
    let remove = Button::new("Remove", ButtonKind::Button);
    let created = task
        .created_at
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string();

    ListItem::new(vec![
        Line::from(vec![
            Span::raw(checkbox),
            Span::styled(&task.title, Style::default().fg(Color::White)),
            Span::raw("  "),
            remove.span(false),
        ]),
        Line::from(vec![
            Span::raw("    "),
            Span::styled(&task.description, Style::default().fg(Color::Gray)),
        ]),
        Line::from(Span::styled(
            format!(
                "    created {}  due {}  priority {}",
                created, task.due_date, task.priority
            ),
            Style::default().fg(Color::DarkGray),
        )),
    ])
}

fn group_header(key: &str, count: usize) -> ListItem<'static> {
    ListItem::new(Line::from(Span::styled(
        format!("── {key} ({count})"),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )))
}

/// Draws the visible tasks in one scrolling list. `cursor` indexes the tasks
/// in display order and is only highlighted when the list has focus.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    visible: &VisibleCollection,
    cursor: usize,
    focused: bool,
) {
    let block = Block::default()
        .title("Todos")
        .borders(Borders::ALL)
        .border_style(if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        });

    if visible.is_empty() {
        frame.render_widget(Paragraph::new("No todos").block(block), area);
        return;
    }

    // Group headers take rows in the list, so the cursor maps onto a later
    // row once headers come before it.
    let (items, selected): (Vec<ListItem>, usize) = match visible {
        VisibleCollection::Flat(tasks) => (tasks.iter().map(task_item).collect(), cursor),
        VisibleCollection::Grouped(groups) => {
            let mut items = Vec::with_capacity(groups.len() + visible.len());
            let mut selected = cursor;
            let mut seen = 0;
            for group in groups {
                if seen <= cursor {
                    selected += 1;
                }
                items.push(group_header(&group.key, group.tasks.len()));
                items.extend(group.tasks.iter().map(task_item));
                seen += group.tasks.len();
            }
            (items, selected)
        }
    };

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED));
    let mut state = ListState::default();
    if focused {
        state.select(Some(selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Priority;
    use crate::visible::group_by;
    use chrono::Utc;
    use ratatui::{backend::TestBackend, Terminal};

    fn tasks() -> Vec<Task> {
        let mut tasks = vec![
            Task::new("Buy milk".into(), "semi".into(), "2026-10-19".into(), Priority::Low, Utc::now()),
            Task::new("Walk dog".into(), "park".into(), "2026-10-18".into(), Priority::High, Utc::now()),
        ];
        tasks[1].checked = true;
        tasks
    }

    fn draw(visible: &VisibleCollection) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), visible, 0, true))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn flat_view_shows_every_field() {
        let text = draw(&VisibleCollection::Flat(tasks()));
        assert!(text.contains("Todos"));
        assert!(text.contains("[ ] Buy milk"));
        assert!(text.contains("[x] Walk dog"));
        assert!(text.contains("[Remove]"));
        assert!(text.contains("due 2026-10-19"));
        assert!(text.contains("priority high (3)"));
        assert!(text.contains("park"));
    }

    #[test]
    fn grouped_view_titles_each_group() {
        let groups = group_by(&tasks(), "priority").unwrap();
        let text = draw(&VisibleCollection::Grouped(groups));
        assert!(text.contains("── low (1)"));
        assert!(text.contains("── high (1)"));
        assert!(text.contains("[ ] Buy milk"));
        assert!(text.contains("[x] Walk dog"));
        assert!(text.find("── low") < text.find("Buy milk"));
        assert!(text.find("Buy milk") < text.find("── high"));
        assert!(text.find("── high") < text.find("Walk dog"));
    }

    #[test]
    fn cursor_past_a_header_selects_the_right_task() {
        let groups = group_by(&tasks(), "priority").unwrap();
        let visible = VisibleCollection::Grouped(groups);
        // two short rows leave room for one task at a time
        let mut terminal = Terminal::new(TestBackend::new(80, 5)).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), &visible, 1, true))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Walk dog"));
        assert!(!text.contains("Buy milk"));
    }

    #[test]
    fn very_large_groups_render() {
        let tasks: Vec<Task> = (0..21_846)
            .map(|i| Task::new(format!("task {i}"), String::new(), String::new(), Priority::Low, Utc::now()))
            .collect();
        let groups = group_by(&tasks, "priority").unwrap();
        let text = draw(&VisibleCollection::Grouped(groups));
        assert!(text.contains("── low (21846)"));
        assert!(text.contains("task 0"));
    }

    #[test]
    fn empty_views_render() {
        assert!(draw(&VisibleCollection::Flat(Vec::new())).contains("No todos"));
        let text = draw(&VisibleCollection::Grouped(Vec::new()));
        assert!(text.contains("No todos"));
    }
}
