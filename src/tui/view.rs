// File: src/tui/view.rs
use crate::model::TaskDisplay;
use crate::tui::state::AppState;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

pub fn draw(f: &mut Frame, state: &mut AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(7),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    // --- Task List ---
    let items: Vec<ListItem> = state
        .controller
        .tasks()
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let style = if task.done {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:>3}. ", i + 1), Style::default().fg(Color::Yellow)),
                Span::styled(task.render(), style),
            ]))
        })
        .collect();
    let title = format!(" Tasks ({}) ", state.task_count());
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::Blue),
        );
    f.render_stateful_widget(list, chunks[0], &mut state.list_state);

    // --- Response ---
    let response = Paragraph::new(state.message.clone())
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL).title(" Response "))
        .wrap(Wrap { trim: false });
    f.render_widget(response, chunks[1]);

    // --- Input ---
    let input_area = chunks[2];
    let input = Paragraph::new(state.input_buffer.as_str())
        .block(Block::default().borders(Borders::ALL).title(" Command "));
    f.render_widget(input, input_area);
    if state.exit_at.is_none() {
        f.set_cursor_position((
            cursor_column(input_area, state.cursor_position),
            input_area.y.saturating_add(1),
        ));
    }

    // --- Help Line ---
    let help = Line::from(vec![
        Span::styled(
            " KEYS ",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Enter:Send  Up/Down:Select  Ctrl+E:Edit  Esc:Quit"),
    ]);
    f.render_widget(Paragraph::new(help).alignment(Alignment::Left), chunks[3]);
}

/// Terminal column for the input cursor, kept inside the bordered box.
fn cursor_column(area: Rect, cursor_position: usize) -> u16 {
    let offset = u16::try_from(cursor_position).unwrap_or(u16::MAX);
    let last = area.x.saturating_add(area.width.saturating_sub(2));
    area.x.saturating_add(1).saturating_add(offset).min(last)
}
