use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use strum::IntoEnumIterator;

use super::app::{App, InputMode};
use crate::internal::models::FetchState;
use crate::internal::sort::SortKey;

pub fn draw(app: &mut App, f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_top_bar(app, f, chunks[0]);

    // A failed search suppresses everything below the top bar: no search
    // box, no table, no load-more. Only the notice renders.
    if let FetchState::Failed(message) = &app.fetch_state {
        render_error_notice(message, f, chunks[2].union(chunks[1]).union(chunks[3]));
        return;
    }

    render_search_input(app, f, chunks[1]);
    render_results_table(app, f, chunks[2]);
    render_status_bar(app, f, chunks[3]);
}

fn render_top_bar(app: &App, f: &mut Frame, area: Rect) {
    let summary = match app.results.get(&app.search_key) {
        Some(entry) => format!(
            "'{}' — {} hits, page {}",
            app.search_key,
            entry.hits.len(),
            entry.page
        ),
        None => format!("'{}'", app.search_key),
    };

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("HN Search v{} ", app.app_version),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(summary),
    ]))
    .style(Style::default().fg(Color::White).bg(Color::DarkGray));

    f.render_widget(bar, area);
}

fn render_error_notice(message: &str, f: &mut Frame, area: Rect) {
    let notice = Paragraph::new(vec![
        Line::from(Span::styled(
            "Something went wrong!",
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::raw(message.to_string())),
        Line::from(""),
        Line::from(Span::styled(
            "q: quit",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("Error"));

    f.render_widget(notice, area);
}

fn render_search_input(app: &App, f: &mut Frame, area: Rect) {
    let (border_color, text) = match app.input_mode {
        InputMode::Editing => (Color::Yellow, format!("{}█", app.query_input)),
        InputMode::Normal => (Color::DarkGray, app.query_input.clone()),
    };

    let input = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title("Search"),
    );

    f.render_widget(input, area);
}

fn header_label(key: SortKey, active: &App) -> String {
    let label = key.to_string();
    if key != active.table.key {
        return label;
    }

    // Comments and Points sort descending by default; the toggle flips
    // whatever the natural direction is.
    let descending_natural = matches!(key, SortKey::Comments | SortKey::Points);
    let arrow = match descending_natural != active.table.reversed {
        true => "▼",
        false => "▲",
    };
    format!("{} {}", label, arrow)
}

fn render_results_table(app: &mut App, f: &mut Frame, area: Rect) {
    let header_cells: Vec<Cell> = SortKey::iter()
        .filter(|key| *key != SortKey::None)
        .map(|key| {
            let style = match key == app.table.key {
                true => Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                false => Style::default().add_modifier(Modifier::BOLD),
            };
            Cell::from(header_label(key, app)).style(style)
        })
        .collect();
    let header = Row::new(header_cells).height(1);

    let displayed = app.displayed_hits();
    let rows: Vec<Row> = displayed
        .iter()
        .map(|hit| {
            let title = match hit.title.is_empty() {
                true => "[untitled]",
                false => hit.title.as_str(),
            };
            Row::new(vec![
                Cell::from(title.to_string()),
                Cell::from(hit.author.clone()),
                Cell::from(hit.num_comments.to_string()),
                Cell::from(hit.points.to_string()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(45),
            Constraint::Percentage(25),
            Constraint::Percentage(15),
            Constraint::Percentage(15),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title("Results"))
    .row_highlight_style(
        Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    f.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_status_bar(app: &App, f: &mut Frame, area: Rect) {
    let hints = match app.input_mode {
        InputMode::Editing => "Enter: submit | Esc: cancel".to_string(),
        InputMode::Normal => {
            let more = match app.fetch_state.is_loading() {
                true => format!("{} loading…", app.get_spinner_char()),
                false => "m: more".to_string(),
            };
            format!(
                "/: search | j/k: move | t/a/c/p: sort | n: unsort | d: dismiss | o: open | {} | q: quit",
                more
            )
        }
    };

    let bar = Paragraph::new(hints).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}
