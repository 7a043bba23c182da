use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, BorderType, Paragraph, Row, Table, Wrap},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::app::{App, InputMode};

const NAME_WIDTH: usize = 24;

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Search bar
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Footer/Help
        ])
        .split(size);

    // Header
    let header = Paragraph::new("FLEETDASH · DRIVERS")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, main_chunks[0]);

    draw_search_bar(f, app, main_chunks[1]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60),
            Constraint::Percentage(40),
        ])
        .split(main_chunks[2]);

    draw_driver_list(f, app, content_chunks[0]);
    draw_detail_view(f, app, content_chunks[1]);

    let help = match app.input_mode {
        InputMode::Normal => "j/k: Navigate | /: Search | s: Status | c: Clear | q: Quit",
        InputMode::Searching => "Type to filter | Enter/Esc: Done",
    };
    let footer = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[3]);
}

fn draw_search_bar(f: &mut Frame, app: &App, area: Rect) {
    let searching = matches!(app.input_mode, InputMode::Searching);
    let border_style = if searching {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let line = Line::from(vec![
        Span::styled("Search: ", Style::default().fg(Color::Blue)),
        Span::raw(app.search.as_str()),
    ]);
    let title = format!(" Status: {} ({}/{}) ", app.status_label(), app.visible.len(), app.drivers.len());
    let bar = Paragraph::new(line)
        .block(Block::default().title(title).borders(Borders::ALL).border_type(BorderType::Rounded).border_style(border_style));
    f.render_widget(bar, area);

    if searching {
        let before: String = app.search.chars().take(app.cursor_position).collect();
        let x = area.x + 1 + "Search: ".len() as u16 + before.width() as u16;
        f.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

fn draw_driver_list(f: &mut Frame, app: &mut App, area: Rect) {
    let rows: Vec<Row> = app.visible.iter().map(|driver| {
        let status_style = match driver.status.as_str() {
            "ACTIVE" => Style::default().fg(Color::Green),
            "ON_LEAVE" => Style::default().fg(Color::Yellow),
            _ => Style::default().fg(Color::DarkGray),
        };

        Row::new(vec![
            Span::styled(fit(&driver.full_name(), NAME_WIDTH), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(driver.phone.clone()),
            Span::styled(driver.status.clone(), status_style),
        ])
    }).collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(NAME_WIDTH as u16), // Name
            Constraint::Length(18),                // Phone
            Constraint::Min(8),                    // Status
        ]
    )
    .header(Row::new(vec!["Name", "Phone", "Status"]).style(Style::default().fg(Color::Yellow)))
    .block(Block::default().title(" Drivers ").borders(Borders::ALL).border_type(BorderType::Rounded))
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn draw_detail_view(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().title(" Detail ").borders(Borders::ALL).border_type(BorderType::Rounded);

    let Some(driver) = app.selected_driver() else {
        let empty = Paragraph::new("No driver matches the current filters.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, area);
        return;
    };

    let detail_text = vec![
        Line::from(vec![
            Span::styled("Name: ", Style::default().fg(Color::Blue)),
            Span::styled(driver.full_name(), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("ID: ", Style::default().fg(Color::DarkGray)),
            Span::raw(driver.id.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Email: ", Style::default().fg(Color::Blue)),
            Span::raw(driver.email.as_str()),
        ]),
        Line::from(vec![
            Span::styled("Phone: ", Style::default().fg(Color::Blue)),
            Span::raw(driver.phone.as_str()),
        ]),
        Line::from(vec![
            Span::styled("Status: ", Style::default().fg(Color::Blue)),
            Span::raw(driver.status.as_str()),
        ]),
    ];

    let detail_block = Paragraph::new(detail_text)
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(detail_block, area);
}

/// Truncates to `width` display columns, ending in "…" when cut.
fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
