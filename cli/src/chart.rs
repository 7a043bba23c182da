use std::{io, time::Duration};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, BorderType, Paragraph, Padding},
};
use fleetdash_core::service::chart::monthly_series;
use fleetdash_core::service::dto::{format_cost, SummaryCard};
use fleetdash_core::{Aggregation, YearlySummary};
use rust_decimal::Decimal;

// --- THEME ---
struct Theme {
    primary: Color,
    muted: Color,
    text: Color,
    cost: Color,
    up: Color,
    down: Color,
}

const THEME: Theme = Theme {
    primary: Color::Cyan,
    muted: Color::DarkGray,
    text: Color::White,
    cost: Color::Green,
    up: Color::Red,
    down: Color::Green,
};

pub struct ChartApp<'a> {
    pub title: String,
    pub years: Vec<&'a YearlySummary>,
    pub current_year_index: usize,
    pub top: usize,
}

impl<'a> ChartApp<'a> {
    pub fn new(title: &str, aggregation: &'a Aggregation, top: usize) -> Self {
        let years: Vec<&YearlySummary> = aggregation.years.values().collect();
        // Start on the most recent year.
        let current_year_index = years.len().saturating_sub(1);
        Self {
            title: title.to_string(),
            years,
            current_year_index,
            top,
        }
    }

    pub fn next_year(&mut self) {
        if self.current_year_index + 1 < self.years.len() {
            self.current_year_index += 1;
        }
    }

    pub fn previous_year(&mut self) {
        if self.current_year_index > 0 {
            self.current_year_index -= 1;
        }
    }

    pub fn current_year(&self) -> Option<&YearlySummary> {
        self.years.get(self.current_year_index).copied()
    }
}

pub fn run(title: &str, aggregation: &Aggregation, top: usize) -> Result<()> {
    if aggregation.is_empty() {
        println!("No maintenance history available.");
        return Ok(());
    }

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = ChartApp::new(title, aggregation, top);

    // Main loop
    loop {
        terminal.draw(|f| ui(f, &app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => break,
                        KeyCode::Left | KeyCode::Char('h') => app.previous_year(),
                        KeyCode::Right | KeyCode::Char('l') => app.next_year(),
                        _ => {}
                    }
                }
            }
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if aggregation.skipped_count() > 0 {
        println!("Warning: {} record(s) were skipped.", aggregation.skipped_count());
    }
    Ok(())
}

fn ui(frame: &mut Frame, app: &ChartApp) {
    let size = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header / year selector
            Constraint::Min(10),   // Chart + summary
            Constraint::Length(1), // Footer / Help
        ])
        .split(size);

    let Some(year) = app.current_year() else {
        frame.render_widget(
            Paragraph::new("No data available").alignment(Alignment::Center),
            main_layout[1],
        );
        return;
    };

    // --- Header ---
    let header_block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(THEME.muted));

    let header_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(20),    // Vehicle title
            Constraint::Length(16), // Year selector
        ])
        .split(main_layout[0]);

    let app_title = Paragraph::new(Span::styled(
        app.title.to_uppercase(),
        Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD),
    ))
    .block(Block::default().padding(Padding::new(0, 0, 1, 0)));
    frame.render_widget(app_title, header_layout[0]);

    let has_prev = app.current_year_index > 0;
    let has_next = app.current_year_index + 1 < app.years.len();
    let nav_text = Line::from(vec![
        Span::styled(" < ", Style::default().fg(if has_prev { THEME.text } else { THEME.muted })),
        Span::styled(format!(" {} ", year.year), Style::default().fg(THEME.text).add_modifier(Modifier::BOLD)),
        Span::styled(" > ", Style::default().fg(if has_next { THEME.text } else { THEME.muted })),
    ]);
    let nav = Paragraph::new(nav_text)
        .alignment(Alignment::Right)
        .block(Block::default().padding(Padding::new(0, 0, 1, 0)));
    frame.render_widget(nav, header_layout[1]);

    frame.render_widget(header_block, main_layout[0]);

    // --- Main Content Split ---
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(72), // Chart Area
            Constraint::Length(1),      // Gutter
            Constraint::Percentage(28), // Summary
        ])
        .split(main_layout[1]);

    draw_chart(frame, year, content_chunks[0]);
    draw_summary(frame, year, app.top, content_chunks[2]);

    // --- Footer ---
    let help = Line::from(vec![
        Span::styled("YEAR: ", Style::default().fg(THEME.muted)),
        Span::styled("←/→ ", Style::default().fg(THEME.text)),
        Span::raw("  "),
        Span::styled("QUIT: ", Style::default().fg(THEME.muted)),
        Span::styled("q", Style::default().fg(THEME.text)),
    ]);
    let footer = Paragraph::new(help).alignment(Alignment::Center).style(Style::default().fg(THEME.muted));
    frame.render_widget(footer, main_layout[2]);
}

fn draw_chart(frame: &mut Frame, year: &YearlySummary, area: Rect) {
    let points = monthly_series(year);

    let bar_items: Vec<Bar> = points.iter().enumerate().map(|(i, point)| {
        // Colour by month-over-month direction; months without a baseline stay neutral.
        let mom = year.month(i as u32 + 1).and_then(|m| m.mom_change_percent);
        let style = match mom {
            Some(pct) if pct > Decimal::ZERO => Style::default().fg(THEME.up),
            Some(_) => Style::default().fg(THEME.down),
            None => Style::default().fg(THEME.cost),
        };
        Bar::default()
            .label(point.label.as_str())
            .value(point.bar_height(1))
            .style(style)
            // Months without records show no value at all, not "0.00".
            .text_value(point.value.map(format_cost).unwrap_or_default())
    }).collect();

    let chart_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(THEME.muted))
        .title(" Monthly Maintenance Cost ");

    let chart = BarChart::default()
        .block(chart_block)
        .bar_width(6)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bar_items));

    frame.render_widget(chart, area);
}

fn draw_summary(frame: &mut Frame, year: &YearlySummary, top: usize, area: Rect) {
    let card = SummaryCard::from_year(year, top);
    let change_color = match year.yoy_change_percent {
        Some(pct) if pct > Decimal::ZERO => THEME.up,
        Some(_) => THEME.down,
        None => THEME.muted,
    };

    let mut lines = vec![
        Line::from(vec![Span::styled(format!("Year {}", card.period), Style::default().add_modifier(Modifier::BOLD))]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Total:   ", Style::default().fg(THEME.muted)),
            Span::styled(card.total, Style::default().fg(THEME.cost).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled("YoY:     ", Style::default().fg(THEME.muted)),
            Span::styled(card.change, Style::default().fg(change_color)),
        ]),
        Line::from(vec![
            Span::styled("Records: ", Style::default().fg(THEME.muted)),
            Span::styled(card.record_count.to_string(), Style::default().fg(THEME.text)),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled("Top parts", Style::default().add_modifier(Modifier::BOLD))]),
    ];
    for (i, part) in card.top_parts.into_iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("{}. ", i + 1), Style::default().fg(THEME.muted)),
            Span::styled(part, Style::default().fg(THEME.text)),
        ]));
    }

    let summary = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(THEME.muted))
            .title(" Summary "),
    );
    frame.render_widget(summary, area);
}
