use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, BorderType, Borders, Clear, Paragraph, Row, Table, Tabs, Wrap},
    Frame,
};
use simlab_core::{calculate_hours, PhaseColor, Status, Summary};
use unicode_width::UnicodeWidthStr;

use crate::tui::app::{App, Field, InputMode, Tab};

const EMPTY_MESSAGE: &str = "No events yet. Add some on the Input Data tab.";
const LABEL_WIDTH: u16 = 20;

struct Theme {
    primary: Color,
    muted: Color,
    text: Color,
    accent: Color,
    error: Color,
}

const THEME: Theme = Theme {
    primary: Color::Cyan,
    muted: Color::DarkGray,
    text: Color::White,
    accent: Color::Green,
    error: Color::Red,
};

fn phase_color(color: PhaseColor) -> Color {
    let (r, g, b) = color.rgb;
    Color::Rgb(r, g, b)
}

fn rounded_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(THEME.muted))
}

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Footer/Help
        ])
        .split(size);

    let titles: Vec<Line> = Tab::ALL.iter().map(|t| Line::from(t.title())).collect();
    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .block(
            Block::default()
                .title(" Simulation Lab Hours Calculator ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .style(Style::default().fg(THEME.muted))
        .highlight_style(Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, main_chunks[0]);

    // Aggregates are re-derived on every frame.
    let summary = app.summary();

    match app.tab {
        Tab::Input => draw_input(f, app, main_chunks[1]),
        Tab::Table => draw_table(f, app, &summary, main_chunks[1]),
        Tab::Dashboard => draw_dashboard(f, &summary, main_chunks[1]),
        Tab::Report => draw_report(f, &summary, main_chunks[1]),
    }

    let help = match (app.input_mode, app.tab) {
        (InputMode::Editing, _) => "Tab/↑↓: Field | ←→: Choose | Enter: Add Event | Esc: Done",
        (InputMode::ConfirmDelete(_), _) => "y: Delete | any other key: Cancel",
        (InputMode::Normal, Tab::Input) => "Enter/i: Edit form | c: Clear | 1-4/←→: Tabs | q: Quit",
        (InputMode::Normal, Tab::Table) => "j/k: Navigate | d: Delete | 1-4/←→: Tabs | q: Quit",
        (InputMode::Normal, _) => "1-4/←→: Tabs | q: Quit",
    };
    let footer = Paragraph::new(help)
        .style(Style::default().fg(THEME.muted))
        .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[2]);

    if let InputMode::ConfirmDelete(_) = app.input_mode {
        draw_popup(f, " Confirm ", "Delete this event? (y/n)", THEME.primary);
    }
    if let Some(notice) = &app.notice {
        let title = format!(" {} ", notice.title);
        draw_popup(f, &title, &notice.message, THEME.error);
    }
}

fn draw_popup(f: &mut Frame, title: &str, message: &str, color: Color) {
    let area = centered_rect(50, 5, f.area());
    let popup = Paragraph::new(vec![Line::from(""), Line::from(message)])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color)),
        );
    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let width = (u32::from(area.width) * u32::from(percent_x) / 100) as u16;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height: height.min(area.height),
    }
}

// --- Input tab ---

fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let editing = app.input_mode == InputMode::Editing;
    let fields = app.visible_fields();
    let lines: Vec<Line> = fields
        .iter()
        .map(|field| {
            let focused = editing && *field == app.focus;
            let value = app.field_value(*field);
            let value_span = if value.is_empty() && field.is_select() {
                Span::styled(format!("Select {}", field.label()), Style::default().fg(THEME.muted))
            } else {
                Span::styled(value, Style::default().fg(THEME.text))
            };
            let marker = if focused && field.is_select() { " ◂▸" } else { "" };
            Line::from(vec![
                Span::styled(
                    format!("{:<width$}", field.label(), width = LABEL_WIDTH as usize),
                    if focused {
                        Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(THEME.muted)
                    },
                ),
                value_span,
                Span::styled(marker, Style::default().fg(THEME.primary)),
            ])
        })
        .collect();

    let form = Paragraph::new(lines).block(rounded_block(" Add New Event "));
    f.render_widget(form, chunks[0]);

    if editing && !app.focus.is_select() {
        if let Some(row) = fields.iter().position(|f| *f == app.focus) {
            let before: String = app.focused_text().chars().take(app.cursor_position).collect();
            let x = chunks[0].x + 1 + LABEL_WIDTH + before.width() as u16;
            let y = chunks[0].y + 1 + row as u16;
            f.set_cursor_position(Position::new(x, y));
        }
    }

    let mut side = Vec::new();
    match app.form.phase {
        Some(phase) => {
            let hours = calculate_hours(phase, app.form.event_type, &app.form.duration);
            side.push(Line::from(vec![
                Span::styled("Hours for this event: ", Style::default().fg(THEME.muted)),
                Span::styled(format!("{:.1}", hours), Style::default().fg(THEME.accent).add_modifier(Modifier::BOLD)),
            ]));
        }
        None => side.push(Line::from(Span::styled("Select a phase to see its hours.", Style::default().fg(THEME.muted)))),
    }
    side.push(Line::from(""));
    if !app.events.is_empty() {
        side.push(Line::from(Span::styled(
            format!("✓ {} events ready", app.events.len()),
            Style::default().fg(THEME.accent).add_modifier(Modifier::BOLD),
        )));
    }
    let status = Paragraph::new(side)
        .wrap(Wrap { trim: true })
        .block(rounded_block(" Status "));
    f.render_widget(status, chunks[1]);
}

// --- Table tab ---

fn status_style(status: Status) -> Style {
    match status {
        Status::Complete => Style::default().fg(Color::Green),
        Status::InProgress => Style::default().fg(Color::Yellow),
        Status::Planned => Style::default().fg(Color::Gray),
    }
}

fn draw_table(f: &mut Frame, app: &mut App, summary: &Summary, area: Rect) {
    if app.events.is_empty() {
        draw_empty(f, area);
        return;
    }

    let rows: Vec<Row> = app.events.iter().map(|event| {
        Row::new(vec![
            Span::raw(event.date.format("%Y-%m-%d").to_string()),
            Span::styled(event.scenario.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(event.staff.clone()),
            Span::styled(event.phase.to_string(), Style::default().fg(phase_color(event.phase.color()))),
            Span::styled(event.status.to_string(), status_style(event.status)),
            Span::raw(format!("{:>6.1}", event.hours)),
        ])
    }).collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(10), // Date
            Constraint::Min(12),    // Scenario
            Constraint::Length(14), // Staff
            Constraint::Length(9),  // Phase
            Constraint::Length(11), // Status
            Constraint::Length(12), // Hours
        ]
    )
    .header(
        Row::new(vec!["Date", "Scenario", "Staff", "Phase", "Status", " Hours"])
            .style(Style::default().fg(Color::Yellow)),
    )
    .footer(
        Row::new(vec![
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            "TOTAL:".to_string(),
            format!("{:>6.1} hours", summary.total_hours),
        ])
        .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(rounded_block(" Events "))
    .row_highlight_style(Style::default().bg(THEME.muted).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn draw_empty(f: &mut Frame, area: Rect) {
    let empty = Paragraph::new(EMPTY_MESSAGE)
        .style(Style::default().fg(THEME.muted))
        .block(rounded_block(""));
    f.render_widget(empty, area);
}

// --- Dashboard tab ---

fn draw_cards(f: &mut Frame, summary: &Summary, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let cards = [
        ("Total Hours", format!("{:.1}", summary.total_hours)),
        ("Total Events", summary.event_count.to_string()),
        ("Avg per Event", format!("{:.1}", summary.average_hours)),
    ];
    for ((label, value), chunk) in cards.into_iter().zip(chunks.iter()) {
        let card = Paragraph::new(vec![
            Line::from(Span::styled(label, Style::default().fg(THEME.muted))),
            Line::from(Span::styled(value, Style::default().fg(THEME.accent).add_modifier(Modifier::BOLD))),
        ])
        .block(rounded_block(""));
        f.render_widget(card, *chunk);
    }
}

fn draw_dashboard(f: &mut Frame, summary: &Summary, area: Rect) {
    if summary.is_empty() {
        draw_empty(f, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),      // Cards
            Constraint::Percentage(60), // Monthly chart
            Constraint::Min(3),         // Phase breakdown
        ])
        .split(area);

    draw_cards(f, summary, chunks[0]);
    draw_monthly_chart(f, summary, chunks[1]);
    draw_phase_breakdown(f, summary, chunks[2]);
}

fn draw_monthly_chart(f: &mut Frame, summary: &Summary, area: Rect) {
    // Values are tenths of an hour; BarChart only takes integers.
    let bar_items: Vec<Bar> = summary.by_month.iter().map(|m| {
        Bar::default()
            .label(m.month.as_str())
            .value((m.hours * 10.0).round() as u64)
            .style(Style::default().fg(THEME.accent))
            .text_value(format!("{:.1}", m.hours))
    }).collect();

    let chart = BarChart::default()
        .block(rounded_block(" Hours by Month "))
        .bar_width(9)
        .bar_gap(2)
        .data(BarGroup::default().bars(&bar_items));

    f.render_widget(chart, area);
}

fn draw_phase_breakdown(f: &mut Frame, summary: &Summary, area: Rect) {
    let max = summary.by_phase.iter().map(|p| p.hours).fold(0.0_f64, f64::max);
    let bar_space = area.width.saturating_sub(30) as f64;

    let lines: Vec<Line> = summary.by_phase.iter().map(|p| {
        let len = if max > 0.0 { (p.hours / max * bar_space).round() as usize } else { 0 };
        let color = phase_color(p.color);
        Line::from(vec![
            Span::styled(format!("{:<10}", p.phase.as_str()), Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Span::styled(format!("{:>8}h ", p.hours), Style::default().fg(THEME.text)),
            Span::styled("█".repeat(len), Style::default().fg(color)),
        ])
    }).collect();

    let breakdown = Paragraph::new(lines).block(rounded_block(" Hours by Phase "));
    f.render_widget(breakdown, area);
}

// --- Report tab ---

fn draw_report(f: &mut Frame, summary: &Summary, area: Rect) {
    if summary.is_empty() {
        draw_empty(f, area);
        return;
    }

    let heading = Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD);
    let muted = Style::default().fg(THEME.muted);

    let mut lines = vec![
        Line::from(Span::styled("Simulation Lab Hours Report", heading)),
        Line::from(Span::styled(format!("Generated: {}", Local::now().format("%Y-%m-%d")), muted)),
        Line::from(""),
        Line::from(vec![
            Span::styled("Total Hours: ", muted),
            Span::styled(format!("{:.1}", summary.total_hours), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled("   Total Events: ", muted),
            Span::styled(summary.event_count.to_string(), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled("   Avg per Event: ", muted),
            Span::styled(format!("{:.1}", summary.average_hours), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
        Line::from(Span::styled("Scenario Summary", heading)),
    ];

    for s in &summary.by_scenario {
        lines.push(Line::from(vec![
            Span::styled("│ ", Style::default().fg(Color::Magenta)),
            Span::styled(s.scenario.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(format!("  {:.1} hours", s.hours), muted),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Hours by Phase", heading)));
    for p in &summary.by_phase {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<12}", p.phase.as_str()), Style::default().fg(phase_color(p.color))),
            Span::styled(format!("{:.1} hrs", p.hours), Style::default().add_modifier(Modifier::BOLD)),
        ]));
    }

    let report = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(rounded_block(" Report "));
    f.render_widget(report, area);
}
