//! Timer View - six-field schedule editor with presets

use crate::app::App;
use crate::cron::{CronField, PRESETS};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

const UPCOMING_RUNS: usize = 5;

/// Render the schedule editor
pub fn render_timer_view(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Status
            Constraint::Length(3), // Fields
            Constraint::Min(6),    // Presets + upcoming runs
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    render_status(f, app, chunks[0]);
    render_fields(f, app, chunks[1]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);
    render_presets(f, app, bottom[0]);
    render_upcoming(f, app, bottom[1]);

    super::render_footer(
        f,
        "Esc: Quit | Tab: Pipeline | Left/Right: Field | Type to edit | Backspace | p: Next preset",
        chunks[3],
    );
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let (icon, color) = if app.form.is_valid() {
        ("✓", Color::Green)
    } else {
        ("✗", Color::Red)
    };

    let line = Line::from(vec![
        Span::styled(format!("{} ", icon), Style::default().fg(color)),
        Span::raw(app.description()),
        Span::styled(
            format!("  [{}]", app.form.expression()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let status = Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("Schedule"));
    f.render_widget(status, area);
}

fn render_fields(f: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 6); 6])
        .split(area);

    let state = app.form.state();
    for (i, field) in CronField::ALL.into_iter().enumerate() {
        let slot = state.slot(field);
        let valid = slot.valid;
        let selected = i == app.selected_field;

        let mut border = Style::default().fg(if valid { Color::Gray } else { Color::Red });
        if selected {
            border = border.add_modifier(Modifier::BOLD);
            if valid {
                border = border.fg(Color::Cyan);
            }
        }

        let value = slot.value.as_str();
        let text = if value.is_empty() { field.key() } else { value };
        let text_style = if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        let cell = Paragraph::new(Span::styled(text.to_string(), text_style)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(field.label()),
        );
        f.render_widget(cell, columns[i]);
    }
}

fn render_presets(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = PRESETS
        .iter()
        .enumerate()
        .map(|(i, preset)| {
            let marker = if app.preset_cursor == Some(i) { "▶ " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::raw(marker),
                Span::styled(preset.name, Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(format!("  {}", preset.expr), Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Predefined expressions"),
    );
    f.render_widget(list, area);
}

fn render_upcoming(f: &mut Frame, app: &App, area: Rect) {
    let now = chrono::Local::now().naive_local();
    let items: Vec<ListItem> = app
        .upcoming_runs(now, UPCOMING_RUNS)
        .into_iter()
        .map(|run| ListItem::new(run.format("%a %Y-%m-%d %H:%M:%S").to_string()))
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Next runs"));
    f.render_widget(list, area);
}
