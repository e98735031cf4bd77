//! Pipeline View - steps laid out by dependency level

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Render the pipeline of the open workflow
pub fn render_pipeline_view(f: &mut Frame, app: &App) {
    let diagnostics_height = if app.layout.diagnostics.is_empty() {
        0
    } else {
        (app.layout.diagnostics.len() as u16).min(6) + 2
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                  // Header
            Constraint::Min(6),                     // Levels
            Constraint::Length(diagnostics_height), // Warnings
            Constraint::Length(3),                  // Footer
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_levels(f, app, chunks[1]);
    if diagnostics_height > 0 {
        render_diagnostics(f, app, chunks[2]);
    }
    super::render_footer(f, "Esc/q: Quit | Tab: Schedule | Up/Down: Select step", chunks[3]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let title = format!(
        "{} [{}] | {} | {} steps | {} edges",
        app.workflow.name,
        app.workflow.status(),
        app.workflow.expr,
        app.layout.nodes.len(),
        app.layout.edges.len()
    );

    let header = Paragraph::new(title)
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_levels(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Pipeline (layered by dependency level)");

    if app.layout.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(Span::styled(
                "No steps configured",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from("Configure steps in conf.yaml to see the pipeline"),
        ])
        .block(block)
        .wrap(Wrap { trim: true });
        f.render_widget(empty, area);
        return;
    }

    let selected = app.layout.nodes.get(app.selected_step).map(|n| n.name.as_str());
    let mut items: Vec<ListItem> = Vec::new();

    for (level, nodes) in app.layout.levels().iter().enumerate() {
        let indent = "  ".repeat(level);
        items.push(ListItem::new(Line::from(Span::styled(
            format!("{}Level {} ────", indent, level),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ))));

        for node in nodes {
            let deps = app.layout.dependencies_of(&node.name);
            let deps_str = if deps.is_empty() {
                String::new()
            } else {
                format!(" <── {}", deps.join(", "))
            };

            let script = app
                .workflow
                .get_step(&node.name)
                .map(|s| format!(" ({})", s.script))
                .unwrap_or_default();

            let name_style = if selected == Some(node.name.as_str()) {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            };

            let arrow = if level > 0 { "├─ " } else { "" };
            items.push(ListItem::new(Line::from(vec![
                Span::raw(format!("{}  {}", indent, arrow)),
                Span::styled(node.name.clone(), name_style),
                Span::styled(script, Style::default().fg(Color::Gray)),
                Span::styled(deps_str, Style::default().fg(Color::DarkGray)),
            ])));
        }

        items.push(ListItem::new(Line::from("")));
    }

    f.render_widget(List::new(items).block(block), area);
}

fn render_diagnostics(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .layout
        .diagnostics
        .iter()
        .map(|d| {
            ListItem::new(Line::from(Span::styled(
                format!("⚠ {}", d),
                Style::default().fg(Color::Yellow),
            )))
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Warnings"));
    f.render_widget(list, area);
}
