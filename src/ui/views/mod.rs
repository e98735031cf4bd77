//! UI Views - Pipeline, Timer

pub mod pipeline;
pub mod timer;

pub use pipeline::render_pipeline_view;
pub use timer::render_timer_view;

use crate::app::{App, View};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the active view
pub fn render(f: &mut Frame, app: &App) {
    match app.view {
        View::Pipeline => render_pipeline_view(f, app),
        View::Timer => render_timer_view(f, app),
    }
}

fn render_footer(f: &mut Frame, text: &str, area: Rect) {
    let footer = Paragraph::new(text.to_string())
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(footer, area);
}
