//! Application state for the interactive workflow view

use crate::config::Config;
use crate::core::{resolve, PipelineLayout, Workflow};
use crate::cron::{CronField, CronForm, Describe, EnglishDescriber, Schedule, PRESETS};
use chrono::NaiveDateTime;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Which screen is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Pipeline,
    Timer,
}

/// Application state
pub struct App {
    pub workflow: Workflow,
    pub layout: PipelineLayout,
    pub form: CronForm,
    pub view: View,
    pub selected_step: usize,
    pub selected_field: usize,
    /// Index into PRESETS of the last applied preset
    pub preset_cursor: Option<usize>,
    /// Last expression that passed validation
    pub accepted_expr: String,
    pub locale: String,
    pub should_quit: bool,
    describer: EnglishDescriber,
}

impl App {
    /// Create a new app from a workflow snapshot
    pub fn new(workflow: Workflow, config: &Config) -> Self {
        let layout = resolve(&workflow.steps, &config.layout);
        let form = CronForm::parse(&workflow.expr);
        let accepted_expr = form.accepted().unwrap_or_default();

        log::info!(
            "Opened workflow {} ({} steps, {} edges)",
            workflow.id,
            layout.nodes.len(),
            layout.edges.len()
        );

        Self {
            workflow,
            layout,
            form,
            view: View::Pipeline,
            selected_step: 0,
            selected_field: 0,
            preset_cursor: None,
            accepted_expr,
            locale: config.locale.clone(),
            should_quit: false,
            describer: EnglishDescriber,
        }
    }

    pub fn selected_field(&self) -> CronField {
        CronField::ALL[self.selected_field]
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.should_quit = true;
            return;
        }

        if key.code == KeyCode::Tab {
            self.view = match self.view {
                View::Pipeline => View::Timer,
                View::Timer => View::Pipeline,
            };
            return;
        }

        match self.view {
            View::Pipeline => self.handle_pipeline_key(key.code),
            View::Timer => self.handle_timer_key(key.code),
        }
    }

    fn handle_pipeline_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Up => {
                self.selected_step = self.selected_step.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected_step + 1 < self.layout.nodes.len() {
                    self.selected_step += 1;
                }
            }
            _ => {}
        }
    }

    fn handle_timer_key(&mut self, code: KeyCode) {
        let field = self.selected_field();
        match code {
            KeyCode::Left => {
                let count = CronField::ALL.len();
                self.selected_field = (self.selected_field + count - 1) % count;
            }
            KeyCode::Right => {
                self.selected_field = (self.selected_field + 1) % CronField::ALL.len();
            }
            KeyCode::Char('p') => {
                let next = self.preset_cursor.map_or(0, |i| (i + 1) % PRESETS.len());
                self.form.apply_preset(&PRESETS[next]);
                self.preset_cursor = Some(next);
                self.refresh();
            }
            KeyCode::Char(c) => {
                self.form.push_char(field, c);
                self.refresh();
            }
            KeyCode::Backspace => {
                self.form.pop_char(field);
                self.refresh();
            }
            _ => {}
        }
    }

    fn refresh(&mut self) {
        if let Some(expr) = self.form.accepted() {
            if expr != self.accepted_expr {
                log::debug!("Schedule accepted: {}", expr);
                self.accepted_expr = expr;
            }
        }
    }

    /// Status line for the timer view
    pub fn description(&self) -> String {
        match self.form.accepted() {
            Some(expr) => match self.describer.describe(&expr, &self.locale) {
                Ok(text) => format!("Run {}", text),
                Err(e) => format!("Invalid values ({})", e),
            },
            None => "Invalid values".to_string(),
        }
    }

    /// Upcoming runs of the current form, if valid
    pub fn upcoming_runs(&self, after: NaiveDateTime, count: usize) -> Vec<NaiveDateTime> {
        Schedule::parse(&self.form.expression())
            .map(|s| s.upcoming(after, count))
            .unwrap_or_default()
    }

    /// The edited schedule, when it differs from the workflow's stored one
    pub fn changed_schedule(&self) -> Option<&str> {
        (!self.accepted_expr.is_empty() && self.accepted_expr != self.workflow.expr)
            .then_some(self.accepted_expr.as_str())
    }
}
