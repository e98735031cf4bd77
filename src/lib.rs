//! Orchestrium - workflow pipeline resolver and cron schedule engine
//!
//! Turns a workflow's step list into a leveled, positioned dependency graph
//! and validates, recomposes and describes its six-field cron schedule.

pub mod app;
pub mod config;
pub mod core;
pub mod cron;
pub mod store;
pub mod ui;

// Re-exports
pub use app::App;
pub use config::Config;
pub use core::{resolve, Diagnostic, LayoutConfig, PipelineLayout, Step, Workflow};
pub use cron::{CronError, CronField, CronForm, FieldState, Schedule};
pub use store::{StoreError, WorkflowStore};

/// Result type alias
pub type Result<T> = anyhow::Result<T>;
