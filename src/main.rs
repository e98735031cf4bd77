//! Orchestrium CLI entry point

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use orchestrium::cron::{find_preset, Describe, EnglishDescriber, PRESETS};
use orchestrium::ui::TUI;
use orchestrium::{resolve, App, Config, CronField, CronForm, Schedule, WorkflowStore};
use std::path::PathBuf;
use std::process::ExitCode;

const MAX_RUNS: i64 = 1000;

#[derive(Parser)]
#[command(
    name = "orchestrium",
    about = "Inspect workflow pipelines and cron schedules",
    version
)]
struct Cli {
    /// Config file (defaults to ~/.orchestrium/config.yml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Workflows directory
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Locale for schedule descriptions
    #[arg(long, global = true)]
    locale: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List workflows with their schedule
    List,
    /// Show a workflow's pipeline levels and edges
    Layout {
        id: String,
        /// Print the layout as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate a six-field cron expression
    Cron {
        /// Expression, e.g. "0 */5 * * * *"
        #[arg(default_value = "")]
        expr: String,
        /// Start from a named preset instead
        #[arg(long)]
        preset: Option<String>,
        /// Replace one field, e.g. --set dow=1-5
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        set: Vec<String>,
        /// Print the field state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the next run times of an expression
    Next {
        expr: String,
        /// Number of runs to show (1-1000)
        #[arg(
            short = 'n',
            long,
            default_value_t = 5,
            value_parser = clap::value_parser!(u16).range(1..=MAX_RUNS)
        )]
        count: u16,
    },
    /// List schedule presets
    Presets,
    /// List a workflow's script files
    Files { id: String },
    /// Print one of a workflow's script files
    Show { id: String, file: String },
    /// Open the interactive view of a workflow
    View { id: String },
}

fn main() -> ExitCode {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    }
    .with_overrides(cli.root, cli.locale);

    let store = WorkflowStore::new(&config.workflows_dir);
    let describer = EnglishDescriber;

    match cli.command {
        Command::List => {
            let workflows = store.list()?;
            if workflows.is_empty() {
                println!("No workflows in {}", store.root().display());
            }
            let now = chrono::Local::now().naive_local();
            for workflow in workflows {
                let next = Schedule::parse(&workflow.expr)
                    .ok()
                    .and_then(|s| s.next_after(now))
                    .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_else(|| "-".to_string());
                let valid = if CronForm::parse(&workflow.expr).is_valid() {
                    "valid"
                } else {
                    "invalid"
                };
                println!(
                    "{}\t{}\t{}\t{}\t{}\tnext: {}",
                    workflow.id,
                    workflow.name,
                    workflow.status(),
                    workflow.expr,
                    valid,
                    next
                );
            }
        }
        Command::Layout { id, json } => {
            let workflow = store.get(&id)?;
            let layout = resolve(&workflow.steps, &config.layout);

            if json {
                println!("{}", serde_json::to_string_pretty(&layout)?);
                return Ok(ExitCode::SUCCESS);
            }

            if layout.is_empty() {
                println!("No steps configured");
                return Ok(ExitCode::SUCCESS);
            }

            for (level, nodes) in layout.levels().iter().enumerate() {
                let names: Vec<&str> = nodes.iter().map(|n| n.name.as_str()).collect();
                println!("Level {}: {}", level, names.join(", "));
            }
            for edge in &layout.edges {
                println!("{} -> {}", edge.source, edge.target);
            }
            for diagnostic in &layout.diagnostics {
                println!("warning: {}", diagnostic);
            }
        }
        Command::Cron {
            expr,
            preset,
            set,
            json,
        } => {
            let mut form = CronForm::parse(&expr);
            if let Some(name) = preset {
                let preset = find_preset(&name)
                    .with_context(|| format!("Unknown preset '{}'", name))?;
                form.apply_preset(preset);
            }
            for assignment in &set {
                let Some((key, value)) = assignment.split_once('=') else {
                    bail!("Expected FIELD=VALUE, got '{}'", assignment);
                };
                let field: CronField = key.parse()?;
                form.set_field(field, value);
            }

            let state = form.state();
            if json {
                println!("{}", serde_json::to_string_pretty(&state)?);
            } else {
                for slot in &state.fields {
                    println!(
                        "{:<13} {:<10} {}",
                        slot.field.label(),
                        slot.value,
                        if slot.valid { "ok" } else { "invalid" }
                    );
                }
                println!("expression: {}", state.expression);
                if state.valid {
                    println!(
                        "Run {}",
                        describer.describe(&state.expression, &config.locale)?
                    );
                } else {
                    println!("Invalid values");
                }
            }

            if !state.valid {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Next { expr, count } => {
            let schedule = Schedule::parse(&expr)?;
            let now = chrono::Local::now().naive_local();
            let runs = schedule.upcoming(now, usize::from(count));
            if runs.is_empty() {
                println!("No upcoming runs");
            }
            for run in runs {
                println!("{}", run.format("%a %Y-%m-%d %H:%M:%S"));
            }
        }
        Command::Presets => {
            for preset in PRESETS {
                println!("{:<20} {:<16} {}", preset.slug(), preset.expr, preset.name);
            }
        }
        Command::Files { id } => {
            for file in store.files(&id)? {
                println!("{}", file);
            }
        }
        Command::Show { id, file } => {
            print!("{}", store.read_file(&id, &file)?);
        }
        Command::View { id } => {
            let workflow = store.get(&id)?;
            let mut app = App::new(workflow, &config);
            {
                let mut tui = TUI::new()?;
                tui.run(&mut app)?;
            }
            if let Some(expr) = app.changed_schedule() {
                println!("Edited schedule (not saved): {}", expr);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
