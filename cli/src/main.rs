use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use task_core::config::{BASE_URL_ENV, DEFAULT_BASE_URL};
use task_core::{ClientConfig, Color, Controller, TaskId, Transport, ViewState};
use tracing_subscriber::EnvFilter;

mod render;

#[derive(Debug, Parser)]
#[command(name = "tasks", about = "Manage the task list")]
struct Cli {
    /// Base URL of the task service.
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    api_url: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show all tasks.
    List,
    /// Create a task.
    Add {
        title: String,
        #[arg(long, value_parser = parse_color)]
        color: Option<Color>,
    },
    /// Flip a task's completion flag.
    Toggle { id: String },
    /// Change a task's title.
    Rename { id: String, title: String },
    /// Delete a task after confirmation.
    Delete {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

fn parse_color(value: &str) -> Result<Color, String> {
    Color::parse(value).ok_or_else(|| {
        let names: Vec<_> = Color::ALL.iter().map(|c| c.as_str()).collect();
        format!("expected one of: {}", names.join(", "))
    })
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let controller = ClientConfig::new(cli.api_url).controller();
    let mut state = ViewState::new();

    run(
        &controller,
        &mut state,
        cli.command.unwrap_or(Command::List),
        prompt_confirm,
    )?;

    print!("{}", render::render(&state));
    io::stdout().flush().context("writing output")?;

    Ok(if state.error().is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Loads the list, then applies one command to it.
fn run<T, F>(
    controller: &Controller<T>,
    state: &mut ViewState,
    command: Command,
    mut confirm: F,
) -> anyhow::Result<()>
where
    T: Transport,
    F: FnMut(&str) -> io::Result<bool>,
{
    controller.load_all(state);
    if state.error().is_some() {
        return Ok(());
    }

    match command {
        Command::List => {}
        Command::Add { title, color } => {
            if title.trim().is_empty() {
                anyhow::bail!("task title must not be empty");
            }
            controller.add_task(state, &title, color);
        }
        Command::Toggle { id } => controller.toggle_task(state, &TaskId::from(id)),
        Command::Rename { id, title } => {
            if title.trim().is_empty() {
                anyhow::bail!("task title must not be empty");
            }
            controller.rename_task(state, &TaskId::from(id), &title);
        }
        Command::Delete { id, yes } => {
            let id = TaskId::from(id);
            let label = state
                .get(&id)
                .map(|t| t.title.clone())
                .unwrap_or_else(|| id.to_string());
            state.stage_delete(id);
            if yes || confirm(&label).context("reading confirmation")? {
                controller.confirm_delete(state);
            } else if let Some(id) = state.cancel_delete() {
                tracing::debug!(%id, "delete cancelled");
            }
        }
    }
    Ok(())
}

fn prompt_confirm(label: &str) -> io::Result<bool> {
    let mut stderr = io::stderr();
    write!(stderr, "Do you want to delete this task ({label})? [y/N] ")?;
    stderr.flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "Yes"))
}
