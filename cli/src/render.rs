//! Plain-text rendering of a `ViewState`.

use std::fmt::Write;

use task_core::{TaskRecord, ViewState};

pub const EMPTY_MESSAGE: &str = "You don't have any task registered yet.";

pub fn render(state: &ViewState) -> String {
    let mut out = String::new();
    if let Some(error) = state.error() {
        let _ = writeln!(out, "! {error}");
    }
    if state.is_loading() {
        let _ = writeln!(out, "Loading...");
        return out;
    }

    let summary = state.summary();
    let _ = writeln!(
        out,
        "Tasks: {}  Completed: {} of {}",
        summary.total, summary.completed, summary.total
    );
    if state.is_empty() {
        let _ = writeln!(out, "{EMPTY_MESSAGE}");
        return out;
    }
    for task in state.tasks() {
        let _ = writeln!(out, "{}", task_line(task));
    }
    out
}

fn task_line(task: &TaskRecord) -> String {
    let mark = if task.completed { "x" } else { " " };
    format!("[{mark}] {} ({}) {}", task.title, task.color, task.id)
}
