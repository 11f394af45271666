//! Local view state and its reconciliation rules.
//!
//! # Design
//! `ViewState` is a plain value owned by the host: the ordered task list,
//! the load phase, one error slot and the delete confirmation stage. Every
//! server interaction is split into `begin_*`, which returns the pending call
//! the host must execute, and `finish_*`, which folds the result back in.
//! Nothing is mutated optimistically; local records only change when a
//! server-confirmed record arrives.
//!
//! Each `begin_*` stamps the call with a sequence number. An update response
//! is applied only if nothing newer has already been applied for the same
//! task, and a load result only if no later load has been started. This
//! lets an event-loop host keep several calls in flight without an older
//! response overwriting a newer one.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::{FetchError, Operation};
use crate::types::{Color, CreateTask, Task, TaskId, TaskRecord, Title, UpdateTask};

/// Load phase of the task list: `Idle -> Loading -> Ready | Error`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Ready,
    Error,
}

/// Two-step delete: a candidate is staged, then confirmed or cancelled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeleteStage {
    #[default]
    Unstaged,
    Staged(TaskId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub completed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLoad {
    seq: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCreate {
    seq: u64,
    pub input: CreateTask,
}

/// A toggle or rename waiting for the server's record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpdate {
    seq: u64,
    pub id: TaskId,
    pub input: UpdateTask,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    seq: u64,
    pub id: TaskId,
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    tasks: Vec<TaskRecord>,
    phase: Phase,
    error: Option<String>,
    delete_stage: DeleteStage,
    last_seq: u64,
    latest_load: u64,
    applied: HashMap<TaskId, u64>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[TaskRecord] {
        &self.tasks
    }

    pub fn get(&self, id: &TaskId) -> Option<&TaskRecord> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn summary(&self) -> Summary {
        Summary {
            total: self.tasks.len(),
            completed: self.tasks.iter().filter(|t| t.completed).count(),
        }
    }

    // --- load ---

    pub fn begin_load(&mut self) -> PendingLoad {
        let seq = self.next_seq();
        self.latest_load = seq;
        self.phase = Phase::Loading;
        PendingLoad { seq }
    }

    /// Replaces the whole list on success. On failure the previous list is
    /// kept and the error slot is set.
    pub fn finish_load(&mut self, pending: PendingLoad, result: Result<Vec<Task>, FetchError>) {
        if pending.seq != self.latest_load {
            debug!(seq = pending.seq, "dropping superseded load result");
            return;
        }
        match result {
            Ok(tasks) => {
                self.tasks = tasks.into_iter().map(TaskRecord::from).collect();
                // The snapshot supersedes every update started before this load.
                self.applied = self
                    .tasks
                    .iter()
                    .map(|t| (t.id.clone(), pending.seq))
                    .collect();
                self.error = None;
                self.phase = Phase::Ready;
            }
            Err(err) => {
                self.record_failure(&err);
                self.phase = Phase::Error;
            }
        }
    }

    // --- create ---

    /// Returns `None` for a blank title; no call should be made.
    pub fn begin_add(&mut self, title: &str, color: Option<Color>) -> Option<PendingCreate> {
        let Ok(title) = Title::parse(title) else {
            debug!("ignoring blank task title");
            return None;
        };
        Some(PendingCreate {
            seq: self.next_seq(),
            input: CreateTask::new(title, color),
        })
    }

    pub fn finish_add(&mut self, pending: PendingCreate, result: Result<Task, FetchError>) {
        match result {
            Ok(task) => {
                let record = TaskRecord::from(task);
                self.applied.insert(record.id.clone(), pending.seq);
                match self.tasks.iter_mut().find(|t| t.id == record.id) {
                    Some(existing) => *existing = record,
                    None => self.tasks.push(record),
                }
            }
            Err(err) => self.record_failure(&err),
        }
    }

    // --- update ---

    /// Computes the negated completion flag from the local record.
    pub fn begin_toggle(&mut self, id: &TaskId) -> Option<PendingUpdate> {
        let Some(record) = self.get(id) else {
            warn!(%id, "toggle requested for a task that is not in the list");
            self.error = Some(Operation::Update.failure_message().to_string());
            return None;
        };
        let completed = !record.completed;
        Some(PendingUpdate {
            seq: self.next_seq(),
            id: id.clone(),
            input: UpdateTask::completed(completed),
        })
    }

    pub fn begin_rename(&mut self, id: &TaskId, title: &str) -> Option<PendingUpdate> {
        let Ok(title) = Title::parse(title) else {
            debug!(%id, "ignoring blank task title");
            return None;
        };
        Some(PendingUpdate {
            seq: self.next_seq(),
            id: id.clone(),
            input: UpdateTask::title(title),
        })
    }

    /// The server's record replaces the local one, unless a newer update or
    /// load for the same task has already been applied.
    pub fn finish_update(&mut self, pending: PendingUpdate, result: Result<Task, FetchError>) {
        let task = match result {
            Ok(task) => task,
            Err(err) => return self.record_failure(&err),
        };
        if task.id != pending.id {
            warn!(requested = %pending.id, returned = %task.id, "dropping update for mismatched id");
            return;
        }
        let last = self.applied.get(&pending.id).copied().unwrap_or(0);
        if pending.seq < last {
            debug!(id = %pending.id, seq = pending.seq, last, "dropping out-of-order update");
            return;
        }
        let Some(existing) = self.tasks.iter_mut().find(|t| t.id == pending.id) else {
            debug!(id = %pending.id, "dropping update for a task no longer in the list");
            return;
        };
        *existing = TaskRecord::from(task);
        self.applied.insert(pending.id, pending.seq);
    }

    // --- delete ---

    pub fn stage_delete(&mut self, id: TaskId) {
        self.delete_stage = DeleteStage::Staged(id);
    }

    pub fn staged_delete(&self) -> Option<&TaskId> {
        match &self.delete_stage {
            DeleteStage::Staged(id) => Some(id),
            DeleteStage::Unstaged => None,
        }
    }

    /// Discards the staged candidate without any server call.
    pub fn cancel_delete(&mut self) -> Option<TaskId> {
        match std::mem::take(&mut self.delete_stage) {
            DeleteStage::Staged(id) => Some(id),
            DeleteStage::Unstaged => None,
        }
    }

    /// Consumes the staged candidate and turns it into a pending delete.
    pub fn confirm_delete(&mut self) -> Option<PendingDelete> {
        match std::mem::take(&mut self.delete_stage) {
            DeleteStage::Staged(id) => Some(self.begin_delete(id)),
            DeleteStage::Unstaged => None,
        }
    }

    pub fn begin_delete(&mut self, id: TaskId) -> PendingDelete {
        PendingDelete {
            seq: self.next_seq(),
            id,
        }
    }

    pub fn finish_delete(&mut self, pending: PendingDelete, result: Result<(), FetchError>) {
        match result {
            Ok(()) => {
                self.tasks.retain(|t| t.id != pending.id);
                self.applied.remove(&pending.id);
            }
            Err(err) => self.record_failure(&err),
        }
    }

    fn next_seq(&mut self) -> u64 {
        self.last_seq += 1;
        self.last_seq
    }

    fn record_failure(&mut self, err: &FetchError) {
        warn!(error = %err, "task request failed");
        self.error = Some(err.message().to_string());
    }
}
