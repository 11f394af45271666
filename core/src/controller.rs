//! Synchronous driver for `ViewState`.
//!
//! Each operation runs begin, round trip, finish in one call. Hosts with their
//! own event loop can drive `ViewState` and `DataClient` directly instead.

use crate::state::ViewState;
use crate::transport::{DataClient, Transport};
use crate::types::{Color, TaskId};

#[derive(Debug, Clone)]
pub struct Controller<T> {
    data: DataClient<T>,
}

impl<T: Transport> Controller<T> {
    pub fn new(data: DataClient<T>) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &DataClient<T> {
        &self.data
    }

    pub fn load_all(&self, state: &mut ViewState) {
        let pending = state.begin_load();
        let result = self.data.list();
        state.finish_load(pending, result);
    }

    pub fn add_task(&self, state: &mut ViewState, title: &str, color: Option<Color>) {
        if let Some(pending) = state.begin_add(title, color) {
            let result = self.data.create_with(&pending.input);
            state.finish_add(pending, result);
        }
    }

    pub fn toggle_task(&self, state: &mut ViewState, id: &TaskId) {
        if let Some(pending) = state.begin_toggle(id) {
            let result = self.data.update(&pending.id, &pending.input);
            state.finish_update(pending, result);
        }
    }

    pub fn rename_task(&self, state: &mut ViewState, id: &TaskId, title: &str) {
        if let Some(pending) = state.begin_rename(id, title) {
            let result = self.data.update(&pending.id, &pending.input);
            state.finish_update(pending, result);
        }
    }

    pub fn delete_task(&self, state: &mut ViewState, id: &TaskId) {
        let pending = state.begin_delete(id.clone());
        let result = self.data.delete(&pending.id);
        state.finish_delete(pending, result);
    }

    /// Deletes the staged candidate, if any.
    pub fn confirm_delete(&self, state: &mut ViewState) {
        if let Some(pending) = state.confirm_delete() {
            let result = self.data.delete(&pending.id);
            state.finish_delete(pending, result);
        }
    }
}
