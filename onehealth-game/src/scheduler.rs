//! Fire-once deferred tasks on a virtual millisecond clock.
//!
//! Every task carries a [`TaskScope`]. When the thing a task belongs to goes
//! away (a modal closes, a mission restarts, a newer scene takes over) the
//! owner cancels the whole scope, so a stale task can never act on new state.

use serde::{Deserialize, Serialize};

use crate::modals::ModalId;
use crate::navigation::SceneId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskScope {
    /// The delayed scroll of the active scene.
    SceneScroll,
    /// Anything tied to the current mission attempt.
    Mission,
    /// Tied to the lifetime of an open modal.
    Modal(ModalId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeferredAction {
    ScrollToScene(SceneId),
    EnterScene(SceneId),
    DismissQuizFeedback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub id: TaskId,
    pub due_ms: u64,
    pub scope: TaskScope,
    pub action: DeferredAction,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now_ms: u64,
    next_id: u64,
    pending: Vec<ScheduledTask>,
}

impl Scheduler {
    #[must_use]
    pub const fn now_ms(&self) -> u64 {
        self.now_ms
    }

    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn schedule(&mut self, delay_ms: u64, scope: TaskScope, action: DeferredAction) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.pending.push(ScheduledTask {
            id,
            due_ms: self.now_ms.saturating_add(delay_ms),
            scope,
            action,
        });
        id
    }

    /// Cancel every task in `scope`, returning how many were dropped.
    pub fn cancel_scope(&mut self, scope: TaskScope) -> usize {
        let before = self.pending.len();
        self.pending.retain(|task| task.scope != scope);
        let dropped = before - self.pending.len();
        if dropped > 0 {
            log::debug!("cancelled {dropped} task(s) in {scope:?}");
        }
        dropped
    }

    /// Remove and return the earliest task due at or before `until`, moving
    /// the clock to its due time. Ties fire in scheduling order.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<ScheduledTask> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, task)| task.due_ms <= until_ms)
            .min_by_key(|(_, task)| (task.due_ms, task.id))
            .map(|(index, _)| index)?;
        let task = self.pending.remove(index);
        self.now_ms = self.now_ms.max(task.due_ms);
        Some(task)
    }

    /// Move the clock forward to `until_ms` once all due tasks have run.
    pub fn settle(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }
}
