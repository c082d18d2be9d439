//! Status state machine and the update guard
//!
//! ```text
//! TO_DO ──► IN_PROGRESS ──► DONE
//!   └────────────────────────▲
//! ```
//!
//! `DONE` is terminal and locks the task against field updates.

use strum::{Display, EnumString};

use crate::error::{TaskError, TaskResult};
use crate::models::{Task, TaskStatus};

impl TaskStatus {
    /// Statuses reachable in one step from `self`
    pub const fn allowed_transitions(self) -> &'static [TaskStatus] {
        match self {
            TaskStatus::ToDo => &[TaskStatus::InProgress, TaskStatus::Done],
            TaskStatus::InProgress => &[TaskStatus::Done],
            TaskStatus::Done => &[],
        }
    }

    pub fn can_transition_to(self, target: TaskStatus) -> bool {
        self.allowed_transitions().contains(&target)
    }

    /// Whether a task in this status rejects field updates
    pub const fn is_locked(self) -> bool {
        matches!(self, TaskStatus::Done)
    }
}

/// How much the status endpoint checks before writing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TransitionPolicy {
    /// Read the current status and enforce the transition table
    #[default]
    Strict,
    /// Only check that the target is a known status
    Lenient,
}

/// Rules applied by [`crate::TaskService`] before anything is persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskLifecycle {
    policy: TransitionPolicy,
}

impl TaskLifecycle {
    pub const fn new(policy: TransitionPolicy) -> Self {
        Self { policy }
    }

    /// Whether status changes must be checked against the current status
    pub const fn checks_transitions(&self) -> bool {
        matches!(self.policy, TransitionPolicy::Strict)
    }

    /// Done-guard for the general update path
    pub fn ensure_updatable(&self, current: &Task) -> TaskResult<()> {
        if current.status.is_locked() {
            return Err(TaskError::TaskDone(current.id));
        }
        Ok(())
    }

    /// Parse a client supplied status; matching is exact (`"DONE"`, not `"done"`).
    pub fn parse_target(&self, raw: &str) -> TaskResult<TaskStatus> {
        raw.parse()
            .map_err(|_| TaskError::InvalidStatus(raw.to_string()))
    }

    pub fn ensure_transition(&self, from: TaskStatus, to: TaskStatus) -> TaskResult<()> {
        if from.can_transition_to(to) {
            Ok(())
        } else {
            Err(TaskError::InvalidTransition { from, to })
        }
    }
}
