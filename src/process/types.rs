/*!
 * Process Types
 * Input specifications, lifecycle states and result rows
 */

use crate::core::types::{Priority, ProcessId, Tick};
use serde::{Deserialize, Serialize};

/// One process of a workload, as produced by a loader or a caller
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessSpec {
    pub id: ProcessId,
    pub arrival: Tick,
    pub burst: Tick,
    pub priority: Priority,
}

impl ProcessSpec {
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<ProcessId>, arrival: Tick, burst: Tick, priority: u8) -> Self {
        Self {
            id: id.into(),
            arrival,
            burst,
            priority: Priority::new(priority),
        }
    }
}

/// Process lifecycle state
///
/// `Unarrived -> Ready -> Running -> {Ready, Completed}`; `Completed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Arrival time not reached yet
    Unarrived,
    /// Enqueued in a ready queue
    Ready,
    /// Executing the current run-slice
    Running,
    /// All CPU demand served
    Completed,
}

impl ProcessState {
    /// Check whether `self -> next` is a legal lifecycle transition
    #[inline]
    pub const fn can_transition_to(self, next: ProcessState) -> bool {
        matches!(
            (self, next),
            (ProcessState::Unarrived, ProcessState::Ready)
                | (ProcessState::Ready, ProcessState::Ready)
                | (ProcessState::Ready, ProcessState::Running)
                | (ProcessState::Running, ProcessState::Ready)
                | (ProcessState::Running, ProcessState::Completed)
        )
    }

    #[inline(always)]
    pub const fn is_terminal(self) -> bool {
        matches!(self, ProcessState::Completed)
    }
}

/// Per-process result row
///
/// Optional fields are `null` for a process that never ran or never completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessRow {
    pub id: ProcessId,
    pub arrival: Tick,
    pub burst: Tick,
    pub priority: Priority,
    pub first_start: Option<Tick>,
    pub completion: Option<Tick>,
    pub turnaround: Option<Tick>,
    pub waiting: Tick,
    pub response: Option<Tick>,
}

impl ProcessRow {
    #[inline(always)]
    pub const fn is_completed(&self) -> bool {
        self.completion.is_some()
    }
}
