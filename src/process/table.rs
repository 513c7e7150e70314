/*!
 * Process Table
 * Mutable per-process simulation state, indexed by handle and by id
 */

use super::types::{ProcessRow, ProcessSpec, ProcessState};
use crate::core::types::{Priority, ProcessId, QueueLevel, Tick};
use ahash::RandomState;
use std::collections::HashMap;

/// Dense index into the process table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProcessHandle(usize);

impl ProcessHandle {
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Simulation state of one process
#[derive(Debug, Clone)]
pub struct SimProcess {
    pub id: ProcessId,
    pub arrival: Tick,
    pub burst: Tick,
    pub priority: Priority,
    pub initial_level: QueueLevel,

    pub state: ProcessState,
    pub remaining: Tick,
    pub level: QueueLevel,
    /// CPU ticks since entering the current level (drives demotion)
    pub consumed_at_level: Tick,
    /// Set while enqueued (drives aging)
    pub ready_since: Option<Tick>,
    pub first_start: Option<Tick>,
    pub completion: Option<Tick>,
    /// Ticks spent queued, settled each time the process leaves its queue
    pub waiting: Tick,
}

impl SimProcess {
    pub fn new(spec: &ProcessSpec, levels: usize) -> Self {
        let initial_level = spec.priority.initial_level(levels);
        Self {
            id: spec.id.clone(),
            arrival: spec.arrival,
            burst: spec.burst,
            priority: spec.priority,
            initial_level,
            state: ProcessState::Unarrived,
            remaining: spec.burst,
            level: initial_level,
            consumed_at_level: 0,
            ready_since: None,
            first_start: None,
            completion: None,
            waiting: 0,
        }
    }

    /// Move to `next`, aborting on an illegal lifecycle transition
    #[inline]
    pub fn transition(&mut self, next: ProcessState) {
        assert!(
            self.state.can_transition_to(next),
            "process {} cannot move from {:?} to {:?}",
            self.id,
            self.state,
            next
        );
        self.state = next;
    }

    /// Ticks of CPU work already served
    #[inline(always)]
    pub const fn executed(&self) -> Tick {
        self.burst - self.remaining
    }

    #[inline(always)]
    pub const fn is_completed(&self) -> bool {
        self.completion.is_some()
    }

    pub fn turnaround(&self) -> Option<Tick> {
        self.completion.map(|done| done - self.arrival)
    }

    pub fn response(&self) -> Option<Tick> {
        self.first_start.map(|start| start - self.arrival)
    }

    pub fn to_row(&self) -> ProcessRow {
        ProcessRow {
            id: self.id.clone(),
            arrival: self.arrival,
            burst: self.burst,
            priority: self.priority,
            first_start: self.first_start,
            completion: self.completion,
            turnaround: self.turnaround(),
            waiting: self.waiting,
            response: self.response(),
        }
    }
}

/// All processes of one run, in input order
#[derive(Debug, Clone)]
pub struct ProcessTable {
    processes: Vec<SimProcess>,
    index: HashMap<ProcessId, ProcessHandle, RandomState>,
    completed: usize,
}

impl ProcessTable {
    /// Build the table from already-validated specs
    pub fn from_specs(specs: &[ProcessSpec], levels: usize) -> Self {
        let mut index = HashMap::with_capacity_and_hasher(specs.len(), RandomState::new());
        let processes = specs
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                index.insert(spec.id.clone(), ProcessHandle(i));
                SimProcess::new(spec, levels)
            })
            .collect();

        Self {
            processes,
            index,
            completed: 0,
        }
    }

    #[inline(always)]
    pub fn get(&self, handle: ProcessHandle) -> &SimProcess {
        &self.processes[handle.0]
    }

    #[inline(always)]
    pub fn get_mut(&mut self, handle: ProcessHandle) -> &mut SimProcess {
        &mut self.processes[handle.0]
    }

    pub fn lookup(&self, id: &str) -> Option<ProcessHandle> {
        self.index.get(id).copied()
    }

    pub fn handles(&self) -> impl Iterator<Item = ProcessHandle> + '_ {
        (0..self.processes.len()).map(ProcessHandle)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SimProcess> {
        self.processes.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Record completion of `handle` at `now`
    pub fn complete(&mut self, handle: ProcessHandle, now: Tick) {
        let process = &mut self.processes[handle.0];
        assert!(
            process.completion.is_none(),
            "process {} completed twice",
            process.id
        );
        assert_eq!(process.remaining, 0, "process {} completed early", process.id);

        process.transition(ProcessState::Completed);
        process.completion = Some(now);
        process.consumed_at_level = 0;
        process.ready_since = None;
        self.completed += 1;
    }

    #[inline]
    pub fn completed_count(&self) -> usize {
        self.completed
    }

    #[inline]
    pub fn all_completed(&self) -> bool {
        self.completed == self.processes.len()
    }

    pub fn rows(&self) -> Vec<ProcessRow> {
        self.processes.iter().map(SimProcess::to_row).collect()
    }
}
