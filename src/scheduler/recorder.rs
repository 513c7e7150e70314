/*!
 * Metrics & Timeline Recorder
 * Executed slices, per-process rows and aggregate statistics
 */

use super::snapshot::Snapshot;
use super::stats::SchedulerStats;
use crate::core::types::{ProcessId, QueueLevel, Tick};
use crate::process::ProcessRow;
use serde::{Deserialize, Serialize};

/// One contiguous run of a process at a queue level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Slice {
    pub start: Tick,
    pub end: Tick,
    pub process: ProcessId,
    pub level: QueueLevel,
}

impl Slice {
    #[inline(always)]
    pub const fn duration(&self) -> Tick {
        self.end - self.start
    }
}

/// Append-only timeline with back-to-back merging
#[derive(Debug, Clone, Default)]
pub(crate) struct TimelineRecorder {
    slices: Vec<Slice>,
}

impl TimelineRecorder {
    /// Record `[start, end)`, extending the last slice when the same process
    /// continues at the same level without a gap
    pub fn record(&mut self, start: Tick, end: Tick, process: &ProcessId, level: QueueLevel) {
        debug_assert!(start < end, "empty slice {}..{}", start, end);

        if let Some(last) = self.slices.last_mut() {
            assert!(last.end <= start, "overlapping slice at {}", start);
            if last.end == start && last.level == level && &last.process == process {
                last.end = end;
                return;
            }
        }

        self.slices.push(Slice {
            start,
            end,
            process: process.clone(),
            level,
        });
    }

    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    pub fn into_slices(self) -> Vec<Slice> {
        self.slices
    }
}

/// Aggregate statistics over completed processes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Summary {
    pub completed: usize,
    pub avg_waiting: f64,
    pub avg_turnaround: f64,
    pub avg_response: f64,
    /// Busy ticks over makespan, as a percentage
    pub cpu_utilization: f64,
    /// Last completion minus first arrival
    pub makespan: Tick,
}

impl Summary {
    pub fn from_rows(rows: &[ProcessRow]) -> Self {
        let completed: Vec<&ProcessRow> = rows.iter().filter(|r| r.is_completed()).collect();
        if completed.is_empty() {
            return Self::default();
        }

        let count = completed.len() as f64;
        let total_waiting: Tick = completed.iter().map(|r| r.waiting).sum();
        let total_turnaround: Tick = completed.iter().filter_map(|r| r.turnaround).sum();
        let total_response: Tick = completed.iter().filter_map(|r| r.response).sum();

        let first_arrival = completed.iter().map(|r| r.arrival).min().unwrap_or(0);
        let last_completion = completed
            .iter()
            .filter_map(|r| r.completion)
            .max()
            .unwrap_or(first_arrival);
        let makespan = last_completion - first_arrival;
        let busy: Tick = completed.iter().map(|r| r.burst).sum();

        let cpu_utilization = if makespan == 0 {
            100.0
        } else {
            busy as f64 / makespan as f64 * 100.0
        };

        Self {
            completed: completed.len(),
            avg_waiting: total_waiting as f64 / count,
            avg_turnaround: total_turnaround as f64 / count,
            avg_response: total_response as f64 / count,
            cpu_utilization,
            makespan,
        }
    }
}

/// Everything a finished run produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SimulationOutcome {
    pub timeline: Vec<Slice>,
    pub processes: Vec<ProcessRow>,
    pub summary: Summary,
    pub stats: SchedulerStats,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub frames: Vec<Snapshot>,
}

impl SimulationOutcome {
    pub fn row(&self, id: &str) -> Option<&ProcessRow> {
        self.processes.iter().find(|r| r.id.as_str() == id)
    }

    /// Slices of one process, in time order
    pub fn slices_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Slice> + 'a {
        self.timeline.iter().filter(move |s| s.process.as_str() == id)
    }

    /// Reorder result rows by process id (input order otherwise)
    pub fn sort_rows_by_id(&mut self) {
        self.processes.sort_by(|a, b| a.id.cmp(&b.id));
    }
}
