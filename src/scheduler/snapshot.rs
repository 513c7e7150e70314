/*!
 * Scheduler Snapshots
 * Read-only views of queue contents and the running process
 */

use super::Scheduler;
use crate::core::types::{Priority, ProcessId, QueueLevel, Tick};
use crate::process::SimProcess;
use serde::{Deserialize, Serialize};

/// A ready process as seen in a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct QueuedProcess {
    pub id: ProcessId,
    pub arrival: Tick,
    pub burst: Tick,
    /// Priority label of the queue it currently sits in
    pub priority: Priority,
    pub waiting: Tick,
    pub remaining: Tick,
    pub time_in_queue: Tick,
    pub consumed_at_level: Tick,
}

/// The process holding the CPU
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RunningProcess {
    pub id: ProcessId,
    pub arrival: Tick,
    pub level: QueueLevel,
    pub waiting: Tick,
    pub remaining: Tick,
    pub executed: Tick,
    pub consumed_at_level: Tick,
    /// Planned end of the current slice (after any preemption cut)
    pub until: Tick,
}

/// Scheduler state at one instant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Snapshot {
    pub now: Tick,
    /// One entry per level, head first
    pub queues: Vec<Vec<QueuedProcess>>,
    pub running: Option<RunningProcess>,
}

impl Snapshot {
    /// Ids enqueued at `level`, head first
    pub fn queue_ids(&self, level: usize) -> Vec<&str> {
        self.queues
            .get(level)
            .map(|queue| queue.iter().map(|p| p.id.as_str()).collect())
            .unwrap_or_default()
    }
}

fn queued(process: &SimProcess, now: Tick) -> QueuedProcess {
    let time_in_queue = process.ready_since.map_or(0, |since| now.saturating_sub(since));
    QueuedProcess {
        id: process.id.clone(),
        arrival: process.arrival,
        burst: process.burst,
        priority: process.level.as_priority(),
        // Settled waiting plus the current stint in the queue
        waiting: process.waiting + time_in_queue,
        remaining: process.remaining,
        time_in_queue,
        consumed_at_level: process.consumed_at_level,
    }
}

impl Scheduler {
    /// Capture queues and the running process at the current tick
    ///
    /// Pure read: taking a snapshot never changes scheduling decisions.
    pub fn snapshot(&self) -> Snapshot {
        let queues = (0..self.queues.level_count())
            .map(|level| {
                self.queues
                    .level(QueueLevel::new(level))
                    .map(|h| queued(self.table.get(h), self.now))
                    .collect()
            })
            .collect();

        let running = self.running.map(|slot| {
            let process = self.table.get(slot.handle);
            RunningProcess {
                id: process.id.clone(),
                arrival: process.arrival,
                level: process.level,
                waiting: process.waiting,
                remaining: process.remaining,
                executed: process.executed(),
                consumed_at_level: process.consumed_at_level,
                until: slot.until,
            }
        });

        Snapshot {
            now: self.now,
            queues,
            running,
        }
    }

    /// Record a frame if frame capture is enabled
    pub(super) fn capture_frame(&mut self) {
        if self.frames.is_some() {
            let frame = self.snapshot();
            if let Some(frames) = self.frames.as_mut() {
                frames.push(frame);
            }
        }
    }
}
