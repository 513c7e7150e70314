/*!
 * Clock & Arrival Feed
 * Pending arrivals in admission order, and the preemption look-ahead
 */

use super::queues::ReadyQueues;
use crate::core::types::{QueueLevel, Tick};
use crate::process::{ProcessHandle, ProcessState, ProcessTable};
use std::collections::VecDeque;
use tracing::trace;

/// An arrival that cuts the running slice short
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Preemptor {
    pub handle: ProcessHandle,
    pub at: Tick,
}

#[derive(Debug, Clone)]
pub(crate) struct ArrivalFeed {
    /// Not-yet-admitted processes, by arrival time then input order
    pending: VecDeque<ProcessHandle>,
}

impl ArrivalFeed {
    pub fn new(table: &ProcessTable) -> Self {
        let mut pending: Vec<ProcessHandle> = table.handles().collect();
        // Stable: equal arrival times keep input order
        pending.sort_by_key(|&h| table.get(h).arrival);

        Self {
            pending: pending.into(),
        }
    }

    /// Admit every pending process with `arrival <= now` into its initial queue
    ///
    /// `ready_since` is the arrival time, not `now`, so a process that arrived during
    /// a run-slice is charged the ticks it has already waited.
    pub fn admit_until(
        &mut self,
        now: Tick,
        table: &mut ProcessTable,
        queues: &mut ReadyQueues,
    ) -> usize {
        let mut admitted = 0;
        while let Some(&handle) = self.pending.front() {
            let process = table.get_mut(handle);
            if process.arrival > now {
                break;
            }
            self.pending.pop_front();

            process.transition(ProcessState::Ready);
            process.level = process.initial_level;
            process.ready_since = Some(process.arrival);
            queues.push_back(process.level, handle);
            admitted += 1;

            trace!(
                "Process {} admitted to {} (arrived at {})",
                process.id,
                process.level,
                process.arrival
            );
        }
        admitted
    }

    /// Arrival time of the next pending process
    pub fn next_arrival(&self, table: &ProcessTable) -> Option<Tick> {
        self.pending.front().map(|&h| table.get(h).arrival)
    }

    /// Earliest pending arrival in `(now, end)` whose initial queue outranks
    /// `running`; ties on arrival time go to the lowest queue number, then input order
    pub fn preemptor(
        &self,
        end: Tick,
        running: QueueLevel,
        table: &ProcessTable,
    ) -> Option<Preemptor> {
        let mut best: Option<(Preemptor, QueueLevel)> = None;

        for &handle in &self.pending {
            let process = table.get(handle);
            if process.arrival >= end {
                break;
            }
            if let Some((found, _)) = best {
                if process.arrival > found.at {
                    break;
                }
            }
            if process.initial_level >= running {
                continue;
            }

            let better = match best {
                None => true,
                Some((_, level)) => process.initial_level < level,
            };
            if better {
                best = Some((
                    Preemptor {
                        handle,
                        at: process.arrival,
                    },
                    process.initial_level,
                ));
            }
        }

        best.map(|(preemptor, _)| preemptor)
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.pending.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }
}
