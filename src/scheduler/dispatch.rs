/*!
 * Dispatcher
 * Select, run and requeue: one scheduler step
 */

use super::arrivals::Preemptor;
use super::{RunningSlot, Scheduler, Slice, StepOutcome};
use crate::core::types::{QueueLevel, Tick};
use crate::process::{ProcessHandle, ProcessState};
use tracing::debug;

/// A run-slice decided at dispatch time
#[derive(Debug, Clone, Copy)]
struct Dispatch {
    handle: ProcessHandle,
    level: QueueLevel,
    start: Tick,
    end: Tick,
    truncated: bool,
}

impl Scheduler {
    /// Advance the simulation by one step
    ///
    /// Applies aging, admits arrivals, then either runs one slice or jumps the
    /// clock over an idle gap.
    pub fn step(&mut self) -> StepOutcome {
        if self.is_finished() {
            return StepOutcome::Finished;
        }

        self.apply_aging(self.now);
        self.feed
            .admit_until(self.now, &mut self.table, &mut self.queues);

        let Some((level, handle)) = self.queues.pop_next() else {
            return self.idle();
        };

        let dispatch = self.dispatch(level, handle);
        let slice = self.execute(dispatch);
        self.running = None;

        StepOutcome::Ran(slice)
    }

    /// Nothing is ready: jump to the next arrival
    fn idle(&mut self) -> StepOutcome {
        match self.feed.next_arrival(&self.table) {
            Some(next) => {
                let from = self.now;
                debug!("CPU idle from {} to {}", from, next);

                self.stats.add_idle(next - from);
                self.now = next;
                self.capture_frame();
                StepOutcome::Idle { from, to: next }
            }
            None => {
                assert!(
                    self.feed.is_exhausted() && self.table.all_completed(),
                    "no ready or pending process at tick {} but {} of {} completed",
                    self.now,
                    self.table.completed_count(),
                    self.table.len()
                );
                StepOutcome::Finished
            }
        }
    }

    /// Mark `handle` running and plan its slice
    fn dispatch(&mut self, level: QueueLevel, handle: ProcessHandle) -> Dispatch {
        let now = self.now;
        let quantum = self.config.quantum(level);

        let process = self.table.get_mut(handle);
        debug_assert_eq!(process.level, level);
        process.transition(ProcessState::Running);
        if let Some(since) = process.ready_since.take() {
            process.waiting += now - since;
        }
        if process.first_start.is_none() {
            process.first_start = Some(now);
        }

        let planned = quantum.min(process.remaining);
        let mut end = now + planned;
        let mut truncated = false;

        if self.config.preempt_on_arrival {
            if let Some(Preemptor { handle: by, at }) =
                self.feed.preemptor(end, level, &self.table)
            {
                debug!(
                    "Process {} at {} will be preempted at {} by {}",
                    self.table.get(handle).id,
                    level,
                    at,
                    self.table.get(by).id
                );
                end = at;
                truncated = true;
                self.stats.inc_preemptions();
            }
        }

        self.stats.inc_dispatches();
        if self.last_dispatched != Some(handle) {
            self.stats.inc_context_switches();
        }
        self.last_dispatched = Some(handle);
        self.running = Some(RunningSlot { handle, until: end });

        debug!(
            "Dispatched {} from {} for [{}, {})",
            self.table.get(handle).id,
            level,
            now,
            end
        );
        self.capture_frame();

        Dispatch {
            handle,
            level,
            start: now,
            end,
            truncated,
        }
    }

    /// Run a planned slice and settle the process afterwards
    fn execute(&mut self, dispatch: Dispatch) -> Slice {
        let Dispatch {
            handle,
            level,
            start,
            end,
            truncated,
        } = dispatch;
        let ran = end - start;

        // Ticks inside the slice still age waiters and admit arrivals
        self.advance_queues(start, end);
        self.now = end;

        let process = self.table.get_mut(handle);
        process.remaining -= ran;
        process.consumed_at_level += ran;
        let id = process.id.clone();
        let finished = process.remaining == 0;

        self.recorder.record(start, end, &id, level);

        if finished {
            self.table.complete(handle, end);
            debug!("Process {} completed at {}", id, end);
        } else {
            if !truncated {
                self.apply_demotion(handle);
            }

            let process = self.table.get_mut(handle);
            process.transition(ProcessState::Ready);
            process.ready_since = Some(end);
            let requeue_level = process.level;
            self.queues.push_back(requeue_level, handle);
        }

        Slice {
            start,
            end,
            process: id,
            level,
        }
    }

    /// Replay the queue events of `(from, to]` while the CPU is busy
    ///
    /// At each tick where a waiter becomes due for aging or a process arrives,
    /// aging runs first and arrivals are admitted after it.
    fn advance_queues(&mut self, from: Tick, to: Tick) {
        let mut cursor = from;
        loop {
            let next = [self.next_aging_due(), self.feed.next_arrival(&self.table)]
                .into_iter()
                .flatten()
                .min();
            let at = match next {
                Some(at) if at <= to => at.max(cursor),
                _ => break,
            };

            self.apply_aging(at);
            self.feed.admit_until(at, &mut self.table, &mut self.queues);
            cursor = at;

            if at == to {
                break;
            }
        }
    }
}
