/*!
 * Feedback Policy
 * Aging promotion and CPU-usage demotion between queue levels
 */

use super::Scheduler;
use crate::core::types::{QueueLevel, Tick};
use crate::process::{ProcessHandle, ProcessState};
use tracing::debug;

impl Scheduler {
    /// Promote processes that have waited at least `aging_threshold` ticks at `now`
    ///
    /// Levels are visited top-down starting at 1; a promoted process restarts its
    /// wait at `now`, so it climbs again only after another full threshold.
    /// Promoted processes keep their relative order.
    pub(super) fn apply_aging(&mut self, now: Tick) {
        if !self.config.aging_enabled() {
            return;
        }

        let threshold = self.config.aging_threshold;
        let mut promoted = 0;

        for index in 1..self.queues.level_count() {
            let level = QueueLevel::new(index);
            let Some(target) = level.raised() else {
                continue;
            };

            let table = &self.table;
            let aged = self.queues.extract_if(level, |handle| {
                table
                    .get(handle)
                    .ready_since
                    .is_some_and(|since| now - since >= threshold)
            });

            for handle in aged {
                let process = self.table.get_mut(handle);
                process.transition(ProcessState::Ready);
                if let Some(since) = process.ready_since.replace(now) {
                    process.waiting += now - since;
                }
                process.level = target;
                process.consumed_at_level = 0;
                self.queues.push_back(target, handle);
                promoted += 1;

                debug!("Process {} aged from {} to {} at {}", process.id, level, target, now);
            }
        }

        self.stats.add_promotions(promoted);
    }

    /// Earliest tick at which a queued process below the top level is due to age
    pub(super) fn next_aging_due(&self) -> Option<Tick> {
        if !self.config.aging_enabled() {
            return None;
        }

        let threshold = self.config.aging_threshold;
        (1..self.queues.level_count())
            .flat_map(|index| self.queues.level(QueueLevel::new(index)))
            .filter_map(|handle| self.table.get(handle).ready_since)
            .map(|since| since.saturating_add(threshold))
            .min()
    }

    /// Move `handle` one level down if it used up its allowance at this level
    pub(super) fn apply_demotion(&mut self, handle: ProcessHandle) {
        if !self.config.demotion_enabled() {
            return;
        }

        let levels = self.config.levels();
        let threshold = self.config.demote_threshold;
        let process = self.table.get_mut(handle);
        if process.consumed_at_level < threshold {
            return;
        }

        if let Some(lower) = process.level.lowered(levels) {
            debug!(
                "Process {} demoted from {} to {} after {} ticks",
                process.id, process.level, lower, process.consumed_at_level
            );
            process.level = lower;
            process.consumed_at_level = 0;
            self.stats.inc_demotions();
        }
    }
}
