/*!
 * Scheduler Statistics
 * Per-run counters for dispatch and feedback decisions
 */

use super::Scheduler;
use crate::core::types::Tick;
use serde::{Deserialize, Serialize};

/// Counters accumulated over one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SchedulerStats {
    /// Run-slices started
    pub dispatches: u64,
    /// Dispatches of a different process than the previous one
    pub context_switches: u64,
    /// Slices cut short by a higher-priority arrival
    pub preemptions: u64,
    pub demotions: u64,
    /// Aging promotions
    pub promotions: u64,
    /// Ticks skipped with nothing ready
    pub idle_ticks: Tick,
}

impl SchedulerStats {
    #[inline(always)]
    pub(crate) fn inc_dispatches(&mut self) {
        self.dispatches += 1;
    }

    #[inline(always)]
    pub(crate) fn inc_context_switches(&mut self) {
        self.context_switches += 1;
    }

    #[inline(always)]
    pub(crate) fn inc_preemptions(&mut self) {
        self.preemptions += 1;
    }

    #[inline(always)]
    pub(crate) fn inc_demotions(&mut self) {
        self.demotions += 1;
    }

    #[inline(always)]
    pub(crate) fn add_promotions(&mut self, count: usize) {
        self.promotions += count as u64;
    }

    #[inline(always)]
    pub(crate) fn add_idle(&mut self, ticks: Tick) {
        self.idle_ticks += ticks;
    }
}

impl Scheduler {
    /// Counters so far
    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }
}
