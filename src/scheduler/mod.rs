/*!
 * MLFQ Scheduler
 * Deterministic multi-level feedback queue engine driven one step at a time
 */

use crate::core::errors::{ConfigResult, SimulationError, SimulationResult};
use crate::core::types::Tick;
use crate::process::{validate_workload, ProcessHandle, ProcessSpec, ProcessTable};
use tracing::info;

mod arrivals;
mod cancel;
mod config;
mod dispatch;
mod policy;
mod queues;
mod recorder;
mod simulate;
mod snapshot;
mod stats;

use arrivals::ArrivalFeed;
use queues::ReadyQueues;
use recorder::TimelineRecorder;

// Re-export public API
pub use cancel::CancellationToken;
pub use config::{
    SchedulerConfig, TimeQuantum, DEFAULT_AGING_THRESHOLD, DEFAULT_DEMOTE_THRESHOLD,
    DEFAULT_LEVELS, DEFAULT_QUANTUM,
};
pub use recorder::{SimulationOutcome, Slice, Summary};
pub use simulate::{simulate, simulate_cancellable, simulate_with_frames};
pub use snapshot::{QueuedProcess, RunningProcess, Snapshot};
pub use stats::SchedulerStats;

/// Result of one scheduler step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// One run-slice executed (before timeline merging)
    Ran(Slice),
    /// Nothing was ready; the clock jumped to the next arrival
    Idle { from: Tick, to: Tick },
    /// Every process has completed
    Finished,
}

/// The process currently holding the CPU, with its planned slice end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RunningSlot {
    handle: ProcessHandle,
    until: Tick,
}

/// MLFQ scheduler state for one run
///
/// Built fresh per run; all mutation goes through [`Scheduler::step`].
pub struct Scheduler {
    config: SchedulerConfig,
    table: ProcessTable,
    queues: ReadyQueues,
    feed: ArrivalFeed,
    recorder: TimelineRecorder,
    now: Tick,

    // Set between dispatch and the end of the slice
    running: Option<RunningSlot>,
    last_dispatched: Option<ProcessHandle>,

    stats: SchedulerStats,

    // Opt-in frame recording
    frames: Option<Vec<Snapshot>>,
}

impl Scheduler {
    /// Validate inputs and build a scheduler positioned at tick 0
    pub fn new(specs: &[ProcessSpec], config: SchedulerConfig) -> ConfigResult<Self> {
        config.validate()?;
        validate_workload(specs, config.levels())?;

        let levels = config.levels();
        let table = ProcessTable::from_specs(specs, levels);
        let feed = ArrivalFeed::new(&table);

        info!(
            "Scheduler initialized: processes={}, levels={}, demote={}, aging={}, preempt={}",
            table.len(),
            levels,
            config.demote_threshold,
            config.aging_threshold,
            config.preempt_on_arrival
        );

        Ok(Self {
            queues: ReadyQueues::new(levels),
            config,
            table,
            feed,
            recorder: TimelineRecorder::default(),
            now: 0,
            running: None,
            last_dispatched: None,
            stats: SchedulerStats::default(),
            frames: None,
        })
    }

    /// Record a snapshot at every dispatch and idle jump
    pub fn with_frames(mut self) -> Self {
        self.frames = Some(Vec::new());
        self
    }

    #[inline(always)]
    pub fn now(&self) -> Tick {
        self.now
    }

    #[inline]
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.table.all_completed()
    }

    /// Number of processes enqueued right now
    #[inline]
    pub fn ready_count(&self) -> usize {
        self.queues.len()
    }

    /// Processes whose arrival has not been admitted yet
    #[inline]
    pub fn pending_count(&self) -> usize {
        self.feed.len()
    }

    /// Slices executed so far, merged
    pub fn timeline(&self) -> &[Slice] {
        self.recorder.slices()
    }

    /// Drive the scheduler until every process has completed
    pub fn run(&mut self) {
        while self.step() != StepOutcome::Finished {}
    }

    /// Like [`Scheduler::run`], polling `token` once per step boundary
    pub fn run_until_cancelled(&mut self, token: &CancellationToken) -> SimulationResult<()> {
        loop {
            if token.is_cancelled() {
                info!("Simulation cancelled at tick {}", self.now);
                return Err(SimulationError::Cancelled { at: self.now });
            }
            if self.step() == StepOutcome::Finished {
                return Ok(());
            }
        }
    }

    /// Consume the scheduler and produce rows, summary and timeline
    ///
    /// Rows of processes that have not completed carry `None` for the
    /// completion-derived fields.
    pub fn finish(mut self) -> SimulationOutcome {
        // Settle the current wait of processes still queued (cancelled runs)
        let now = self.now;
        for handle in self.queues.iter() {
            let process = self.table.get_mut(handle);
            if let Some(since) = process.ready_since {
                process.waiting += now - since;
            }
        }

        let processes = self.table.rows();
        for row in processes.iter().filter(|r| r.is_completed()) {
            debug_assert_eq!(
                row.turnaround.map(|t| t - row.burst),
                Some(row.waiting),
                "waiting time of {} does not match turnaround - burst",
                row.id
            );
        }

        let summary = Summary::from_rows(&processes);
        SimulationOutcome {
            timeline: self.recorder.into_slices(),
            processes,
            summary,
            stats: self.stats,
            frames: self.frames.unwrap_or_default(),
        }
    }
}
