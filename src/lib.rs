/*!
 * MLFQ Scheduler Simulator
 * Deterministic multi-level feedback queue simulation exposed as a library
 */

pub mod core;
pub mod loader;
pub mod monitoring;
pub mod process;
pub mod report;
pub mod scheduler;

// Re-exports
pub use crate::core::errors::{
    ConfigError, ConfigResult, LoadError, LoadResult, SimulationError, SimulationResult,
};
pub use crate::core::types::{Priority, ProcessId, QueueLevel, Tick};
pub use loader::{default_processes, load_workload, parse_workload, Workload};
pub use monitoring::init_tracing;
pub use process::{ProcessRow, ProcessSpec, ProcessState};
pub use report::TextReport;
pub use scheduler::{
    simulate, simulate_cancellable, simulate_with_frames, CancellationToken, QueuedProcess,
    RunningProcess, Scheduler, SchedulerConfig, SchedulerStats, SimulationOutcome, Slice,
    Snapshot, StepOutcome, Summary, TimeQuantum,
};
