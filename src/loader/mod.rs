/*!
 * Workload Loader
 * Plain-text workload files: scheduler settings and process lines
 *
 * ```text
 * # comments and blank lines are ignored
 * Q0 3          # quantum of queue 0
 * DEMOTE 6
 * AGING 5
 * PREEMPT on
 * P1 0 5 1      # id arrival burst priority
 * ```
 */

mod defaults;
mod parser;

use crate::core::errors::{LoadError, LoadResult};
use crate::process::ProcessSpec;
use crate::scheduler::SchedulerConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

pub use defaults::default_processes;
pub use parser::parse_workload;

/// Scheduler settings plus the processes to run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Workload {
    pub config: SchedulerConfig,
    pub processes: Vec<ProcessSpec>,
}

impl Default for Workload {
    fn default() -> Self {
        Self {
            config: SchedulerConfig::default(),
            processes: default_processes(),
        }
    }
}

/// Read and parse a workload file
pub fn load_workload(path: impl AsRef<Path>) -> LoadResult<Workload> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let workload = parse_workload(&text)?;
    info!(
        "Loaded workload from {}: {} processes",
        path.display(),
        workload.processes.len()
    );
    Ok(workload)
}
