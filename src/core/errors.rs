/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::types::{ProcessId, Tick};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration and workload validation errors
///
/// Raised before the first simulation step; the engine never clamps a value that
/// would change scheduling semantics.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ConfigError {
    #[error("No ready queues configured")]
    #[diagnostic(
        code(config::no_queues),
        help("Provide at least one time quantum (e.g. Q0 3).")
    )]
    NoQueues,

    #[error("Too many ready queues: {levels} (maximum {max})")]
    #[diagnostic(
        code(config::too_many_queues),
        help("Priorities are 1-based bytes, so at most 255 levels can be addressed.")
    )]
    TooManyQueues { levels: usize, max: usize },

    #[error("Invalid time quantum for queue Q{level}: {value}")]
    #[diagnostic(
        code(config::invalid_quantum),
        help("Every queue needs a quantum of at least 1 tick.")
    )]
    InvalidQuantum { level: usize, value: u64 },

    #[error("Workload contains no processes")]
    #[diagnostic(
        code(workload::empty),
        help("Add at least one process line: <id> <arrival> <burst> <priority>.")
    )]
    EmptyWorkload,

    #[error("Process at position {position} has an empty id")]
    #[diagnostic(
        code(workload::empty_id),
        help("Give every process a non-blank name such as P1.")
    )]
    EmptyProcessId { position: usize },

    #[error("Duplicate process id '{id}'")]
    #[diagnostic(
        code(workload::duplicate_id),
        help("Process ids must be unique within a workload.")
    )]
    DuplicateProcessId { id: ProcessId },

    #[error("Process '{id}' has a burst time of 0")]
    #[diagnostic(
        code(workload::invalid_burst),
        help("Burst time is the total CPU demand and must be at least 1 tick.")
    )]
    InvalidBurst { id: ProcessId },

    #[error("Process '{id}' has priority {priority}, outside 1..={levels}")]
    #[diagnostic(
        code(workload::priority_out_of_range),
        help("Priority 1 maps to Q0; use a value no larger than the number of queues.")
    )]
    PriorityOutOfRange {
        id: ProcessId,
        priority: u8,
        levels: usize,
    },

    #[error("Process '{id}' arrives at {arrival}; the workload would run past the last representable tick")]
    #[diagnostic(
        code(workload::time_overflow),
        help("The latest arrival plus the sum of all burst times must fit in a u64 tick count.")
    )]
    TimeOverflow { id: ProcessId, arrival: Tick },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors surfaced by a simulation run
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum SimulationError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Simulation cancelled at tick {at}")]
    #[diagnostic(code(simulation::cancelled))]
    Cancelled { at: Tick },
}

pub type SimulationResult<T> = Result<T, SimulationError>;

/// Workload file errors
#[derive(Error, Debug, Diagnostic)]
pub enum LoadError {
    #[error("Failed to read workload file {path}")]
    #[diagnostic(code(loader::io), help("Check that the file exists and is readable."))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Line {line}: expected a setting (2 fields) or a process (4 fields), found {fields}")]
    #[diagnostic(
        code(loader::malformed_line),
        help("Settings look like 'Q0 3'; processes look like 'P1 0 5 1'.")
    )]
    MalformedLine { line: usize, fields: usize },

    #[error("Line {line}: unknown setting '{key}'")]
    #[diagnostic(
        code(loader::unknown_setting),
        help("Known settings: Q<i>, DEMOTE, AGING, PREEMPT.")
    )]
    UnknownSetting { line: usize, key: String },

    #[error("Line {line}: invalid {field} '{value}'")]
    #[diagnostic(
        code(loader::invalid_value),
        help("Times and thresholds are non-negative integers; priorities are 1..=255.")
    )]
    InvalidValue {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

pub type LoadResult<T> = Result<T, LoadError>;
