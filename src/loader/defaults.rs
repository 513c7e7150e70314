/*!
 * Default Workload
 * Built-in process set used when no process lines are supplied
 */

use crate::process::ProcessSpec;

/// (id, arrival, burst, priority)
const DEFAULT_PROCESSES: [(&str, u64, u64, u8); 8] = [
    ("P1", 1, 20, 3),
    ("P2", 3, 10, 2),
    ("P3", 5, 2, 1),
    ("P4", 8, 7, 2),
    ("P5", 11, 15, 3),
    ("P6", 15, 8, 2),
    ("P7", 20, 4, 1),
    ("P8", 25, 12, 4),
];

/// The built-in eight-process workload
pub fn default_processes() -> Vec<ProcessSpec> {
    DEFAULT_PROCESSES
        .iter()
        .map(|&(id, arrival, burst, priority)| ProcessSpec::new(id, arrival, burst, priority))
        .collect()
}
