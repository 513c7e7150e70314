/*!
 * Process Module
 * Process specifications, lifecycle and the per-run process table
 */

pub mod table;
pub mod types;
pub mod validation;

// Re-export for convenience
pub use table::{ProcessHandle, ProcessTable, SimProcess};
pub use types::{ProcessRow, ProcessSpec, ProcessState};
pub use validation::validate_workload;
