/*!
 * Workload Validation
 * Reject malformed process lists before any simulation step runs
 */

use super::types::ProcessSpec;
use crate::core::errors::{ConfigError, ConfigResult};
use crate::core::types::Tick;
use ahash::AHashSet;

/// Validate a workload against a queue count
///
/// Checks are reported in input order so the first offending process is named.
pub fn validate_workload(specs: &[ProcessSpec], levels: usize) -> ConfigResult<()> {
    if specs.is_empty() {
        return Err(ConfigError::EmptyWorkload);
    }

    let mut seen = AHashSet::with_capacity(specs.len());
    for (position, spec) in specs.iter().enumerate() {
        if spec.id.is_empty() {
            return Err(ConfigError::EmptyProcessId { position });
        }

        if !seen.insert(spec.id.as_str()) {
            return Err(ConfigError::DuplicateProcessId {
                id: spec.id.clone(),
            });
        }

        if spec.burst == 0 {
            return Err(ConfigError::InvalidBurst {
                id: spec.id.clone(),
            });
        }

        if !spec.priority.fits(levels) {
            return Err(ConfigError::PriorityOutOfRange {
                id: spec.id.clone(),
                priority: spec.priority.get(),
                levels,
            });
        }
    }

    // Every tick the run reaches is bounded by the latest arrival plus all CPU demand
    let total_burst = specs
        .iter()
        .try_fold(0 as Tick, |total, spec| total.checked_add(spec.burst));
    if let Some(latest) = specs.iter().max_by_key(|spec| spec.arrival) {
        if total_burst.and_then(|total| latest.arrival.checked_add(total)).is_none() {
            return Err(ConfigError::TimeOverflow {
                id: latest.id.clone(),
                arrival: latest.arrival,
            });
        }
    }

    Ok(())
}
