/*!
 * Simulation Entry Points
 * One-shot runs over a workload
 */

use super::{CancellationToken, Scheduler, SchedulerConfig, SimulationOutcome};
use crate::core::errors::{ConfigResult, SimulationResult};
use crate::monitoring::RunSpan;
use crate::process::ProcessSpec;

/// Run `processes` to completion under `config`
///
/// Deterministic: the same inputs always produce the same outcome. Fails only when
/// the configuration or workload is invalid, before any step is taken.
pub fn simulate(processes: &[ProcessSpec], config: &SchedulerConfig) -> ConfigResult<SimulationOutcome> {
    run(processes, config, false)
}

/// Like [`simulate`], also recording a snapshot at every dispatch and idle jump
pub fn simulate_with_frames(
    processes: &[ProcessSpec],
    config: &SchedulerConfig,
) -> ConfigResult<SimulationOutcome> {
    run(processes, config, true)
}

/// Like [`simulate`], stopping with `Cancelled` once `token` fires
pub fn simulate_cancellable(
    processes: &[ProcessSpec],
    config: &SchedulerConfig,
    token: &CancellationToken,
) -> SimulationResult<SimulationOutcome> {
    let run_span = RunSpan::new(processes.len(), config.levels());
    let _entered = run_span.span().clone().entered();

    let mut scheduler = match Scheduler::new(processes, config.clone()) {
        Ok(scheduler) => scheduler,
        Err(e) => {
            run_span.fail("invalid_config");
            return Err(e.into());
        }
    };

    if let Err(e) = scheduler.run_until_cancelled(token) {
        run_span.fail("cancelled");
        return Err(e);
    }

    let outcome = scheduler.finish();
    run_span.finish(outcome.timeline.len(), outcome.summary.makespan);
    Ok(outcome)
}

fn run(
    processes: &[ProcessSpec],
    config: &SchedulerConfig,
    frames: bool,
) -> ConfigResult<SimulationOutcome> {
    let run_span = RunSpan::new(processes.len(), config.levels());
    let _entered = run_span.span().clone().entered();

    let scheduler = match Scheduler::new(processes, config.clone()) {
        Ok(scheduler) => scheduler,
        Err(e) => {
            run_span.fail("invalid_config");
            return Err(e);
        }
    };
    let mut scheduler = if frames {
        scheduler.with_frames()
    } else {
        scheduler
    };

    scheduler.run();

    let outcome = scheduler.finish();
    run_span.finish(outcome.timeline.len(), outcome.summary.makespan);
    Ok(outcome)
}
