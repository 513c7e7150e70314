/*!
 * Stepping Tests
 * Step-by-step driving, snapshots, frames and cancellation
 */

use mlfq_sim::{
    simulate_cancellable, simulate_with_frames, CancellationToken, ProcessSpec, QueueLevel,
    Scheduler, SchedulerConfig, SimulationError, StepOutcome,
};
use pretty_assertions::assert_eq;
use std::thread;

fn three_processes() -> Vec<ProcessSpec> {
    vec![
        ProcessSpec::new("P1", 0, 5, 1),
        ProcessSpec::new("P2", 1, 3, 1),
        ProcessSpec::new("P3", 2, 2, 2),
    ]
}

#[test]
fn test_snapshot_before_first_step() {
    let scheduler =
        Scheduler::new(&three_processes(), SchedulerConfig::new([3, 3]).unwrap()).unwrap();
    let snapshot = scheduler.snapshot();

    assert_eq!(snapshot.now, 0);
    assert_eq!(snapshot.queues.len(), 2);
    assert!(snapshot.queues.iter().all(Vec::is_empty));
    assert!(snapshot.running.is_none());
}

#[test]
fn test_snapshot_after_step() {
    let mut scheduler =
        Scheduler::new(&three_processes(), SchedulerConfig::new([3, 3]).unwrap()).unwrap();
    assert!(matches!(scheduler.step(), StepOutcome::Ran(_)));

    let snapshot = scheduler.snapshot();
    assert_eq!(snapshot.now, 3);
    assert_eq!(snapshot.queue_ids(0), vec!["P2", "P1"]);
    assert_eq!(snapshot.queue_ids(1), vec!["P3"]);
    assert!(snapshot.queue_ids(5).is_empty());

    let p2 = &snapshot.queues[0][0];
    assert_eq!(p2.waiting, 2);
    assert_eq!(p2.time_in_queue, 2);
    assert_eq!(p2.remaining, 3);

    let p1 = &snapshot.queues[0][1];
    assert_eq!(p1.remaining, 2);
    assert_eq!(p1.time_in_queue, 0);
    assert_eq!(p1.consumed_at_level, 3);

    let p3 = &snapshot.queues[1][0];
    assert_eq!(p3.priority.get(), 2);
    assert_eq!(p3.waiting, 1);

    // Taking a snapshot does not disturb the schedule
    let again = scheduler.snapshot();
    assert_eq!(snapshot, again);
}

#[test]
fn test_idle_step_outcome() {
    let specs = [ProcessSpec::new("P1", 4, 1, 1)];
    let mut scheduler = Scheduler::new(&specs, SchedulerConfig::default()).unwrap();

    assert_eq!(scheduler.step(), StepOutcome::Idle { from: 0, to: 4 });
    assert_eq!(scheduler.now(), 4);
    assert!(matches!(scheduler.step(), StepOutcome::Ran(ref s) if s.start == 4 && s.end == 5));
    assert_eq!(scheduler.step(), StepOutcome::Finished);
}

#[test]
fn test_frames_follow_dispatches() {
    let specs = [
        ProcessSpec::new("P1", 0, 2, 1),
        ProcessSpec::new("P2", 5, 3, 1),
    ];
    let outcome = simulate_with_frames(&specs, &SchedulerConfig::round_robin(2).unwrap()).unwrap();

    let idle_jumps = 1;
    assert_eq!(
        outcome.frames.len() as u64,
        outcome.stats.dispatches + idle_jumps
    );

    let times: Vec<u64> = outcome.frames.iter().map(|f| f.now).collect();
    assert_eq!(times, vec![0, 5, 5, 7]);

    let running: Vec<Option<&str>> = outcome
        .frames
        .iter()
        .map(|f| f.running.as_ref().map(|r| r.id.as_str()))
        .collect();
    assert_eq!(running, vec![Some("P1"), None, Some("P2"), Some("P2")]);

    let last = outcome.frames[3].running.as_ref().unwrap();
    assert_eq!(last.level, QueueLevel::TOP);
    assert_eq!(last.executed, 2);
    assert_eq!(last.until, 8);
}

#[test]
fn test_cancel_mid_run() {
    let token = CancellationToken::new();
    let mut scheduler =
        Scheduler::new(&three_processes(), SchedulerConfig::round_robin(1).unwrap()).unwrap();

    scheduler.step();
    scheduler.step();
    token.cancel();

    assert_eq!(
        scheduler.run_until_cancelled(&token),
        Err(SimulationError::Cancelled { at: 2 })
    );
    assert!(!scheduler.is_finished());
    assert_eq!(scheduler.timeline().len(), 2);
}

#[test]
fn test_cancel_from_another_thread() {
    let token = CancellationToken::new();
    let remote = token.clone();
    thread::spawn(move || remote.cancel()).join().unwrap();

    let result = simulate_cancellable(&three_processes(), &SchedulerConfig::default(), &token);
    assert!(matches!(result, Err(SimulationError::Cancelled { at: 0 })));
}
