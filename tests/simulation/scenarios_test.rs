/*!
 * Scenario Tests
 * Hand-checked schedules for round-robin, preemption, demotion, aging and idle gaps
 */

use mlfq_sim::{simulate, ConfigError, ProcessSpec, SchedulerConfig, SimulationOutcome};
use pretty_assertions::assert_eq;

fn spans(outcome: &SimulationOutcome) -> Vec<(u64, u64, String, usize)> {
    outcome
        .timeline
        .iter()
        .map(|s| (s.start, s.end, s.process.to_string(), s.level.index()))
        .collect()
}

fn span(start: u64, end: u64, id: &str, level: usize) -> (u64, u64, String, usize) {
    (start, end, id.to_string(), level)
}

#[test]
fn test_single_queue_round_robin() {
    let specs = [
        ProcessSpec::new("P1", 0, 5, 1),
        ProcessSpec::new("P2", 1, 3, 1),
    ];
    let outcome = simulate(&specs, &SchedulerConfig::round_robin(3).unwrap()).unwrap();

    assert_eq!(
        spans(&outcome),
        vec![span(0, 3, "P1", 0), span(3, 6, "P2", 0), span(6, 8, "P1", 0)]
    );

    let p1 = outcome.row("P1").unwrap();
    let p2 = outcome.row("P2").unwrap();
    assert_eq!(p1.waiting, 3);
    assert_eq!(p2.waiting, 2);
    assert_eq!(p1.completion, Some(8));
    assert_eq!(p2.completion, Some(6));
    assert_eq!(p2.response, Some(2));
    assert_eq!(outcome.summary.avg_waiting, 2.5);
}

#[test]
fn test_preemption_on_arrival() {
    let specs = [
        ProcessSpec::new("P1", 0, 10, 2),
        ProcessSpec::new("P2", 2, 2, 1),
    ];
    let config = SchedulerConfig::new([3, 3, 3]).unwrap().with_preemption(true);
    let outcome = simulate(&specs, &config).unwrap();

    assert_eq!(
        spans(&outcome),
        vec![span(0, 2, "P1", 1), span(2, 4, "P2", 0), span(4, 12, "P1", 1)]
    );
    assert_eq!(outcome.stats.preemptions, 1);
    assert_eq!(outcome.row("P2").unwrap().waiting, 0);
    assert_eq!(outcome.row("P1").unwrap().waiting, 2);
}

#[test]
fn test_without_preemption_slice_runs_out() {
    let specs = [
        ProcessSpec::new("P1", 0, 10, 2),
        ProcessSpec::new("P2", 2, 2, 1),
    ];
    let config = SchedulerConfig::new([3, 3, 3]).unwrap();
    let outcome = simulate(&specs, &config).unwrap();

    assert_eq!(
        spans(&outcome),
        vec![span(0, 3, "P1", 1), span(3, 5, "P2", 0), span(5, 12, "P1", 1)]
    );
    assert_eq!(outcome.stats.preemptions, 0);
}

#[test]
fn test_same_level_arrival_does_not_preempt() {
    let specs = [
        ProcessSpec::new("P1", 0, 6, 1),
        ProcessSpec::new("P2", 2, 1, 1),
    ];
    let config = SchedulerConfig::new([4, 4])
        .unwrap()
        .with_demote_threshold(4)
        .with_preemption(true);
    let outcome = simulate(&specs, &config).unwrap();

    assert_eq!(outcome.stats.preemptions, 0);
    assert_eq!(
        spans(&outcome),
        vec![span(0, 4, "P1", 0), span(4, 5, "P2", 0), span(5, 7, "P1", 1)]
    );
}

#[test]
fn test_preempted_slice_is_not_demoted() {
    let specs = [
        ProcessSpec::new("P1", 0, 7, 2),
        ProcessSpec::new("P2", 2, 1, 1),
    ];
    let config = SchedulerConfig::new([4, 4, 4])
        .unwrap()
        .with_demote_threshold(2)
        .with_preemption(true);
    let outcome = simulate(&specs, &config).unwrap();

    // The cut slice reaches the threshold but P1 stays at Q1 until a full slice
    assert_eq!(
        spans(&outcome),
        vec![
            span(0, 2, "P1", 1),
            span(2, 3, "P2", 0),
            span(3, 7, "P1", 1),
            span(7, 8, "P1", 2),
        ]
    );
    assert_eq!(outcome.stats.preemptions, 1);
    assert_eq!(outcome.stats.demotions, 1);
}

#[test]
fn test_demotion_walks_down_levels() {
    let specs = [ProcessSpec::new("P1", 0, 10, 1)];
    let config = SchedulerConfig::new([4, 4, 4])
        .unwrap()
        .with_demote_threshold(4);
    let outcome = simulate(&specs, &config).unwrap();

    assert_eq!(
        spans(&outcome),
        vec![span(0, 4, "P1", 0), span(4, 8, "P1", 1), span(8, 10, "P1", 2)]
    );
}

#[test]
fn test_aging_promotes_before_next_dispatch() {
    let specs = [
        ProcessSpec::new("P1", 0, 6, 1),
        ProcessSpec::new("P2", 0, 2, 3),
    ];
    let config = SchedulerConfig::new([4, 4, 4])
        .unwrap()
        .with_aging_threshold(4);
    let outcome = simulate(&specs, &config).unwrap();

    assert_eq!(
        spans(&outcome),
        vec![span(0, 6, "P1", 0), span(6, 8, "P2", 1)]
    );
    assert_eq!(outcome.stats.promotions, 1);
    assert_eq!(outcome.row("P2").unwrap().waiting, 6);
}

#[test]
fn test_aging_during_a_long_slice() {
    // P2 becomes due at tick 2 while P1 runs and queues ahead of P1's requeue
    let specs = [
        ProcessSpec::new("P1", 0, 12, 1),
        ProcessSpec::new("P2", 0, 3, 2),
    ];
    let config = SchedulerConfig::new([6, 6, 6, 6])
        .unwrap()
        .with_aging_threshold(2);
    let outcome = simulate(&specs, &config).unwrap();

    assert_eq!(
        spans(&outcome),
        vec![span(0, 6, "P1", 0), span(6, 9, "P2", 0), span(9, 15, "P1", 0)]
    );
    assert_eq!(outcome.row("P2").unwrap().waiting, 6);
    assert_eq!(outcome.row("P1").unwrap().waiting, 3);
}

#[test]
fn test_aging_climbs_several_levels_in_one_slice() {
    let specs = [
        ProcessSpec::new("P1", 0, 9, 1),
        ProcessSpec::new("P2", 0, 1, 4),
    ];
    let config = SchedulerConfig::new([9, 9, 9, 9])
        .unwrap()
        .with_aging_threshold(3);
    let outcome = simulate(&specs, &config).unwrap();

    // Promoted at ticks 3, 6 and 9
    assert_eq!(
        spans(&outcome),
        vec![span(0, 9, "P1", 0), span(9, 10, "P2", 0)]
    );
    assert_eq!(outcome.stats.promotions, 3);
    assert_eq!(outcome.row("P2").unwrap().waiting, 9);
}

#[test]
fn test_arrival_during_slice_can_age_before_requeue() {
    // P2 arrives mid-slice at Q2, reaches Q1 at tick 5 and queues ahead of P1
    let specs = [
        ProcessSpec::new("P1", 0, 20, 2),
        ProcessSpec::new("P2", 1, 1, 3),
    ];
    let config = SchedulerConfig::new([8, 8, 8])
        .unwrap()
        .with_aging_threshold(4);
    let outcome = simulate(&specs, &config).unwrap();

    assert_eq!(
        spans(&outcome)[..2].to_vec(),
        vec![span(0, 8, "P1", 1), span(8, 9, "P2", 1)]
    );
}

#[test]
fn test_workload_past_tick_range_is_rejected() {
    let late = [ProcessSpec::new("P1", u64::MAX - 1, 5, 1)];
    assert_eq!(
        simulate(&late, &SchedulerConfig::default()).unwrap_err(),
        ConfigError::TimeOverflow {
            id: "P1".into(),
            arrival: u64::MAX - 1,
        }
    );

    let edge = [ProcessSpec::new("P1", u64::MAX - 5, 5, 1)];
    let outcome = simulate(&edge, &SchedulerConfig::default()).unwrap();
    assert_eq!(outcome.row("P1").unwrap().completion, Some(u64::MAX));
}

#[test]
fn test_idle_gap_is_skipped() {
    let specs = [
        ProcessSpec::new("P1", 0, 2, 1),
        ProcessSpec::new("P2", 5, 3, 1),
    ];
    let outcome = simulate(&specs, &SchedulerConfig::round_robin(4).unwrap()).unwrap();

    assert_eq!(
        spans(&outcome),
        vec![span(0, 2, "P1", 0), span(5, 8, "P2", 0)]
    );
    assert_eq!(outcome.summary.makespan, 8);
    assert_eq!(outcome.summary.cpu_utilization, 62.5);
    assert_eq!(outcome.stats.idle_ticks, 3);
    assert_eq!(outcome.row("P2").unwrap().response, Some(0));
}

#[test]
fn test_late_first_arrival() {
    let specs = [ProcessSpec::new("P1", 7, 3, 1)];
    let outcome = simulate(&specs, &SchedulerConfig::default()).unwrap();

    assert_eq!(spans(&outcome), vec![span(7, 10, "P1", 0)]);
    // Makespan starts at the first arrival
    assert_eq!(outcome.summary.makespan, 3);
    assert_eq!(outcome.summary.cpu_utilization, 100.0);
}

#[test]
fn test_preemption_tie_break() {
    // Two candidates inside P1's quantum: the earliest arrival cuts the slice,
    // the later one cuts the next
    let specs = [
        ProcessSpec::new("P1", 0, 10, 3),
        ProcessSpec::new("P3", 2, 1, 2),
        ProcessSpec::new("P2", 4, 1, 1),
    ];
    let config = SchedulerConfig::new([6, 6, 6]).unwrap().with_preemption(true);
    let outcome = simulate(&specs, &config).unwrap();

    assert_eq!(
        spans(&outcome),
        vec![
            span(0, 2, "P1", 2),
            span(2, 3, "P3", 1),
            span(3, 4, "P1", 2),
            span(4, 5, "P2", 0),
            span(5, 12, "P1", 2),
        ]
    );
    assert_eq!(outcome.stats.preemptions, 2);
}

#[test]
fn test_simultaneous_arrivals_keep_input_order() {
    let specs = [
        ProcessSpec::new("B", 0, 2, 1),
        ProcessSpec::new("A", 0, 2, 1),
        ProcessSpec::new("C", 0, 2, 1),
    ];
    let mut outcome = simulate(&specs, &SchedulerConfig::round_robin(1).unwrap()).unwrap();

    let order: Vec<_> = outcome.timeline.iter().take(3).map(|s| s.process.to_string()).collect();
    assert_eq!(order, vec!["B", "A", "C"]);

    let ids: Vec<_> = outcome.processes.iter().map(|r| r.id.to_string()).collect();
    assert_eq!(ids, vec!["B", "A", "C"]);
    outcome.sort_rows_by_id();
    let ids: Vec<_> = outcome.processes.iter().map(|r| r.id.to_string()).collect();
    assert_eq!(ids, vec!["A", "B", "C"]);
}

#[test]
fn test_default_workload_runs() {
    let workload = mlfq_sim::Workload::default();
    let outcome = simulate(&workload.processes, &workload.config).unwrap();

    assert_eq!(outcome.summary.completed, 8);
    let busy: u64 = outcome.timeline.iter().map(|s| s.duration()).sum();
    assert_eq!(busy, workload.processes.iter().map(|p| p.burst).sum::<u64>());
    for row in &outcome.processes {
        assert_eq!(row.turnaround, Some(row.waiting + row.burst));
    }
}
