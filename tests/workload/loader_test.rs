/*!
 * Loader Tests
 * Workload files on disk, defaults and error reporting
 */

use mlfq_sim::{load_workload, simulate, LoadError, ProcessSpec, Workload};
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

fn write_workload(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_and_simulate() {
    let file = write_workload(
        "# single queue
Q0 3
PREEMPT no
DEMOTE 0
AGING 0
P1 0 5 1
P2 1 3 1
",
    );

    let workload = load_workload(file.path()).unwrap();
    assert_eq!(
        workload.processes,
        vec![
            ProcessSpec::new("P1", 0, 5, 1),
            ProcessSpec::new("P2", 1, 3, 1),
        ]
    );
    assert!(!workload.config.preempt_on_arrival);

    let outcome = simulate(&workload.processes, &workload.config).unwrap();
    assert_eq!(outcome.row("P1").unwrap().waiting, 3);
    assert_eq!(outcome.row("P2").unwrap().waiting, 2);
}

#[test]
fn test_settings_only_file_falls_back_to_default_processes() {
    let file = write_workload("Q0 5\nAGING 9\n");
    let workload = load_workload(file.path()).unwrap();

    assert_eq!(workload.processes, Workload::default().processes);
    assert_eq!(workload.config.aging_threshold, 9);
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.txt");

    match load_workload(&path) {
        Err(LoadError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected an I/O error, got {:?}", other),
    }
}

#[test]
fn test_invalid_workload_is_reported_by_simulate() {
    let file = write_workload("P1 0 5 1\nP1 2 3 1\n");
    let workload = load_workload(file.path()).unwrap();

    let err = simulate(&workload.processes, &workload.config).unwrap_err();
    assert_eq!(err.to_string(), "Duplicate process id 'P1'");
}

#[test]
fn test_line_numbers_in_errors() {
    let file = write_workload("# header\n\nP1 0 x 1\n");
    let err = load_workload(file.path()).unwrap_err();
    assert_eq!(err.to_string(), "Line 3: invalid burst 'x'");
}
