/*!
 * Fault Handling Tests
 * A FAULT from the source aborts collection and is never taken for DONE
 */

use mockall::mock;
use mockall::predicate::eq;
use mockall::Sequence;
use ptable::core::types::Cursor;
use ptable::process::{ProcState, ProcessRecord, ProcessTable};
use ptable::ps::{collect, CollectError, FaultError, ProcSource, SyscallSource};
use ptable::syscalls::Syscalls;
use std::sync::Arc;

mock! {
    pub Source {}

    impl ProcSource for Source {
        fn next_process(&self, cursor: Cursor) -> Result<Option<ProcessRecord>, FaultError>;
    }
}

fn rec(pid: u32) -> ProcessRecord {
    ProcessRecord::new(pid, 0, 0, ProcState::Running, "p")
}

#[test]
fn test_fault_on_first_request() {
    let mut source = MockSource::new();
    source
        .expect_next_process()
        .with(eq(0))
        .times(1)
        .returning(|cursor| Err(FaultError { cursor }));

    let result = collect(&source, 64);
    assert_eq!(
        result,
        Err(CollectError::Fault {
            collected: 0,
            source: FaultError { cursor: 0 },
        })
    );
}

#[test]
fn test_fault_mid_scan_discards_partial_snapshot() {
    let mut seq = Sequence::new();
    let mut source = MockSource::new();
    source
        .expect_next_process()
        .with(eq(0))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(Some(rec(1))));
    source
        .expect_next_process()
        .with(eq(1))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(Some(rec(3))));
    source
        .expect_next_process()
        .with(eq(3))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|cursor| Err(FaultError { cursor }));

    match collect(&source, 64) {
        Err(CollectError::Fault { collected, source }) => {
            assert_eq!(collected, 2);
            assert_eq!(source.cursor, 3);
        }
        other => panic!("expected fault, got {other:?}"),
    }
}

#[test]
fn test_fault_on_truncation_check_keeps_snapshot() {
    let mut seq = Sequence::new();
    let mut source = MockSource::new();
    source
        .expect_next_process()
        .with(eq(0))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(Some(rec(1))));
    source
        .expect_next_process()
        .with(eq(1))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|cursor| Err(FaultError { cursor }));

    let snapshot = collect(&source, 1).unwrap();
    assert_eq!(snapshot.records(), &[rec(1)]);
    assert!(!snapshot.truncated());
}

#[test]
fn test_cursor_advances_to_each_returned_pid() {
    let mut seq = Sequence::new();
    let mut source = MockSource::new();
    for (cursor, next) in [(0, Some(2)), (2, Some(5)), (5, Some(9)), (9, None)] {
        source
            .expect_next_process()
            .with(eq(cursor))
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| Ok(next.map(rec)));
    }

    let snapshot = collect(&source, 64).unwrap();
    let pids: Vec<u32> = snapshot.records().iter().map(|r| r.pid).collect();
    assert_eq!(pids, vec![2, 5, 9]);
}

#[test]
fn test_zero_capacity_never_calls_source() {
    let source = MockSource::new();
    let snapshot = collect(&source, 0).unwrap();
    assert!(snapshot.is_empty());
}

#[test]
fn test_invalid_destination_faults_through_syscall() {
    let table = Arc::new(ProcessTable::new());
    table.spawn(None, "init", 4096).unwrap();
    let sys = Syscalls::new(table);
    let source = SyscallSource::new(&sys).unwrap().with_destination(0);

    assert!(matches!(
        collect(&source, 64),
        Err(CollectError::Fault { collected: 0, .. })
    ));
    assert_eq!(sys.stats().faults, 1);
}

#[test]
fn test_empty_table_with_invalid_destination_is_done() {
    // Nothing to deliver, so the bad destination is never written
    let sys = Syscalls::new(Arc::new(ProcessTable::new()));
    let source = SyscallSource::new(&sys).unwrap().with_destination(0);

    let snapshot = collect(&source, 64).unwrap();
    assert!(snapshot.is_empty());
}
