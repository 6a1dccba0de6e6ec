/*!
 * Snapshot Collection Tests
 * Bounded collection through the real syscall path
 */

use pretty_assertions::assert_eq;
use ptable::process::ProcessTable;
use ptable::ps::{collect, SyscallSource};
use ptable::syscalls::Syscalls;
use std::sync::Arc;

fn five_process_table() -> Arc<ProcessTable> {
    let table = Arc::new(ProcessTable::new());
    let init = table.spawn(None, "init", 4096).unwrap();
    let sh = table.spawn(Some(init), "sh", 8192).unwrap();
    for name in ["cat", "grep", "wc"] {
        table.spawn(Some(sh), name, 1024).unwrap();
    }
    table
}

#[test]
fn test_capacity_keeps_smallest_identifiers() {
    let sys = Syscalls::new(five_process_table());
    let source = SyscallSource::new(&sys).unwrap();

    let snapshot = collect(&source, 2).unwrap();

    let pids: Vec<u32> = snapshot.records().iter().map(|r| r.pid).collect();
    assert_eq!(pids, vec![1, 2]);
    assert!(snapshot.truncated());
}

#[test]
fn test_full_collect_matches_table() {
    let table = five_process_table();
    let sys = Syscalls::new(Arc::clone(&table));
    let source = SyscallSource::new(&sys).unwrap();

    let snapshot = collect(&source, 64).unwrap();

    assert_eq!(snapshot.len(), table.live_count());
    assert!(!snapshot.truncated());
    let direct: Vec<_> = table.scan().collect();
    assert_eq!(snapshot.records(), direct.as_slice());
}

#[test]
fn test_collect_ends_with_done() {
    let sys = Syscalls::new(five_process_table());
    let source = SyscallSource::new(&sys).unwrap();

    collect(&source, 64).unwrap();

    let stats = sys.stats();
    assert_eq!(stats.found, 5);
    assert_eq!(stats.done, 1);
    assert_eq!(stats.faults, 0);
}

#[test]
fn test_empty_table_gives_empty_snapshot() {
    let sys = Syscalls::new(Arc::new(ProcessTable::new()));
    let source = SyscallSource::new(&sys).unwrap();

    let snapshot = collect(&source, 64).unwrap();
    assert!(snapshot.is_empty());
    assert!(!snapshot.truncated());
}

#[test]
fn test_capacity_far_above_table_size() {
    let sys = Syscalls::new(five_process_table());
    let source = SyscallSource::new(&sys).unwrap();

    let snapshot = collect(&source, usize::MAX).unwrap();
    assert_eq!(snapshot.len(), 5);
    assert!(!snapshot.truncated());
}
