/*!
 * Table Scanner Tests
 * Ordering, idempotence and end-of-table behavior of `step`
 */

use proptest::prelude::*;
use ptable::process::{ProcState, ProcessTable};

/// Build a table with churned slots so slot order differs from pid order.
///
/// `fates[i]`: 0 keeps process i live, 1 leaves it a zombie, 2 reaps it.
fn churned_table(fates: &[u8], refill: usize) -> (ProcessTable, Vec<u32>) {
    let table = ProcessTable::new();
    let init = table.spawn(None, "init", 4096).unwrap();
    let mut live = vec![init];

    let children: Vec<u32> = fates
        .iter()
        .enumerate()
        .map(|(i, _)| table.spawn(Some(init), &format!("p{i}"), i as u64).unwrap())
        .collect();

    for (pid, fate) in children.iter().zip(fates) {
        match fate % 3 {
            0 => live.push(*pid),
            1 => {
                table.exit(*pid).unwrap();
                live.push(*pid);
            }
            _ => {
                table.exit(*pid).unwrap();
                table.reap(*pid).unwrap();
            }
        }
    }

    for i in 0..refill {
        live.push(table.spawn(Some(init), &format!("r{i}"), 0).unwrap());
    }

    live.sort_unstable();
    (table, live)
}

proptest! {
    #[test]
    fn scan_of_static_table_yields_sorted_live_pids(
        fates in prop::collection::vec(0u8..3, 0..40),
        refill in 0usize..10,
    ) {
        let (table, live) = churned_table(&fates, refill);
        let scanned: Vec<u32> = table.scan().map(|r| r.pid).collect();
        prop_assert_eq!(scanned, live);
    }

    #[test]
    fn step_is_idempotent_on_static_table(
        fates in prop::collection::vec(0u8..3, 0..40),
        cursor in 0u32..50,
    ) {
        let (table, _) = churned_table(&fates, 3);
        prop_assert_eq!(table.step(cursor), table.step(cursor));
    }

    #[test]
    fn step_returns_smallest_pid_above_cursor(
        fates in prop::collection::vec(0u8..3, 1..40),
        cursor in 0u32..50,
    ) {
        let (table, live) = churned_table(&fates, 2);
        let expected = live.iter().copied().find(|&pid| pid > cursor);
        prop_assert_eq!(table.step(cursor).map(|r| r.pid), expected);
    }
}

#[test]
fn test_cursor_at_max_pid_is_done() {
    let (table, live) = churned_table(&[0, 2, 1, 0], 1);
    let max = *live.last().unwrap();
    assert!(table.step(max).is_none());
    assert!(table.step(max).is_none());
}

#[test]
fn test_record_is_a_copy() {
    let table = ProcessTable::new();
    let init = table.spawn(None, "init", 4096).unwrap();
    let before = table.step(0).unwrap();

    table.resize(init, 1 << 20).unwrap();
    table.set_state(init, ProcState::Sleeping).unwrap();

    assert_eq!(before.size, 4096);
    assert_eq!(before.proc_state(), Some(ProcState::Runnable));
    assert_eq!(table.step(0).unwrap().size, 1 << 20);
}

#[test]
fn test_exit_between_steps_is_skipped() {
    let table = ProcessTable::new();
    let init = table.spawn(None, "init", 0).unwrap();
    let a = table.spawn(Some(init), "a", 0).unwrap();
    let b = table.spawn(Some(init), "b", 0).unwrap();
    let c = table.spawn(Some(init), "c", 0).unwrap();

    let mut scan = table.scan();
    assert_eq!(scan.next().unwrap().pid, init);
    assert_eq!(scan.next().unwrap().pid, a);

    table.exit(b).unwrap();
    table.reap(b).unwrap();

    assert_eq!(scan.next().unwrap().pid, c);
    assert!(scan.next().is_none());
}

#[test]
fn test_process_created_above_cursor_is_seen() {
    let table = ProcessTable::new();
    let init = table.spawn(None, "init", 0).unwrap();

    let mut scan = table.scan();
    assert_eq!(scan.next().unwrap().pid, init);

    let late = table.spawn(Some(init), "late", 0).unwrap();
    assert_eq!(scan.next().unwrap().pid, late);
    assert!(scan.next().is_none());
}

#[test]
fn test_exhausted_scan_stays_done() {
    let table = ProcessTable::new();
    let init = table.spawn(None, "init", 0).unwrap();

    let mut scan = table.scan();
    assert!(scan.next().is_some());
    assert!(scan.next().is_none());

    table.spawn(Some(init), "after", 0).unwrap();
    assert!(scan.next().is_none());
}
