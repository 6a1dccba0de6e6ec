/*!
 * Concurrent Scan Tests
 * Scans racing with creation, exit and reaping
 */

use ptable::process::{Churn, ProcessTable};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const STABLE_PROCESSES: usize = 20;
const SCANS: usize = 200;

fn stable_table() -> (Arc<ProcessTable>, Vec<u32>) {
    let table = Arc::new(ProcessTable::new());
    let init = table.spawn(None, "init", 0).unwrap();
    let mut stable = vec![init];
    for i in 0..STABLE_PROCESSES {
        stable.push(table.spawn(Some(init), &format!("stable{i}"), 0).unwrap());
    }
    (table, stable)
}

#[test]
fn test_scan_under_churn_is_monotone_and_complete() {
    let (table, stable) = stable_table();
    let churn = Churn::start(Arc::clone(&table), stable[0], Duration::ZERO).unwrap();

    for _ in 0..SCANS {
        let pids: Vec<u32> = table.scan().map(|r| r.pid).collect();

        assert!(
            pids.windows(2).all(|w| w[0] < w[1]),
            "identifiers must strictly increase: {pids:?}"
        );
        // Live for the whole scan, so the cursor can never pass them unseen
        for pid in &stable {
            assert!(pids.contains(pid), "stable pid {pid} missing from {pids:?}");
        }
    }

    assert!(churn.stop() > 0);
}

#[test]
fn test_many_scanners_and_mutators_make_progress() {
    let (table, stable) = stable_table();
    let stop = Arc::new(AtomicBool::new(false));
    let init = stable[0];

    let mutators: Vec<_> = (0..4u64)
        .map(|seed| {
            let table = Arc::clone(&table);
            let stop = Arc::clone(&stop);
            thread::spawn(move || {
                let mut rng = StdRng::seed_from_u64(seed);
                let mut mine = Vec::new();
                while !stop.load(Ordering::Relaxed) {
                    if rng.gen_bool(0.6) {
                        if let Ok(pid) = table.spawn(Some(init), "m", rng.gen_range(0..4096)) {
                            mine.push(pid);
                        }
                    } else if !mine.is_empty() {
                        let pid = mine.swap_remove(rng.gen_range(0..mine.len()));
                        table.exit(pid).unwrap();
                        table.reap(pid).unwrap();
                    }
                }
            })
        })
        .collect();

    let scanners: Vec<_> = (0..4)
        .map(|_| {
            let table = Arc::clone(&table);
            thread::spawn(move || {
                let mut total = 0usize;
                for _ in 0..SCANS {
                    let mut last = 0;
                    for record in table.scan() {
                        assert!(record.pid > last);
                        last = record.pid;
                        total += 1;
                    }
                }
                total
            })
        })
        .collect();

    for scanner in scanners {
        let seen = scanner.join().expect("scanner thread panicked");
        assert!(seen >= SCANS * (STABLE_PROCESSES + 1));
    }

    stop.store(true, Ordering::Relaxed);
    for mutator in mutators {
        mutator.join().expect("mutator thread panicked");
    }
}
