/*!
 * Lifecycle Race Tests
 * Spawning under a parent while that parent exits
 */

use ptable::process::{ProcessError, ProcessTable};
use ptable::ps::{build_forest, collect};
use std::sync::{Arc, Barrier};
use std::thread;

const ROUNDS: usize = 200;

#[test]
fn test_spawn_racing_parent_exit_never_orphans() {
    for _ in 0..ROUNDS {
        let table = Arc::new(ProcessTable::new());
        let init = table.spawn(None, "init", 0).unwrap();
        let parent = table.spawn(Some(init), "sh", 0).unwrap();
        let barrier = Arc::new(Barrier::new(2));

        let spawner = {
            let table = Arc::clone(&table);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let mut spawned = 0usize;
                loop {
                    match table.spawn(Some(parent), "job", 0) {
                        Ok(_) => spawned += 1,
                        Err(ProcessError::ParentExited(_) | ProcessError::NotFound(_)) => break,
                        Err(ProcessError::TableFull(_)) => break,
                        Err(other) => panic!("unexpected spawn error: {other}"),
                    }
                }
                spawned
            })
        };

        barrier.wait();
        table.exit(parent).unwrap();
        spawner.join().expect("spawner thread panicked");
        table.reap(parent).unwrap();

        let snapshot = collect(&*table, table.capacity()).unwrap();
        for record in &snapshot {
            if record.pid != init {
                assert_eq!(record.ppid, init, "pid {} kept an exited parent", record.pid);
            }
        }
        let tree = build_forest(&snapshot).unwrap();
        assert_eq!(tree.len(), snapshot.len());
    }
}
