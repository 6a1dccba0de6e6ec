/*!
 * Demo Workload
 * Boots a small process hierarchy and optionally keeps mutating it
 */

use super::table::ProcessTable;
use super::types::{ProcState, ProcessResult};
use crate::core::types::Pid;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, warn};

const WORKER_NAMES: [&str; 6] = ["cat", "grep", "wc", "echo", "ls", "sleep"];

/// Populate `table` with `init`, a shell and `count - 2` workers
///
/// Workers alternate between being children of the shell and children of the
/// previous worker, giving a tree a few levels deep. Returns the pids in
/// creation order. A count below 2 boots only as many of init/sh as fit.
pub fn boot(table: &ProcessTable, count: usize) -> ProcessResult<Vec<Pid>> {
    let mut pids = Vec::with_capacity(count);
    if count == 0 {
        return Ok(pids);
    }

    let init = table.spawn(None, "init", 12 * 1024)?;
    table.set_state(init, ProcState::Sleeping)?;
    pids.push(init);
    if count == 1 {
        return Ok(pids);
    }

    let sh = table.spawn(Some(init), "sh", 16 * 1024)?;
    table.set_state(sh, ProcState::Sleeping)?;
    pids.push(sh);

    let mut previous = sh;
    for i in 0..count.saturating_sub(2) {
        let parent = if i % 2 == 0 { sh } else { previous };
        let name = WORKER_NAMES[i % WORKER_NAMES.len()];
        let pid = table.spawn(Some(parent), name, 4096 * (i as u64 + 1))?;
        if i % 3 == 0 {
            table.set_state(pid, ProcState::Running)?;
        }
        pids.push(pid);
        previous = pid;
    }

    info!(processes = pids.len(), "Demo workload booted");
    Ok(pids)
}

/// Background mutator that creates, exits and reaps processes in a loop
///
/// Stops and joins on drop.
pub struct Churn {
    stop: Arc<AtomicBool>,
    operations: Arc<AtomicU64>,
    handle: Option<JoinHandle<()>>,
}

impl Churn {
    /// Start churning children of `parent`
    ///
    /// Fails when the mutator thread cannot be spawned.
    pub fn start(table: Arc<ProcessTable>, parent: Pid, pause: Duration) -> io::Result<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let operations = Arc::new(AtomicU64::new(0));

        let handle = {
            let stop = Arc::clone(&stop);
            let operations = Arc::clone(&operations);
            thread::Builder::new()
                .name("churn".into())
                .spawn(move || churn_loop(&table, parent, pause, &stop, &operations))
                .map_err(|e| {
                    warn!(error = %e, "Failed to start churn thread");
                    e
                })?
        };

        info!(parent, "Churn started");
        Ok(Self {
            stop,
            operations,
            handle: Some(handle),
        })
    }

    /// Number of table mutations performed so far
    pub fn operations(&self) -> u64 {
        self.operations.load(Ordering::Relaxed)
    }

    pub fn stop(mut self) -> u64 {
        self.shutdown();
        self.operations()
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Churn {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn churn_loop(
    table: &ProcessTable,
    parent: Pid,
    pause: Duration,
    stop: &AtomicBool,
    operations: &AtomicU64,
) {
    let mut spawned: Vec<Pid> = Vec::new();
    let mut tick: u64 = 0;

    while !stop.load(Ordering::Acquire) {
        tick += 1;
        // Two spawns for every exit+reap keeps a steady population
        let result = if tick % 3 == 0 && !spawned.is_empty() {
            let victim = spawned.remove(0);
            table.exit(victim).and_then(|_| table.reap(victim)).map(|_| ())
        } else {
            table
                .spawn(Some(parent), "churn", 4096)
                .map(|pid| spawned.push(pid))
        };

        match result {
            Ok(()) => {
                operations.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                debug!(error = %e, "Churn operation skipped");
                // Table full: drain instead of spinning on spawn
                if let Some(victim) = spawned.pop() {
                    if let Err(e) = table.exit(victim).and_then(|_| table.reap(victim)) {
                        debug!(pid = victim, error = %e, "Churn drain skipped");
                    }
                }
            }
        }

        if !pause.is_zero() {
            thread::sleep(pause);
        }
    }

    debug!(remaining = spawned.len(), "Churn stopped");
}
