/*!
 * Process Enumeration Syscall
 * Boundary between the live table and an unprivileged client
 */

use super::stats::{AtomicScanStats, ScanStats};
use super::types::StepOutcome;
use crate::core::bincode::encode_record;
use crate::core::types::{Address, Cursor};
use crate::memory::UserMemory;
use crate::process::ProcessTable;
use std::sync::Arc;
use tracing::{trace, warn};

/// Syscall surface over a shared process table
#[derive(Debug, Clone)]
pub struct Syscalls {
    table: Arc<ProcessTable>,
    stats: Arc<AtomicScanStats>,
}

impl Syscalls {
    pub fn new(table: Arc<ProcessTable>) -> Self {
        Self {
            table,
            stats: Arc::new(AtomicScanStats::new()),
        }
    }

    pub fn table(&self) -> &Arc<ProcessTable> {
        &self.table
    }

    /// Copy the next live process above `cursor` to `dst` in `memory`
    ///
    /// The table step finishes and releases every slot lock before the copy-out,
    /// so a faulting destination never holds up other table users. `Done` is
    /// decided before touching user memory.
    pub fn getprocs(&self, cursor: Cursor, memory: &UserMemory, dst: Address) -> StepOutcome {
        let outcome = match self.table.step(cursor) {
            None => StepOutcome::Done,
            Some(record) => {
                let delivered = encode_record(&record)
                    .map_err(|e| e.to_string())
                    .and_then(|bytes| memory.write_bytes(dst, &bytes).map_err(|e| e.to_string()));

                match delivered {
                    Ok(()) => {
                        trace!(cursor, pid = record.pid, "getprocs delivered record");
                        StepOutcome::Found
                    }
                    Err(error) => {
                        warn!(cursor, dst, %error, "getprocs fault");
                        StepOutcome::Fault
                    }
                }
            }
        };

        self.stats.record(outcome);
        outcome
    }

    /// `getprocs` with the integer return convention (`1`, `0`, `-1`)
    #[inline]
    pub fn sys_getprocs(&self, cursor: Cursor, memory: &UserMemory, dst: Address) -> i32 {
        self.getprocs(cursor, memory, dst).code()
    }

    pub fn stats(&self) -> ScanStats {
        self.stats.snapshot()
    }
}
