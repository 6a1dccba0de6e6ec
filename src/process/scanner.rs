/*!
 * Table Scanner
 * Weakly consistent, monotone-cursor enumeration of the live table
 *
 * A scan is a sequence of independent `step` calls. Each call visits every slot
 * once, locking one slot at a time, and returns the live process with the
 * smallest identifier above the cursor. Nothing is locked between calls, so a
 * scan is not a point-in-time snapshot:
 *
 * - a process created with an identifier at or below the cursor is never seen
 *   by the rest of the scan; one created above the cursor eventually is
 * - a process that exits before its turn is skipped
 * - no identifier is delivered twice, because the cursor only moves forward
 *
 * Identifiers come from an increasing counter, so in practice only processes
 * created after the scan passed their position are missed.
 */

use super::table::ProcessTable;
use super::types::{ProcSlot, ProcessRecord};
use crate::core::types::{Cursor, START_CURSOR};
use parking_lot::MutexGuard;

impl ProcessTable {
    /// Next live process with identifier strictly greater than `cursor`
    ///
    /// The current best candidate stays locked while the remaining slots are
    /// compared against it. When a smaller candidate turns up, the new slot is
    /// already locked and the old candidate is released: the hand-off window is
    /// the only time two slots are held, and they are always taken in ascending
    /// slot order. The winner is copied out before its lock is dropped.
    ///
    /// Returns `None` at end of table. Never mutates the table and never retries.
    pub fn step(&self, cursor: Cursor) -> Option<ProcessRecord> {
        let mut best: Option<MutexGuard<'_, ProcSlot>> = None;

        for slot in self.slots() {
            let entry = slot.lock();
            let better = entry.is_live()
                && entry.pid > cursor
                && best.as_ref().map_or(true, |current| entry.pid < current.pid);

            if better {
                if let Some(previous) = best.replace(entry) {
                    drop(previous);
                }
            }
        }

        best.map(|winner| winner.to_record())
    }

    /// Iterate the table by repeated [`step`](Self::step) calls from cursor 0
    pub fn scan(&self) -> Scan<'_> {
        Scan {
            table: self,
            cursor: START_CURSOR,
            finished: false,
        }
    }
}

/// Iterator over a running scan
///
/// Each `next` is one `step`; the table may change between items.
#[derive(Debug)]
pub struct Scan<'a> {
    table: &'a ProcessTable,
    cursor: Cursor,
    finished: bool,
}

impl Scan<'_> {
    /// Identifier of the last record yielded, `0` before the first
    #[inline]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }
}

impl Iterator for Scan<'_> {
    type Item = ProcessRecord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.table.step(self.cursor) {
            Some(record) => {
                self.cursor = record.pid;
                Some(record)
            }
            None => {
                self.finished = true;
                None
            }
        }
    }
}

impl std::iter::FusedIterator for Scan<'_> {}
