/*!
 * Snapshot Collection
 * Bounded, client-owned copy of the table gathered by repeated steps
 */

use super::source::{FaultError, ProcSource};
use crate::core::limits::NPROC;
use crate::core::types::{Cursor, START_CURSOR};
use crate::monitoring::scan_span;
use crate::process::ProcessRecord;
use miette::Diagnostic;
use thiserror::Error;
use tracing::{debug, warn};

/// Collection aborted; no partial snapshot is returned
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum CollectError {
    #[error("process scan faulted after {collected} records")]
    #[diagnostic(
        code(ps::scan_fault),
        help("The enumeration request could not deliver a record; nothing was rendered.")
    )]
    Fault {
        collected: usize,
        #[source]
        source: FaultError,
    },
}

/// Ordered records from one scan, in increasing identifier order
///
/// Not a point-in-time view: the table may have changed between records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    records: Vec<ProcessRecord>,
    truncated: bool,
}

impl Snapshot {
    /// Wrap records gathered elsewhere (tests, tools)
    pub fn from_records(records: Vec<ProcessRecord>) -> Self {
        Self {
            records,
            truncated: false,
        }
    }

    #[inline]
    pub fn records(&self) -> &[ProcessRecord] {
        &self.records
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The capacity was reached while the table still had more records
    #[inline]
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    pub fn into_records(self) -> Vec<ProcessRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a ProcessRecord;
    type IntoIter = std::slice::Iter<'a, ProcessRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Drive `source` from cursor 0 until end of table or `capacity` records
///
/// Records past `capacity` are dropped on purpose; the snapshot is flagged
/// `truncated` when one more step after the last kept record still finds one.
/// A fault while gathering records aborts the whole collection. A fault on
/// that extra step only leaves truncation unknown.
pub fn collect<S: ProcSource + ?Sized>(
    source: &S,
    capacity: usize,
) -> Result<Snapshot, CollectError> {
    let span = scan_span(capacity);
    let _entered = span.enter();

    let mut records = Vec::with_capacity(capacity.min(NPROC));
    let mut cursor: Cursor = START_CURSOR;
    let fault = |error: FaultError, collected: usize| CollectError::Fault {
        collected,
        source: error,
    };

    while records.len() < capacity {
        let collected = records.len();
        match source.next_process(cursor).map_err(|e| fault(e, collected))? {
            Some(record) => {
                cursor = record.pid;
                records.push(record);
            }
            None => {
                debug!(collected = records.len(), "Scan complete");
                return Ok(Snapshot::from_records(records));
            }
        }
    }

    let truncated = capacity > 0
        && match source.next_process(cursor) {
            Ok(next) => next.is_some(),
            Err(error) => {
                warn!(capacity, %error, "Truncation check faulted; keeping snapshot");
                false
            }
        };

    if truncated {
        warn!(capacity, "Snapshot truncated: more live processes than capacity");
    }

    Ok(Snapshot { records, truncated })
}
