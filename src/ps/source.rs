/*!
 * Record Sources
 * The seam between the forest builder and whatever answers `step` requests
 */

use crate::core::bincode::decode_record;
use crate::core::limits::RECORD_WIRE_SIZE;
use crate::core::types::{Address, Cursor};
use crate::memory::{MemoryResult, UserMemory};
use crate::process::{ProcessRecord, ProcessTable};
use crate::syscalls::{StepOutcome, Syscalls};
use miette::Diagnostic;
use thiserror::Error;

/// A request could not deliver its record
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
#[error("process enumeration faulted after cursor {cursor}")]
#[diagnostic(
    code(ps::fault),
    help("The record could not be copied to the destination buffer.")
)]
pub struct FaultError {
    pub cursor: Cursor,
}

/// Anything that answers "next live process above `cursor`"
///
/// `Ok(None)` is end of table. Implementations must not retry on contention.
pub trait ProcSource {
    fn next_process(&self, cursor: Cursor) -> Result<Option<ProcessRecord>, FaultError>;
}

/// Direct in-process access; cannot fault
impl ProcSource for ProcessTable {
    fn next_process(&self, cursor: Cursor) -> Result<Option<ProcessRecord>, FaultError> {
        Ok(self.step(cursor))
    }
}

impl<T: ProcSource + ?Sized> ProcSource for &T {
    fn next_process(&self, cursor: Cursor) -> Result<Option<ProcessRecord>, FaultError> {
        (**self).next_process(cursor)
    }
}

/// Client driving the `getprocs` syscall through its own user memory
///
/// One destination buffer is mapped up front and reused for every request.
#[derive(Debug)]
pub struct SyscallSource<'a> {
    syscalls: &'a Syscalls,
    memory: UserMemory,
    dst: Address,
}

impl<'a> SyscallSource<'a> {
    pub fn new(syscalls: &'a Syscalls) -> MemoryResult<Self> {
        let memory = UserMemory::new();
        let dst = memory.map(RECORD_WIRE_SIZE)?;
        Ok(Self {
            syscalls,
            memory,
            dst,
        })
    }

    /// Point requests at an arbitrary destination, valid or not
    pub fn with_destination(mut self, dst: Address) -> Self {
        self.dst = dst;
        self
    }

    pub fn memory(&self) -> &UserMemory {
        &self.memory
    }
}

impl ProcSource for SyscallSource<'_> {
    fn next_process(&self, cursor: Cursor) -> Result<Option<ProcessRecord>, FaultError> {
        match self.syscalls.getprocs(cursor, &self.memory, self.dst) {
            StepOutcome::Done => Ok(None),
            StepOutcome::Fault => Err(FaultError { cursor }),
            StepOutcome::Found => self
                .memory
                .read_bytes(self.dst, RECORD_WIRE_SIZE)
                .ok()
                .and_then(|bytes| decode_record(&bytes).ok())
                .map(Some)
                .ok_or(FaultError { cursor }),
        }
    }
}
