/*!
 * Core Types
 * Common types used across the table, the syscall surface and the client
 */

/// Process ID type
///
/// Identifiers are positive; `0` never names a live process and doubles as
/// "no parent" in records and as the starting cursor of a scan.
pub type Pid = u32;

/// Scan cursor: the identifier of the last record the client consumed
pub type Cursor = Pid;

/// Address type for simulated user memory
pub type Address = usize;

/// Size type for memory operations
pub type Size = usize;

/// Position of an entry inside the fixed-size table
pub type SlotIndex = usize;

/// Common result type for kernel operations
pub type KernelResult<T> = Result<T, super::errors::KernelError>;

/// Cursor value that starts a scan below every valid identifier
pub const START_CURSOR: Cursor = 0;

/// Parent identifier recorded for processes without a parent
pub const NO_PARENT: Pid = 0;
