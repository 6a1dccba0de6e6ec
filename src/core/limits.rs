/*!
 * System Limits and Constants
 *
 * Centralized location for table sizes, record layout and client defaults.
 *
 * - Linux/xv6-compatible values are marked with [COMPAT]
 * - Values that fix the kernel/user wire layout are marked with [ABI]
 */

use crate::core::types::Pid;

// =============================================================================
// PROCESS TABLE
// =============================================================================

/// Number of preallocated slots in the live table
/// [COMPAT] Same bound as the classic teaching-kernel `NPROC`
#[cfg(not(feature = "custom_limits"))]
pub const NPROC: usize = 64;

/// Larger table for stress scenarios
#[cfg(feature = "custom_limits")]
pub const NPROC: usize = 1024;

/// Conventional identifier of the init process
pub const INIT_PID: Pid = 1;

/// First identifier handed out by a fresh table
pub const FIRST_PID: Pid = 1;

// =============================================================================
// RECORD LAYOUT
// =============================================================================

/// Fixed capacity of a process name, including the terminating NUL
/// [ABI] Names are truncated to `PROC_NAME_CAPACITY - 1` visible bytes
pub const PROC_NAME_CAPACITY: usize = 16;

/// Encoded size of one record copied out to user memory
/// [ABI] pid (4) + ppid (4) + size (8) + state (4) + name (16)
pub const RECORD_WIRE_SIZE: usize = 4 + 4 + 8 + 4 + PROC_NAME_CAPACITY;

// =============================================================================
// USER MEMORY
// =============================================================================

/// Base of the simulated user address space
/// Address 0 stays unmapped so a null destination always faults
pub const USER_SPACE_BASE: usize = 0x1000;

/// Largest single mapping a client may request (1MB)
pub const MAX_USER_MAPPING: usize = 1024 * 1024;

// =============================================================================
// CLIENT DEFAULTS
// =============================================================================

/// Default snapshot capacity: never more records than the table can hold
pub const DEFAULT_SNAPSHOT_CAPACITY: usize = NPROC;

/// Default number of demo processes booted by the `ps` binary
pub const DEFAULT_WORKLOAD: usize = 8;

/// Indentation per tree level in rendered output
pub const TREE_INDENT: &str = "  ";
