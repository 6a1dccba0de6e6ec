/*!
 * Syscalls Module
 * The enumeration request exposed to unprivileged clients
 */

pub mod getprocs;
pub mod stats;
pub mod types;

// Re-export for convenience
pub use getprocs::Syscalls;
pub use stats::{AtomicScanStats, ScanStats};
pub use types::StepOutcome;
