/*!
 * ptable
 * A live process table exposed through a weakly consistent enumeration
 * request, and the client that turns the enumeration into a process forest
 */

pub mod config;
pub mod core;
pub mod memory;
pub mod monitoring;
pub mod process;
pub mod ps;
pub mod syscalls;

// Re-exports
pub use config::Config;
pub use core::errors::KernelError;
pub use memory::UserMemory;
pub use monitoring::init_tracing;
pub use process::{ProcState, ProcessRecord, ProcessTable};
pub use ps::{collect, render, Mode, ProcSource, Snapshot, SyscallSource};
pub use syscalls::{StepOutcome, Syscalls};
