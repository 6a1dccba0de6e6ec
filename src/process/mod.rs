/*!
 * Process Module
 * Live process table, its weakly consistent scanner and a demo workload
 */

pub mod scanner;
pub mod table;
pub mod types;
pub mod workload;

// Re-export for convenience
pub use scanner::Scan;
pub use table::ProcessTable;
pub use types::{state_name, ProcName, ProcState, ProcessError, ProcessRecord, ProcessResult};
pub use workload::{boot, Churn};
