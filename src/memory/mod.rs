/*!
 * Memory Module
 * Simulated user address space that kernel copy-out writes into
 */

pub mod types;
pub mod user;

// Re-export for convenience
pub use types::*;
pub use user::UserMemory;
