/*!
 * Core Module
 * Fundamental types, limits, the record codec and error handling
 */

pub mod bincode;
pub mod errors;
pub mod limits;
pub mod types;

// Re-export for convenience
pub use errors::*;
pub use types::*;
