/*!
 * Memory Types
 * Errors for simulated user memory
 */

use crate::core::types::{Address, Size};
use thiserror::Error;

/// Memory operation result
pub type MemoryResult<T> = Result<T, MemoryError>;

/// User memory errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    #[error("Invalid memory address: 0x{0:x}")]
    InvalidAddress(Address),

    #[error("Access out of bounds: {len} bytes at 0x{address:x} overruns the mapping")]
    OutOfBounds { address: Address, len: Size },

    #[error("Mapping too large: requested {requested} bytes, limit {limit} bytes")]
    MappingTooLarge { requested: Size, limit: Size },
}
