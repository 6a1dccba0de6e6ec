/*!
 * Error Types
 * Unified error with thiserror and miette diagnostics
 */

use miette::Diagnostic;
use thiserror::Error;

pub use crate::core::bincode::BincodeError;
pub use crate::memory::MemoryError;
pub use crate::process::ProcessError;
pub use crate::ps::{CollectError, RenderError};

/// Unified kernel error type with miette diagnostics
#[derive(Error, Debug, Diagnostic)]
pub enum KernelError {
    #[error("Process error: {0}")]
    #[diagnostic(transparent)]
    Process(#[from] ProcessError),

    #[error("Memory error: {0}")]
    #[diagnostic(
        code(kernel::memory),
        help("The simulated user address space rejected the access.")
    )]
    Memory(#[from] MemoryError),

    #[error("Codec error: {0}")]
    #[diagnostic(code(kernel::codec))]
    Codec(#[from] BincodeError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Collect(#[from] CollectError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Render(#[from] RenderError),

    #[error("I/O error: {0}")]
    #[diagnostic(
        code(kernel::io_error),
        help("The operating system refused a thread or I/O request.")
    )]
    Io(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(kernel::configuration_error),
        help("Invalid configuration. Review configuration parameters.")
    )]
    Configuration(String),
}

impl From<std::io::Error> for KernelError {
    fn from(err: std::io::Error) -> Self {
        KernelError::Io(err.to_string())
    }
}
