/*!
 * Syscall Result Types
 * Outcome of one enumeration request
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of a `getprocs` request
///
/// `Done` is the expected end of a scan and not an error; `Fault` means the
/// record could not be delivered and must never be read as `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOutcome {
    /// A record was written to the destination
    Found,
    /// No live process has an identifier above the cursor
    Done,
    /// The destination could not be written
    Fault,
}

impl StepOutcome {
    /// Integer return code: `1` found, `0` done, `-1` fault
    #[inline]
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Found => 1,
            Self::Done => 0,
            Self::Fault => -1,
        }
    }

    /// Decode a return code; any negative value is a fault
    #[inline]
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        match code {
            1.. => Self::Found,
            0 => Self::Done,
            _ => Self::Fault,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_found(self) -> bool {
        matches!(self, Self::Found)
    }

    #[inline]
    #[must_use]
    pub const fn is_fault(self) -> bool {
        matches!(self, Self::Fault)
    }
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Found => "FOUND",
            Self::Done => "DONE",
            Self::Fault => "FAULT",
        })
    }
}
