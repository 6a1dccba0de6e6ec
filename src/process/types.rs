/*!
 * Process Types
 * Lifecycle states, fixed-capacity names and the record copied out of the table
 */

use crate::core::limits::PROC_NAME_CAPACITY;
use crate::core::types::Pid;
use miette::Diagnostic;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

/// Process operation result
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Errors raised by table mutators
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ProcessError {
    #[error("Process {0} not found")]
    #[diagnostic(
        code(process::not_found),
        help("The process may have exited and been reaped, or never existed.")
    )]
    NotFound(Pid),

    #[error("Process table full: all {0} slots are in use")]
    #[diagnostic(
        code(process::table_full),
        help("Reap zombie processes to free slots.")
    )]
    TableFull(usize),

    #[error("Process {0} has exited and cannot take new children")]
    #[diagnostic(
        code(process::parent_exited),
        help("Children of an exited process are adopted by init; spawn under init instead.")
    )]
    ParentExited(Pid),

    #[error("Invalid state transition for process {pid}: {from} -> {to}")]
    #[diagnostic(code(process::invalid_state))]
    InvalidState {
        pid: Pid,
        from: ProcState,
        to: ProcState,
    },
}

/// Lifecycle state of a table entry
///
/// The discriminants are the integer codes carried in [`ProcessRecord::state`].
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcState {
    /// Free slot, never reported by a scan
    #[default]
    Unused = 0,
    Sleeping = 1,
    Runnable = 2,
    Running = 3,
    /// Exited but not yet reaped
    Zombie = 4,
}

impl ProcState {
    /// Decode an integer state code; `None` for codes outside the known range
    #[inline]
    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Unused),
            1 => Some(Self::Sleeping),
            2 => Some(Self::Runnable),
            3 => Some(Self::Running),
            4 => Some(Self::Zombie),
            _ => None,
        }
    }

    #[inline(always)]
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Short name used in tree listings
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unused => "unused",
            Self::Sleeping => "sleep",
            Self::Runnable => "runnable",
            Self::Running => "running",
            Self::Zombie => "zombie",
        }
    }

    /// Whether a slot in this state holds a live process
    #[inline(always)]
    #[must_use]
    pub const fn is_live(self) -> bool {
        !matches!(self, Self::Unused)
    }
}

impl fmt::Display for ProcState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Map a raw state code to its listing name; unknown codes map to `unknown`
#[inline]
#[must_use]
pub fn state_name(code: i32) -> &'static str {
    ProcState::from_code(code).map_or("unknown", ProcState::label)
}

/// Fixed-capacity, NUL-terminated process name
///
/// At most `PROC_NAME_CAPACITY - 1` bytes are kept; longer names are cut at
/// the last character boundary that fits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ProcName([u8; PROC_NAME_CAPACITY]);

impl ProcName {
    #[must_use]
    pub fn new(name: &str) -> Self {
        let mut end = name.len().min(PROC_NAME_CAPACITY - 1);
        while !name.is_char_boundary(end) {
            end -= 1;
        }
        let mut buf = [0u8; PROC_NAME_CAPACITY];
        buf[..end].copy_from_slice(&name.as_bytes()[..end]);
        Self(buf)
    }

    /// Raw bytes up to (not including) the first NUL
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        let len = self.0.iter().position(|&b| b == 0).unwrap_or(self.0.len());
        &self.0[..len]
    }

    /// Name as text; bytes that are not UTF-8 are replaced
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0[0] == 0
    }
}

impl From<&str> for ProcName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for ProcName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str())
    }
}

impl fmt::Debug for ProcName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

// Text for human-readable formats, the raw fixed array for binary ones so the
// wire layout stays fixed-size.
impl Serialize for ProcName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.as_str())
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for ProcName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let name = String::deserialize(deserializer)?;
            Ok(Self::new(&name))
        } else {
            <[u8; PROC_NAME_CAPACITY]>::deserialize(deserializer).map(Self)
        }
    }
}

/// Copy of one live table entry as handed to the client
///
/// Immutable once produced; it is a value, never a view into the table.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRecord {
    pub pid: Pid,
    /// Parent identifier, `0` when the process has no parent
    pub ppid: Pid,
    /// Memory-size metric in bytes
    pub size: u64,
    /// Integer lifecycle state code, see [`ProcState`]
    pub state: i32,
    pub name: ProcName,
}

impl ProcessRecord {
    #[inline]
    #[must_use]
    pub fn new(pid: Pid, ppid: Pid, size: u64, state: ProcState, name: &str) -> Self {
        Self {
            pid,
            ppid,
            size,
            state: state.code(),
            name: ProcName::new(name),
        }
    }

    /// Decoded state, `None` when the code is not a known state
    #[inline]
    #[must_use]
    pub const fn proc_state(&self) -> Option<ProcState> {
        ProcState::from_code(self.state)
    }

    #[inline]
    #[must_use]
    pub fn state_name(&self) -> &'static str {
        state_name(self.state)
    }
}

/// Contents of one table slot, guarded by the slot's own lock
#[derive(Debug, Clone, Default)]
pub(crate) struct ProcSlot {
    pub pid: Pid,
    pub parent: Option<Pid>,
    pub size: u64,
    pub state: ProcState,
    pub name: ProcName,
}

impl ProcSlot {
    #[inline(always)]
    pub fn is_live(&self) -> bool {
        self.state.is_live()
    }

    /// Copy the slot out as a record; the parent resolves to `0` when absent
    pub fn to_record(&self) -> ProcessRecord {
        ProcessRecord {
            pid: self.pid,
            ppid: self.parent.unwrap_or(crate::core::types::NO_PARENT),
            size: self.size,
            state: self.state.code(),
            name: self.name,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
