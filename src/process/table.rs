/*!
 * Live Process Table
 * Fixed-size arena of individually locked slots
 *
 * Locking discipline:
 * - Mutators hold at most one slot lock at any instant
 * - The scanner may hold two during a comparison, always acquired in
 *   ascending slot order, so scanners and mutators cannot deadlock
 * - There is no table-wide lock; the identifier counter is atomic
 *
 * Parent links stay rooted: an exiting process hands its children to init,
 * and a spawn that races with its parent's exit re-runs that hand-off after
 * claiming its slot. A process only ends up without a parent when init itself
 * is absent.
 */

use super::types::{ProcName, ProcSlot, ProcState, ProcessError, ProcessRecord, ProcessResult};
use crate::core::limits::{FIRST_PID, INIT_PID, NPROC};
use crate::core::types::Pid;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::{debug, warn};

/// The authoritative, mutable collection of process entries
pub struct ProcessTable {
    slots: Box<[Mutex<ProcSlot>]>,
    next_pid: AtomicU32,
}

impl ProcessTable {
    /// Create a table with `NPROC` unused slots
    pub fn new() -> Self {
        Self::with_slots(NPROC)
    }

    /// Create a table with a custom slot count (tests and benchmarks)
    pub fn with_slots(count: usize) -> Self {
        let slots = (0..count)
            .map(|_| Mutex::new(ProcSlot::default()))
            .collect::<Vec<_>>()
            .into_boxed_slice();

        debug!(slots = count, "Process table initialized");

        Self {
            slots,
            next_pid: AtomicU32::new(FIRST_PID),
        }
    }

    /// Number of slots (live or not)
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn slots(&self) -> &[Mutex<ProcSlot>] {
        &self.slots
    }

    /// Create a process in the first free slot
    ///
    /// Identifiers come from a monotonically increasing counter and are never
    /// reused, so a fresh process is always numbered above every earlier one.
    /// The parent must be live and not a zombie at the time of the call.
    pub fn spawn(&self, parent: Option<Pid>, name: &str, size: u64) -> ProcessResult<Pid> {
        if let Some(ppid) = parent {
            self.check_parent(ppid)?;
        }

        let pid = self.claim_slot(parent, name, size)?;

        if let Some(ppid) = parent {
            self.settle_parent(pid, ppid);
        }

        Ok(pid)
    }

    /// Repeat the exit hand-off if `ppid` exited between the parent check and
    /// the slot claim; its own walk may already have passed `pid`'s slot
    fn settle_parent(&self, pid: Pid, ppid: Pid) {
        if self.check_parent(ppid).is_err() {
            let adopted = self.reparent_children(ppid);
            debug!(pid, parent = ppid, adopted, "Parent exited during spawn");
        }
    }

    fn claim_slot(&self, parent: Option<Pid>, name: &str, size: u64) -> ProcessResult<Pid> {
        for slot in self.slots.iter() {
            let mut entry = slot.lock();
            if entry.is_live() {
                continue;
            }

            let pid = self.next_pid.fetch_add(1, Ordering::SeqCst);
            *entry = ProcSlot {
                pid,
                parent,
                size,
                state: ProcState::Runnable,
                name: ProcName::new(name),
            };

            debug!(pid, parent = ?parent, name, "Process created");
            return Ok(pid);
        }

        warn!(slots = self.capacity(), name, "Process table full");
        Err(ProcessError::TableFull(self.capacity()))
    }

    /// `ppid` is live and can still take children
    fn check_parent(&self, ppid: Pid) -> ProcessResult<()> {
        self.with_live_slot(ppid, |entry| match entry.state {
            ProcState::Zombie => Err(ProcessError::ParentExited(ppid)),
            _ => Ok(()),
        })
    }

    /// Move a live process between sleeping, runnable and running
    ///
    /// Returns the previous state. Zombies cannot be revived and slots are only
    /// freed through [`reap`](Self::reap).
    pub fn set_state(&self, pid: Pid, state: ProcState) -> ProcessResult<ProcState> {
        self.with_live_slot(pid, |entry| {
            let from = entry.state;
            if matches!(state, ProcState::Unused | ProcState::Zombie)
                || from == ProcState::Zombie
            {
                return Err(ProcessError::InvalidState { pid, from, to: state });
            }
            entry.state = state;
            debug!(pid, %from, to = %state, "Process state changed");
            Ok(from)
        })
    }

    /// Update the memory-size metric, returning the old value
    pub fn resize(&self, pid: Pid, size: u64) -> ProcessResult<u64> {
        self.with_live_slot(pid, |entry| Ok(std::mem::replace(&mut entry.size, size)))
    }

    /// Terminate a process, leaving it as a zombie until reaped
    ///
    /// Live children are handed to init, or left without a parent when init
    /// is gone. Init itself cannot exit.
    pub fn exit(&self, pid: Pid) -> ProcessResult<()> {
        self.with_live_slot(pid, |entry| {
            if pid == INIT_PID || entry.state == ProcState::Zombie {
                return Err(ProcessError::InvalidState {
                    pid,
                    from: entry.state,
                    to: ProcState::Zombie,
                });
            }
            entry.state = ProcState::Zombie;
            Ok(())
        })?;

        let adopted = self.reparent_children(pid);
        debug!(pid, adopted, "Process exited");
        Ok(())
    }

    /// Hand every live child of `pid` to init, one slot lock at a time
    fn reparent_children(&self, pid: Pid) -> usize {
        let new_parent = self.lookup(INIT_PID).map(|_| INIT_PID);
        let mut adopted = 0usize;
        for slot in self.slots.iter() {
            let mut entry = slot.lock();
            if entry.is_live() && entry.parent == Some(pid) {
                entry.parent = new_parent;
                adopted += 1;
            }
        }
        adopted
    }

    /// Release a zombie's slot
    pub fn reap(&self, pid: Pid) -> ProcessResult<ProcessRecord> {
        self.with_live_slot(pid, |entry| {
            if entry.state != ProcState::Zombie {
                return Err(ProcessError::InvalidState {
                    pid,
                    from: entry.state,
                    to: ProcState::Unused,
                });
            }
            let record = entry.to_record();
            entry.clear();
            debug!(pid, "Process reaped");
            Ok(record)
        })
    }

    /// Copy of one live process
    pub fn lookup(&self, pid: Pid) -> Option<ProcessRecord> {
        self.with_live_slot(pid, |entry| Ok(entry.to_record())).ok()
    }

    /// Number of live (non-unused) slots at the moment each slot was visited
    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.lock().is_live()).count()
    }

    /// Run `f` against the live slot holding `pid`, one lock at a time
    fn with_live_slot<R>(
        &self,
        pid: Pid,
        f: impl FnOnce(&mut ProcSlot) -> ProcessResult<R>,
    ) -> ProcessResult<R> {
        for slot in self.slots.iter() {
            let mut entry = slot.lock();
            if entry.is_live() && entry.pid == pid {
                return f(&mut *entry);
            }
        }
        Err(ProcessError::NotFound(pid))
    }
}

impl Default for ProcessTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ProcessTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessTable")
            .field("capacity", &self.capacity())
            .field("next_pid", &self.next_pid.load(Ordering::Relaxed))
            .finish()
    }
}
