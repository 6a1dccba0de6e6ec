/*!
 * Lock-Free Scan Statistics
 * Atomic counters for enumeration requests
 */

use super::types::StepOutcome;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic request counters
///
/// # Performance
/// - Cache-line aligned to prevent false sharing
/// - Relaxed ordering; readers only need eventually consistent totals
#[repr(C, align(64))]
#[derive(Debug, Default)]
pub struct AtomicScanStats {
    calls: AtomicU64,
    found: AtomicU64,
    done: AtomicU64,
    faults: AtomicU64,
}

impl AtomicScanStats {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one completed request
    #[inline(always)]
    pub fn record(&self, outcome: StepOutcome) {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let counter = match outcome {
            StepOutcome::Found => &self.found,
            StepOutcome::Done => &self.done,
            StepOutcome::Fault => &self.faults,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Read-only copy of the counters
    pub fn snapshot(&self) -> ScanStats {
        ScanStats {
            calls: self.calls.load(Ordering::Relaxed),
            found: self.found.load(Ordering::Relaxed),
            done: self.done.load(Ordering::Relaxed),
            faults: self.faults.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time request counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    pub calls: u64,
    pub found: u64,
    pub done: u64,
    pub faults: u64,
}
