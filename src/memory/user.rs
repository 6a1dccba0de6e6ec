/*!
 * User Memory
 * Per-client address space with explicit mappings
 *
 * Kernel-side copy-out goes through `write_bytes`, which validates that the
 * whole destination range lies inside one mapping. Anything else is an
 * addressing fault, reported to the caller rather than panicking.
 */

use super::types::{MemoryError, MemoryResult};
use crate::core::limits::{MAX_USER_MAPPING, USER_SPACE_BASE};
use crate::core::types::{Address, Size};
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::trace;

/// Simulated user address space
///
/// Mappings are never recycled: a fresh mapping always gets a new address, so
/// a stale pointer into an unmapped region keeps faulting.
#[derive(Debug)]
pub struct UserMemory {
    regions: DashMap<Address, Vec<u8>>,
    next_address: AtomicUsize,
}

impl UserMemory {
    pub fn new() -> Self {
        Self {
            regions: DashMap::new(),
            next_address: AtomicUsize::new(USER_SPACE_BASE),
        }
    }

    /// Map `len` zeroed bytes and return the base address
    pub fn map(&self, len: Size) -> MemoryResult<Address> {
        if len == 0 || len > MAX_USER_MAPPING {
            return Err(MemoryError::MappingTooLarge {
                requested: len,
                limit: MAX_USER_MAPPING,
            });
        }

        // One unmapped guard byte between regions keeps overruns faulting
        let address = self.next_address.fetch_add(len + 1, Ordering::SeqCst);
        self.regions.insert(address, vec![0u8; len]);
        trace!(address, len, "Mapped user region");
        Ok(address)
    }

    /// Remove the mapping that starts at `address`
    pub fn unmap(&self, address: Address) -> MemoryResult<()> {
        self.regions
            .remove(&address)
            .map(|_| trace!(address, "Unmapped user region"))
            .ok_or(MemoryError::InvalidAddress(address))
    }

    pub fn is_mapped(&self, address: Address) -> bool {
        self.find_region(address).is_some()
    }

    /// Copy `data` into user memory at `address`
    pub fn write_bytes(&self, address: Address, data: &[u8]) -> MemoryResult<()> {
        let (base, offset) = self.locate(address, data.len())?;
        let mut region = self
            .regions
            .get_mut(&base)
            .ok_or(MemoryError::InvalidAddress(address))?;
        region[offset..offset + data.len()].copy_from_slice(data);
        Ok(())
    }

    /// Copy `len` bytes out of user memory at `address`
    pub fn read_bytes(&self, address: Address, len: Size) -> MemoryResult<Vec<u8>> {
        let (base, offset) = self.locate(address, len)?;
        let region = self
            .regions
            .get(&base)
            .ok_or(MemoryError::InvalidAddress(address))?;
        Ok(region[offset..offset + len].to_vec())
    }

    /// Resolve `address` to (region base, offset), checking the access fits
    fn locate(&self, address: Address, len: Size) -> MemoryResult<(Address, usize)> {
        let (base, region_len) = self
            .find_region(address)
            .ok_or(MemoryError::InvalidAddress(address))?;
        let offset = address - base;
        if offset + len > region_len {
            return Err(MemoryError::OutOfBounds { address, len });
        }
        Ok((base, offset))
    }

    fn find_region(&self, address: Address) -> Option<(Address, usize)> {
        self.regions.iter().find_map(|entry| {
            let base = *entry.key();
            let len = entry.value().len();
            (address >= base && address < base + len).then_some((base, len))
        })
    }
}

impl Default for UserMemory {
    fn default() -> Self {
        Self::new()
    }
}
