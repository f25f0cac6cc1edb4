//! Raw storage driver abstraction
//!
//! The configuration database never touches hardware directly. Everything it
//! persists goes through a [`StorageDriver`], a flat byte-addressable medium
//! with a fixed capacity (conceptually an EEPROM). The driver knows nothing
//! about record schemas; it only moves bytes and owns the validity marker.

use core::fmt;

/// Errors reported by a storage driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// Address range falls outside the medium
    InvalidAddress,
    /// Read from the medium failed
    ReadFailed,
    /// Write to the medium failed
    WriteFailed,
    /// Pending writes could not be committed
    CommitFailed,
    /// Medium was used before `begin` (or after `clean_all` ended the session)
    NotInitialized,
}

impl StorageError {
    /// Short, static description (usable from `defmt` log statements)
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageError::InvalidAddress => "invalid storage address",
            StorageError::ReadFailed => "storage read failed",
            StorageError::WriteFailed => "storage write failed",
            StorageError::CommitFailed => "storage commit failed",
            StorageError::NotInitialized => "storage not initialized",
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Byte-addressable, capacity-bounded persistent medium
///
/// # Contract
///
/// - Addresses are in `[0, max_size())`
/// - `clean_all` leaves every byte at a neutral value (zero) and invalidates
///   the validity marker
/// - `is_valid` is the sole authority on whether the medium was ever formatted
///   by this store
/// - Callers serialise access; implementations do no locking
pub trait StorageDriver {
    /// Prepare the medium for access with a declared working size
    fn begin(&mut self, size: u32) -> Result<(), StorageError>;

    /// Overwrite every addressable byte with zero and finalise the erase
    fn clean_all(&mut self) -> Result<(), StorageError>;

    /// True iff the reserved marker bytes hold the expected stamp
    fn is_valid(&mut self) -> bool;

    /// Capacity of the addressable range in bytes
    fn max_size(&self) -> u32;

    /// Write the validity marker
    fn format(&mut self) -> Result<(), StorageError>;

    /// Read `buf.len()` bytes starting at `address`
    fn read(&mut self, address: u16, buf: &mut [u8]) -> Result<(), StorageError>;

    /// Write `data` starting at `address`
    fn write(&mut self, address: u16, data: &[u8]) -> Result<(), StorageError>;

    /// Reset `len` bytes starting at `address` to the neutral value
    fn erase(&mut self, address: u16, len: u16) -> Result<(), StorageError>;
}

/// Check that `[address, address + len)` fits in a medium of `capacity` bytes
pub fn range_fits(address: u16, len: usize, capacity: u32) -> bool {
    (address as u64 + len as u64) <= capacity as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_fits() {
        assert!(range_fits(0, 512, 512));
        assert!(range_fits(500, 12, 512));
        assert!(!range_fits(500, 13, 512));
        assert!(!range_fits(u16::MAX, 2, 512));
        assert!(range_fits(0, 0, 0));
    }

    #[test]
    fn test_storage_error_display() {
        assert_eq!(StorageError::ReadFailed.as_str(), "storage read failed");
        assert_eq!(StorageError::NotInitialized.as_str(), "storage not initialized");
    }
}
