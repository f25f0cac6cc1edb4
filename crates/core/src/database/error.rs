//! Database error types

use crate::traits::StorageError;
use core::fmt;

/// Errors from table registration and table I/O
///
/// `NotRegistered` is the only runtime category callers are expected to
/// handle routinely (typically by falling back to compiled-in defaults). The
/// registration errors flag table-layout defects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseError {
    /// Address has no registered table, or the accessor was never registered
    NotRegistered,
    /// Table range `[address, address + size)` exceeds the medium capacity
    OutOfBounds,
    /// Table range overlaps the validity marker bytes
    ReservedRegion,
    /// Record is larger than `MAX_RECORD_SIZE`
    RecordTooLarge,
    /// Registered size differs from the accessor's record size
    SizeMismatch,
    /// No room left in the registry
    RegistryFull,
    /// Underlying storage driver failed
    Storage(StorageError),
}

impl DatabaseError {
    /// Short, static description (usable from `defmt` log statements)
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseError::NotRegistered => "table not registered",
            DatabaseError::OutOfBounds => "table exceeds storage capacity",
            DatabaseError::ReservedRegion => "table overlaps validity marker",
            DatabaseError::RecordTooLarge => "record too large",
            DatabaseError::SizeMismatch => "record size does not match registered size",
            DatabaseError::RegistryFull => "table registry full",
            DatabaseError::Storage(e) => e.as_str(),
        }
    }
}

impl fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<StorageError> for DatabaseError {
    fn from(error: StorageError) -> Self {
        DatabaseError::Storage(error)
    }
}
