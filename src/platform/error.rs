//! Platform error types
//!
//! This module defines error types for platform operations.

use confdb_core::traits::StorageError;
use core::fmt;

/// Result type for platform operations
pub type Result<T> = core::result::Result<T, PlatformError>;

/// Platform-level errors
///
/// All platform implementations map their HAL-specific errors to these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformError {
    /// Flash operation failed
    Flash(FlashError),
    /// EEPROM operation failed
    Eeprom(EepromError),
    /// Platform initialization failed
    InitializationFailed,
    /// Invalid configuration provided
    InvalidConfig,
}

/// Flash-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashError {
    /// Erase operation failed
    EraseFailed,
    /// Write operation failed
    WriteFailed,
    /// Read operation failed
    ReadFailed,
    /// Invalid address (out of bounds, protected, or misaligned)
    InvalidAddress,
}

/// EEPROM-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EepromError {
    /// Access outside the working size
    InvalidAddress,
    /// Requested working size exceeds the device capacity
    InvalidSize,
    /// Accessed before `begin` or after `end`
    NotInitialized,
    /// Read operation failed
    ReadFailed,
    /// Write operation failed
    WriteFailed,
    /// Pending data could not be persisted
    CommitFailed,
}

impl PlatformError {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformError::Flash(FlashError::EraseFailed) => "flash erase failed",
            PlatformError::Flash(FlashError::WriteFailed) => "flash write failed",
            PlatformError::Flash(FlashError::ReadFailed) => "flash read failed",
            PlatformError::Flash(FlashError::InvalidAddress) => "invalid flash address",
            PlatformError::Eeprom(EepromError::InvalidAddress) => "invalid eeprom address",
            PlatformError::Eeprom(EepromError::InvalidSize) => "invalid eeprom size",
            PlatformError::Eeprom(EepromError::NotInitialized) => "eeprom not initialized",
            PlatformError::Eeprom(EepromError::ReadFailed) => "eeprom read failed",
            PlatformError::Eeprom(EepromError::WriteFailed) => "eeprom write failed",
            PlatformError::Eeprom(EepromError::CommitFailed) => "eeprom commit failed",
            PlatformError::InitializationFailed => "platform initialization failed",
            PlatformError::InvalidConfig => "invalid configuration",
        }
    }
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// From implementations for error conversion
impl From<FlashError> for PlatformError {
    fn from(error: FlashError) -> Self {
        PlatformError::Flash(error)
    }
}

impl From<EepromError> for PlatformError {
    fn from(error: EepromError) -> Self {
        PlatformError::Eeprom(error)
    }
}

impl From<PlatformError> for StorageError {
    fn from(error: PlatformError) -> Self {
        match error {
            PlatformError::Eeprom(EepromError::InvalidAddress)
            | PlatformError::Eeprom(EepromError::InvalidSize)
            | PlatformError::Flash(FlashError::InvalidAddress) => StorageError::InvalidAddress,
            PlatformError::Eeprom(EepromError::NotInitialized)
            | PlatformError::InitializationFailed => StorageError::NotInitialized,
            PlatformError::Eeprom(EepromError::ReadFailed)
            | PlatformError::Flash(FlashError::ReadFailed) => StorageError::ReadFailed,
            PlatformError::Eeprom(EepromError::CommitFailed)
            | PlatformError::Flash(FlashError::EraseFailed) => StorageError::CommitFailed,
            PlatformError::Eeprom(EepromError::WriteFailed)
            | PlatformError::Flash(FlashError::WriteFailed)
            | PlatformError::InvalidConfig => StorageError::WriteFailed,
        }
    }
}
