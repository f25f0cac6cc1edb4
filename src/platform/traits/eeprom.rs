//! EEPROM interface trait
//!
//! Byte-addressable persistent memory with buffered writes. This is the
//! device the configuration database's raw storage driver sits on.

use crate::platform::Result;

/// EEPROM interface trait
///
/// Modelled on buffered EEPROM emulation: `begin` opens a session with a
/// working size, reads and writes go to a buffer, `commit` persists the
/// buffer, and `end` commits and closes the session.
///
/// # Invariants
///
/// - Every access is within `[0, size)` of the current session
/// - Accessing the device outside a session fails with
///   `EepromError::NotInitialized`
/// - Data written but not committed may be lost on power loss
pub trait EepromInterface {
    /// Open a session covering `size` bytes
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Eeprom(EepromError::InvalidSize)` if `size`
    /// exceeds [`capacity`](Self::capacity).
    fn begin(&mut self, size: u32) -> Result<()>;

    /// Read `buf.len()` bytes starting at `address`
    fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<()>;

    /// Buffer `data` starting at `address`
    fn write(&mut self, address: u32, data: &[u8]) -> Result<()>;

    /// Persist buffered writes
    fn commit(&mut self) -> Result<()>;

    /// Commit and close the session
    fn end(&mut self) -> Result<()>;

    /// Largest working size `begin` accepts
    fn capacity(&self) -> u32;
}
