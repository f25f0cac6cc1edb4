//! Mock EEPROM implementation for testing
//!
//! RAM-backed EEPROM with separate "buffered" and "persisted" images, so
//! tests can tell committed data from data that would be lost on reset.

use crate::platform::{error::EepromError, traits::EepromInterface, Result};
use std::vec;
use std::vec::Vec;

/// Default device capacity (4 KB, the size the database asks for)
pub const MOCK_EEPROM_CAPACITY: u32 = 4096;

/// Per-operation call counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EepromStats {
    pub begins: usize,
    pub reads: usize,
    pub writes: usize,
    pub bytes_written: usize,
    pub commits: usize,
    pub ends: usize,
}

/// Mock EEPROM
///
/// # Example
///
/// ```ignore
/// use confdb::platform::mock::MockEeprom;
/// use confdb::platform::traits::EepromInterface;
///
/// let mut eeprom = MockEeprom::new();
/// eeprom.begin(16).unwrap();
/// eeprom.write(0, &[1, 2]).unwrap();
/// assert_eq!(eeprom.persisted(0, 2), &[0, 0]);
/// eeprom.commit().unwrap();
/// assert_eq!(eeprom.persisted(0, 2), &[1, 2]);
/// ```
#[derive(Debug)]
pub struct MockEeprom {
    buffer: Vec<u8>,
    persisted: Vec<u8>,
    session: Option<u32>,
    stats: EepromStats,
    fail_commit: bool,
}

impl MockEeprom {
    /// Zero-filled EEPROM of [`MOCK_EEPROM_CAPACITY`] bytes
    pub fn new() -> Self {
        Self::with_capacity(MOCK_EEPROM_CAPACITY)
    }

    pub fn with_capacity(capacity: u32) -> Self {
        Self {
            buffer: vec![0; capacity as usize],
            persisted: vec![0; capacity as usize],
            session: None,
            stats: EepromStats::default(),
            fail_commit: false,
        }
    }

    /// Device with `contents` already persisted at address 0
    pub fn with_contents(capacity: u32, contents: &[u8]) -> Self {
        let mut eeprom = Self::with_capacity(capacity);
        eeprom.persisted[..contents.len()].copy_from_slice(contents);
        eeprom
    }

    pub fn stats(&self) -> EepromStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = EepromStats::default();
    }

    /// Committed bytes (what survives a reset)
    pub fn persisted(&self, address: u32, len: usize) -> &[u8] {
        &self.persisted[address as usize..address as usize + len]
    }

    /// Whether a session is open
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Overwrite persisted bytes with a corrupt pattern
    pub fn inject_corruption(&mut self, address: u32, len: usize) {
        let start = address as usize;
        for byte in &mut self.persisted[start..start + len] {
            *byte ^= 0xAA;
        }
    }

    /// Make every following commit fail
    pub fn fail_commits(&mut self, fail: bool) {
        self.fail_commit = fail;
    }

    /// Drop uncommitted data and close the session (power cycle)
    pub fn power_cycle(&mut self) {
        self.buffer.copy_from_slice(&self.persisted);
        self.session = None;
    }

    fn check_range(&self, address: u32, len: usize) -> Result<usize> {
        let size = self.session.ok_or(EepromError::NotInitialized)?;
        if address as u64 + len as u64 > size as u64 {
            return Err(EepromError::InvalidAddress.into());
        }
        Ok(address as usize)
    }
}

impl Default for MockEeprom {
    fn default() -> Self {
        Self::new()
    }
}

impl EepromInterface for MockEeprom {
    fn begin(&mut self, size: u32) -> Result<()> {
        self.stats.begins += 1;
        if size > self.capacity() {
            return Err(EepromError::InvalidSize.into());
        }
        self.buffer.copy_from_slice(&self.persisted);
        self.session = Some(size);
        Ok(())
    }

    fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<()> {
        self.stats.reads += 1;
        let start = self.check_range(address, buf.len())?;
        buf.copy_from_slice(&self.buffer[start..start + buf.len()]);
        Ok(())
    }

    fn write(&mut self, address: u32, data: &[u8]) -> Result<()> {
        self.stats.writes += 1;
        let start = self.check_range(address, data.len())?;
        self.buffer[start..start + data.len()].copy_from_slice(data);
        self.stats.bytes_written += data.len();
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        self.stats.commits += 1;
        let size = self.session.ok_or(EepromError::NotInitialized)? as usize;
        if self.fail_commit {
            return Err(EepromError::CommitFailed.into());
        }
        self.persisted[..size].copy_from_slice(&self.buffer[..size]);
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        self.stats.ends += 1;
        self.commit()?;
        self.session = None;
        Ok(())
    }

    fn capacity(&self) -> u32 {
        self.persisted.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::PlatformError;

    #[test]
    fn test_commit_persists() {
        let mut eeprom = MockEeprom::new();
        eeprom.begin(16).unwrap();
        eeprom.write(2, &[7, 8]).unwrap();
        assert_eq!(eeprom.persisted(2, 2), &[0, 0]);

        eeprom.commit().unwrap();
        assert_eq!(eeprom.persisted(2, 2), &[7, 8]);
        assert_eq!(eeprom.stats().commits, 1);
        assert_eq!(eeprom.stats().bytes_written, 2);
    }

    #[test]
    fn test_power_cycle_drops_uncommitted() {
        let mut eeprom = MockEeprom::new();
        eeprom.begin(16).unwrap();
        eeprom.write(0, &[1]).unwrap();
        eeprom.power_cycle();
        assert!(!eeprom.is_open());

        eeprom.begin(16).unwrap();
        let mut buf = [0xFFu8; 1];
        eeprom.read(0, &mut buf).unwrap();
        assert_eq!(buf, [0]);
    }

    #[test]
    fn test_session_bounds() {
        let mut eeprom = MockEeprom::with_capacity(32);
        let mut buf = [0u8; 2];
        assert_eq!(
            eeprom.read(0, &mut buf),
            Err(PlatformError::Eeprom(EepromError::NotInitialized))
        );
        assert_eq!(
            eeprom.begin(33),
            Err(PlatformError::Eeprom(EepromError::InvalidSize))
        );

        eeprom.begin(8).unwrap();
        assert_eq!(
            eeprom.read(7, &mut buf),
            Err(PlatformError::Eeprom(EepromError::InvalidAddress))
        );
    }

    #[test]
    fn test_failing_commit() {
        let mut eeprom = MockEeprom::new();
        eeprom.begin(4).unwrap();
        eeprom.write(0, &[1]).unwrap();
        eeprom.fail_commits(true);
        assert!(eeprom.commit().is_err());
        assert_eq!(eeprom.persisted(0, 1), &[0]);
    }
}
