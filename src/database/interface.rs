//! EEPROM-backed raw storage driver
//!
//! Wraps an [`EepromInterface`] device as the database's [`StorageDriver`].
//! Writes compare against the current contents first and only touch (and
//! commit) chunks that actually changed, so rewriting an unchanged table costs
//! no commit.

use crate::platform::{EepromInterface, PlatformError};
use confdb_core::database::{marker_matches, CONFIG_VERSION, MARKER_ADDRESS, MARKER_LEN};
use confdb_core::traits::{range_fits, StorageDriver, StorageError};

/// Compare/write granularity
const CHUNK_SIZE: usize = 32;

const ZEROS: [u8; CHUNK_SIZE] = [0; CHUNK_SIZE];

fn device_error(operation: &str, error: PlatformError) -> StorageError {
    crate::log_error!("eeprom {} failed: {}", operation, error.as_str());
    error.into()
}

/// Raw storage driver on an EEPROM device
pub struct EepromStorage<E: EepromInterface> {
    eeprom: E,
    size: Option<u32>,
    /// Buffered bytes not yet committed to the device
    pending_commit: bool,
}

impl<E: EepromInterface> EepromStorage<E> {
    pub fn new(eeprom: E) -> Self {
        Self {
            eeprom,
            size: None,
            pending_commit: false,
        }
    }

    pub fn eeprom(&self) -> &E {
        &self.eeprom
    }

    pub fn eeprom_mut(&mut self) -> &mut E {
        &mut self.eeprom
    }

    /// Give back the device
    pub fn release(self) -> E {
        self.eeprom
    }

    /// Working size of the open session
    pub fn working_size(&self) -> Option<u32> {
        self.size
    }

    fn check(&self, address: u16, len: usize) -> Result<(), StorageError> {
        let size = self.size.ok_or(StorageError::NotInitialized)?;
        if !range_fits(address, len, size) {
            return Err(StorageError::InvalidAddress);
        }
        Ok(())
    }

    /// Write `data` at `address` one chunk at a time, skipping equal chunks
    ///
    /// Returns whether anything was written.
    fn update(&mut self, address: u16, data: &[u8]) -> Result<bool, StorageError> {
        let mut changed = false;
        let mut current = [0u8; CHUNK_SIZE];
        let mut at = address as u32;
        for chunk in data.chunks(CHUNK_SIZE) {
            let current = &mut current[..chunk.len()];
            self.eeprom
                .read(at, current)
                .map_err(|e| device_error("read", e))?;
            if current != chunk {
                self.eeprom
                    .write(at, chunk)
                    .map_err(|e| device_error("write", e))?;
                self.pending_commit = true;
                changed = true;
            }
            at += chunk.len() as u32;
        }
        Ok(changed)
    }

    /// Commit when this call changed the buffer or an earlier commit failed
    fn commit_if_changed(&mut self, changed: bool, address: u16) -> Result<(), StorageError> {
        if changed || self.pending_commit {
            self.eeprom
                .commit()
                .map_err(|e| device_error("commit", e))?;
            self.pending_commit = false;
        } else {
            crate::log_trace!("commit skipped, no change at {}", address);
        }
        Ok(())
    }
}

impl<E: EepromInterface> StorageDriver for EepromStorage<E> {
    fn begin(&mut self, size: u32) -> Result<(), StorageError> {
        let size = size.min(self.eeprom.capacity());
        self.eeprom
            .begin(size)
            .map_err(|e| device_error("begin", e))?;
        self.size = Some(size);
        Ok(())
    }

    fn clean_all(&mut self) -> Result<(), StorageError> {
        let size = self.size.ok_or(StorageError::NotInitialized)?;
        let mut at = 0u32;
        while at < size {
            let len = (size - at).min(CHUNK_SIZE as u32) as usize;
            self.eeprom
                .write(at, &ZEROS[..len])
                .map_err(|e| device_error("write", e))?;
            at += len as u32;
        }
        // Ending the session commits the zeros
        self.eeprom.end().map_err(|e| device_error("end", e))?;
        self.size = None;
        self.pending_commit = false;
        crate::log_info!("eeprom wiped ({} bytes)", size);
        Ok(())
    }

    fn is_valid(&mut self) -> bool {
        let mut marker = [0u8; MARKER_LEN];
        self.read(MARKER_ADDRESS, &mut marker).is_ok() && marker_matches(&marker)
    }

    fn max_size(&self) -> u32 {
        self.eeprom.capacity()
    }

    fn format(&mut self) -> Result<(), StorageError> {
        self.write(MARKER_ADDRESS, &CONFIG_VERSION)
    }

    fn read(&mut self, address: u16, buf: &mut [u8]) -> Result<(), StorageError> {
        self.check(address, buf.len())?;
        self.eeprom
            .read(address as u32, buf)
            .map_err(|e| device_error("read", e))
    }

    fn write(&mut self, address: u16, data: &[u8]) -> Result<(), StorageError> {
        self.check(address, data.len())?;
        let changed = self.update(address, data)?;
        self.commit_if_changed(changed, address)
    }

    fn erase(&mut self, address: u16, len: u16) -> Result<(), StorageError> {
        self.check(address, len as usize)?;
        let mut changed = false;
        let end = address as u32 + len as u32;
        let mut at = address as u32;
        while at < end {
            let n = (end - at).min(CHUNK_SIZE as u32);
            let chunk_address = u16::try_from(at).map_err(|_| StorageError::InvalidAddress)?;
            changed |= self.update(chunk_address, &ZEROS[..n as usize])?;
            at += n;
        }
        self.commit_if_changed(changed, address)
    }
}
