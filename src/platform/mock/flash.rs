//! Mock Flash implementation for testing
//!
//! RAM-backed NOR flash with the write/erase rules of the real part.

use crate::platform::{error::FlashError, traits::FlashInterface, Result};
use std::vec;
use std::vec::Vec;

/// Flash block size (4 KB)
const BLOCK_SIZE: u32 = 4096;

/// Flash capacity (512 KB, enough for firmware plus a few data blocks)
const FLASH_CAPACITY: u32 = 512 * 1024;

/// Protected firmware region
const FIRMWARE_SIZE: u32 = 0x40000;

/// Mock Flash implementation
///
/// Supports:
/// - 1→0 programming and 0xFF erase
/// - Per-block erase counters
/// - Corruption injection
/// - Power-loss simulation (next write only half completes)
#[derive(Debug)]
pub struct MockFlash {
    storage: Vec<u8>,
    erase_counts: Vec<u32>,
    power_loss: bool,
    writes: usize,
}

impl MockFlash {
    /// Fully erased flash
    pub fn new() -> Self {
        Self {
            storage: vec![0xFF; FLASH_CAPACITY as usize],
            erase_counts: vec![0; (FLASH_CAPACITY / BLOCK_SIZE) as usize],
            power_loss: false,
            writes: 0,
        }
    }

    /// Raw contents (for test verification)
    pub fn get_contents(&self, address: u32, len: usize) -> &[u8] {
        &self.storage[address as usize..address as usize + len]
    }

    /// Overwrite `len` bytes at `address` with a corrupt pattern
    pub fn inject_corruption(&mut self, address: u32, len: usize) {
        let start = address as usize;
        for byte in &mut self.storage[start..start + len] {
            *byte ^= 0xAA;
        }
    }

    /// Number of times the block containing `address` was erased
    pub fn get_erase_count(&self, address: u32) -> u32 {
        self.erase_counts[(address / BLOCK_SIZE) as usize]
    }

    pub fn get_total_erase_count(&self) -> u32 {
        self.erase_counts.iter().sum()
    }

    /// Number of successful program operations
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Make the next write program only the first half of its data
    pub fn simulate_power_loss(&mut self) {
        self.power_loss = true;
    }

    fn is_writable(&self, address: u32, len: u32) -> bool {
        address >= FIRMWARE_SIZE && address as u64 + len as u64 <= FLASH_CAPACITY as u64
    }
}

impl Default for MockFlash {
    fn default() -> Self {
        Self::new()
    }
}

impl FlashInterface for MockFlash {
    fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<()> {
        if address as u64 + buf.len() as u64 > FLASH_CAPACITY as u64 {
            return Err(FlashError::InvalidAddress.into());
        }
        let start = address as usize;
        buf.copy_from_slice(&self.storage[start..start + buf.len()]);
        Ok(())
    }

    fn write(&mut self, address: u32, data: &[u8]) -> Result<()> {
        if !self.is_writable(address, data.len() as u32) {
            return Err(FlashError::InvalidAddress.into());
        }

        let write_len = if self.power_loss {
            self.power_loss = false;
            data.len() / 2
        } else {
            data.len()
        };

        // Programming can only clear bits
        let start = address as usize;
        for (cell, &byte) in self.storage[start..start + write_len].iter_mut().zip(data) {
            *cell &= byte;
        }
        self.writes += 1;
        Ok(())
    }

    fn erase(&mut self, address: u32, size: u32) -> Result<()> {
        if !self.is_writable(address, size)
            || !address.is_multiple_of(BLOCK_SIZE)
            || !size.is_multiple_of(BLOCK_SIZE)
        {
            return Err(FlashError::InvalidAddress.into());
        }

        let start = address as usize;
        self.storage[start..start + size as usize].fill(0xFF);

        let first_block = (address / BLOCK_SIZE) as usize;
        for count in &mut self.erase_counts[first_block..first_block + (size / BLOCK_SIZE) as usize] {
            *count += 1;
        }
        Ok(())
    }

    fn block_size(&self) -> u32 {
        BLOCK_SIZE
    }

    fn capacity(&self) -> u32 {
        FLASH_CAPACITY
    }
}
