//! EEPROM emulation on one flash block
//!
//! The whole working area lives in a RAM mirror. `begin` loads the mirror from
//! flash, `commit` erases the block and programs a fresh image:
//!
//! ```text
//! [Magic "CDBE"]  4 bytes
//! [Length]        4 bytes (little-endian, working size)
//! [Data]          Length bytes
//! [CRC32]         4 bytes over magic, length and data
//! ```
//!
//! An image with a bad magic, length or checksum (never written, or torn by
//! power loss during commit) loads as all zeros.

use crate::platform::{
    error::{EepromError, FlashError},
    traits::{EepromInterface, FlashInterface},
    Result,
};
use crc::{Crc, CRC_32_ISO_HDLC};

/// CRC32 algorithm (ISO HDLC / Ethernet / ZIP)
const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// Image magic ("CDBE")
pub const IMAGE_MAGIC: [u8; 4] = *b"CDBE";

/// Magic plus length
const HEADER_SIZE: usize = 8;

/// Trailing checksum
const TRAILER_SIZE: usize = 4;

/// Flash block holding the image
pub const IMAGE_BLOCK_SIZE: usize = 4096;

/// Largest working size an image can carry
pub const EEPROM_CAPACITY: usize = IMAGE_BLOCK_SIZE - HEADER_SIZE - TRAILER_SIZE;

/// First block after the protected firmware region
pub const DEFAULT_IMAGE_ADDRESS: u32 = 0x040000;

/// Flash-backed EEPROM
///
/// # Example
///
/// ```ignore
/// use confdb::platform::mock::MockFlash;
/// use confdb::platform::traits::EepromInterface;
/// use confdb::platform::FlashEeprom;
///
/// let mut eeprom = FlashEeprom::new(MockFlash::new());
/// eeprom.begin(64).unwrap();
/// eeprom.write(10, b"abc").unwrap();
/// eeprom.commit().unwrap();
///
/// let mut reopened = FlashEeprom::new(eeprom.release());
/// reopened.begin(64).unwrap();
/// let mut buf = [0u8; 3];
/// reopened.read(10, &mut buf).unwrap();
/// assert_eq!(&buf, b"abc");
/// ```
pub struct FlashEeprom<F: FlashInterface> {
    flash: F,
    image_address: u32,
    mirror: [u8; EEPROM_CAPACITY],
    size: Option<u32>,
    dirty: bool,
}

impl<F: FlashInterface> FlashEeprom<F> {
    /// EEPROM at [`DEFAULT_IMAGE_ADDRESS`]
    pub fn new(flash: F) -> Self {
        Self::with_address(flash, DEFAULT_IMAGE_ADDRESS)
    }

    /// EEPROM at a block-aligned `image_address`
    pub fn with_address(flash: F, image_address: u32) -> Self {
        Self {
            flash,
            image_address,
            mirror: [0; EEPROM_CAPACITY],
            size: None,
            dirty: false,
        }
    }

    /// Give back the flash device
    pub fn release(self) -> F {
        self.flash
    }

    pub fn flash(&self) -> &F {
        &self.flash
    }

    pub fn flash_mut(&mut self) -> &mut F {
        &mut self.flash
    }

    /// Fill the mirror from the stored image
    ///
    /// Returns whether a valid image was found.
    fn load(&mut self, size: usize) -> Result<bool> {
        self.mirror.fill(0);

        let mut header = [0u8; HEADER_SIZE];
        self.flash.read(self.image_address, &mut header)?;
        if header[..4] != IMAGE_MAGIC {
            return Ok(false);
        }
        let stored_len = u32::from_le_bytes([header[4], header[5], header[6], header[7]]) as usize;
        if stored_len > EEPROM_CAPACITY {
            crate::log_warn!("eeprom image length {} out of range", stored_len);
            return Ok(false);
        }

        let data_address = self.image_address + HEADER_SIZE as u32;
        self.flash.read(data_address, &mut self.mirror[..stored_len])?;

        let mut trailer = [0u8; TRAILER_SIZE];
        self.flash
            .read(data_address + stored_len as u32, &mut trailer)?;
        let expected = u32::from_le_bytes(trailer);

        let mut digest = CRC32.digest();
        digest.update(&header);
        digest.update(&self.mirror[..stored_len]);
        if digest.finalize() != expected {
            crate::log_warn!("eeprom image checksum mismatch, starting blank");
            self.mirror.fill(0);
            return Ok(false);
        }

        // Shrinking the working size drops the tail
        if size < stored_len {
            self.mirror[size..].fill(0);
        }
        Ok(true)
    }

    fn check_range(&self, address: u32, len: usize) -> Result<usize> {
        let size = self.size.ok_or(EepromError::NotInitialized)?;
        if address as u64 + len as u64 > size as u64 {
            return Err(EepromError::InvalidAddress.into());
        }
        Ok(address as usize)
    }

    fn program_image(&mut self, size: usize) -> Result<()> {
        let block = self.flash.block_size();
        if block == 0 || !(IMAGE_BLOCK_SIZE as u32).is_multiple_of(block) {
            return Err(FlashError::InvalidAddress.into());
        }
        self.flash.erase(self.image_address, IMAGE_BLOCK_SIZE as u32)?;

        let mut header = [0u8; HEADER_SIZE];
        header[..4].copy_from_slice(&IMAGE_MAGIC);
        header[4..].copy_from_slice(&(size as u32).to_le_bytes());

        let mut digest = CRC32.digest();
        digest.update(&header);
        digest.update(&self.mirror[..size]);
        let crc = digest.finalize();

        let data_address = self.image_address + HEADER_SIZE as u32;
        self.flash.write(self.image_address, &header)?;
        self.flash.write(data_address, &self.mirror[..size])?;
        self.flash
            .write(data_address + size as u32, &crc.to_le_bytes())?;
        Ok(())
    }
}

impl<F: FlashInterface> EepromInterface for FlashEeprom<F> {
    fn begin(&mut self, size: u32) -> Result<()> {
        if size as usize > EEPROM_CAPACITY {
            return Err(EepromError::InvalidSize.into());
        }
        let found = self.load(size as usize)?;
        if !found {
            crate::log_debug!("no eeprom image at {}, mirror zeroed", self.image_address);
        }
        self.size = Some(size);
        self.dirty = false;
        Ok(())
    }

    fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<()> {
        let start = self.check_range(address, buf.len())?;
        buf.copy_from_slice(&self.mirror[start..start + buf.len()]);
        Ok(())
    }

    fn write(&mut self, address: u32, data: &[u8]) -> Result<()> {
        let start = self.check_range(address, data.len())?;
        self.mirror[start..start + data.len()].copy_from_slice(data);
        self.dirty = true;
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        let size = self.size.ok_or(EepromError::NotInitialized)?;
        if !self.dirty {
            return Ok(());
        }
        self.program_image(size as usize).map_err(|e| {
            crate::log_error!("eeprom commit failed: {}", e.as_str());
            e
        })?;
        self.dirty = false;
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        self.commit()?;
        self.size = None;
        Ok(())
    }

    fn capacity(&self) -> u32 {
        EEPROM_CAPACITY as u32
    }
}
