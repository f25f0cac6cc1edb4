//! Platform abstraction traits
//!
//! This module defines the storage devices platform implementations must
//! provide.

pub mod eeprom;
pub mod flash;

// Re-export trait interfaces
pub use eeprom::EepromInterface;
pub use flash::FlashInterface;
