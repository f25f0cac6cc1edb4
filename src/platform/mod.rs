//! Platform abstraction layer
//!
//! Storage devices the configuration database can persist to, and the
//! runtime services it needs. Hardware-specific code stays in this module.

pub mod error;
pub mod flash_eeprom;
pub mod traits;

#[cfg(feature = "embassy")]
pub mod time;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{EepromError, FlashError, PlatformError, Result};
pub use flash_eeprom::FlashEeprom;
pub use traits::{EepromInterface, FlashInterface};

#[cfg(feature = "embassy")]
pub use time::EmbassyTime;
