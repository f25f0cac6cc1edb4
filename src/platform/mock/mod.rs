//! Mock storage devices for testing
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled

#![cfg(any(test, feature = "mock"))]

mod eeprom;
mod flash;

pub use eeprom::{EepromStats, MockEeprom, MOCK_EEPROM_CAPACITY};
pub use flash::MockFlash;
