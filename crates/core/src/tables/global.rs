//! Global configuration table

use crate::database::{text, Record, RecordReader, RecordWriter, CONFIG_VERSION};

/// Year of first release, offset from 2000
pub const LAUNCH_YEAR: u8 = 19;

/// Firmware version stamped into a fresh global table
pub const FIRMWARE_VERSION: u32 = 2019041100;

/// Store-wide settings: format version, clock year, firmware version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalConfig {
    pub config_version: [u8; 4],
    pub current_year: u8,
    pub firmware_version: u32,
}

impl GlobalConfig {
    pub fn config_version(&self) -> &str {
        text(&self.config_version)
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            config_version: CONFIG_VERSION,
            current_year: LAUNCH_YEAR,
            firmware_version: FIRMWARE_VERSION,
        }
    }
}

impl Record for GlobalConfig {
    const SIZE: usize = 4 + 1 + 4;

    fn encode(&self, buf: &mut [u8]) {
        let mut w = RecordWriter::new(buf);
        w.put_bytes(&self.config_version);
        w.put_u8(self.current_year);
        w.put_u32(self.firmware_version);
    }

    fn decode(buf: &[u8]) -> Self {
        let mut r = RecordReader::new(buf);
        Self {
            config_version: r.get_array(),
            current_year: r.get_u8(),
            firmware_version: r.get_u32(),
        }
    }
}
