//! Firmware-update (OTA) table

use crate::database::{set_text, text, Record, RecordReader, RecordWriter, TextTooLong};

pub const OTA_HOST_BUF_SIZE: usize = 50;

pub const DEFAULT_OTA_PORT: i32 = 80;

/// Update server endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OtaConfig {
    pub ota_host: [u8; OTA_HOST_BUF_SIZE],
    pub ota_port: i32,
}

impl OtaConfig {
    pub fn new(host: &str, port: i32) -> Result<Self, TextTooLong> {
        let mut ota = Self::default();
        set_text(&mut ota.ota_host, host)?;
        ota.ota_port = port;
        Ok(ota)
    }

    pub fn host(&self) -> &str {
        text(&self.ota_host)
    }
}

impl Default for OtaConfig {
    fn default() -> Self {
        Self {
            ota_host: [0; OTA_HOST_BUF_SIZE],
            ota_port: DEFAULT_OTA_PORT,
        }
    }
}

impl Record for OtaConfig {
    const SIZE: usize = OTA_HOST_BUF_SIZE + 4;

    fn encode(&self, buf: &mut [u8]) {
        let mut w = RecordWriter::new(buf);
        w.put_bytes(&self.ota_host);
        w.put_i32(self.ota_port);
    }

    fn decode(buf: &[u8]) -> Self {
        let mut r = RecordReader::new(buf);
        Self {
            ota_host: r.get_array(),
            ota_port: r.get_i32(),
        }
    }
}
