//! Device identity / IoT endpoint table

use crate::database::{set_text, text, Record, RecordReader, RecordWriter, TextTooLong};

pub const DEVICE_IOT_HOST_BUF_SIZE: usize = 50;

pub const DEFAULT_DEVICE_IOT_PORT: i32 = 80;
/// Seconds between sensor data posts
pub const DEFAULT_SENSOR_DATA_POST_FREQUENCY: i32 = 60;

/// Cloud endpoint this device reports to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceIotConfig {
    pub device_iot_host: [u8; DEVICE_IOT_HOST_BUF_SIZE],
    pub device_iot_port: i32,
    pub sensor_data_post_frequency: i32,
}

impl DeviceIotConfig {
    pub fn new(host: &str, port: i32) -> Result<Self, TextTooLong> {
        let mut iot = Self::default();
        set_text(&mut iot.device_iot_host, host)?;
        iot.device_iot_port = port;
        Ok(iot)
    }

    pub fn host(&self) -> &str {
        text(&self.device_iot_host)
    }
}

impl Default for DeviceIotConfig {
    fn default() -> Self {
        Self {
            device_iot_host: [0; DEVICE_IOT_HOST_BUF_SIZE],
            device_iot_port: DEFAULT_DEVICE_IOT_PORT,
            sensor_data_post_frequency: DEFAULT_SENSOR_DATA_POST_FREQUENCY,
        }
    }
}

impl Record for DeviceIotConfig {
    const SIZE: usize = DEVICE_IOT_HOST_BUF_SIZE + 4 + 4;

    fn encode(&self, buf: &mut [u8]) {
        let mut w = RecordWriter::new(buf);
        w.put_bytes(&self.device_iot_host);
        w.put_i32(self.device_iot_port);
        w.put_i32(self.sensor_data_post_frequency);
    }

    fn decode(buf: &[u8]) -> Self {
        let mut r = RecordReader::new(buf);
        Self {
            device_iot_host: r.get_array(),
            device_iot_port: r.get_i32(),
            sensor_data_post_frequency: r.get_i32(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let iot = DeviceIotConfig::new("iot.example.com", 443).unwrap();
        assert_eq!(iot.host(), "iot.example.com");
        assert_eq!(iot.device_iot_port, 443);
        assert_eq!(iot.sensor_data_post_frequency, 60);
    }
}
