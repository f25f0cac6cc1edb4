//! WiFi station / access-point table

use crate::database::{set_text, text, Record, RecordReader, RecordWriter, TextTooLong};

/// SSID and passphrase field size
pub const WIFI_CONFIGS_BUF_SIZE: usize = 30;

pub const DEFAULT_AP_LOCAL_IP: [u8; 4] = [192, 168, 0, 1];
pub const DEFAULT_AP_GATEWAY: [u8; 4] = [192, 168, 0, 1];
pub const DEFAULT_AP_SUBNET: [u8; 4] = [255, 255, 255, 0];

/// Station credentials, access-point credentials and static addressing
///
/// An all-zero station address means "use DHCP".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WifiConfig {
    pub sta_ssid: [u8; WIFI_CONFIGS_BUF_SIZE],
    pub sta_password: [u8; WIFI_CONFIGS_BUF_SIZE],
    pub ap_ssid: [u8; WIFI_CONFIGS_BUF_SIZE],
    pub ap_password: [u8; WIFI_CONFIGS_BUF_SIZE],
    pub sta_local_ip: [u8; 4],
    pub sta_gateway: [u8; 4],
    pub sta_subnet: [u8; 4],
    pub ap_local_ip: [u8; 4],
    pub ap_gateway: [u8; 4],
    pub ap_subnet: [u8; 4],
}

impl WifiConfig {
    /// Defaults with the given station and access-point credentials
    pub fn with_credentials(
        sta_ssid: &str,
        sta_password: &str,
        ap_ssid: &str,
        ap_password: &str,
    ) -> Result<Self, TextTooLong> {
        let mut wifi = Self::default();
        set_text(&mut wifi.sta_ssid, sta_ssid)?;
        set_text(&mut wifi.sta_password, sta_password)?;
        set_text(&mut wifi.ap_ssid, ap_ssid)?;
        set_text(&mut wifi.ap_password, ap_password)?;
        Ok(wifi)
    }

    pub fn sta_ssid(&self) -> &str {
        text(&self.sta_ssid)
    }

    pub fn sta_password(&self) -> &str {
        text(&self.sta_password)
    }

    pub fn ap_ssid(&self) -> &str {
        text(&self.ap_ssid)
    }

    pub fn ap_password(&self) -> &str {
        text(&self.ap_password)
    }

    /// Station uses DHCP unless a static address is configured
    pub fn sta_uses_dhcp(&self) -> bool {
        self.sta_local_ip == [0, 0, 0, 0]
    }
}

impl Default for WifiConfig {
    fn default() -> Self {
        Self {
            sta_ssid: [0; WIFI_CONFIGS_BUF_SIZE],
            sta_password: [0; WIFI_CONFIGS_BUF_SIZE],
            ap_ssid: [0; WIFI_CONFIGS_BUF_SIZE],
            ap_password: [0; WIFI_CONFIGS_BUF_SIZE],
            sta_local_ip: [0; 4],
            sta_gateway: [0; 4],
            sta_subnet: [0; 4],
            ap_local_ip: DEFAULT_AP_LOCAL_IP,
            ap_gateway: DEFAULT_AP_GATEWAY,
            ap_subnet: DEFAULT_AP_SUBNET,
        }
    }
}

impl Record for WifiConfig {
    const SIZE: usize = 4 * WIFI_CONFIGS_BUF_SIZE + 6 * 4;

    fn encode(&self, buf: &mut [u8]) {
        let mut w = RecordWriter::new(buf);
        w.put_bytes(&self.sta_ssid);
        w.put_bytes(&self.sta_password);
        w.put_bytes(&self.ap_ssid);
        w.put_bytes(&self.ap_password);
        w.put_bytes(&self.sta_local_ip);
        w.put_bytes(&self.sta_gateway);
        w.put_bytes(&self.sta_subnet);
        w.put_bytes(&self.ap_local_ip);
        w.put_bytes(&self.ap_gateway);
        w.put_bytes(&self.ap_subnet);
    }

    fn decode(buf: &[u8]) -> Self {
        let mut r = RecordReader::new(buf);
        Self {
            sta_ssid: r.get_array(),
            sta_password: r.get_array(),
            ap_ssid: r.get_array(),
            ap_password: r.get_array(),
            sta_local_ip: r.get_array(),
            sta_gateway: r.get_array(),
            sta_subnet: r.get_array(),
            ap_local_ip: r.get_array(),
            ap_gateway: r.get_array(),
            ap_subnet: r.get_array(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let wifi = WifiConfig::default();
        assert_eq!(wifi.ap_local_ip, [192, 168, 0, 1]);
        assert_eq!(wifi.ap_subnet, [255, 255, 255, 0]);
        assert!(wifi.sta_uses_dhcp());
        assert_eq!(wifi.sta_ssid(), "");
    }

    #[test]
    fn test_with_credentials() {
        let wifi = WifiConfig::with_credentials("home", "hunter22", "device", "device-pass").unwrap();
        assert_eq!(wifi.sta_ssid(), "home");
        assert_eq!(wifi.sta_password(), "hunter22");
        assert_eq!(wifi.ap_ssid(), "device");
        assert_eq!(wifi.ap_password(), "device-pass");
    }

    #[test]
    fn test_addresses_follow_text_fields() {
        let wifi = WifiConfig::default();
        let mut buf = [0u8; WifiConfig::SIZE];
        wifi.encode(&mut buf);
        let ap_ip_offset = 4 * WIFI_CONFIGS_BUF_SIZE + 3 * 4;
        assert_eq!(&buf[ap_ip_offset..ap_ip_offset + 4], &[192, 168, 0, 1]);
        assert_eq!(WifiConfig::decode(&buf), wifi);
    }
}
