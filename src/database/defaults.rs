//! Factory defaults
//!
//! Records written on first boot and on factory reset. Credentials and the
//! firmware version are baked in at build time from `CONFDB_*` environment
//! variables (see `build.rs`); everything else is the record's own default.

use confdb_core::tables::global::FIRMWARE_VERSION;
use confdb_core::tables::{
    DeviceIotConfig, EmailConfig, GlobalConfig, GpioConfig, LoginCredential, MqttGeneralConfig,
    MqttLwtConfig, MqttPubSubConfig, OtaConfig, WifiConfig,
};

/// Web UI user, also the access-point SSID
pub const DEFAULT_USER: &str = env!("CONFDB_DEFAULT_USER");
/// Web UI password, also the access-point passphrase
pub const DEFAULT_PASSWORD: &str = env!("CONFDB_DEFAULT_PASSWORD");
/// Station network to join
pub const DEFAULT_SSID: &str = env!("CONFDB_DEFAULT_SSID");
pub const DEFAULT_PASSPHRASE: &str = env!("CONFDB_DEFAULT_PASSPHRASE");
const DEFAULT_FIRMWARE_VERSION: &str = env!("CONFDB_FIRMWARE_VERSION");

pub fn global() -> GlobalConfig {
    GlobalConfig {
        firmware_version: DEFAULT_FIRMWARE_VERSION
            .parse()
            .unwrap_or(FIRMWARE_VERSION),
        ..GlobalConfig::default()
    }
}

pub fn login() -> LoginCredential {
    LoginCredential::new(DEFAULT_USER, DEFAULT_PASSWORD).unwrap_or_else(|_| {
        crate::log_warn!("default login does not fit, leaving it blank");
        LoginCredential::default()
    })
}

pub fn wifi() -> WifiConfig {
    WifiConfig::with_credentials(DEFAULT_SSID, DEFAULT_PASSPHRASE, DEFAULT_USER, DEFAULT_PASSWORD)
        .unwrap_or_else(|_| {
            crate::log_warn!("default wifi credentials do not fit, leaving them blank");
            WifiConfig::default()
        })
}

pub fn ota() -> OtaConfig {
    OtaConfig::default()
}

pub fn gpio() -> GpioConfig {
    GpioConfig::default()
}

pub fn mqtt_general() -> MqttGeneralConfig {
    MqttGeneralConfig::default()
}

pub fn mqtt_lwt() -> MqttLwtConfig {
    MqttLwtConfig::default()
}

pub fn mqtt_pubsub() -> MqttPubSubConfig {
    MqttPubSubConfig::default()
}

pub fn email() -> EmailConfig {
    EmailConfig::default()
}

pub fn device_iot() -> DeviceIotConfig {
    DeviceIotConfig::default()
}
