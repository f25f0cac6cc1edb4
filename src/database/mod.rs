//! Configuration database
//!
//! Application side of the store, built on the registry and table accessor
//! from `confdb_core`:
//!
//! - [`interface`]: `StorageDriver` over an EEPROM device
//! - [`catalog`]: the compiled-in tables and their per-table get/set calls
//! - [`defaults`]: factory defaults
//! - [`service`]: startup, factory reset and erase lifecycle
//! - [`monitor`]: periodic validity check

/// Invoke `$callback!` with the list of catalog tables
///
/// Each entry is `field: Record => getter, setter;`, where `field` names the
/// catalog accessor and the factory-default function in [`defaults`].
macro_rules! for_each_table {
    ($callback:ident) => {
        $callback! {
            global: GlobalConfig => get_global_table, set_global_table;
            login: LoginCredential => get_login_table, set_login_table;
            wifi: WifiConfig => get_wifi_table, set_wifi_table;
            ota: OtaConfig => get_ota_table, set_ota_table;
            gpio: GpioConfig => get_gpio_table, set_gpio_table;
            mqtt_general: MqttGeneralConfig => get_mqtt_general_table, set_mqtt_general_table;
            mqtt_lwt: MqttLwtConfig => get_mqtt_lwt_table, set_mqtt_lwt_table;
            mqtt_pubsub: MqttPubSubConfig => get_mqtt_pubsub_table, set_mqtt_pubsub_table;
            email: EmailConfig => get_email_table, set_email_table;
            device_iot: DeviceIotConfig => get_device_iot_table, set_device_iot_table;
        }
    };
}

pub mod catalog;
pub mod defaults;
pub mod interface;
pub mod monitor;
pub mod service;

pub use catalog::{CatalogState, DefaultDatabase};
pub use interface::EepromStorage;
pub use monitor::{MonitorEvent, ValidityMonitor};
pub use service::{DatabaseConfig, DatabaseService, DEFAULT_VALIDITY_CHECK_INTERVAL_MS};
