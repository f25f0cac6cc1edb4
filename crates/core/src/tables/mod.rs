//! Compiled-in configuration tables
//!
//! Every table has a fixed address on the medium and a fixed-layout record.
//! The four base tables are always present; the rest are optional and only
//! registered when enabled in [`OptionalTables`].
//!
//! | Table         | Address | Record                |
//! |---------------|---------|-----------------------|
//! | global        | 5       | [`GlobalConfig`]      |
//! | login         | 50      | [`LoginCredential`]   |
//! | wifi          | 150     | [`WifiConfig`]        |
//! | ota           | 300     | [`OtaConfig`]         |
//! | gpio          | 500     | [`GpioConfig`]        |
//! | mqtt_general  | 700     | [`MqttGeneralConfig`] |
//! | mqtt_lwt      | 1400    | [`MqttLwtConfig`]     |
//! | mqtt_pubsub   | 1600    | [`MqttPubSubConfig`]  |
//! | email         | 1900    | [`EmailConfig`]       |
//! | device_iot    | 2500    | [`DeviceIotConfig`]   |

pub mod device_iot;
pub mod email;
pub mod global;
pub mod gpio;
pub mod login;
pub mod mqtt;
pub mod ota;
pub mod wifi;

pub use device_iot::DeviceIotConfig;
pub use email::EmailConfig;
pub use global::GlobalConfig;
pub use gpio::{GpioAlertChannel, GpioAlertComparator, GpioConfig, GpioMode};
pub use login::LoginCredential;
pub use mqtt::{
    MqttGeneralConfig, MqttLwtConfig, MqttPubSubConfig, MqttPubTopic, MqttSubTopic, TopicError,
};
pub use ota::OtaConfig;
pub use wifi::WifiConfig;

use crate::database::{Record, TableOwner, CONFIG_START};
use bitflags::bitflags;

bitflags! {
    /// Optional table groups enabled for a device build
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct OptionalTables: u8 {
        /// GPIO modes, readings and alerts
        const GPIO = 0b0000_0001;
        /// MQTT general, last-will and pub/sub tables
        const MQTT = 0b0000_0010;
        /// Outgoing mail settings
        const EMAIL = 0b0000_0100;
        /// Device identity / IoT endpoint
        const DEVICE_IOT = 0b0000_1000;
    }
}

/// Every table the catalog knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Global,
    Login,
    Wifi,
    Ota,
    Gpio,
    MqttGeneral,
    MqttLwt,
    MqttPubSub,
    Email,
    DeviceIot,
}

impl TableKind {
    /// All tables in registration order
    pub const ALL: [TableKind; 10] = [
        TableKind::Global,
        TableKind::Login,
        TableKind::Wifi,
        TableKind::Ota,
        TableKind::Gpio,
        TableKind::MqttGeneral,
        TableKind::MqttLwt,
        TableKind::MqttPubSub,
        TableKind::Email,
        TableKind::DeviceIot,
    ];

    /// Fixed storage address
    pub const fn address(self) -> u16 {
        match self {
            TableKind::Global => CONFIG_START,
            TableKind::Login => 50,
            TableKind::Wifi => 150,
            TableKind::Ota => 300,
            TableKind::Gpio => 500,
            TableKind::MqttGeneral => 700,
            TableKind::MqttLwt => 1400,
            TableKind::MqttPubSub => 1600,
            TableKind::Email => 1900,
            TableKind::DeviceIot => 2500,
        }
    }

    /// Encoded record size
    pub const fn record_size(self) -> usize {
        match self {
            TableKind::Global => GlobalConfig::SIZE,
            TableKind::Login => LoginCredential::SIZE,
            TableKind::Wifi => WifiConfig::SIZE,
            TableKind::Ota => OtaConfig::SIZE,
            TableKind::Gpio => GpioConfig::SIZE,
            TableKind::MqttGeneral => MqttGeneralConfig::SIZE,
            TableKind::MqttLwt => MqttLwtConfig::SIZE,
            TableKind::MqttPubSub => MqttPubSubConfig::SIZE,
            TableKind::Email => EmailConfig::SIZE,
            TableKind::DeviceIot => DeviceIotConfig::SIZE,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            TableKind::Global => "global",
            TableKind::Login => "login",
            TableKind::Wifi => "wifi",
            TableKind::Ota => "ota",
            TableKind::Gpio => "gpio",
            TableKind::MqttGeneral => "mqtt_general",
            TableKind::MqttLwt => "mqtt_lwt",
            TableKind::MqttPubSub => "mqtt_pubsub",
            TableKind::Email => "email",
            TableKind::DeviceIot => "device_iot",
        }
    }

    pub const fn owner(self) -> TableOwner {
        TableOwner::new(self.name())
    }

    /// Option group gating this table (`None` for the base tables)
    pub const fn required(self) -> Option<OptionalTables> {
        match self {
            TableKind::Global | TableKind::Login | TableKind::Wifi | TableKind::Ota => None,
            TableKind::Gpio => Some(OptionalTables::GPIO),
            TableKind::MqttGeneral | TableKind::MqttLwt | TableKind::MqttPubSub => {
                Some(OptionalTables::MQTT)
            }
            TableKind::Email => Some(OptionalTables::EMAIL),
            TableKind::DeviceIot => Some(OptionalTables::DEVICE_IOT),
        }
    }

    /// Whether this table is part of a build with `enabled` option groups
    pub fn is_enabled(self, enabled: OptionalTables) -> bool {
        match self.required() {
            None => true,
            Some(flag) => enabled.contains(flag),
        }
    }
}
