//! Default configuration catalog
//!
//! Composes the compiled-in tables, each bound to its fixed address (see
//! [`TableKind::address`]). Which optional tables exist is decided at startup
//! from [`OptionalTables`]; a disabled table never registers, so its get/set
//! calls always report "not found".
//!
//! The catalog holds no storage state of its own. Every call takes the
//! registry and the driver it should act on.

use super::defaults;
use confdb_core::database::{DatabaseError, DatabaseTable, Registration, TableRegistry};
use confdb_core::tables::{
    DeviceIotConfig, EmailConfig, GlobalConfig, GpioConfig, LoginCredential, MqttGeneralConfig,
    MqttLwtConfig, MqttPubSubConfig, OptionalTables, OtaConfig, TableKind, WifiConfig,
};
use confdb_core::traits::StorageDriver;
use heapless::Vec;

/// Number of tables the catalog knows about
pub const TABLE_COUNT: usize = TableKind::ALL.len();

/// Whether the medium holds a configuration written by this store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogState {
    /// Marker absent or mismatched; reads are not trustworthy
    Unformatted,
    /// Marker present; never-written tables read back as zeros
    Formatted,
}

impl CatalogState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogState::Unformatted => "unformatted",
            CatalogState::Formatted => "formatted",
        }
    }
}

/// Log a failed table operation and collapse it to a flag
fn report(table: &str, operation: &str, result: Result<(), DatabaseError>) -> bool {
    match result {
        Ok(()) => true,
        Err(DatabaseError::NotRegistered) => {
            crate::log_debug!("{} {}: table not registered", table, operation);
            false
        }
        Err(e) => {
            crate::log_error!("{} {} failed: {}", table, operation, e.as_str());
            false
        }
    }
}

/// Keep the first error of a batch while still visiting every table
fn keep_first(first: &mut Option<DatabaseError>, table: &str, result: Result<(), DatabaseError>) {
    if let Err(e) = result {
        crate::log_error!("table {}: {}", table, e.as_str());
        first.get_or_insert(e);
    }
}

macro_rules! catalog_struct {
    ($($field:ident: $record:ident => $get:ident, $set:ident;)*) => {
        /// The application's table set
        pub struct DefaultDatabase {
            enabled: OptionalTables,
            $($field: DatabaseTable<$record>,)*
        }

        impl DefaultDatabase {
            $(
                #[doc = concat!("Load the ", stringify!($field), " table into `out`")]
                ///
                /// Returns false (leaving `out` untouched) if the table is not
                /// registered or the read fails.
                pub fn $get<D: StorageDriver>(
                    &self,
                    registry: &TableRegistry,
                    driver: &mut D,
                    out: &mut $record,
                ) -> bool {
                    report(stringify!($field), "get", self.$field.get(registry, driver, out))
                }

                #[doc = concat!("Store `value` in the ", stringify!($field), " table")]
                pub fn $set<D: StorageDriver>(
                    &self,
                    registry: &TableRegistry,
                    driver: &mut D,
                    value: &$record,
                ) -> bool {
                    report(stringify!($field), "set", self.$field.set(registry, driver, value))
                }
            )*
        }
    };
}

for_each_table!(catalog_struct);

impl DefaultDatabase {
    /// Catalog with the base tables plus the `enabled` option groups
    pub fn new(enabled: OptionalTables) -> Self {
        Self {
            enabled,
            global: DatabaseTable::new(TableKind::Global.owner()),
            login: DatabaseTable::new(TableKind::Login.owner()),
            wifi: DatabaseTable::new(TableKind::Wifi.owner()),
            ota: DatabaseTable::new(TableKind::Ota.owner()),
            gpio: DatabaseTable::new(TableKind::Gpio.owner()),
            mqtt_general: DatabaseTable::new(TableKind::MqttGeneral.owner()),
            mqtt_lwt: DatabaseTable::new(TableKind::MqttLwt.owner()),
            mqtt_pubsub: DatabaseTable::new(TableKind::MqttPubSub.owner()),
            email: DatabaseTable::new(TableKind::Email.owner()),
            device_iot: DatabaseTable::new(TableKind::DeviceIot.owner()),
        }
    }

    pub fn enabled(&self) -> OptionalTables {
        self.enabled
    }

    pub fn is_enabled(&self, kind: TableKind) -> bool {
        kind.is_enabled(self.enabled)
    }

    /// Enabled tables in registration order
    pub fn enabled_tables(&self) -> Vec<TableKind, TABLE_COUNT> {
        TableKind::ALL
            .iter()
            .copied()
            .filter(|kind| self.is_enabled(*kind))
            .collect()
    }

    /// Register every enabled table at its fixed address
    ///
    /// Call once at startup. Calling it again registers duplicates, which are
    /// shadowed by the first registration and logged as warnings.
    ///
    /// # Errors
    ///
    /// Stops at the first table the registry rejects (a layout defect). The
    /// registry is left as it was before the call.
    pub fn init_default_database(
        &mut self,
        registry: &mut TableRegistry,
    ) -> Result<(), DatabaseError> {
        let mut scratch = registry.clone();
        for kind in self.enabled_tables() {
            match self.register(kind, &mut scratch) {
                Ok(Registration::Unique) => {
                    crate::log_debug!("registered {} at {}", kind.name(), kind.address());
                }
                Ok(Registration::Shadowed { first }) => {
                    crate::log_warn!(
                        "{} at {} is shadowed by {}",
                        kind.name(),
                        kind.address(),
                        first.name()
                    );
                }
                Ok(Registration::Overlapping { other }) => {
                    crate::log_warn!("{} overlaps {}", kind.name(), other.name());
                }
                Err(e) => {
                    crate::log_error!("cannot register {}: {}", kind.name(), e.as_str());
                    return Err(e);
                }
            }
        }
        *registry = scratch;
        crate::log_info!("catalog ready, {} tables registered", registry.len());
        Ok(())
    }

    /// Erase the storage range of every enabled table
    ///
    /// Tables stay registered. Every table is visited even if one fails; the
    /// first error is returned.
    pub fn clear_default_tables<D: StorageDriver>(
        &self,
        registry: &TableRegistry,
        driver: &mut D,
    ) -> Result<(), DatabaseError> {
        let mut first = None;
        for kind in self.enabled_tables() {
            keep_first(&mut first, kind.name(), self.clear(kind, registry, driver));
        }
        first.map_or(Ok(()), Err)
    }

    /// Write factory defaults into every enabled table
    pub fn restore_default_tables<D: StorageDriver>(
        &self,
        registry: &TableRegistry,
        driver: &mut D,
    ) -> Result<(), DatabaseError> {
        let mut first = None;
        for kind in self.enabled_tables() {
            keep_first(&mut first, kind.name(), self.restore(kind, registry, driver));
        }
        first.map_or(Ok(()), Err)
    }

    /// Current state from the driver's validity marker
    pub fn state<D: StorageDriver>(&self, driver: &mut D) -> CatalogState {
        if driver.is_valid() {
            CatalogState::Formatted
        } else {
            CatalogState::Unformatted
        }
    }

    fn register(
        &mut self,
        kind: TableKind,
        registry: &mut TableRegistry,
    ) -> Result<Registration, DatabaseError> {
        let address = kind.address();
        match kind {
            TableKind::Global => self.global.register_table(registry, address),
            TableKind::Login => self.login.register_table(registry, address),
            TableKind::Wifi => self.wifi.register_table(registry, address),
            TableKind::Ota => self.ota.register_table(registry, address),
            TableKind::Gpio => self.gpio.register_table(registry, address),
            TableKind::MqttGeneral => self.mqtt_general.register_table(registry, address),
            TableKind::MqttLwt => self.mqtt_lwt.register_table(registry, address),
            TableKind::MqttPubSub => self.mqtt_pubsub.register_table(registry, address),
            TableKind::Email => self.email.register_table(registry, address),
            TableKind::DeviceIot => self.device_iot.register_table(registry, address),
        }
    }

    fn clear<D: StorageDriver>(
        &self,
        kind: TableKind,
        registry: &TableRegistry,
        driver: &mut D,
    ) -> Result<(), DatabaseError> {
        match kind {
            TableKind::Global => self.global.clear(registry, driver),
            TableKind::Login => self.login.clear(registry, driver),
            TableKind::Wifi => self.wifi.clear(registry, driver),
            TableKind::Ota => self.ota.clear(registry, driver),
            TableKind::Gpio => self.gpio.clear(registry, driver),
            TableKind::MqttGeneral => self.mqtt_general.clear(registry, driver),
            TableKind::MqttLwt => self.mqtt_lwt.clear(registry, driver),
            TableKind::MqttPubSub => self.mqtt_pubsub.clear(registry, driver),
            TableKind::Email => self.email.clear(registry, driver),
            TableKind::DeviceIot => self.device_iot.clear(registry, driver),
        }
    }

    fn restore<D: StorageDriver>(
        &self,
        kind: TableKind,
        registry: &TableRegistry,
        driver: &mut D,
    ) -> Result<(), DatabaseError> {
        match kind {
            TableKind::Global => self.global.set(registry, driver, &defaults::global()),
            TableKind::Login => self.login.set(registry, driver, &defaults::login()),
            TableKind::Wifi => self.wifi.set(registry, driver, &defaults::wifi()),
            TableKind::Ota => self.ota.set(registry, driver, &defaults::ota()),
            TableKind::Gpio => self.gpio.set(registry, driver, &defaults::gpio()),
            TableKind::MqttGeneral => {
                self.mqtt_general
                    .set(registry, driver, &defaults::mqtt_general())
            }
            TableKind::MqttLwt => self.mqtt_lwt.set(registry, driver, &defaults::mqtt_lwt()),
            TableKind::MqttPubSub => {
                self.mqtt_pubsub
                    .set(registry, driver, &defaults::mqtt_pubsub())
            }
            TableKind::Email => self.email.set(registry, driver, &defaults::email()),
            TableKind::DeviceIot => {
                self.device_iot
                    .set(registry, driver, &defaults::device_iot())
            }
        }
    }
}
