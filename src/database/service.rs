//! Database service
//!
//! Owns the raw storage driver, the table registry and the catalog, and runs
//! the lifecycle around them: startup (format on first boot), factory reset
//! and full erase.
//!
//! # Example
//!
//! ```ignore
//! use confdb::database::{DatabaseConfig, DatabaseService, EepromStorage};
//! use confdb::platform::FlashEeprom;
//!
//! let driver = EepromStorage::new(FlashEeprom::new(flash));
//! let mut db = DatabaseService::new(driver, DatabaseConfig::default());
//! db.init_default_database()?;
//!
//! let mut wifi = WifiConfig::default();
//! if db.get_wifi_table(&mut wifi) {
//!     connect(wifi.sta_ssid(), wifi.sta_password());
//! }
//! ```

use super::catalog::{CatalogState, DefaultDatabase};
use confdb_core::database::{DatabaseError, TableRegistry};
use confdb_core::tables::{
    DeviceIotConfig, EmailConfig, GlobalConfig, GpioConfig, LoginCredential, MqttGeneralConfig,
    MqttLwtConfig, MqttPubSubConfig, OptionalTables, OtaConfig, WifiConfig,
};
use confdb_core::traits::StorageDriver;

/// Period of the background validity check
pub const DEFAULT_VALIDITY_CHECK_INTERVAL_MS: u64 = 5000;

/// Runtime configuration of the database
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Optional table groups to register
    pub optional_tables: OptionalTables,
    /// Wipe and write factory defaults when startup finds no valid marker
    pub format_on_invalid: bool,
    /// Let the validity monitor factory-reset an invalid medium
    pub auto_factory_reset: bool,
    pub validity_check_interval_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            optional_tables: OptionalTables::all(),
            format_on_invalid: true,
            auto_factory_reset: false,
            validity_check_interval_ms: DEFAULT_VALIDITY_CHECK_INTERVAL_MS,
        }
    }
}

/// Configuration database bound to one storage driver
pub struct DatabaseService<D: StorageDriver> {
    driver: D,
    registry: TableRegistry,
    catalog: DefaultDatabase,
    config: DatabaseConfig,
    initialized: bool,
}

macro_rules! service_accessors {
    ($($field:ident: $record:ident => $get:ident, $set:ident;)*) => {
        impl<D: StorageDriver> DatabaseService<D> {
            $(
                #[doc = concat!("Load the ", stringify!($field), " table into `out`")]
                pub fn $get(&mut self, out: &mut $record) -> bool {
                    self.catalog.$get(&self.registry, &mut self.driver, out)
                }

                #[doc = concat!("Store `value` in the ", stringify!($field), " table")]
                pub fn $set(&mut self, value: &$record) -> bool {
                    self.catalog.$set(&self.registry, &mut self.driver, value)
                }
            )*
        }
    };
}

for_each_table!(service_accessors);

impl<D: StorageDriver> DatabaseService<D> {
    pub fn new(driver: D, config: DatabaseConfig) -> Self {
        let registry = TableRegistry::new(driver.max_size());
        Self {
            driver,
            registry,
            catalog: DefaultDatabase::new(config.optional_tables),
            config,
            initialized: false,
        }
    }

    /// Open the medium and register the catalog
    ///
    /// When the validity marker is missing and `format_on_invalid` is set,
    /// the medium is wiped and filled with factory defaults. Returns the
    /// resulting state. After a successful call, further calls only report
    /// the state; after a failed one, the next call retries.
    pub fn init_default_database(&mut self) -> Result<CatalogState, DatabaseError> {
        if self.initialized {
            crate::log_warn!("database already initialized");
            return Ok(self.state());
        }

        self.driver.begin(self.registry.capacity())?;
        // Kept across a failed format so a retry does not register twice
        if self.registry.is_empty() {
            self.catalog.init_default_database(&mut self.registry)?;
        }

        let mut state = self.state();
        if state == CatalogState::Unformatted {
            crate::log_warn!("no valid configuration on medium");
            if self.config.format_on_invalid {
                self.format_with_defaults()?;
                state = CatalogState::Formatted;
            }
        }
        self.initialized = true;
        Ok(state)
    }

    /// Wipe the medium and write factory defaults
    pub fn factory_reset(&mut self) -> Result<(), DatabaseError> {
        crate::log_warn!("factory reset");
        self.format_with_defaults()
    }

    /// Wipe the medium, leaving it unformatted
    ///
    /// The medium is reopened afterwards; every table reads back as zeros
    /// until defaults or new values are written.
    pub fn erase_all(&mut self) -> Result<(), DatabaseError> {
        crate::log_warn!("erasing configuration medium");
        self.driver.clean_all()?;
        self.driver.begin(self.registry.capacity())?;
        Ok(())
    }

    /// Erase every enabled table, keeping the marker
    pub fn clear_default_tables(&mut self) -> Result<(), DatabaseError> {
        self.catalog
            .clear_default_tables(&self.registry, &mut self.driver)
    }

    /// Write factory defaults into every enabled table, keeping the marker
    pub fn restore_default_tables(&mut self) -> Result<(), DatabaseError> {
        self.catalog
            .restore_default_tables(&self.registry, &mut self.driver)
    }

    pub fn state(&mut self) -> CatalogState {
        self.catalog.state(&mut self.driver)
    }

    pub fn is_valid(&mut self) -> bool {
        self.driver.is_valid()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    pub fn catalog(&self) -> &DefaultDatabase {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut DefaultDatabase {
        &mut self.catalog
    }

    pub fn registry(&self) -> &TableRegistry {
        &self.registry
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Give back the driver
    pub fn release(self) -> D {
        self.driver
    }

    fn format_with_defaults(&mut self) -> Result<(), DatabaseError> {
        self.driver.clean_all()?;
        self.driver.begin(self.registry.capacity())?;
        self.catalog
            .restore_default_tables(&self.registry, &mut self.driver)?;
        self.driver.format()?;
        crate::log_info!("configuration medium formatted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::interface::EepromStorage;
    use crate::platform::mock::MockEeprom;
    use confdb_core::tables::TableKind;

    fn service(config: DatabaseConfig) -> DatabaseService<EepromStorage<MockEeprom>> {
        DatabaseService::new(EepromStorage::new(MockEeprom::new()), config)
    }

    #[test]
    fn test_first_boot_formats_with_defaults() {
        let mut db = service(DatabaseConfig::default());
        assert_eq!(db.init_default_database(), Ok(CatalogState::Formatted));
        assert!(db.is_valid());

        let mut ota = OtaConfig::new("stale", 1).unwrap();
        assert!(db.get_ota_table(&mut ota));
        assert_eq!(ota, OtaConfig::default());

        let mut iot = DeviceIotConfig::new("stale", 1).unwrap();
        assert!(db.get_device_iot_table(&mut iot));
        assert_eq!(iot.device_iot_port, 80);
    }

    #[test]
    fn test_without_format_on_invalid_stays_unformatted() {
        let mut db = service(DatabaseConfig {
            format_on_invalid: false,
            ..DatabaseConfig::default()
        });
        assert_eq!(db.init_default_database(), Ok(CatalogState::Unformatted));
        assert_eq!(db.driver().eeprom().stats().commits, 0);
    }

    #[test]
    fn test_second_init_is_reported_not_repeated() {
        let mut db = service(DatabaseConfig::default());
        db.init_default_database().unwrap();
        let tables = db.registry().len();

        assert_eq!(db.init_default_database(), Ok(CatalogState::Formatted));
        assert_eq!(db.registry().len(), tables);
    }

    #[test]
    fn test_rejected_layout_leaves_registry_empty() {
        // Too small for the compiled-in layout
        let mut db = DatabaseService::new(
            EepromStorage::new(MockEeprom::with_capacity(200)),
            DatabaseConfig::default(),
        );

        assert_eq!(db.init_default_database(), Err(DatabaseError::OutOfBounds));
        assert!(db.registry().is_empty());
        assert!(!db.is_initialized());

        assert_eq!(db.init_default_database(), Err(DatabaseError::OutOfBounds));
        assert!(db.registry().is_empty());
    }

    #[test]
    fn test_failed_format_is_retried() {
        let mut db = service(DatabaseConfig::default());
        db.driver_mut().eeprom_mut().fail_commits(true);
        assert!(db.init_default_database().is_err());
        assert!(!db.is_initialized());
        let tables = db.registry().len();
        assert!(tables > 0);

        db.driver_mut().eeprom_mut().fail_commits(false);
        assert_eq!(db.init_default_database(), Ok(CatalogState::Formatted));
        assert!(db.is_initialized());
        assert!(db.is_valid());
        assert_eq!(db.registry().len(), tables);
    }

    #[test]
    fn test_erase_all_leaves_zeroed_unformatted_medium() {
        let mut db = service(DatabaseConfig::default());
        db.init_default_database().unwrap();

        db.erase_all().unwrap();
        assert_eq!(db.state(), CatalogState::Unformatted);

        let mut mqtt = MqttGeneralConfig::default();
        assert!(db.get_mqtt_general_table(&mut mqtt));
        assert_eq!(mqtt.port, 0);
        assert_eq!(mqtt.host(), "");
    }

    #[test]
    fn test_factory_reset_restores_values() {
        let mut db = service(DatabaseConfig::default());
        db.init_default_database().unwrap();

        let mut email = EmailConfig::default();
        email.mail_port = 25;
        assert!(db.set_email_table(&email));

        db.factory_reset().unwrap();
        assert!(db.is_valid());
        assert!(db.get_email_table(&mut email));
        assert_eq!(email.mail_port, 2525);
    }

    #[test]
    fn test_optional_tables_follow_config() {
        let mut db = service(DatabaseConfig {
            optional_tables: OptionalTables::GPIO,
            ..DatabaseConfig::default()
        });
        db.init_default_database().unwrap();

        assert!(db.catalog().is_enabled(TableKind::Gpio));
        let mut gpio = GpioConfig::default();
        assert!(db.get_gpio_table(&mut gpio));

        let mut lwt = MqttLwtConfig::default();
        assert!(!db.get_mqtt_lwt_table(&mut lwt));
        let mut pubsub = MqttPubSubConfig::default();
        assert!(!db.set_mqtt_pubsub_table(&pubsub));
        assert!(!db.get_mqtt_pubsub_table(&mut pubsub));
    }

    #[test]
    fn test_base_tables_round_trip() {
        let mut db = service(DatabaseConfig::default());
        db.init_default_database().unwrap();

        let login = LoginCredential::new("operator", "hunter2").unwrap();
        assert!(db.set_login_table(&login));
        let mut global = GlobalConfig::default();
        global.current_year = 26;
        assert!(db.set_global_table(&global));

        let mut login_out = LoginCredential::default();
        let mut global_out = GlobalConfig::default();
        assert!(db.get_login_table(&mut login_out));
        assert!(db.get_global_table(&mut global_out));
        assert_eq!(login_out.username(), "operator");
        assert_eq!(global_out.current_year, 26);

        let mut wifi = WifiConfig::default();
        assert!(db.get_wifi_table(&mut wifi));
        let mut lwt = MqttLwtConfig::default();
        assert!(db.get_mqtt_lwt_table(&mut lwt));
    }
}
