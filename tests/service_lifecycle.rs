//! Full-stack lifecycle: service → EEPROM driver → flash-emulated EEPROM → mock flash

use confdb::database::{
    CatalogState, DatabaseConfig, DatabaseService, EepromStorage, MonitorEvent, ValidityMonitor,
};
use confdb::platform::mock::{MockEeprom, MockFlash};
use confdb::platform::FlashEeprom;
use confdb_core::tables::{
    GpioAlertChannel, GpioAlertComparator, GpioConfig, GpioMode, MqttGeneralConfig, MqttPubSubConfig,
    OptionalTables, OtaConfig, WifiConfig,
};
use confdb_core::traits::{MockTime, StorageDriver};

type FlashDb = DatabaseService<EepromStorage<FlashEeprom<MockFlash>>>;

fn boot(flash: MockFlash, config: DatabaseConfig) -> FlashDb {
    let mut db = DatabaseService::new(EepromStorage::new(FlashEeprom::new(flash)), config);
    db.init_default_database().unwrap();
    db
}

fn power_off(db: FlashDb) -> MockFlash {
    db.release().release().release()
}

#[test]
fn test_settings_survive_reboot() {
    let mut db = boot(MockFlash::new(), DatabaseConfig::default());
    assert_eq!(db.state(), CatalogState::Formatted);

    let wifi = WifiConfig::with_credentials("office", "correct horse", "device-ap", "ap-pass").unwrap();
    assert!(db.set_wifi_table(&wifi));

    let mut gpio = GpioConfig::default();
    assert!(gpio.set_mode(3, GpioMode::DigitalWrite));
    assert!(gpio.set_alert(3, GpioAlertComparator::GreaterThan, GpioAlertChannel::Email, 512));
    assert!(db.set_gpio_table(&gpio));

    let mut pubsub = MqttPubSubConfig::default();
    pubsub.set_publish(0, "device/status", 1, true).unwrap();
    pubsub.set_subscribe(1, "device/cmd", 2).unwrap();
    assert!(db.set_mqtt_pubsub_table(&pubsub));

    let mut db = boot(power_off(db), DatabaseConfig::default());

    let mut wifi_out = WifiConfig::default();
    assert!(db.get_wifi_table(&mut wifi_out));
    assert_eq!(wifi_out.sta_ssid(), "office");
    assert_eq!(wifi_out.ap_password(), "ap-pass");

    let mut gpio_out = GpioConfig::default();
    assert!(db.get_gpio_table(&mut gpio_out));
    assert_eq!(gpio_out.mode(3), Some(GpioMode::DigitalWrite));
    assert_eq!(gpio_out, gpio);

    let mut pubsub_out = MqttPubSubConfig::default();
    assert!(db.get_mqtt_pubsub_table(&mut pubsub_out));
    assert_eq!(pubsub_out, pubsub);
}

#[test]
fn test_unchanged_write_skips_flash_erase() {
    let mut db = boot(MockFlash::new(), DatabaseConfig::default());
    let ota = OtaConfig::new("fw.example.net", 8266).unwrap();
    assert!(db.set_ota_table(&ota));

    let erases = db.driver().eeprom().flash().get_total_erase_count();
    assert!(db.set_ota_table(&ota));
    assert_eq!(db.driver().eeprom().flash().get_total_erase_count(), erases);
}

#[test]
fn test_torn_commit_falls_back_to_defaults() {
    let mut db = boot(MockFlash::new(), DatabaseConfig::default());
    let ota = OtaConfig::new("fw.example.net", 8266).unwrap();

    db.driver_mut().eeprom_mut().flash_mut().simulate_power_loss();
    assert!(db.set_ota_table(&ota));

    // Image is unreadable after the torn commit, startup formats again
    let mut db = boot(power_off(db), DatabaseConfig::default());
    assert!(db.is_valid());
    let mut out = OtaConfig::new("stale", 1).unwrap();
    assert!(db.get_ota_table(&mut out));
    assert_eq!(out, OtaConfig::default());
}

#[test]
fn test_erase_reads_zero_and_is_invalid() {
    let mut db = DatabaseService::new(
        EepromStorage::new(MockEeprom::new()),
        DatabaseConfig {
            optional_tables: OptionalTables::empty(),
            ..DatabaseConfig::default()
        },
    );
    db.init_default_database().unwrap();
    let ota = OtaConfig::new("fw.example.net", 8266).unwrap();
    assert!(db.set_ota_table(&ota));

    db.driver_mut().clean_all().unwrap();
    assert!(!db.is_valid());

    let capacity = db.registry().capacity();
    db.driver_mut().begin(capacity).unwrap();
    assert_eq!(db.state(), CatalogState::Unformatted);
    let mut out = ota;
    assert!(db.get_ota_table(&mut out));
    assert_eq!(out.host(), "");
    assert_eq!(out.ota_port, 0);
}

#[test]
fn test_monitor_recovers_erased_medium() {
    let config = DatabaseConfig {
        auto_factory_reset: true,
        validity_check_interval_ms: 5000,
        ..DatabaseConfig::default()
    };
    let time = MockTime::new();
    let mut db = boot(MockFlash::new(), config);
    let mut monitor = ValidityMonitor::new(&time, db.config());

    db.erase_all().unwrap();
    assert_eq!(monitor.poll(&mut db), MonitorEvent::Skipped);

    time.advance_ms(5000);
    assert_eq!(monitor.poll(&mut db), MonitorEvent::FactoryReset);

    let mut db = boot(power_off(db), config);
    let mut mqtt = MqttGeneralConfig::default();
    mqtt.port = 0;
    assert!(db.get_mqtt_general_table(&mut mqtt));
    assert_eq!(mqtt.port, 1883);
}
