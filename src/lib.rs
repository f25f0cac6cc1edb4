#![cfg_attr(not(test), no_std)]

//! confdb - Fixed-layout configuration database for EEPROM-like storage
//!
//! Devices keep their settings (login, WiFi, OTA, GPIO, MQTT, mail, IoT
//! endpoint) as fixed-size records at fixed addresses behind a validity
//! marker. The registry, table accessor and record types live in
//! `confdb_core`; this crate adds the storage devices, the catalog of tables
//! and the lifecycle around them.

#[cfg(all(feature = "mock", not(test)))]
extern crate std;

// Logging macros
pub mod core;

// Storage devices and runtime services (EEPROM, flash, time)
pub mod platform;

// Catalog, storage driver, service and validity monitor
pub mod database;

pub use confdb_core::database::{DatabaseError, Registration, TableRegistry};
pub use confdb_core::tables::{OptionalTables, TableKind};
pub use confdb_core::traits::{StorageDriver, StorageError, TimeSource};
