//! Periodic configuration validity check
//!
//! Call [`ValidityMonitor::poll`] from the main loop. At most once per
//! interval it checks the validity marker, and with `auto_factory_reset`
//! enabled it restores factory defaults when the marker is gone.

use super::service::{DatabaseConfig, DatabaseService};
use confdb_core::traits::{StorageDriver, TimeSource};

/// Outcome of one poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorEvent {
    /// Interval not yet elapsed, nothing checked
    Skipped,
    Valid,
    /// Marker missing and no reset was performed
    Invalid,
    /// Marker missing, defaults were restored
    FactoryReset,
}

impl MonitorEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            MonitorEvent::Skipped => "skipped",
            MonitorEvent::Valid => "valid",
            MonitorEvent::Invalid => "invalid",
            MonitorEvent::FactoryReset => "factory reset",
        }
    }
}

pub struct ValidityMonitor<T: TimeSource> {
    time: T,
    interval_ms: u64,
    last_check_ms: u64,
}

impl<T: TimeSource> ValidityMonitor<T> {
    /// Monitor checking every `config.validity_check_interval_ms`
    ///
    /// The first check happens one interval after creation.
    pub fn new(time: T, config: &DatabaseConfig) -> Self {
        let last_check_ms = time.now_ms();
        Self {
            time,
            interval_ms: config.validity_check_interval_ms,
            last_check_ms,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn poll<D: StorageDriver>(&mut self, service: &mut DatabaseService<D>) -> MonitorEvent {
        if self.time.elapsed_ms_since(self.last_check_ms) < self.interval_ms {
            return MonitorEvent::Skipped;
        }
        self.last_check_ms = self.time.now_ms();

        if service.is_valid() {
            return MonitorEvent::Valid;
        }

        if !service.config().auto_factory_reset {
            crate::log_warn!("configuration invalid");
            return MonitorEvent::Invalid;
        }

        match service.factory_reset() {
            Ok(()) => MonitorEvent::FactoryReset,
            Err(e) => {
                crate::log_error!("factory reset failed: {}", e.as_str());
                MonitorEvent::Invalid
            }
        }
    }
}
