//! GPIO table: pin modes, last readings and alert rules

use crate::database::{set_text, text, Record, RecordReader, RecordWriter, TextTooLong};

pub const MAX_DIGITAL_GPIO_PINS: usize = 9;
pub const MAX_ANALOG_GPIO_PINS: usize = 1;
pub const GPIO_PIN_COUNT: usize = MAX_DIGITAL_GPIO_PINS + MAX_ANALOG_GPIO_PINS;
pub const GPIO_HOST_BUF_SIZE: usize = 60;

pub const DEFAULT_GPIO_PORT: i32 = 80;

/// Pin operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum GpioMode {
    Off = 0,
    DigitalWrite = 1,
    DigitalRead = 2,
    DigitalBlink = 3,
    AnalogWrite = 4,
    AnalogRead = 5,
}

impl GpioMode {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(GpioMode::Off),
            1 => Some(GpioMode::DigitalWrite),
            2 => Some(GpioMode::DigitalRead),
            3 => Some(GpioMode::DigitalBlink),
            4 => Some(GpioMode::AnalogWrite),
            5 => Some(GpioMode::AnalogRead),
            _ => None,
        }
    }
}

/// Comparison applied to a reading to trigger an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum GpioAlertComparator {
    Equal = 0,
    GreaterThan = 1,
    LessThan = 2,
}

impl GpioAlertComparator {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(GpioAlertComparator::Equal),
            1 => Some(GpioAlertComparator::GreaterThan),
            2 => Some(GpioAlertComparator::LessThan),
            _ => None,
        }
    }

    /// Whether `reading` trips an alert configured at `threshold`
    pub fn matches(self, reading: u16, threshold: u16) -> bool {
        match self {
            GpioAlertComparator::Equal => reading == threshold,
            GpioAlertComparator::GreaterThan => reading > threshold,
            GpioAlertComparator::LessThan => reading < threshold,
        }
    }
}

/// Where alerts are delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum GpioAlertChannel {
    NoAlert = 0,
    Email = 1,
    HttpServer = 2,
}

impl GpioAlertChannel {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(GpioAlertChannel::NoAlert),
            1 => Some(GpioAlertChannel::Email),
            2 => Some(GpioAlertChannel::HttpServer),
            _ => None,
        }
    }
}

/// Per-pin arrays are indexed by pin: digital pins first, then analog.
///
/// Enum-valued arrays keep their raw bytes so a record read from an
/// unformatted medium still decodes; use the typed accessors to interpret them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioConfig {
    pub gpio_mode: [u8; GPIO_PIN_COUNT],
    pub gpio_readings: [u16; GPIO_PIN_COUNT],
    pub gpio_alert_comparator: [u8; GPIO_PIN_COUNT],
    pub gpio_alert_channel: [u8; GPIO_PIN_COUNT],
    pub gpio_alert_values: [u16; GPIO_PIN_COUNT],
    pub gpio_host: [u8; GPIO_HOST_BUF_SIZE],
    pub gpio_port: i32,
    pub gpio_post_frequency: i32,
}

impl GpioConfig {
    pub fn mode(&self, pin: usize) -> Option<GpioMode> {
        self.gpio_mode.get(pin).copied().and_then(GpioMode::from_u8)
    }

    pub fn set_mode(&mut self, pin: usize, mode: GpioMode) -> bool {
        match self.gpio_mode.get_mut(pin) {
            Some(slot) => {
                *slot = mode as u8;
                true
            }
            None => false,
        }
    }

    pub fn alert_comparator(&self, pin: usize) -> Option<GpioAlertComparator> {
        self.gpio_alert_comparator
            .get(pin)
            .copied()
            .and_then(GpioAlertComparator::from_u8)
    }

    pub fn alert_channel(&self, pin: usize) -> Option<GpioAlertChannel> {
        self.gpio_alert_channel
            .get(pin)
            .copied()
            .and_then(GpioAlertChannel::from_u8)
    }

    /// Configure an alert rule for `pin`
    pub fn set_alert(
        &mut self,
        pin: usize,
        comparator: GpioAlertComparator,
        channel: GpioAlertChannel,
        threshold: u16,
    ) -> bool {
        if pin >= GPIO_PIN_COUNT {
            return false;
        }
        self.gpio_alert_comparator[pin] = comparator as u8;
        self.gpio_alert_channel[pin] = channel as u8;
        self.gpio_alert_values[pin] = threshold;
        true
    }

    pub fn host(&self) -> &str {
        text(&self.gpio_host)
    }

    pub fn set_host(&mut self, host: &str) -> Result<(), TextTooLong> {
        set_text(&mut self.gpio_host, host)
    }
}

impl Default for GpioConfig {
    fn default() -> Self {
        Self {
            gpio_mode: [GpioMode::Off as u8; GPIO_PIN_COUNT],
            gpio_readings: [0; GPIO_PIN_COUNT],
            gpio_alert_comparator: [GpioAlertComparator::Equal as u8; GPIO_PIN_COUNT],
            gpio_alert_channel: [GpioAlertChannel::NoAlert as u8; GPIO_PIN_COUNT],
            gpio_alert_values: [0; GPIO_PIN_COUNT],
            gpio_host: [0; GPIO_HOST_BUF_SIZE],
            gpio_port: DEFAULT_GPIO_PORT,
            gpio_post_frequency: 0,
        }
    }
}

impl Record for GpioConfig {
    const SIZE: usize = GPIO_PIN_COUNT * (1 + 2 + 1 + 1 + 2) + GPIO_HOST_BUF_SIZE + 4 + 4;

    fn encode(&self, buf: &mut [u8]) {
        let mut w = RecordWriter::new(buf);
        w.put_bytes(&self.gpio_mode);
        for reading in self.gpio_readings {
            w.put_u16(reading);
        }
        w.put_bytes(&self.gpio_alert_comparator);
        w.put_bytes(&self.gpio_alert_channel);
        for value in self.gpio_alert_values {
            w.put_u16(value);
        }
        w.put_bytes(&self.gpio_host);
        w.put_i32(self.gpio_port);
        w.put_i32(self.gpio_post_frequency);
    }

    fn decode(buf: &[u8]) -> Self {
        let mut r = RecordReader::new(buf);
        let gpio_mode = r.get_array();
        let mut gpio_readings = [0u16; GPIO_PIN_COUNT];
        for reading in gpio_readings.iter_mut() {
            *reading = r.get_u16();
        }
        let gpio_alert_comparator = r.get_array();
        let gpio_alert_channel = r.get_array();
        let mut gpio_alert_values = [0u16; GPIO_PIN_COUNT];
        for value in gpio_alert_values.iter_mut() {
            *value = r.get_u16();
        }
        Self {
            gpio_mode,
            gpio_readings,
            gpio_alert_comparator,
            gpio_alert_channel,
            gpio_alert_values,
            gpio_host: r.get_array(),
            gpio_port: r.get_i32(),
            gpio_post_frequency: r.get_i32(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let gpio = GpioConfig::default();
        assert_eq!(gpio.mode(0), Some(GpioMode::Off));
        assert_eq!(gpio.alert_channel(9), Some(GpioAlertChannel::NoAlert));
        assert_eq!(gpio.gpio_port, 80);
        assert_eq!(gpio.mode(GPIO_PIN_COUNT), None);
    }

    #[test]
    fn test_set_mode_and_alert() {
        let mut gpio = GpioConfig::default();
        assert!(gpio.set_mode(3, GpioMode::AnalogRead));
        assert!(!gpio.set_mode(GPIO_PIN_COUNT, GpioMode::AnalogRead));
        assert!(gpio.set_alert(3, GpioAlertComparator::GreaterThan, GpioAlertChannel::Email, 512));

        let mut buf = [0u8; GpioConfig::SIZE];
        gpio.encode(&mut buf);
        let decoded = GpioConfig::decode(&buf);
        assert_eq!(decoded.mode(3), Some(GpioMode::AnalogRead));
        assert_eq!(decoded.alert_comparator(3), Some(GpioAlertComparator::GreaterThan));
        assert_eq!(decoded.alert_channel(3), Some(GpioAlertChannel::Email));
        assert_eq!(decoded.gpio_alert_values[3], 512);
    }

    #[test]
    fn test_unknown_raw_mode() {
        let mut gpio = GpioConfig::default();
        gpio.gpio_mode[0] = 0xFF;
        assert_eq!(gpio.mode(0), None);
    }

    #[test]
    fn test_comparator_matches() {
        assert!(GpioAlertComparator::Equal.matches(5, 5));
        assert!(GpioAlertComparator::GreaterThan.matches(6, 5));
        assert!(!GpioAlertComparator::LessThan.matches(6, 5));
    }
}
