use serde::Deserialize;
use std::fs;
use std::time::Duration;

use crate::bus::i2c::DEFAULT_READ_DELAY;
use crate::errors::{ConfigError, ConfigResult};
use crate::sensors::{
    AcquisitionMode, Configuration, DeviceAddress, HumidityResolution, TemperatureResolution,
    DEFAULT_RESET_DELAY,
};

/// Default sampling rate of the reader, in Hz
pub const DEFAULT_FREQUENCY: u32 = 1;

/// Root configuration with one `[bus]` and one `[sensor]` table
#[derive(Debug, Deserialize)]
pub struct ReaderConfig {
    pub bus: BusSection,
    pub sensor: SensorSection,
}

/// I2C adapter the sensor is attached to
#[derive(Debug, Deserialize)]
pub struct BusSection {
    pub path: String,
    pub read_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeSetting {
    Single,
    Sequential,
}

/// The HDC1010 itself
#[derive(Debug, Deserialize)]
pub struct SensorSection {
    #[serde(default = "default_sensor_id")]
    pub id: String,
    pub address: Option<u8>,
    pub frequency: Option<u32>,
    pub reset_delay_ms: Option<u64>,
    #[serde(default)]
    pub heater: bool,
    pub mode: Option<ModeSetting>,
    pub temperature_resolution: Option<u8>,
    pub humidity_resolution: Option<u8>,
}

fn default_sensor_id() -> String {
    "hdc1010".to_string()
}

impl BusSection {
    pub fn read_delay(&self) -> Duration {
        self.read_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_READ_DELAY)
    }
}

impl SensorSection {
    pub fn address(&self) -> ConfigResult<u8> {
        let address = self.address.unwrap_or(DeviceAddress::Primary.addr());
        if address > 0x7F {
            return Err(ConfigError::InvalidValue {
                field: "sensor.address".to_string(),
                reason: format!("{:#04x} is not a 7-bit address", address),
            });
        }
        Ok(address)
    }

    pub fn reset_delay(&self) -> Duration {
        self.reset_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_RESET_DELAY)
    }

    pub fn sample_period(&self) -> ConfigResult<Duration> {
        match self.frequency.unwrap_or(DEFAULT_FREQUENCY) {
            0 => Err(ConfigError::InvalidValue {
                field: "sensor.frequency".to_string(),
                reason: "must be at least 1 Hz".to_string(),
            }),
            hz => Ok(Duration::from_secs_f64(1.0 / hz as f64)),
        }
    }

    /// Builds the configuration register value described by this section.
    ///
    /// Mode defaults to single acquisition: the reader addresses the
    /// temperature and humidity registers separately, one trigger each.
    pub fn configuration(&self) -> ConfigResult<Configuration> {
        let temperature_resolution = match self.temperature_resolution.unwrap_or(14) {
            14 => TemperatureResolution::Bits14,
            11 => TemperatureResolution::Bits11,
            other => {
                return Err(ConfigError::InvalidValue {
                    field: "sensor.temperature_resolution".to_string(),
                    reason: format!("{} bits not supported (14 or 11)", other),
                })
            }
        };
        let humidity_resolution = match self.humidity_resolution.unwrap_or(14) {
            14 => HumidityResolution::Bits14,
            11 => HumidityResolution::Bits11,
            8 => HumidityResolution::Bits8,
            other => {
                return Err(ConfigError::InvalidValue {
                    field: "sensor.humidity_resolution".to_string(),
                    reason: format!("{} bits not supported (14, 11 or 8)", other),
                })
            }
        };
        let mode = match self.mode.unwrap_or(ModeSetting::Single) {
            ModeSetting::Single => AcquisitionMode::Single,
            ModeSetting::Sequential => AcquisitionMode::Sequential,
        };

        Ok(Configuration::default()
            .with_heater(self.heater)
            .with_mode(mode)
            .with_temperature_resolution(temperature_resolution)
            .with_humidity_resolution(humidity_resolution))
    }
}

pub fn parse_reader_config(content: &str) -> ConfigResult<ReaderConfig> {
    Ok(toml::from_str(content)?)
}

/// Loads config from TOML file
pub fn load_reader_config(path: &str) -> ConfigResult<ReaderConfig> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::LoadError {
        path: path.to_string(),
        source,
    })?;
    parse_reader_config(&content)
}
