use thiserror::Error;
use crate::bus::BusError;

/// Errors returned by the HDC1010 driver
#[derive(Error, Debug)]
pub enum SensorError {
    #[error("Sensor used before a successful begin()")]
    NotInitialized,

    #[error("Invalid 7-bit I2C address {address:#04x}")]
    InvalidAddress { address: u8 },

    #[error("No device acknowledged at {address:#04x}: {source}")]
    DeviceNotPresent {
        address: u8,
        #[source]
        source: BusError,
    },

    #[error("I2C transaction failed: {0}")]
    Bus(#[from] BusError),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from '{path}': {source}")]
    LoadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration format: {0}")]
    FormatError(#[from] toml::de::Error),

    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Result type aliases for convenience
pub type SensorResult<T> = Result<T, SensorError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
