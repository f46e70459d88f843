use serde::{Deserialize, Serialize};

use crate::sensors::{raw_to_celsius, raw_to_relative_humidity};

/// One temperature/humidity sample as emitted by the reader
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Reading {
    /// Sensor identifier from the configuration
    pub sensor_id: String,
    /// Sequence number for message ordering
    pub seq: u64,
    /// UTC timestamp in nanoseconds
    pub t_utc_ns: u64,
    pub raw_temperature: u16,
    pub raw_humidity: u16,
    /// Temperature (°C)
    pub temperature: f32,
    /// Relative humidity (%RH)
    pub humidity: f32,
}

impl Reading {
    /// Builds a reading from raw register values, stamped with the current time
    pub fn from_raw(sensor_id: String, seq: u64, raw_temperature: u16, raw_humidity: u16) -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};

        let t_utc_ns = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64;

        Self {
            sensor_id,
            seq,
            t_utc_ns,
            raw_temperature,
            raw_humidity,
            temperature: raw_to_celsius(raw_temperature),
            humidity: raw_to_relative_humidity(raw_humidity),
        }
    }

    /// Single-line JSON for log pipelines
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
