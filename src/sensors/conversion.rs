//! Datasheet conversions from raw register codes to physical units.

const FULL_SCALE: f32 = 65536.0;

/// Temperature in °C from the raw temperature register.
pub fn raw_to_celsius(raw: u16) -> f32 {
    (raw as f32 / FULL_SCALE) * 165.0 - 40.0
}

/// Relative humidity in %RH from the raw humidity register.
pub fn raw_to_relative_humidity(raw: u16) -> f32 {
    (raw as f32 / FULL_SCALE) * 100.0
}
