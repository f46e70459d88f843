//! HDC1010 register map and configuration register layout.

// Register addresses
pub const TEMPERATURE: u8 = 0x00;
pub const HUMIDITY: u8 = 0x01;
pub const CONFIGURATION: u8 = 0x02;
pub const SERIAL_ID_FIRST: u8 = 0xFB;
pub const SERIAL_ID_MID: u8 = 0xFC;
pub const SERIAL_ID_LAST: u8 = 0xFD;
pub const MANUFACTURER_ID: u8 = 0xFE;
pub const DEVICE_ID: u8 = 0xFF;

pub const MANUFACTURER_ID_TI: u16 = 0x5449;
pub const DEVICE_ID_HDC1010: u16 = 0x1000;

/// Pattern written to the configuration register by `begin()`.
pub const RESET_COMMAND: u16 = 0x0059;

const RESET_BIT: u16 = 1 << 15;
const HEATER_BIT: u16 = 1 << 13;
const MODE_BIT: u16 = 1 << 12;
const BATTERY_BIT: u16 = 1 << 11;
const TEMP_RES_BIT: u16 = 1 << 10;
const HUM_RES_SHIFT: u16 = 8;
const HUM_RES_MASK: u16 = 0b11 << HUM_RES_SHIFT;

/// Strap-selectable bus addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceAddress {
    #[default]
    Primary = 0x40,
    Alt1 = 0x41,
    Alt2 = 0x42,
    Alt3 = 0x43,
}

impl DeviceAddress {
    pub fn addr(self) -> u8 {
        self as u8
    }
}

impl From<DeviceAddress> for u8 {
    fn from(address: DeviceAddress) -> Self {
        address.addr()
    }
}

/// Bit 12 of the configuration register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AcquisitionMode {
    /// Temperature or humidity is measured on each trigger
    Single,
    /// Temperature then humidity in sequence
    #[default]
    Sequential,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemperatureResolution {
    #[default]
    Bits14,
    Bits11,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HumidityResolution {
    #[default]
    Bits14,
    Bits11,
    Bits8,
}

impl HumidityResolution {
    fn bits(self) -> u16 {
        match self {
            HumidityResolution::Bits14 => 0b00,
            HumidityResolution::Bits11 => 0b01,
            HumidityResolution::Bits8 => 0b10,
        }
    }
}

/// Typed view of the 16-bit configuration register.
///
/// `Default` matches the power-on value `0x1000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Configuration {
    pub reset: bool,
    pub heater: bool,
    pub mode: AcquisitionMode,
    /// Read-only: supply below 2.8 V. Never rendered by [`Configuration::bits`].
    pub battery_low: bool,
    pub temperature_resolution: TemperatureResolution,
    pub humidity_resolution: HumidityResolution,
}

impl Configuration {
    /// Decodes a register word. Reserved bits are ignored; the reserved
    /// humidity resolution code `0b11` reads as 8-bit.
    pub fn from_bits(bits: u16) -> Self {
        let humidity_resolution = match (bits & HUM_RES_MASK) >> HUM_RES_SHIFT {
            0b00 => HumidityResolution::Bits14,
            0b01 => HumidityResolution::Bits11,
            _ => HumidityResolution::Bits8,
        };
        Self {
            reset: bits & RESET_BIT != 0,
            heater: bits & HEATER_BIT != 0,
            mode: if bits & MODE_BIT != 0 {
                AcquisitionMode::Sequential
            } else {
                AcquisitionMode::Single
            },
            battery_low: bits & BATTERY_BIT != 0,
            temperature_resolution: if bits & TEMP_RES_BIT != 0 {
                TemperatureResolution::Bits11
            } else {
                TemperatureResolution::Bits14
            },
            humidity_resolution,
        }
    }

    pub fn bits(&self) -> u16 {
        let mut bits = self.humidity_resolution.bits() << HUM_RES_SHIFT;
        if self.reset {
            bits |= RESET_BIT;
        }
        if self.heater {
            bits |= HEATER_BIT;
        }
        if self.mode == AcquisitionMode::Sequential {
            bits |= MODE_BIT;
        }
        if self.temperature_resolution == TemperatureResolution::Bits11 {
            bits |= TEMP_RES_BIT;
        }
        bits
    }

    pub fn with_heater(mut self, heater: bool) -> Self {
        self.heater = heater;
        self
    }

    pub fn with_mode(mut self, mode: AcquisitionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_temperature_resolution(mut self, resolution: TemperatureResolution) -> Self {
        self.temperature_resolution = resolution;
        self
    }

    pub fn with_humidity_resolution(mut self, resolution: HumidityResolution) -> Self {
        self.humidity_resolution = resolution;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_power_on_value() {
        assert_eq!(Configuration::default().bits(), 0x1000);
    }

    #[test]
    fn test_bit_positions() {
        let cfg = Configuration::default()
            .with_heater(true)
            .with_mode(AcquisitionMode::Single)
            .with_temperature_resolution(TemperatureResolution::Bits11)
            .with_humidity_resolution(HumidityResolution::Bits8);
        assert_eq!(cfg.bits(), 0b0010_0110_0000_0000);

        let reset = Configuration {
            reset: true,
            ..Configuration::default()
        };
        assert_eq!(reset.bits(), 0x9000);
    }

    #[test]
    fn test_decode_ignores_reserved_and_keeps_battery_flag() {
        let cfg = Configuration::from_bits(0x18FF);
        assert!(cfg.battery_low);
        assert_eq!(cfg.mode, AcquisitionMode::Sequential);
        assert_eq!(cfg.humidity_resolution, HumidityResolution::Bits14);
        // Battery status is read-only and reserved bits are dropped.
        assert_eq!(cfg.bits(), 0x1000);
    }

    #[test]
    fn test_humidity_resolution_codes() {
        assert_eq!(
            Configuration::from_bits(0x0100).humidity_resolution,
            HumidityResolution::Bits11
        );
        assert_eq!(
            Configuration::from_bits(0x0200).humidity_resolution,
            HumidityResolution::Bits8
        );
        assert_eq!(
            Configuration::from_bits(0x0300).humidity_resolution,
            HumidityResolution::Bits8
        );
    }

    #[test]
    fn test_device_addresses() {
        assert_eq!(u8::from(DeviceAddress::default()), 0x40);
        assert_eq!(DeviceAddress::Alt1.addr(), 0x41);
        assert_eq!(DeviceAddress::Alt2.addr(), 0x42);
        assert_eq!(DeviceAddress::Alt3.addr(), 0x43);
    }
}
