use std::time::Duration;

use tracing::{debug, info, warn};

use super::conversion::{raw_to_celsius, raw_to_relative_humidity};
use super::registers::{
    Configuration, DeviceAddress, CONFIGURATION, DEVICE_ID, HUMIDITY, MANUFACTURER_ID,
    RESET_COMMAND, SERIAL_ID_FIRST, SERIAL_ID_LAST, SERIAL_ID_MID, TEMPERATURE,
};
use crate::bus::{BusHandle, I2CTransport};
use crate::errors::{SensorError, SensorResult};

/// Start-up time after a software reset.
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_millis(15);

const MAX_7BIT_ADDRESS: u8 = 0x7F;

/// HDC1010 temperature and humidity sensor on an I2C bus.
///
/// The driver starts unbound. [`Hdc1010::begin`] opens a handle to the
/// device; every register operation before that returns
/// [`SensorError::NotInitialized`]. The handle is released when the driver is
/// re-bound, released, or dropped.
pub struct Hdc1010<T: I2CTransport> {
    transport: T,
    handle: Option<T::Handle>,
    address: Option<u8>,
    reset_delay: Duration,
}

impl<T: I2CTransport> Hdc1010<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            handle: None,
            address: None,
            reset_delay: DEFAULT_RESET_DELAY,
        }
    }

    pub fn with_reset_delay(mut self, reset_delay: Duration) -> Self {
        self.reset_delay = reset_delay;
        self
    }

    /// Binds to the primary address `0x40`.
    pub fn begin_default(&mut self) -> SensorResult<()> {
        self.begin(DeviceAddress::Primary.addr())
    }

    /// Opens a handle to `address` and soft-resets the device.
    ///
    /// Any previously held handle is released first. On failure the driver is
    /// left unbound.
    pub fn begin(&mut self, address: u8) -> SensorResult<()> {
        self.release();

        if address > MAX_7BIT_ADDRESS {
            return Err(SensorError::InvalidAddress { address });
        }

        let handle = self.transport.open(address).map_err(|source| {
            warn!("[hdc1010] no device at {:#04x}: {}", address, source);
            SensorError::DeviceNotPresent { address, source }
        })?;
        self.handle = Some(handle);
        self.address = Some(address);

        if let Err(e) = self.write_register16(CONFIGURATION, RESET_COMMAND) {
            self.release();
            return Err(e);
        }
        std::thread::sleep(self.reset_delay);

        info!("[hdc1010] bound at {:#04x}, reset issued", address);
        Ok(())
    }

    /// Drops the bus handle, leaving the driver unbound.
    pub fn release(&mut self) {
        if let Some(address) = self.address.take() {
            debug!("[hdc1010] releasing handle at {:#04x}", address);
        }
        self.handle = None;
    }

    pub fn reset_delay(&self) -> Duration {
        self.reset_delay
    }

    pub fn is_bound(&self) -> bool {
        self.handle.is_some()
    }

    /// Address of the bound device, if any.
    pub fn address(&self) -> Option<u8> {
        self.address
    }

    pub fn read_register8(&mut self, reg: u8) -> SensorResult<u8> {
        let mut buf = [0u8; 1];
        self.handle()?.read_bytes(reg, &mut buf)?;
        debug!("[hdc1010] read {:#04x} -> {:#04x}", reg, buf[0]);
        Ok(buf[0])
    }

    pub fn read_register16(&mut self, reg: u8) -> SensorResult<u16> {
        let mut buf = [0u8; 2];
        self.handle()?.read_bytes(reg, &mut buf)?;
        let value = u16::from_be_bytes(buf);
        debug!("[hdc1010] read {:#04x} -> {:#06x}", reg, value);
        Ok(value)
    }

    pub fn write_register8(&mut self, reg: u8, value: u8) -> SensorResult<()> {
        self.handle()?.write_bytes(reg, &[value])?;
        debug!("[hdc1010] wrote {:#04x} <- {:#04x}", reg, value);
        Ok(())
    }

    pub fn write_register16(&mut self, reg: u8, value: u16) -> SensorResult<()> {
        self.handle()?.write_bytes(reg, &value.to_be_bytes())?;
        debug!("[hdc1010] wrote {:#04x} <- {:#06x}", reg, value);
        Ok(())
    }

    /// Temperature in °C
    pub fn get_temperature(&mut self) -> SensorResult<f32> {
        self.get_raw_temperature().map(raw_to_celsius)
    }

    pub fn get_raw_temperature(&mut self) -> SensorResult<u16> {
        self.read_register16(TEMPERATURE)
    }

    /// Relative humidity in %RH
    pub fn get_humidity(&mut self) -> SensorResult<f32> {
        self.get_raw_humidity().map(raw_to_relative_humidity)
    }

    pub fn get_raw_humidity(&mut self) -> SensorResult<u16> {
        self.read_register16(HUMIDITY)
    }

    /// Writes `config` verbatim to the configuration register.
    pub fn set_configuration(&mut self, config: u16) -> SensorResult<()> {
        self.write_register16(CONFIGURATION, config)
    }

    pub fn configure(&mut self, config: Configuration) -> SensorResult<()> {
        self.set_configuration(config.bits())
    }

    pub fn get_configuration(&mut self) -> SensorResult<Configuration> {
        self.read_register16(CONFIGURATION).map(Configuration::from_bits)
    }

    pub fn read_manufacturer_id(&mut self) -> SensorResult<u16> {
        self.read_register16(MANUFACTURER_ID)
    }

    pub fn read_device_id(&mut self) -> SensorResult<u16> {
        self.read_register16(DEVICE_ID)
    }

    /// 41-bit factory serial number; the low 7 bits of the last word are unused.
    pub fn read_serial_id(&mut self) -> SensorResult<u64> {
        let first = self.read_register16(SERIAL_ID_FIRST)? as u64;
        let mid = self.read_register16(SERIAL_ID_MID)? as u64;
        let last = (self.read_register16(SERIAL_ID_LAST)? >> 7) as u64;
        Ok((first << 25) | (mid << 9) | last)
    }

    fn handle(&mut self) -> SensorResult<&mut T::Handle> {
        self.handle.as_mut().ok_or(SensorError::NotInitialized)
    }
}
