use std::time::Duration;

use super::{BusError, BusHandle, I2CTransport};

#[cfg(target_os = "linux")]
use i2cdev::core::I2CDevice;
#[cfg(target_os = "linux")]
use i2cdev::linux::{LinuxI2CDevice, LinuxI2CError};
#[cfg(target_os = "linux")]
use tracing::debug;

/// I2C device error type - platform specific
#[cfg(target_os = "linux")]
pub type I2CError = LinuxI2CError;

#[cfg(not(target_os = "linux"))]
#[derive(Debug)]
pub struct I2CError(String);

#[cfg(not(target_os = "linux"))]
impl std::fmt::Display for I2CError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "I2C not supported on this platform: {}", self.0)
    }
}

#[cfg(not(target_os = "linux"))]
impl std::error::Error for I2CError {}

/// 14-bit conversion takes 6.35 ms; the next whole millisecond is used.
pub const DEFAULT_READ_DELAY: Duration = Duration::from_millis(7);

/// I2C bus implementation backed by a `/dev/i2c-N` character device
#[cfg(target_os = "linux")]
pub struct LinuxI2CBus {
    path: String,
    read_delay: Duration,
}

#[cfg(not(target_os = "linux"))]
pub struct LinuxI2CBus {
    _phantom: std::marker::PhantomData<()>,
}

/// Open connection to one device on a [`LinuxI2CBus`]
#[cfg(target_os = "linux")]
pub struct LinuxI2CHandle {
    device: LinuxI2CDevice,
    read_delay: Duration,
}

/// Handle type for platforms without Linux I2C; it can never be constructed.
#[cfg(not(target_os = "linux"))]
pub enum LinuxI2CHandle {}

#[cfg(target_os = "linux")]
impl LinuxI2CBus {
    pub fn new(path: &str) -> Result<Self, BusError> {
        // Fails early if the adapter node is missing or not accessible.
        LinuxI2CDevice::new(path, 0)?;
        Ok(Self {
            path: path.to_string(),
            read_delay: DEFAULT_READ_DELAY,
        })
    }

    /// Sets the wait between the register-pointer write and the data read.
    pub fn with_read_delay(mut self, read_delay: Duration) -> Self {
        self.read_delay = read_delay;
        self
    }
}

#[cfg(target_os = "linux")]
impl I2CTransport for LinuxI2CBus {
    type Handle = LinuxI2CHandle;

    fn open(&mut self, address: u8) -> Result<LinuxI2CHandle, BusError> {
        let mut device = LinuxI2CDevice::new(&self.path, address as u16)?;

        // Presence probe: a quick write is acknowledged only by a live device.
        if let Err(e) = device.smbus_write_quick(false) {
            debug!("[i2c] probe of {:#04x} on {} failed: {}", address, self.path, e);
            return Err(BusError::Nack { address });
        }

        Ok(LinuxI2CHandle {
            device,
            read_delay: self.read_delay,
        })
    }
}

#[cfg(target_os = "linux")]
impl BusHandle for LinuxI2CHandle {
    fn read_bytes(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), BusError> {
        self.device.write(&[reg])?;
        if !self.read_delay.is_zero() {
            std::thread::sleep(self.read_delay);
        }
        self.device.read(buf)?;
        Ok(())
    }

    fn write_bytes(&mut self, reg: u8, bytes: &[u8]) -> Result<(), BusError> {
        let mut frame = Vec::with_capacity(bytes.len() + 1);
        frame.push(reg);
        frame.extend_from_slice(bytes);
        self.device.write(&frame)?;
        Ok(())
    }
}

#[cfg(not(target_os = "linux"))]
impl LinuxI2CBus {
    pub fn new(_path: &str) -> Result<Self, BusError> {
        Err(I2CError("I2C is only supported on Linux".to_string()).into())
    }

    pub fn with_read_delay(self, _read_delay: Duration) -> Self {
        self
    }
}

#[cfg(not(target_os = "linux"))]
impl I2CTransport for LinuxI2CBus {
    type Handle = LinuxI2CHandle;

    fn open(&mut self, _address: u8) -> Result<LinuxI2CHandle, BusError> {
        Err(I2CError("I2C is only supported on Linux".to_string()).into())
    }
}

#[cfg(not(target_os = "linux"))]
impl BusHandle for LinuxI2CHandle {
    fn read_bytes(&mut self, _reg: u8, _buf: &mut [u8]) -> Result<(), BusError> {
        match *self {}
    }

    fn write_bytes(&mut self, _reg: u8, _bytes: &[u8]) -> Result<(), BusError> {
        match *self {}
    }
}
