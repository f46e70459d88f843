pub mod i2c;
#[cfg(test)]
pub mod mock;

use thiserror::Error;

pub use self::i2c::I2CError;

/// Failure of a single bus transaction.
#[derive(Error, Debug)]
pub enum BusError {
    #[error("I2C device error: {0}")]
    Device(#[from] I2CError),

    #[error("no acknowledge from device at {address:#04x}")]
    Nack { address: u8 },
}

/// A live connection to one device address. Dropping it releases the connection.
pub trait BusHandle {
    /// Writes the register pointer `reg`, then reads `buf.len()` bytes.
    fn read_bytes(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), BusError>;

    /// Writes `reg` followed by `bytes` in one transaction.
    fn write_bytes(&mut self, reg: u8, bytes: &[u8]) -> Result<(), BusError>;
}

/// Platform I2C stack able to open handles to devices on one bus.
pub trait I2CTransport {
    type Handle: BusHandle;

    /// Opens a handle to `address`, failing if no device acknowledges there.
    fn open(&mut self, address: u8) -> Result<Self::Handle, BusError>;
}
