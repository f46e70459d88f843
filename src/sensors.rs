pub mod conversion;
pub mod hdc1010;
pub mod registers;

pub use self::conversion::{raw_to_celsius, raw_to_relative_humidity};
pub use self::hdc1010::{Hdc1010, DEFAULT_RESET_DELAY};
pub use self::registers::{
    AcquisitionMode, Configuration, DeviceAddress, HumidityResolution, TemperatureResolution,
};
