//! Linux driver for the TI HDC1010 temperature and humidity sensor.
//!
//! The [`Hdc1010`] driver is generic over an [`I2CTransport`]; on Linux
//! [`LinuxI2CBus`] talks to a `/dev/i2c-N` adapter.
//!
//! ```no_run
//! use hdc1010_sensor::{Hdc1010, LinuxI2CBus};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut sensor = Hdc1010::new(LinuxI2CBus::new("/dev/i2c-1")?);
//! sensor.begin_default()?;
//! println!("{:.2} °C, {:.1} %RH", sensor.get_temperature()?, sensor.get_humidity()?);
//! # Ok(())
//! # }
//! ```

// Public modules
pub mod bus;
pub mod config;
pub mod errors;
pub mod messages;
pub mod sensors;

// Re-export commonly used types
pub use bus::i2c::LinuxI2CBus;
pub use bus::{BusError, BusHandle, I2CTransport};
pub use config::{load_reader_config, ReaderConfig};
pub use errors::{ConfigError, SensorError, SensorResult};
pub use messages::Reading;
pub use sensors::{Configuration, DeviceAddress, Hdc1010};

use tracing::level_filters::LevelFilter;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::sensors::registers::{DEVICE_ID_HDC1010, MANUFACTURER_ID_TI};

/// Log filter from `directives` (RUST_LOG syntax), `info` when none are given
pub fn env_filter_from(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives)
}

/// Log filter from the RUST_LOG environment variable
pub fn env_filter() -> EnvFilter {
    env_filter_from(&std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default())
}

/// Initialize tracing with default configuration
pub fn init_tracing() {
    tracing_subscriber::fmt().with_env_filter(env_filter()).init();
}

/// One temperature read followed by one humidity read
pub fn read_sample<T: I2CTransport>(sensor: &mut Hdc1010<T>) -> SensorResult<(u16, u16)> {
    let raw_temperature = sensor.get_raw_temperature()?;
    let raw_humidity = sensor.get_raw_humidity()?;
    Ok((raw_temperature, raw_humidity))
}

/// Run the reader with the configuration found in `config_path`
///
/// Bus reads block, so this must run on the multi-threaded runtime.
pub async fn run_reader(config_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    info!("[hdc1010-reader] starting up...");

    let sensor_config_path = format!("{}/sensor.toml", config_path);
    let config = load_reader_config(&sensor_config_path)?;
    info!("[config] loaded {} (bus {})", sensor_config_path, config.bus.path);

    let bus = LinuxI2CBus::new(&config.bus.path)?.with_read_delay(config.bus.read_delay());
    let mut sensor = Hdc1010::new(bus).with_reset_delay(config.sensor.reset_delay());
    sensor.begin(config.sensor.address()?)?;

    let manufacturer = sensor.read_manufacturer_id()?;
    let device = sensor.read_device_id()?;
    if manufacturer != MANUFACTURER_ID_TI || device != DEVICE_ID_HDC1010 {
        warn!(
            "[{}] unexpected identity: manufacturer {:#06x}, device {:#06x}",
            config.sensor.id, manufacturer, device
        );
    }

    let register = config.sensor.configuration()?;
    sensor.configure(register)?;
    info!("[{}] configuration {:#06x} applied", config.sensor.id, register.bits());

    let period = config.sensor.sample_period()?;
    let mut ticker = tokio::time::interval(period);
    let mut seq = 0u64;
    info!("[{}] sampling every {:?}", config.sensor.id, period);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let raw = tokio::task::block_in_place(|| read_sample(&mut sensor));
                match raw {
                    Ok((raw_temperature, raw_humidity)) => {
                        seq += 1;
                        let reading = Reading::from_raw(
                            config.sensor.id.clone(),
                            seq,
                            raw_temperature,
                            raw_humidity,
                        );
                        info!(
                            "[{}] {:.2} °C {:.1} %RH",
                            reading.sensor_id, reading.temperature, reading.humidity
                        );
                        match reading.to_json() {
                            Ok(json) => println!("{}", json),
                            Err(e) => error!("[{}] Failed to serialize reading: {}", reading.sensor_id, e),
                        }
                    }
                    Err(e) => error!("[{}] Sensor read error: {}", config.sensor.id, e),
                }
            }
            _ = &mut shutdown => {
                info!("[main] shutting down");
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::mock::{MockBus, Transaction};
    use std::time::Duration;
    use tracing::Level;

    fn debug_enabled(filter: EnvFilter) -> bool {
        let subscriber = tracing_subscriber::fmt().with_env_filter(filter).finish();
        tracing::subscriber::with_default(subscriber, || tracing::enabled!(Level::DEBUG))
    }

    fn info_enabled(filter: EnvFilter) -> bool {
        let subscriber = tracing_subscriber::fmt().with_env_filter(filter).finish();
        tracing::subscriber::with_default(subscriber, || tracing::enabled!(Level::INFO))
    }

    #[test]
    fn test_rust_log_debug_enables_debug() {
        std::env::set_var(EnvFilter::DEFAULT_ENV, "debug");
        assert!(debug_enabled(env_filter()));
        assert!(debug_enabled(env_filter_from("debug")));
        assert!(debug_enabled(env_filter_from("hdc1010_sensor=debug")));
    }

    #[test]
    fn test_default_filter_is_info() {
        assert!(info_enabled(env_filter_from("")));
        assert!(!debug_enabled(env_filter_from("")));
        assert!(!info_enabled(env_filter_from("warn")));
    }

    #[test]
    fn test_read_sample_reads_temperature_then_humidity() {
        let bus = MockBus::with_device(0x40);
        bus.set_register(0x00, &[0x12, 0x34]);
        bus.set_register(0x01, &[0x56, 0x78]);
        let mut sensor = Hdc1010::new(bus.clone()).with_reset_delay(Duration::ZERO);
        sensor.begin_default().unwrap();
        bus.clear_transactions();

        assert_eq!(read_sample(&mut sensor).unwrap(), (0x1234, 0x5678));
        assert_eq!(
            bus.transactions(),
            vec![
                Transaction::Read { address: 0x40, reg: 0x00, len: 2 },
                Transaction::Read { address: 0x40, reg: 0x01, len: 2 },
            ]
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_read_sample_inside_block_in_place() {
        let bus = MockBus::with_device(0x40);
        let mut sensor = Hdc1010::new(bus).with_reset_delay(Duration::ZERO);
        sensor.begin_default().unwrap();

        let raw = tokio::task::block_in_place(|| read_sample(&mut sensor));
        assert_eq!(raw.unwrap(), (0, 0));
    }
}
