pub mod sensor_config;

pub use sensor_config::{load_reader_config, BusSection, ReaderConfig, SensorSection};
