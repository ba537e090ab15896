//! # bme280-snapshot
//!
//! Takes one temperature, pressure and humidity reading from a BME280 over
//! the Linux I2C interface.
//!
//! The driver checks the chip id, reads the factory calibration, configures
//! the sensor (x1 oversampling, normal mode, 500 ms standby, no filter) and
//! waits for a fresh conversion. Compensation follows the datasheet's
//! fixed-point formulas exactly.
//!
//! # Examples
//! ```no_run
//! extern crate bme280_snapshot;
//! extern crate i2cdev;
//!
//! use bme280_snapshot::{Config, BME280};
//! use i2cdev::linux::LinuxI2CDevice;
//!
//! fn main() {
//!     let dev = LinuxI2CDevice::new("/dev/i2c-1", 0x76).unwrap();
//!     let mut bme280 = BME280::new(dev, Config::default()).unwrap();
//!     bme280.wait_for_measurement();
//!     let m = bme280.measure().unwrap();
//!     println!("{:.2}", m.temperature);
//!     println!("{:.2}", m.humidity);
//!     println!("{:.2}", m.pressure);
//! }
//! ```
//!
//! Any [`RegisterTransport`] works in place of `LinuxI2CDevice`.

extern crate i2cdev;
#[macro_use]
extern crate log;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate serde_json;

mod bme280;
pub mod calibration;
pub mod compensation;
pub mod error;
pub mod host;
pub mod registers;
pub mod report;
pub mod sample;
pub mod transport;
mod utils;

pub use bme280::*;
pub use calibration::{load_calibration, CalibrationSet};
pub use compensation::{
    compensate, compensate_humidity, compensate_pressure, compensate_temperature, FineTemperature,
    Measurement,
};
pub use error::TransportError;
pub use sample::{read_raw, RawSample};
pub use transport::RegisterTransport;
pub use utils::{parse_address, unpack_h4_h5};
