use std::thread;
use std::time::Duration;

use calibration::CalibrationSet;
use compensation::{compensate, Measurement};
use error::TransportError;
use registers::*;
use sample::{self, RawSample};
use transport::RegisterTransport;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Sleep,
    Force,
    Normal,
}

fn to_value(mode: Mode) -> u8 {
    match mode {
        Mode::Sleep => 0,
        Mode::Force => 1,
        Mode::Normal => 3,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Oversampling {
    Skip = 0,
    X1 = 1,
    X2 = 2,
    X4 = 3,
    X8 = 4,
    X16 = 5,
}

/// Inactive time between conversions in normal mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StandbyTime {
    Ms0_5 = 0,
    Ms62_5 = 1,
    Ms125 = 2,
    Ms250 = 3,
    Ms500 = 4,
    Ms1000 = 5,
    Ms10 = 6,
    Ms20 = 7,
}

/// IIR filter coefficient.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Filter {
    Off = 0,
    X2 = 1,
    X4 = 2,
    X8 = 3,
    X16 = 4,
}

/// Sensor settings, written once when the driver is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pub mode: Mode,
    pub oversampling_temperature: Oversampling,
    pub oversampling_pressure: Oversampling,
    pub oversampling_humidity: Oversampling,
    pub standby_time: StandbyTime,
    pub iir_filter: Filter,
    pub spi3w_enabled: bool,
}

impl Default for Config {
    /// x1 oversampling everywhere, normal mode, 500 ms standby, no filter.
    fn default() -> Config {
        Config {
            mode: Mode::Normal,
            oversampling_temperature: Oversampling::X1,
            oversampling_pressure: Oversampling::X1,
            oversampling_humidity: Oversampling::X1,
            standby_time: StandbyTime::Ms500,
            iir_filter: Filter::Off,
            spi3w_enabled: false,
        }
    }
}

impl Config {
    pub fn ctrl_hum(&self) -> u8 {
        self.oversampling_humidity as u8
    }

    pub fn ctrl_meas(&self) -> u8 {
        ((self.oversampling_temperature as u8) << 5)
            | ((self.oversampling_pressure as u8) << 2)
            | to_value(self.mode)
    }

    pub fn config(&self) -> u8 {
        ((self.standby_time as u8) << 5) | ((self.iir_filter as u8) << 2) | (self.spi3w_enabled as u8)
    }
}

/// How long to wait for a fresh conversion after configuring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettleTiming {
    pub settle: Duration,
    pub poll_interval: Duration,
    pub poll_attempts: u32,
}

impl Default for SettleTiming {
    fn default() -> SettleTiming {
        SettleTiming {
            settle: Duration::from_millis(100),
            poll_interval: Duration::from_millis(20),
            poll_attempts: 5,
        }
    }
}

pub struct BME280<T: RegisterTransport> {
    device: T,
    config: Config,
    timing: SettleTiming,
    chip_id: u8,
    calibration: CalibrationSet,
}

impl<T: RegisterTransport> BME280<T> {
    /// Checks the chip id, loads the calibration and applies `config`.
    ///
    /// An unexpected chip id is only logged. Any transport failure aborts
    /// and drops `dev`.
    pub fn new(dev: T, config: Config) -> Result<BME280<T>, TransportError> {
        BME280::with_timing(dev, config, SettleTiming::default())
    }

    pub fn with_timing(mut dev: T, config: Config, timing: SettleTiming) -> Result<BME280<T>, TransportError> {
        let chip_id = dev.read_register(CHIP_ID)?;
        if chip_id != EXPECTED_CHIP_ID {
            warn!(
                "Unexpected chip id {:#04x} (expected {:#04x}), check wiring and address",
                chip_id, EXPECTED_CHIP_ID
            );
        } else {
            debug!("BME280 chip id {:#04x}", chip_id);
        }

        let calibration = CalibrationSet::load(&mut dev)?;
        let mut bme280 = BME280 {
            device: dev,
            config: config,
            timing: timing,
            chip_id: chip_id,
            calibration: calibration,
        };
        bme280.initialize()?;
        Ok(bme280)
    }

    fn initialize(&mut self) -> Result<(), TransportError> {
        let writes = [
            // ctrl_hum has to be written before ctrl_meas
            (CTRL_HUM, self.config.ctrl_hum()),
            (CTRL_MEAS, self.config.ctrl_meas()),
            (CONFIG, self.config.config()),
        ];
        for &(register, value) in writes.iter() {
            debug!("Setting register {:#04x} to {:#010b}", register, value);
            self.device.write_register(register, value)?;
        }
        Ok(())
    }

    pub fn chip_id(&self) -> u8 {
        self.chip_id
    }

    pub fn is_bme280(&self) -> bool {
        self.chip_id == EXPECTED_CHIP_ID
    }

    pub fn calibration(&self) -> &CalibrationSet {
        &self.calibration
    }

    /// Sleeps for the settle time, then polls the measuring flag until it
    /// clears or the attempts run out.
    ///
    /// Returns whether the flag was seen clear. Running out of attempts is
    /// not an error; the next sample is simply taken as is.
    pub fn wait_for_measurement(&mut self) -> bool {
        thread::sleep(self.timing.settle);
        for attempt in 0..self.timing.poll_attempts {
            match self.device.read_register(STATUS) {
                Ok(status) if status & STATUS_MEASURING == 0 => {
                    trace!("Conversion complete after {} polls", attempt + 1);
                    return true;
                }
                Ok(status) => trace!("Still measuring, status {:#04x}", status),
                Err(e) => warn!("Status read failed: {}", e),
            }
            thread::sleep(self.timing.poll_interval);
        }
        warn!(
            "Measuring flag still set after {} polls, sampling anyway",
            self.timing.poll_attempts
        );
        false
    }

    pub fn read_raw(&mut self) -> Result<RawSample, TransportError> {
        sample::read_raw(&mut self.device)
    }

    /// Reads one sample and compensates it.
    pub fn measure(&mut self) -> Result<Measurement, TransportError> {
        let raw = self.read_raw()?;
        Ok(compensate(&raw, &self.calibration))
    }

    /// Gives the transport back.
    pub fn release(self) -> T {
        self.device
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calibration::tests::{reference_calibration, BLOCK_A, BLOCK_B};
    use transport::mock::MockBus;

    fn no_wait() -> SettleTiming {
        SettleTiming {
            settle: Duration::from_millis(0),
            poll_interval: Duration::from_millis(0),
            poll_attempts: 5,
        }
    }

    fn sensor_bus() -> MockBus {
        MockBus::new()
            .with_block(CHIP_ID, &[EXPECTED_CHIP_ID])
            .with_block(CALIB_A, &BLOCK_A)
            .with_block(CALIB_B, &BLOCK_B)
            .with_block(PRESS_MSB, &[0x65, 0x5A, 0xC0, 0x7E, 0xED, 0x00, 0x75, 0x30])
    }

    #[test]
    fn default_config_register_values() {
        let config = Config::default();
        assert_eq!(config.ctrl_hum(), 0x01);
        assert_eq!(config.ctrl_meas(), 0x27);
        assert_eq!(config.config(), 0x80);
    }

    #[test]
    fn other_config_register_values() {
        let config = Config {
            mode: Mode::Force,
            oversampling_temperature: Oversampling::X2,
            oversampling_pressure: Oversampling::X16,
            oversampling_humidity: Oversampling::X4,
            standby_time: StandbyTime::Ms1000,
            iir_filter: Filter::X4,
            spi3w_enabled: true,
        };
        assert_eq!(config.ctrl_hum(), 0x03);
        assert_eq!(config.ctrl_meas(), 0b010_101_01);
        assert_eq!(config.config(), 0b101_010_01);
    }

    #[test]
    fn new_loads_calibration_then_configures() {
        let bme280 = BME280::with_timing(sensor_bus(), Config::default(), no_wait()).unwrap();
        assert!(bme280.is_bme280());
        assert_eq!(*bme280.calibration(), reference_calibration());
        let bus = bme280.release();
        assert_eq!(bus.writes, vec![(CTRL_HUM, 0x01), (CTRL_MEAS, 0x27), (CONFIG, 0x80)]);
    }

    #[test]
    fn chip_id_mismatch_is_not_fatal() {
        let bus = sensor_bus().with_block(CHIP_ID, &[0x58]);
        let mut bme280 = BME280::with_timing(bus, Config::default(), no_wait()).unwrap();
        assert_eq!(bme280.chip_id(), 0x58);
        assert!(!bme280.is_bme280());
        assert!(bme280.measure().is_ok());
    }

    #[test]
    fn calibration_failure_aborts_before_configuring() {
        let mut bus = sensor_bus();
        bus.short_read_at = Some(CALIB_B);
        assert!(BME280::with_timing(bus, Config::default(), no_wait()).is_err());
    }

    #[test]
    fn wait_stops_once_flag_clears() {
        let mut bus = sensor_bus();
        bus.busy_polls = 2;
        let mut bme280 = BME280::with_timing(bus, Config::default(), no_wait()).unwrap();
        assert!(bme280.wait_for_measurement());
        assert_eq!(bme280.release().status_reads, 3);
    }

    #[test]
    fn wait_gives_up_after_bounded_polls() {
        let mut bus = sensor_bus();
        bus.busy_polls = 100;
        let mut bme280 = BME280::with_timing(bus, Config::default(), no_wait()).unwrap();
        assert!(!bme280.wait_for_measurement());
        assert!(bme280.measure().is_ok());
        assert_eq!(bme280.release().status_reads, 5);
    }

    #[test]
    fn status_read_failure_counts_as_busy() {
        let mut bus = sensor_bus();
        bus.short_read_at = Some(STATUS);
        let mut bme280 = BME280::with_timing(bus, Config::default(), no_wait()).unwrap();
        assert!(!bme280.wait_for_measurement());
    }

    #[test]
    fn measures_reference_sample() {
        let mut bme280 = BME280::with_timing(sensor_bus(), Config::default(), no_wait()).unwrap();
        assert!(bme280.wait_for_measurement());
        let m = bme280.measure().unwrap();
        assert_eq!(m.temperature, 25.08);
        assert_eq!(m.pressure, 1006.5325390625);
        assert_eq!(m.humidity, 49.46484375);
    }

    #[test]
    fn short_sample_read_fails_measurement() {
        let mut bus = sensor_bus();
        bus.short_read_at = Some(PRESS_MSB);
        let mut bme280 = BME280::with_timing(bus, Config::default(), no_wait()).unwrap();
        assert!(bme280.measure().is_err());
    }
}
