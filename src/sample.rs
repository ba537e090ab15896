use error::TransportError;
use registers::{PRESS_MSB, SAMPLE_LEN};
use transport::RegisterTransport;

/// Uncompensated ADC output of one conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSample {
    /// 20-bit
    pub temperature: i32,
    /// 20-bit
    pub pressure: i32,
    /// 16-bit
    pub humidity: i32,
}

fn twenty_bit(msb: u8, lsb: u8, xlsb: u8) -> i32 {
    ((msb as i32) << 12) | ((lsb as i32) << 4) | ((xlsb as i32) >> 4)
}

impl RawSample {
    /// Splits the 0xF7..0xFE burst: pressure, temperature, humidity.
    pub fn from_bytes(data: &[u8; SAMPLE_LEN]) -> RawSample {
        RawSample {
            pressure: twenty_bit(data[0], data[1], data[2]),
            temperature: twenty_bit(data[3], data[4], data[5]),
            humidity: ((data[6] as i32) << 8) | (data[7] as i32),
        }
    }
}

/// Reads all three ADC values in one burst so they belong to the same
/// conversion.
pub fn read_raw<T: RegisterTransport>(dev: &mut T) -> Result<RawSample, TransportError> {
    let mut data = [0u8; SAMPLE_LEN];
    dev.read_registers(PRESS_MSB, &mut data)?;
    let raw = RawSample::from_bytes(&data);
    trace!("Raw sample: {:?}", raw);
    Ok(raw)
}
