use error::TransportError;
use registers::{CALIB_A, CALIB_A_LEN, CALIB_B, CALIB_B_LEN};
use transport::RegisterTransport;
use utils::*;

/// Factory trimming coefficients burned into the sensor's NVM.
///
/// Only produced by decoding the two calibration blocks in one go, so a
/// value of this type is always complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationSet {
    pub t1: u16,
    pub t2: i16,
    pub t3: i16,

    pub p1: u16,
    pub p2: i16,
    pub p3: i16,
    pub p4: i16,
    pub p5: i16,
    pub p6: i16,
    pub p7: i16,
    pub p8: i16,
    pub p9: i16,

    pub h1: u8,
    pub h2: i16,
    pub h3: u8,
    pub h4: i16,
    pub h5: i16,
    pub h6: i8,
}

impl CalibrationSet {
    /// Decodes block A (0x88..0xA1) and block B (0xE1..0xE7).
    pub fn from_blocks(a: &[u8; CALIB_A_LEN], b: &[u8; CALIB_B_LEN]) -> CalibrationSet {
        let (h4, h5) = unpack_h4_h5(b[3], b[4], b[5]);
        CalibrationSet {
            t1: read_unsigned_short(a, 0),
            t2: read_signed_short(a, 2),
            t3: read_signed_short(a, 4),

            p1: read_unsigned_short(a, 6),
            p2: read_signed_short(a, 8),
            p3: read_signed_short(a, 10),
            p4: read_signed_short(a, 12),
            p5: read_signed_short(a, 14),
            p6: read_signed_short(a, 16),
            p7: read_signed_short(a, 18),
            p8: read_signed_short(a, 20),
            p9: read_signed_short(a, 22),

            // a[24] (0xA0) is unused
            h1: a[25],
            h2: read_signed_short(b, 0),
            h3: b[2],
            h4: h4,
            h5: h5,
            h6: b[6] as i8,
        }
    }

    pub fn load<T: RegisterTransport>(dev: &mut T) -> Result<CalibrationSet, TransportError> {
        let mut a = [0u8; CALIB_A_LEN];
        let mut b = [0u8; CALIB_B_LEN];
        dev.read_registers(CALIB_A, &mut a)?;
        dev.read_registers(CALIB_B, &mut b)?;
        let calibration = CalibrationSet::from_blocks(&a, &b);
        debug!("Calibration coefficients: {:?}", calibration);
        Ok(calibration)
    }
}

/// Reads both calibration blocks and decodes them.
///
/// Fails if either read fails or comes back short; nothing is returned for a
/// half-read sensor.
pub fn load_calibration<T: RegisterTransport>(dev: &mut T) -> Result<CalibrationSet, TransportError> {
    CalibrationSet::load(dev)
}
