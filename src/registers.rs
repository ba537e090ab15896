//! BME280 register map.

pub const CHIP_ID: u8 = 0xD0;
pub const CTRL_HUM: u8 = 0xF2;
pub const STATUS: u8 = 0xF3;
pub const CTRL_MEAS: u8 = 0xF4;
pub const CONFIG: u8 = 0xF5;
/// Start of the press/temp/hum burst (0xF7..0xFE).
pub const PRESS_MSB: u8 = 0xF7;
/// 0x88..0xA1, temperature and pressure coefficients plus H1.
pub const CALIB_A: u8 = 0x88;
/// 0xE1..0xE7, H2..H6.
pub const CALIB_B: u8 = 0xE1;

pub const CALIB_A_LEN: usize = 26;
pub const CALIB_B_LEN: usize = 7;
pub const SAMPLE_LEN: usize = 8;

pub const EXPECTED_CHIP_ID: u8 = 0x60;
/// STATUS bit set while a conversion is running.
pub const STATUS_MEASURING: u8 = 0x08;
