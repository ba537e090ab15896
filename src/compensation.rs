//! Fixed-point compensation from the BME280 datasheet, section 4.2.3.
//!
//! Every intermediate uses the integer width the datasheet prescribes (32
//! bits for temperature and humidity, 64 bits for pressure) with two's
//! complement wrap-around, so the results match the reference code bit for
//! bit. Only the final value is converted to floating point.

use calibration::CalibrationSet;
use sample::RawSample;

/// Upper clamp for the Q22.10 humidity intermediate before the final shift,
/// i.e. 100 %RH.
const HUMIDITY_MAX: i32 = 419_430_400;

/// Temperature in datasheet "t_fine" resolution.
///
/// Only [`compensate_temperature`] can produce one, so pressure and humidity
/// can't be compensated before temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FineTemperature(i32);

impl FineTemperature {
    pub fn value(&self) -> i32 {
        self.0
    }
}

/// A compensated reading in physical units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Degrees Celsius
    pub temperature: f64,
    /// Hectopascal
    pub pressure: f64,
    /// Percent relative humidity
    pub humidity: f64,
}

fn fine_temperature(adc_t: i32, c: &CalibrationSet) -> FineTemperature {
    let t1 = c.t1 as i32;
    let t2 = c.t2 as i32;
    let t3 = c.t3 as i32;

    let var1 = (adc_t >> 3).wrapping_sub(t1 << 1).wrapping_mul(t2) >> 11;
    let d = (adc_t >> 4).wrapping_sub(t1);
    let var2 = (d.wrapping_mul(d) >> 12).wrapping_mul(t3) >> 14;
    FineTemperature(var1.wrapping_add(var2))
}

/// Hundredths of a degree Celsius.
fn centi_celsius(t_fine: FineTemperature) -> i32 {
    t_fine.0.wrapping_mul(5).wrapping_add(128) >> 8
}

/// Returns °C together with the fine temperature needed by the other two
/// compensation steps.
pub fn compensate_temperature(adc_t: i32, c: &CalibrationSet) -> (f64, FineTemperature) {
    let t_fine = fine_temperature(adc_t, c);
    (centi_celsius(t_fine) as f64 / 100.0, t_fine)
}

/// Pascal in Q24.8, or `None` when the calibration makes the divisor zero.
fn pressure_q24_8(adc_p: i32, c: &CalibrationSet, t_fine: FineTemperature) -> Option<i64> {
    let mut var1 = t_fine.0 as i64 - 128_000;
    let mut var2 = var1.wrapping_mul(var1).wrapping_mul(c.p6 as i64);
    var2 = var2.wrapping_add(var1.wrapping_mul(c.p5 as i64) << 17);
    var2 = var2.wrapping_add((c.p4 as i64) << 35);
    var1 = (var1.wrapping_mul(var1).wrapping_mul(c.p3 as i64) >> 8)
        .wrapping_add(var1.wrapping_mul(c.p2 as i64) << 12);
    var1 = (1i64 << 47).wrapping_add(var1).wrapping_mul(c.p1 as i64) >> 33;
    if var1 == 0 {
        return None;
    }

    let mut p = 1_048_576 - adc_p as i64;
    p = (p << 31)
        .wrapping_sub(var2)
        .wrapping_mul(3125)
        .wrapping_div(var1);
    var1 = (c.p9 as i64).wrapping_mul(p >> 13).wrapping_mul(p >> 13) >> 25;
    var2 = (c.p8 as i64).wrapping_mul(p) >> 19;
    Some((p.wrapping_add(var1).wrapping_add(var2) >> 8).wrapping_add((c.p7 as i64) << 4))
}

/// Returns hPa, or exactly `0.0` if the calibration is degenerate (the
/// sensor is not ready or the coefficients are corrupt).
pub fn compensate_pressure(adc_p: i32, c: &CalibrationSet, t_fine: FineTemperature) -> f64 {
    match pressure_q24_8(adc_p, c, t_fine) {
        Some(p) => p as f64 / 25600.0,
        None => 0.0,
    }
}

/// %RH in Q22.10 before clamping.
fn humidity_unclamped(adc_h: i32, c: &CalibrationSet, t_fine: FineTemperature) -> i32 {
    let h1 = c.h1 as i32;
    let h2 = c.h2 as i32;
    let h3 = c.h3 as i32;
    let h4 = c.h4 as i32;
    let h5 = c.h5 as i32;
    let h6 = c.h6 as i32;

    let x = t_fine.0.wrapping_sub(76_800);
    let offset = (adc_h << 14)
        .wrapping_sub(h4 << 20)
        .wrapping_sub(h5.wrapping_mul(x))
        .wrapping_add(16_384)
        >> 15;
    let h3_term = (x.wrapping_mul(h3) >> 11).wrapping_add(32_768);
    let h6_term = (x.wrapping_mul(h6) >> 10).wrapping_mul(h3_term) >> 10;
    let scale = h6_term
        .wrapping_add(2_097_152)
        .wrapping_mul(h2)
        .wrapping_add(8192)
        >> 14;

    let v = offset.wrapping_mul(scale);
    let square = (v >> 15).wrapping_mul(v >> 15) >> 7;
    v.wrapping_sub(square.wrapping_mul(h1) >> 4)
}

/// Returns %RH, clamped to `0.0..=100.0`.
pub fn compensate_humidity(adc_h: i32, c: &CalibrationSet, t_fine: FineTemperature) -> f64 {
    let v = humidity_unclamped(adc_h, c, t_fine);
    let v = if v < 0 {
        0
    } else if v > HUMIDITY_MAX {
        HUMIDITY_MAX
    } else {
        v
    };
    (v >> 12) as f64 / 1024.0
}

/// Compensates a whole sample, temperature first.
pub fn compensate(raw: &RawSample, c: &CalibrationSet) -> Measurement {
    let (temperature, t_fine) = compensate_temperature(raw.temperature, c);
    Measurement {
        temperature: temperature,
        pressure: compensate_pressure(raw.pressure, c, t_fine),
        humidity: compensate_humidity(raw.humidity, c, t_fine),
    }
}
