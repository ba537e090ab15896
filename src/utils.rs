use std::num::ParseIntError;

pub fn read_unsigned_short(buf: &[u8], offset: usize) -> u16 {
    let v0 = buf[offset] as u16;
    let v1 = buf[offset + 1] as u16;
    v0 | (v1 << 8)
}

pub fn read_signed_short(buf: &[u8], offset: usize) -> i16 {
    read_unsigned_short(buf, offset) as i16
}

/// Unpacks the humidity coefficients H4 and H5 from registers 0xE4..0xE6.
///
/// The two 12-bit values share the middle byte: H4 takes its low nibble,
/// H5 its high nibble. The MSB byte is widened from `u8`, so the top four
/// bits of the `i16` are always zero and both results lie in `0..=4095`.
pub fn unpack_h4_h5(e4: u8, e5: u8, e6: u8) -> (i16, i16) {
    let h4 = ((e4 as i16) << 4) | (e5 & 0x0F) as i16;
    let h5 = ((e6 as i16) << 4) | (e5 >> 4) as i16;
    (h4, h5)
}

/// Parses an I2C slave address written as `0x`-prefixed hex (`0x76`),
/// leading-`0` octal (`0166`) or decimal (`118`).
///
/// Unlike `strtol`, the whole string must be valid in the chosen base:
/// `08` or `0x76z` is an error, not a truncated number.
pub fn parse_address(s: &str) -> Result<u16, ParseIntError> {
    let s = s.trim();
    if s.starts_with("0x") || s.starts_with("0X") {
        u16::from_str_radix(&s[2..], 16)
    } else if s.len() > 1 && s.starts_with('0') {
        u16::from_str_radix(&s[1..], 8)
    } else {
        s.parse::<u16>()
    }
}
