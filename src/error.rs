use std::error::Error;
use std::fmt;

#[cfg(target_os = "linux")]
use i2cdev::linux::LinuxI2CError;

/// Failure of a register read or write.
///
/// Always fatal to the operation that hit it. The driver never retries;
/// retrying the whole calibrate-configure-sample sequence is up to the caller.
#[derive(Debug)]
pub enum TransportError {
    /// Error reported by the underlying bus driver
    Bus(Box<dyn Error + Send + Sync>),
    /// The bus returned fewer bytes than requested
    ShortRead {
        register: u8,
        expected: usize,
        actual: usize,
    },
}

#[cfg(target_os = "linux")]
impl From<LinuxI2CError> for TransportError {
    fn from(e: LinuxI2CError) -> Self {
        TransportError::Bus(Box::new(e))
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            TransportError::Bus(ref e) => write!(f, "bus error: {}", e),
            TransportError::ShortRead {
                register,
                expected,
                actual,
            } => write!(
                f,
                "short read at register {:#04x}: expected {} bytes, got {}",
                register, expected, actual
            ),
        }
    }
}

impl Error for TransportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            TransportError::Bus(ref e) => Some(&**e),
            TransportError::ShortRead { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn short_read_names_register_and_counts() {
        let e = TransportError::ShortRead {
            register: 0x88,
            expected: 26,
            actual: 25,
        };
        assert_eq!(
            e.to_string(),
            "short read at register 0x88: expected 26 bytes, got 25"
        );
        assert!(e.source().is_none());
    }

    #[test]
    fn bus_error_keeps_source() {
        let cause = io::Error::new(io::ErrorKind::NotFound, "no such device");
        let e = TransportError::Bus(Box::new(cause));
        assert_eq!(e.to_string(), "bus error: no such device");
        assert_eq!(e.source().unwrap().to_string(), "no such device");
    }
}
