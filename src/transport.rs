#[cfg(target_os = "linux")]
use i2cdev::core::I2CDevice;
#[cfg(target_os = "linux")]
use i2cdev::linux::LinuxI2CDevice;

use error::TransportError;

/// Register-level access to the sensor.
///
/// A read selects the start register and then reads `buf.len()` contiguous
/// bytes. Implementations must fill the whole buffer or fail; they never
/// retry.
pub trait RegisterTransport {
    fn read_registers(&mut self, register: u8, buf: &mut [u8]) -> Result<(), TransportError>;

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), TransportError>;

    fn read_register(&mut self, register: u8) -> Result<u8, TransportError> {
        let mut buf = [0u8; 1];
        self.read_registers(register, &mut buf)?;
        Ok(buf[0])
    }
}

// Lets a caller lend a handle it keeps behind its own lock.
impl<'a, T: RegisterTransport + ?Sized> RegisterTransport for &'a mut T {
    fn read_registers(&mut self, register: u8, buf: &mut [u8]) -> Result<(), TransportError> {
        (**self).read_registers(register, buf)
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), TransportError> {
        (**self).write_register(register, value)
    }
}

/// Copies a bus reply into `buf` only if it has exactly the requested length.
///
/// `buf` is left untouched on a short (or long) reply.
pub fn fill_exact(register: u8, buf: &mut [u8], values: &[u8]) -> Result<(), TransportError> {
    if values.len() != buf.len() {
        return Err(TransportError::ShortRead {
            register: register,
            expected: buf.len(),
            actual: values.len(),
        });
    }
    buf.copy_from_slice(values);
    Ok(())
}

#[cfg(target_os = "linux")]
impl RegisterTransport for LinuxI2CDevice {
    fn read_registers(&mut self, register: u8, buf: &mut [u8]) -> Result<(), TransportError> {
        let values = self.smbus_read_i2c_block_data(register, buf.len() as u8)?;
        fill_exact(register, buf, &values)
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), TransportError> {
        self.smbus_write_byte_data(register, value)?;
        Ok(())
    }
}
