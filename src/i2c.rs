//! I2C register transport for the expander.

use embedded_hal::i2c::I2c;
use linux_embedded_hal::{I2CError, I2cdev};
use log::{debug, trace};

use crate::consts::{MAX_ADDRESS, MIN_ADDRESS};
use crate::error::Error;

/// Register-level access to one MCP23017 on an I2C bus.
///
/// Wraps any [`embedded_hal::i2c::I2c`] implementation together with the
/// device's 7-bit slave address and exposes the two primitives everything
/// else is built from: write one register byte, read one register byte.
#[derive(Debug)]
pub struct I2cRegisters<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> I2cRegisters<I2C> {
    /// Wraps an already opened bus, checking the slave address against the
    /// range reachable through the A2..A0 strapping pins (0x20-0x27).
    pub fn new(i2c: I2C, address: u8) -> Result<Self, Error<I2C::Error>> {
        if !(MIN_ADDRESS..=MAX_ADDRESS).contains(&address) {
            return Err(Error::AddressOutOfRange { address });
        }
        Ok(Self { i2c, address })
    }

    /// The device's 7-bit slave address.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Writes one byte to a register.
    pub fn write_register(&mut self, reg: u8, value: u8) -> Result<(), Error<I2C::Error>> {
        trace!("Write Reg 0x{:02X} = 0x{:02X}", reg, value);
        self.i2c.write(self.address, &[reg, value])?;
        Ok(())
    }

    /// Reads one byte from a register.
    pub fn read_register(&mut self, reg: u8) -> Result<u8, Error<I2C::Error>> {
        let mut buf = [0u8; 1];
        self.i2c.write_read(self.address, &[reg], &mut buf)?;
        trace!("Read Reg 0x{:02X} = 0x{:02X}", reg, buf[0]);
        Ok(buf[0])
    }

    /// Consumes the transport and hands back the bus.
    pub fn free(self) -> I2C {
        self.i2c
    }
}

impl I2cRegisters<I2cdev> {
    /// Opens `/dev/i2c-{bus}` and wraps the device behind `address` on it.
    ///
    /// Fails with the bus-error variant if the device node does not exist
    /// or cannot be opened.
    pub fn open(bus: u8, address: u8) -> Result<Self, Error<I2CError>> {
        let path = format!("/dev/i2c-{}", bus);
        debug!("Opening {} for device 0x{:02X}", path, address);
        let i2c = I2cdev::new(&path).map_err(|e| Error::Bus(I2CError::from(e)))?;
        Self::new(i2c, address)
    }
}
