//! Pin-level driver for the MCP23017 port expander.

use embedded_hal::i2c::I2c;
use linux_embedded_hal::{I2CError, I2cdev};
use log::{debug, trace};

use crate::consts::{reg, NUM_GPIOS};
use crate::error::Error;
use crate::gpio::{set_bit, split_pin, Level, PinMode, Port};
use crate::i2c::I2cRegisters;

/// Driver for one MCP23017, holding shadow copies of the direction and
/// pull-up registers.
///
/// Pin operations take a logical pin index 0-15: pins 0-7 live on port A,
/// pins 8-15 on port B. Register read-modify-write sequences are two bus
/// transactions and nothing makes the pair atomic at the hardware level;
/// the `&mut self` receivers serialize them per instance. Sharing one
/// expander across threads requires an external `Mutex` around it.
#[derive(Debug)]
pub struct Mcp23017<I2C> {
    regs: I2cRegisters<I2C>,
    direction: u16,
    pullups: u16,
}

impl<I2C: I2c> Mcp23017<I2C> {
    /// Takes ownership of a bus and resets the device at `address` to a
    /// known state: all 16 pins inputs, all pull-ups disabled.
    ///
    /// The forced all-input direction is read back from the hardware rather
    /// than assumed, so the shadow state starts from what the device
    /// actually holds. Any failing step aborts the reset.
    pub fn new(i2c: I2C, address: u8) -> Result<Self, Error<I2C::Error>> {
        let regs = I2cRegisters::new(i2c, address)?;
        Self::init(regs)
    }

    fn init(mut regs: I2cRegisters<I2C>) -> Result<Self, Error<I2C::Error>> {
        debug!(
            "Resetting MCP23017 at 0x{:02X}: all pins input, pull-ups off",
            regs.address()
        );
        regs.write_register(reg::IODIRA, 0xFF)?;
        regs.write_register(reg::IODIRB, 0xFF)?;
        let dir_a = regs.read_register(reg::IODIRA)?;
        let dir_b = regs.read_register(reg::IODIRB)?;
        regs.write_register(reg::GPPUA, 0x00)?;
        regs.write_register(reg::GPPUB, 0x00)?;
        Ok(Self {
            regs,
            direction: u16::from(dir_a) | (u16::from(dir_b) << 8),
            pullups: 0,
        })
    }

    /// Configures a pin as input or output.
    ///
    /// Updates the IODIR register of the pin's port and mirrors the new
    /// byte into the matching half of the direction cache, leaving the
    /// other port's half untouched.
    pub fn configure(&mut self, pin: u8, mode: PinMode) -> Result<(), Error<I2C::Error>> {
        let (port, bit) = split_pin(pin)?;
        debug!("Configure pin {} as {:?}", pin, mode);
        let updated = self.update_register_bit(port.iodir(), bit, mode.direction_level(), None)?;
        self.direction = merge_port_byte(self.direction, port, updated);
        Ok(())
    }

    /// Enables or disables the internal 100 kΩ pull-up of a pin.
    ///
    /// Issues one read-modify-write against the GPPU register of the pin's
    /// port and mirrors the result into the pull-up cache. Returns the new
    /// register byte; for port-B pins the byte comes back shifted left 8
    /// bits, matching its position in the combined cache (port-A bytes are
    /// not shifted). Mask the result with `1 << pin` to test a single pin.
    pub fn set_pullup(&mut self, pin: u8, level: Level) -> Result<u16, Error<I2C::Error>> {
        let (port, bit) = split_pin(pin)?;
        debug!("Pull-up pin {} -> {:?}", pin, level);
        let updated = self.update_register_bit(port.gppu(), bit, level, None)?;
        self.pullups = merge_port_byte(self.pullups, port, updated);
        Ok(port_result(port, updated))
    }

    /// Drives an output pin high or low.
    ///
    /// Reads the port's output latch (OLAT) and writes the updated byte to
    /// the GPIO register with the latch value as the baseline, so the last
    /// written state of the port's other pins is preserved. Returns the new
    /// byte, shifted left 8 bits for port-B pins (same convention as
    /// [`Mcp23017::set_pullup`]). The pin's direction is not touched;
    /// configure it as an output first.
    pub fn set_output(&mut self, pin: u8, level: Level) -> Result<u16, Error<I2C::Error>> {
        let (port, bit) = split_pin(pin)?;
        trace!("Drive pin {} {:?}", pin, level);
        let latch = self.regs.read_register(port.olat())?;
        let updated = self.update_register_bit(port.gpio(), bit, level, Some(latch))?;
        Ok(port_result(port, updated))
    }

    /// Reads the level of an input pin.
    ///
    /// The pin must be configured as an input, either through
    /// [`Mcp23017::configure`] or by being untouched since the all-input
    /// reset; otherwise this fails without touching the bus. Reads both
    /// GPIO registers and returns the combined 16-bit value masked to the
    /// pin's position: zero means low, `1 << pin` means high. Shift right
    /// by the pin index to get a 0/1 value.
    pub fn read_input(&mut self, pin: u8) -> Result<u16, Error<I2C::Error>> {
        if pin >= NUM_GPIOS {
            return Err(Error::PinOutOfRange { pin });
        }
        if (self.direction & (1 << pin)) == 0 {
            return Err(Error::PinNotInput { pin });
        }
        let a = self.regs.read_register(reg::GPIOA)?;
        let b = self.regs.read_register(reg::GPIOB)?;
        let combined = u16::from(a) | (u16::from(b) << 8);
        trace!("Read pins = 0x{:04X}", combined);
        Ok(combined & (1 << pin))
    }

    /// Refreshes both shadow caches from the hardware.
    ///
    /// Intended for recovery after the device changed state behind the
    /// driver's back (external reset, power glitch); the caches are
    /// otherwise only updated by what this driver writes.
    pub fn resync(&mut self) -> Result<(), Error<I2C::Error>> {
        let dir_a = self.regs.read_register(reg::IODIRA)?;
        let dir_b = self.regs.read_register(reg::IODIRB)?;
        self.direction = u16::from(dir_a) | (u16::from(dir_b) << 8);
        let pu_a = self.regs.read_register(reg::GPPUA)?;
        let pu_b = self.regs.read_register(reg::GPPUB)?;
        self.pullups = u16::from(pu_a) | (u16::from(pu_b) << 8);
        debug!(
            "Resynced: direction=0x{:04X}, pull-ups=0x{:04X}",
            self.direction, self.pullups
        );
        Ok(())
    }

    /// Combined IODIR shadow: bit *n* set means pin *n* is an input.
    pub fn direction(&self) -> u16 {
        self.direction
    }

    /// Combined GPPU shadow: bit *n* set means pin *n* has its pull-up on.
    pub fn pullups(&self) -> u16 {
        self.pullups
    }

    /// The device's 7-bit slave address.
    pub fn address(&self) -> u8 {
        self.regs.address()
    }

    /// Consumes the driver and hands back the bus.
    pub fn free(self) -> I2C {
        self.regs.free()
    }

    /// Read-modify-write of a single register bit.
    ///
    /// `current` short-circuits the read when the caller already holds the
    /// register byte (the OLAT baseline of an output write). Returns the
    /// byte that was written. The read and the write are separate bus
    /// transactions.
    fn update_register_bit(
        &mut self,
        register: u8,
        bit: u8,
        level: Level,
        current: Option<u8>,
    ) -> Result<u8, Error<I2C::Error>> {
        let value = match current {
            Some(byte) => byte,
            None => self.regs.read_register(register)?,
        };
        let updated = set_bit(value, bit, level);
        self.regs.write_register(register, updated)?;
        Ok(updated)
    }
}

impl Mcp23017<I2cdev> {
    /// Opens `/dev/i2c-{bus}` and resets the device at `address`.
    pub fn open(bus: u8, address: u8) -> Result<Self, Error<I2CError>> {
        let regs = I2cRegisters::open(bus, address)?;
        Self::init(regs)
    }
}

/// Replaces one port's byte within a combined 16-bit shadow value.
fn merge_port_byte(combined: u16, port: Port, byte: u8) -> u16 {
    match port {
        Port::A => (combined & 0xFF00) | u16::from(byte),
        Port::B => (combined & 0x00FF) | (u16::from(byte) << 8),
    }
}

/// Operation result convention: port-B bytes are reported shifted into the
/// high half, port-A bytes as-is.
fn port_result(port: Port, byte: u8) -> u16 {
    match port {
        Port::A => u16::from(byte),
        Port::B => u16::from(byte) << 8,
    }
}
