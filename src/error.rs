//! Error types for MCP23017 operations.

use thiserror::Error;

/// Errors that can occur when driving an MCP23017.
///
/// Generic over `E`, the error type of the underlying I2C bus, so the same
/// taxonomy covers the Linux i2cdev transport and simulated buses alike.
/// Bus failures are never swallowed; every operation surfaces them so a
/// caller can tell "the read failed" apart from "the pin read zero".
#[derive(Error, Debug)]
pub enum Error<E> {
    /// The underlying I2C transaction failed (device absent or a transient
    /// bus fault).
    #[error("I2C bus error: {0:?}")]
    Bus(E),
    /// GPIO pin index outside the valid range for this chip.
    #[error("GPIO pin {pin} out of range (0-15)")]
    PinOutOfRange {
        /// The invalid pin index that was specified.
        pin: u8,
    },
    /// Slave address outside the range selectable by the A2..A0 pins.
    #[error("I2C address 0x{address:02X} out of range (0x20-0x27)")]
    AddressOutOfRange {
        /// The invalid address that was specified.
        address: u8,
    },
    /// Attempt to read a pin that is not configured as an input.
    #[error("GPIO pin {pin} is not configured as an input")]
    PinNotInput {
        /// The pin whose direction does not allow reading.
        pin: u8,
    },
}

// Lets `?` lift raw transport errors into the taxonomy. `#[from]` cannot be
// used here: it would demand `std::error::Error` from `E`, and the Linux
// transport error implements Debug only.
impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Error::Bus(err)
    }
}
