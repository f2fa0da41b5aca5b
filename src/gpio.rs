//! Pin vocabulary and the bit arithmetic behind the pin-level operations.

use crate::consts::{reg, NUM_GPIOS};
use crate::error::Error;

/// One of the two 8-bit ports of the expander.
///
/// Port A carries pins 0-7, port B pins 8-15. Every per-function register
/// (direction, pull-up, value, latch) exists once per port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Port {
    A,
    B,
}

impl Port {
    /// Direction register (IODIR) of this port.
    #[inline]
    pub fn iodir(self) -> u8 {
        match self {
            Port::A => reg::IODIRA,
            Port::B => reg::IODIRB,
        }
    }

    /// Pull-up enable register (GPPU) of this port.
    #[inline]
    pub fn gppu(self) -> u8 {
        match self {
            Port::A => reg::GPPUA,
            Port::B => reg::GPPUB,
        }
    }

    /// Port value register (GPIO) of this port.
    #[inline]
    pub fn gpio(self) -> u8 {
        match self {
            Port::A => reg::GPIOA,
            Port::B => reg::GPIOB,
        }
    }

    /// Output latch register (OLAT) of this port.
    #[inline]
    pub fn olat(self) -> u8 {
        match self {
            Port::A => reg::OLATA,
            Port::B => reg::OLATB,
        }
    }
}

/// Direction of a GPIO pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    Input,
    Output,
}

impl PinMode {
    /// The IODIR register encoding: 1 = input, 0 = output.
    #[inline]
    pub(crate) fn direction_level(self) -> Level {
        match self {
            PinMode::Input => Level::High,
            PinMode::Output => Level::Low,
        }
    }
}

/// Logic level of a GPIO pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl Level {
    /// The level as a register bit value (0 or 1).
    #[inline]
    pub fn bit(self) -> u8 {
        match self {
            Level::Low => 0,
            Level::High => 1,
        }
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Splits a logical pin index into its port and the bit position within
/// that port's registers. Pins 0-7 land on port A bits 0-7, pins 8-15 on
/// port B bits 0-7.
pub(crate) fn split_pin<E>(pin: u8) -> Result<(Port, u8), Error<E>> {
    if pin >= NUM_GPIOS {
        return Err(Error::PinOutOfRange { pin });
    }
    if pin < 8 {
        Ok((Port::A, pin))
    } else {
        Ok((Port::B, pin - 8))
    }
}

/// Returns `byte` with bit `bit` set or cleared according to `level`.
#[inline]
pub(crate) fn set_bit(byte: u8, bit: u8, level: Level) -> u8 {
    match level {
        Level::High => byte | (1 << bit),
        Level::Low => byte & !(1 << bit),
    }
}
