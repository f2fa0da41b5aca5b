//! # mcp23017-i2c
//!
//! A Rust crate for controlling the Microchip MCP23017 16-bit I/O expander
//! over a Linux I2C bus (`/dev/i2c-N`), plus a small `mcp23017` command-line
//! tool built on it.
//!
//! The driver itself is generic over the [`embedded_hal::i2c::I2c`] trait,
//! so it also runs against any other bus implementation, including the
//! simulated buses used by its test suite.
//!
//! ## Features
//!
//! *   Device reset to a known state on open (all pins input, pull-ups off),
//!     with the direction read back from the hardware.
//! *   Pin-level operations across both ports: direction (`configure`),
//!     output drive (`set_output`), input read (`read_input`) and pull-up
//!     control (`set_pullup`).
//! *   Shadow caches of the direction and pull-up registers, with an
//!     explicit `resync` for recovery after an external device reset.
//! *   Errors are real errors: bus failures, out-of-range pins and reads of
//!     non-input pins all surface as [`Error`] values, never as prints.
//!
//! ## Pin Mapping
//!
//! Logical pins 0-15 span the two 8-bit hardware ports:
//!
//! *   Pins 0-7 map to port A, bits 0-7 (registers `IODIRA`, `GPPUA`, ...).
//! *   Pins 8-15 map to port B, bits 0-7 (registers `IODIRB`, `GPPUB`, ...).
//!
//! Operations returning register contents report port-B bytes shifted into
//! the high half of a `u16` and port-A bytes unshifted; masking with
//! `1 << pin` works for either port. [`Mcp23017::read_input`] likewise
//! returns the masked bit, not a 0/1 value.
//!
//! ## Basic Usage
//!
//! ```no_run
//! use mcp23017_i2c::{Level, Mcp23017, PinMode};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Bus 1 is the user-facing I2C header on most Raspberry Pi models.
//!     let mut mcp = Mcp23017::open(1, 0x20)?;
//!
//!     // Drive pin 0 (port A, bit 0) high.
//!     mcp.configure(0, PinMode::Output)?;
//!     mcp.set_output(0, Level::High)?;
//!
//!     // Read pin 8 (port B, bit 0) with its pull-up enabled.
//!     mcp.configure(8, PinMode::Input)?;
//!     mcp.set_pullup(8, Level::High)?;
//!     let high = mcp.read_input(8)? != 0;
//!     println!("pin 8 is {}", if high { "high" } else { "low" });
//!     Ok(())
//! }
//! ```
//!
//! ## Command-Line Tool
//!
//! ```text
//! mcp23017 I2CBUS blink          # alternate even/odd pins every 500 ms
//! mcp23017 I2CBUS -w GPIO [1|0]  # configure GPIO as output, drive it
//! mcp23017 I2CBUS -r GPIO        # configure GPIO as input, print its value
//! ```
//!
//! The tool talks to address `0x20` and accepts bus numbers 2, 3, 5 and 6.
//! Set `RUST_LOG=debug` (or `trace` for raw register traffic) to watch what
//! it does on the bus.
//!
//! ## Hardware Setup Notes
//!
//! *   The A2/A1/A0 strapping pins select addresses `0x20`-`0x27`; tie all
//!     three low for the default `0x20`.
//! *   `/dev/i2c-N` access usually requires membership in the `i2c` group
//!     (or a udev rule granting it).
//! *   One driver instance owns the device: the read-modify-write sequences
//!     behind every operation are not atomic on the wire, so share an
//!     expander across threads only behind a `Mutex`.
//!
//! ## License
//!
//! Licensed under either of MIT or Apache-2.0, at your option.

// Internal modules stay private; public types are re-exported here.
pub mod consts;
mod error;
mod expander;
pub mod gpio;
mod i2c;

pub use consts::{DEFAULT_ADDRESS, NUM_GPIOS};
pub use error::Error;
pub use expander::Mcp23017;
pub use gpio::{Level, PinMode, Port};
pub use i2c::I2cRegisters;
