//! Register addresses and fixed hardware parameters of the MCP23017.

/// Number of GPIO pins on the expander (two 8-bit ports).
pub const NUM_GPIOS: u8 = 16;

/// Slave address with the A2/A1/A0 pins strapped low.
pub const DEFAULT_ADDRESS: u8 = 0x20;

// The three address pins select one of eight consecutive slave addresses.
/// Lowest selectable slave address (A2..A0 = 000).
pub const MIN_ADDRESS: u8 = 0x20;
/// Highest selectable slave address (A2..A0 = 111).
pub const MAX_ADDRESS: u8 = 0x27;

/// Register addresses in the power-on bank layout (IOCON.BANK = 0), where
/// the port A and port B registers of each function occupy adjacent offsets.
pub mod reg {
    /// I/O direction, port A (1 = input, the power-on default).
    pub const IODIRA: u8 = 0x00;
    /// I/O direction, port B.
    pub const IODIRB: u8 = 0x01;
    /// Pull-up enable, port A (1 = 100 kΩ pull-up on).
    pub const GPPUA: u8 = 0x0C;
    /// Pull-up enable, port B.
    pub const GPPUB: u8 = 0x0D;
    /// Port value, port A. Reads sample the pins; writes go to the latch.
    pub const GPIOA: u8 = 0x12;
    /// Port value, port B.
    pub const GPIOB: u8 = 0x13;
    /// Output latch, port A. Reads return the last written value.
    pub const OLATA: u8 = 0x14;
    /// Output latch, port B.
    pub const OLATB: u8 = 0x15;
}
