//! Behavioral tests for the expander driver against a simulated I2C bus.
//!
//! The mock bus is strict: every transaction must match the expectation
//! list in order, and `done()` fails the test if any expectation is left
//! over. Port isolation therefore falls out of the lists themselves: a
//! stray write to the wrong port register fails the test immediately.

use embedded_hal::i2c::ErrorKind;
use embedded_hal_mock::eh1::i2c::{Mock, Transaction};
use mcp23017_i2c::consts::reg;
use mcp23017_i2c::{Error, Level, Mcp23017, PinMode};

const ADDR: u8 = 0x20;

/// Transactions issued by the constructor's reset sequence.
fn init_transactions() -> Vec<Transaction> {
    vec![
        Transaction::write(ADDR, vec![reg::IODIRA, 0xFF]),
        Transaction::write(ADDR, vec![reg::IODIRB, 0xFF]),
        Transaction::write_read(ADDR, vec![reg::IODIRA], vec![0xFF]),
        Transaction::write_read(ADDR, vec![reg::IODIRB], vec![0xFF]),
        Transaction::write(ADDR, vec![reg::GPPUA, 0x00]),
        Transaction::write(ADDR, vec![reg::GPPUB, 0x00]),
    ]
}

/// Expander over a mock expecting the reset sequence plus `extra`.
fn expander_with(extra: Vec<Transaction>) -> Mcp23017<Mock> {
    let mut transactions = init_transactions();
    transactions.extend(extra);
    Mcp23017::new(Mock::new(&transactions), ADDR).unwrap()
}

#[test]
fn test_open_resets_device_and_seeds_caches() {
    let mcp = expander_with(vec![]);
    assert_eq!(mcp.direction(), 0xFFFF);
    assert_eq!(mcp.pullups(), 0x0000);
    assert_eq!(mcp.address(), ADDR);
    let mut bus = mcp.free();
    bus.done();
}

#[test]
fn test_failed_reset_aborts_open() {
    let mut bus = Mock::new(&[
        Transaction::write(ADDR, vec![reg::IODIRA, 0xFF]).with_error(ErrorKind::Other)
    ]);
    let result = Mcp23017::new(bus.clone(), ADDR);
    assert!(matches!(result, Err(Error::Bus(ErrorKind::Other))));
    bus.done();
}

#[test]
fn test_invalid_address_is_rejected() {
    let mut bus = Mock::new(&[]);
    let result = Mcp23017::new(bus.clone(), 0x48);
    assert!(matches!(result, Err(Error::AddressOutOfRange { address: 0x48 })));
    bus.done();
}

#[test]
fn test_configure_touches_only_the_matching_port() {
    for pin in 0..16u8 {
        let (iodir, bit) = if pin < 8 {
            (reg::IODIRA, pin)
        } else {
            (reg::IODIRB, pin - 8)
        };
        let mut mcp = expander_with(vec![
            Transaction::write_read(ADDR, vec![iodir], vec![0xFF]),
            Transaction::write(ADDR, vec![iodir, 0xFF & !(1 << bit)]),
        ]);
        mcp.configure(pin, PinMode::Output).unwrap();
        let mut bus = mcp.free();
        bus.done();
    }
}

#[test]
fn test_direction_cache_merges_both_halves() {
    let mut mcp = expander_with(vec![
        Transaction::write_read(ADDR, vec![reg::IODIRA], vec![0xFF]),
        Transaction::write(ADDR, vec![reg::IODIRA, 0xF7]),
        Transaction::write_read(ADDR, vec![reg::IODIRB], vec![0xFF]),
        Transaction::write(ADDR, vec![reg::IODIRB, 0xF7]),
    ]);
    mcp.configure(3, PinMode::Output).unwrap();
    assert_eq!(mcp.direction(), 0xFFF7);
    mcp.configure(11, PinMode::Output).unwrap();
    assert_eq!(mcp.direction(), 0xF7F7);
    let mut bus = mcp.free();
    bus.done();
}

#[test]
fn test_pullup_port_a_single_write_and_cache() {
    let mut mcp = expander_with(vec![
        Transaction::write_read(ADDR, vec![reg::GPPUA], vec![0x00]),
        Transaction::write(ADDR, vec![reg::GPPUA, 0x08]),
    ]);
    let result = mcp.set_pullup(3, Level::High).unwrap();
    assert_eq!(result, 0x0008);
    assert_eq!(mcp.pullups(), 0x0008);
    let mut bus = mcp.free();
    bus.done();
}

#[test]
fn test_pullup_port_b_returns_shifted_byte() {
    let mut mcp = expander_with(vec![
        Transaction::write_read(ADDR, vec![reg::GPPUB], vec![0x00]),
        Transaction::write(ADDR, vec![reg::GPPUB, 0x04]),
    ]);
    let result = mcp.set_pullup(10, Level::High).unwrap();
    assert_eq!(result, 0x0400);
    assert_eq!(mcp.pullups(), 0x0400);
    let mut bus = mcp.free();
    bus.done();
}

#[test]
fn test_set_output_writes_gpio_with_latch_baseline() {
    let mut mcp = expander_with(vec![
        // pin 0: port A latch is the baseline, write goes to GPIOA
        Transaction::write_read(ADDR, vec![reg::OLATA], vec![0x00]),
        Transaction::write(ADDR, vec![reg::GPIOA, 0x01]),
        // pin 9: port B latch, write goes to GPIOB, result shifted
        Transaction::write_read(ADDR, vec![reg::OLATB], vec![0x00]),
        Transaction::write(ADDR, vec![reg::GPIOB, 0x02]),
    ]);
    assert_eq!(mcp.set_output(0, Level::High).unwrap(), 0x0001);
    assert_eq!(mcp.set_output(9, Level::High).unwrap(), 0x0200);
    let mut bus = mcp.free();
    bus.done();
}

#[test]
fn test_output_round_trip_restores_latch_byte() {
    // Other pins of the port hold 0xA5; driving pin 1 high and back low
    // must leave the written byte exactly where it started.
    let mut mcp = expander_with(vec![
        Transaction::write_read(ADDR, vec![reg::OLATA], vec![0xA5]),
        Transaction::write(ADDR, vec![reg::GPIOA, 0xA7]),
        Transaction::write_read(ADDR, vec![reg::OLATA], vec![0xA7]),
        Transaction::write(ADDR, vec![reg::GPIOA, 0xA5]),
    ]);
    assert_eq!(mcp.set_output(1, Level::High).unwrap(), 0x00A7);
    assert_eq!(mcp.set_output(1, Level::Low).unwrap(), 0x00A5);
    let mut bus = mcp.free();
    bus.done();
}

#[test]
fn test_read_input_masks_the_requested_pin() {
    let mut mcp = expander_with(vec![
        Transaction::write_read(ADDR, vec![reg::GPIOA], vec![0xFF]),
        Transaction::write_read(ADDR, vec![reg::GPIOB], vec![0x02]),
        Transaction::write_read(ADDR, vec![reg::GPIOA], vec![0xFE]),
        Transaction::write_read(ADDR, vec![reg::GPIOB], vec![0x00]),
    ]);
    // Pin 9 high: only its own bit of the combined value comes back.
    let value = mcp.read_input(9).unwrap();
    assert_eq!(value, 0x0200);
    assert_eq!(value >> 9, 1);
    // Pin 0 low: masked value is zero even with other pins high.
    assert_eq!(mcp.read_input(0).unwrap(), 0x0000);
    let mut bus = mcp.free();
    bus.done();
}

#[test]
fn test_read_input_rejects_non_input_pin() {
    let mut mcp = expander_with(vec![
        Transaction::write_read(ADDR, vec![reg::IODIRA], vec![0xFF]),
        Transaction::write(ADDR, vec![reg::IODIRA, 0xEF]),
    ]);
    mcp.configure(4, PinMode::Output).unwrap();
    // The refusal happens before any bus traffic.
    assert!(matches!(
        mcp.read_input(4),
        Err(Error::PinNotInput { pin: 4 })
    ));
    let mut bus = mcp.free();
    bus.done();
}

#[test]
fn test_pin_range_is_enforced() {
    let mut mcp = expander_with(vec![]);
    assert!(matches!(
        mcp.configure(16, PinMode::Output),
        Err(Error::PinOutOfRange { pin: 16 })
    ));
    assert!(matches!(
        mcp.set_output(255, Level::High),
        Err(Error::PinOutOfRange { pin: 255 })
    ));
    assert!(matches!(
        mcp.set_pullup(99, Level::Low),
        Err(Error::PinOutOfRange { pin: 99 })
    ));
    assert!(matches!(
        mcp.read_input(16),
        Err(Error::PinOutOfRange { pin: 16 })
    ));
    let mut bus = mcp.free();
    bus.done();
}

#[test]
fn test_bus_errors_propagate() {
    let mut mcp = expander_with(vec![Transaction::write_read(
        ADDR,
        vec![reg::IODIRA],
        vec![0x00],
    )
    .with_error(ErrorKind::Other)]);
    assert!(matches!(
        mcp.configure(0, PinMode::Output),
        Err(Error::Bus(ErrorKind::Other))
    ));
    let mut bus = mcp.free();
    bus.done();
}

#[test]
fn test_resync_refreshes_both_caches() {
    let mut mcp = expander_with(vec![
        Transaction::write_read(ADDR, vec![reg::IODIRA], vec![0x12]),
        Transaction::write_read(ADDR, vec![reg::IODIRB], vec![0x34]),
        Transaction::write_read(ADDR, vec![reg::GPPUA], vec![0x56]),
        Transaction::write_read(ADDR, vec![reg::GPPUB], vec![0x78]),
    ]);
    mcp.resync().unwrap();
    assert_eq!(mcp.direction(), 0x3412);
    assert_eq!(mcp.pullups(), 0x7856);
    let mut bus = mcp.free();
    bus.done();
}

// Hardware integration tests (require an actual device)
#[cfg(test)]
mod hardware_tests {
    use super::*;
    use linux_embedded_hal::I2cdev;

    const HARDWARE_BUS: u8 = 1;

    fn open_test_device() -> Option<Mcp23017<I2cdev>> {
        Mcp23017::open(HARDWARE_BUS, ADDR).ok()
    }

    #[test]
    #[ignore] // Requires an MCP23017 on /dev/i2c-1
    fn test_hardware_output_toggle() {
        let mut mcp = match open_test_device() {
            Some(m) => m,
            None => {
                println!(
                    "No MCP23017 on /dev/i2c-{}, skipping hardware test",
                    HARDWARE_BUS
                );
                return;
            }
        };
        mcp.configure(0, PinMode::Output).unwrap();
        mcp.set_output(0, Level::High).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(100));
        mcp.set_output(0, Level::Low).unwrap();
    }

    #[test]
    #[ignore] // Requires an MCP23017 on /dev/i2c-1
    fn test_hardware_floating_input_reads_high_with_pullup() {
        let mut mcp = match open_test_device() {
            Some(m) => m,
            None => {
                println!(
                    "No MCP23017 on /dev/i2c-{}, skipping hardware test",
                    HARDWARE_BUS
                );
                return;
            }
        };
        mcp.configure(8, PinMode::Input).unwrap();
        mcp.set_pullup(8, Level::High).unwrap();
        assert_ne!(mcp.read_input(8).unwrap(), 0);
    }
}
