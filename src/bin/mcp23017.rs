//! Command-line utility for driving an MCP23017 on a Linux I2C bus.
//!
//! Mirrors the classic three-form surface: `blink`, `-w PIN VALUE` and
//! `-r PIN`, always against device address 0x20.

use std::env;
use std::process;
use std::thread;
use std::time::Duration;

use linux_embedded_hal::{I2CError, I2cdev};
use log::debug;
use mcp23017_i2c::{Error, Level, Mcp23017, PinMode, DEFAULT_ADDRESS, NUM_GPIOS};

/// I2C bus numbers this tool is willing to open.
const ALLOWED_BUSES: [u8; 4] = [2, 3, 5, 6];

/// Half-period of the blink loop.
const BLINK_PERIOD: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Blink,
    Write { pin: u8, level: Level },
    Read { pin: u8 },
}

/// Parses `[BUSNUM, ...command]` argv tails into a command, or `None` for
/// anything that should print usage. Pin range stays with the driver.
fn parse_args(args: &[String]) -> Option<(u8, Command)> {
    let (bus_arg, rest) = args.split_first()?;
    let bus: u8 = bus_arg.parse().ok()?;
    if !ALLOWED_BUSES.contains(&bus) {
        return None;
    }
    let rest: Vec<&str> = rest.iter().map(String::as_str).collect();
    let command = match rest.as_slice() {
        ["blink"] => Command::Blink,
        ["-w", pin, value] => {
            let level = match *value {
                "0" => Level::Low,
                "1" => Level::High,
                _ => return None,
            };
            Command::Write {
                pin: pin.parse().ok()?,
                level,
            }
        }
        ["-r", pin] => Command::Read {
            pin: pin.parse().ok()?,
        },
        _ => return None,
    };
    Some((bus, command))
}

fn usage(prog: &str) -> ! {
    eprintln!("Usage: {} I2CBUS blink", prog);
    eprintln!("       {} I2CBUS -w GPIO [1|0]", prog);
    eprintln!("       {} I2CBUS -r GPIO", prog);
    eprintln!();
    eprintln!("I2CBUS is one of 2, 3, 5, 6; GPIO is a pin index 0-15.");
    process::exit(2);
}

fn run(bus: u8, command: Command) -> Result<(), Error<I2CError>> {
    debug!("Opening bus {} for device 0x{:02X}", bus, DEFAULT_ADDRESS);
    let mut mcp = Mcp23017::open(bus, DEFAULT_ADDRESS)?;
    match command {
        Command::Blink => blink(&mut mcp),
        Command::Write { pin, level } => {
            mcp.configure(pin, PinMode::Output)?;
            mcp.set_output(pin, level)?;
            println!("write gpio{} value {}", pin, level.bit());
            Ok(())
        }
        Command::Read { pin } => {
            mcp.configure(pin, PinMode::Input)?;
            let value = mcp.read_input(pin)? >> pin;
            println!("gpio{} value is {}", pin, value);
            Ok(())
        }
    }
}

/// Alternates even and odd pins every half second until interrupted.
fn blink(mcp: &mut Mcp23017<I2cdev>) -> Result<(), Error<I2CError>> {
    for pin in 0..NUM_GPIOS {
        mcp.configure(pin, PinMode::Output)?;
    }
    println!("CTRL+C to quit");
    let mut phase = false;
    loop {
        for pin in 0..NUM_GPIOS {
            mcp.set_output(pin, Level::from((pin % 2 == 0) ^ phase))?;
        }
        thread::sleep(BLINK_PERIOD);
        phase = !phase;
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let prog = args.first().map(String::as_str).unwrap_or("mcp23017");
    let (bus, command) = match parse_args(args.get(1..).unwrap_or(&[])) {
        Some(parsed) => parsed,
        None => usage(prog),
    };

    if let Err(e) = run(bus, command) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
