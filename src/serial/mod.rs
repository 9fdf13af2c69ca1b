//! Three-wire serial interface of the Maxim DS1302 RTC (31 bytes of RAM)
//!
//! Pins: CE (chip enable), SCLK (clock) and a single bidirectional I/O line.
//!
//! - CE high frames a transfer; CE low aborts whatever is in progress and
//!   the chip releases I/O.
//! - Every transfer starts with one command byte, followed by data bytes in
//!   one direction only.
//! - Bytes go LSB first, one bit per SCLK cycle.
//! - The host drives I/O while SCLK is low; the chip samples it on the
//!   rising edge.
//! - For reads the chip starts driving I/O on the falling edge that ends
//!   the command byte, and moves to the next bit on every following falling
//!   edge. The host samples before raising SCLK.
//!
//! Command byte:
//! - bit 7: always 1 (0 disables the transfer)
//! - bit 6: 1 = RAM, 0 = clock/calendar
//! - bits 5..1: register; 31 means burst (auto-incrementing)
//! - bit 0: 1 = read, 0 = write

mod operations;
mod pins;
mod session;

pub use self::operations::Reader;

pub use self::pins::{
	DEFAULT_CLOCK_DELAY_US,
	PinConfig,
	PinSession,
};

pub use self::session::Session;
