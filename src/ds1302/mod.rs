/* Chip documentation: https://www.analog.com/media/en/technical-documentation/data-sheets/DS1302.pdf */

use std::fmt;

use crate::gpio::GpioPort;
use crate::serial::PinSession;

mod clock;
pub mod registers;

pub use self::clock::{
	ClockBurst,
	Hour,
};

use self::registers::*;

/// number of clock reads `--loop_clock` does, one per second
pub const LOOP_ITERATIONS: usize = 4 * 60;
pub const LOOP_PAUSE_MS: u32 = 1000;

/// Uppercase hex bytes separated by single spaces.
pub struct HexBytes<'a>(pub &'a [u8]);

impl<'a> fmt::Display for HexBytes<'a> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		for (i, b) in self.0.iter().enumerate() {
			if 0 != i {
				write!(f, " ")?;
			}
			write!(f, "{:02X}", b)?;
		}
		Ok(())
	}
}

/// The RAM read twice: once in burst mode, once byte by byte.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RamDump {
	pub burst: [u8; RAM_SIZE],
	pub single: [u8; RAM_SIZE],
}

impl RamDump {
	pub fn agrees(&self) -> bool {
		self.burst == self.single
	}
}

pub struct Ds1302<P: GpioPort> {
	pins: PinSession<P>,
}

impl<P: GpioPort> Ds1302<P> {
	pub fn new(pins: PinSession<P>) -> Self {
		Ds1302 { pins }
	}

	pub fn write_once(&mut self) {
		for w in WRITE_ONCE.iter() {
			debug!("{}: 0x{:02X} <- 0x{:02X}", w.name, w.address, w.value);
			self.pins.poke(w.address, w.value);
		}
	}

	pub fn write_ram_burst(&mut self) {
		self.pins.send_command_then_data(RAM_BURST_WRITE, &RAM_BURST_PAYLOAD);
	}

	pub fn read_clock_burst(&mut self) -> ClockBurst {
		let mut clock = ClockBurst([0u8; CLOCK_BURST_SIZE]);
		self.pins.read_burst(CLOCK_BURST_READ, &mut clock.0);
		debug!("clock: {:?}", clock);
		clock
	}

	/// Reads the clock `iterations` times, pausing after each read.
	pub fn loop_clock_burst<F>(&mut self, iterations: usize, mut emit: F) -> crate::AResult<()>
	where
		F: FnMut(&ClockBurst) -> crate::AResult<()>,
	{
		for _ in 0..iterations {
			let clock = self.read_clock_burst();
			emit(&clock)?;
			self.pins.delay_ms(LOOP_PAUSE_MS);
		}
		Ok(())
	}

	pub fn read_ram(&mut self) -> RamDump {
		let mut dump = RamDump {
			burst: [0u8; RAM_SIZE],
			single: [0u8; RAM_SIZE],
		};
		self.pins.read_burst(RAM_BURST_READ, &mut dump.burst);
		for (index, b) in dump.single.iter_mut().enumerate() {
			*b = self.pins.peek(ram_read_address(index));
		}
		if !dump.agrees() {
			warn!("RAM burst read differs from byte-by-byte read");
		}
		dump
	}
}
