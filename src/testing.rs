//! DS1302 model behind a `GpioPort`, so the protocol can be exercised
//! without hardware.
//!
//! Every port call is recorded. The model panics when the host reads the
//! I/O line while driving it, drives it while it is an input, or lets the
//! chip sample it while nobody drives it.

use std::collections::HashMap;

use crate::ds1302::registers::{
	CLOCK_BURST_SIZE,
	RAM_SIZE,
};
use crate::gpio::{
	Direction,
	GpioPort,
	Level,
	Pin,
};
use crate::serial::PinConfig;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Event {
	Direction(Pin, Direction),
	Write(Pin, Level),
	Read(Pin, Level),
	DelayUs(u32),
	DelayMs(u32),
}

/// one CE-framed exchange as seen by the chip
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Transfer {
	pub command: Option<u8>,
	pub written: Vec<u8>,
	pub read: Vec<u8>,
}

#[derive(Default)]
struct Shift {
	value: u8,
	bits: u8,
}

impl Shift {
	// returns the byte once 8 bits are in
	fn push(&mut self, bit: bool) -> Option<u8> {
		if bit {
			self.value |= 1 << self.bits;
		}
		self.bits += 1;
		if 8 == self.bits {
			let value = self.value;
			*self = Shift::default();
			Some(value)
		} else {
			None
		}
	}
}

struct Output {
	byte: u8,
	bit: u8,
	// first bit appears on the falling edge that ends the command byte
	valid: bool,
}

pub struct SimulatedRtc {
	pins: PinConfig,
	pub events: Vec<Event>,
	pub transfers: Vec<Transfer>,
	/// seconds, minutes, hour, date, month, day, year, control
	pub clock: [u8; CLOCK_BURST_SIZE],
	pub ram: [u8; RAM_SIZE],
	directions: HashMap<Pin, Direction>,
	levels: HashMap<Pin, Level>,
	current: Option<Transfer>,
	shift: Shift,
	output: Option<Output>,
	index: usize,
}

impl SimulatedRtc {
	pub fn new(pins: PinConfig) -> Self {
		SimulatedRtc {
			pins,
			events: Vec::new(),
			transfers: Vec::new(),
			clock: [0; CLOCK_BURST_SIZE],
			ram: [0; RAM_SIZE],
			directions: HashMap::new(),
			levels: HashMap::new(),
			current: None,
			shift: Shift::default(),
			output: None,
			index: 0,
		}
	}

	pub fn direction(&self, pin: Pin) -> Option<Direction> {
		self.directions.get(&pin).cloned()
	}

	pub fn level(&self, pin: Pin) -> Level {
		self.levels.get(&pin).cloned().unwrap_or(Level::Low)
	}

	pub fn pin_calls(&self) -> usize {
		self.events.iter().filter(|e| match e {
			Event::DelayUs(_) | Event::DelayMs(_) => false,
			_ => true,
		}).count()
	}

	/// host-driven I/O level at every rising clock edge
	pub fn bits_on_rising_edges(&self) -> Vec<Level> {
		let mut data = Level::Low;
		let mut clock = Level::Low;
		let mut bits = Vec::new();
		for event in &self.events {
			match *event {
				Event::Write(pin, level) if pin == self.pins.data => data = level,
				Event::Write(pin, level) if pin == self.pins.clock => {
					if level == Level::High && clock == Level::Low {
						bits.push(data);
					}
					clock = level;
				},
				_ => (),
			}
		}
		bits
	}

	pub fn edges(&self, to: Level) -> usize {
		let mut clock = Level::Low;
		let mut count = 0;
		for event in &self.events {
			if let Event::Write(pin, level) = *event {
				if pin == self.pins.clock {
					if level == to && clock != to {
						count += 1;
					}
					clock = level;
				}
			}
		}
		count
	}

	fn is_enabled(&self) -> bool {
		self.current.is_some()
	}

	fn command(&self) -> Option<u8> {
		self.current.as_ref().and_then(|t| t.command)
	}

	// (RAM, register) for a command byte; register 31 is burst
	fn decode(command: u8) -> (bool, usize) {
		(0 != command & 0x40, ((command >> 1) & 0x1f) as usize)
	}

	fn location(&self, command: u8) -> (bool, usize) {
		let (ram, register) = Self::decode(command);
		if 31 == register {
			(ram, self.index)
		} else {
			(ram, register)
		}
	}

	fn load(&self, command: u8) -> u8 {
		match self.location(command) {
			(false, i) if i < CLOCK_BURST_SIZE => self.clock[i],
			(true, i) if i < RAM_SIZE => self.ram[i],
			_ => 0,
		}
	}

	fn store(&mut self, command: u8, value: u8) {
		let (_, register) = Self::decode(command);
		if 31 != register && 0 != self.index {
			return;
		}
		let write_protected = 0 != self.clock[7] & 0x80;
		match self.location(command) {
			(false, 7) => self.clock[7] = value,
			_ if write_protected => (),
			(false, i) if i < CLOCK_BURST_SIZE => self.clock[i] = value,
			(true, i) if i < RAM_SIZE => self.ram[i] = value,
			_ => (),
		}
	}

	fn enable_changed(&mut self, level: Level) {
		match (level, self.current.take()) {
			(Level::High, None) => {
				self.current = Some(Transfer::default());
				self.shift = Shift::default();
				self.output = None;
				self.index = 0;
			},
			(Level::Low, Some(transfer)) => self.transfers.push(transfer),
			(_, current) => self.current = current,
		}
	}

	fn rising_clock(&mut self) {
		if self.output.is_some() {
			return;
		}
		assert_eq!(self.direction(self.pins.data), Some(Direction::Output),
			"chip samples I/O while the host isn't driving it");
		let bit = self.level(self.pins.data).is_high();
		let byte = match self.shift.push(bit) {
			None => return,
			Some(byte) => byte,
		};
		match self.command() {
			None => {
				if let Some(t) = self.current.as_mut() {
					t.command = Some(byte);
				}
				if 0 != byte & 0x01 {
					self.output = Some(Output {
						byte: self.load(byte),
						bit: 0,
						valid: false,
					});
				}
			},
			Some(command) => {
				if 0 != command & 0x80 {
					self.store(command, byte);
				}
				self.index += 1;
				if let Some(t) = self.current.as_mut() {
					t.written.push(byte);
				}
			},
		}
	}

	fn falling_clock(&mut self) {
		let command = match self.command() {
			Some(c) => c,
			None => return,
		};
		let finished = match self.output.as_mut() {
			None => return,
			Some(output) if !output.valid => {
				output.valid = true;
				None
			},
			Some(output) => {
				output.bit += 1;
				if 8 == output.bit {
					Some(output.byte)
				} else {
					None
				}
			},
		};
		if let Some(byte) = finished {
			if let Some(t) = self.current.as_mut() {
				t.read.push(byte);
			}
			self.index += 1;
			let next = self.load(command);
			self.output = Some(Output {
				byte: next,
				bit: 0,
				valid: true,
			});
		}
	}

	fn chip_output(&self) -> Level {
		match self.output {
			Some(Output { byte, bit, valid: true }) => Level::from(0 != byte & (1 << bit)),
			_ => Level::Low,
		}
	}
}

impl GpioPort for SimulatedRtc {
	fn set_direction(&mut self, pin: Pin, direction: Direction) {
		self.events.push(Event::Direction(pin, direction));
		self.directions.insert(pin, direction);
	}

	fn write(&mut self, pin: Pin, level: Level) {
		assert_eq!(self.direction(pin), Some(Direction::Output), "{} driven while not an output", pin);
		self.events.push(Event::Write(pin, level));
		let previous = self.level(pin);
		self.levels.insert(pin, level);
		if pin == self.pins.enable {
			self.enable_changed(level);
		} else if pin == self.pins.clock && self.is_enabled() && previous != level {
			match level {
				Level::High => self.rising_clock(),
				Level::Low => self.falling_clock(),
			}
		}
	}

	fn read(&mut self, pin: Pin) -> Level {
		assert_eq!(self.direction(pin), Some(Direction::Input), "{} read while not an input", pin);
		let level = if pin == self.pins.data && self.is_enabled() {
			self.chip_output()
		} else {
			Level::Low
		};
		self.events.push(Event::Read(pin, level));
		level
	}

	fn delay_us(&mut self, us: u32) {
		self.events.push(Event::DelayUs(us));
	}

	fn delay_ms(&mut self, ms: u32) {
		self.events.push(Event::DelayMs(ms));
	}
}
