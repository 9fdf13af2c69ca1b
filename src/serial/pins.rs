use crate::gpio::{
	Direction,
	GpioPort,
	Level,
	Pin,
};

/// hold time after each SCLK edge; the DS1302 needs 250ns at 5V, 1µs at 2V
pub const DEFAULT_CLOCK_DELAY_US: u32 = 1;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PinConfig {
	pub clock: Pin,
	pub enable: Pin,
	pub data: Pin,
	pub clock_delay_us: u32,
}

impl Default for PinConfig {
	// Raspberry Pi 3 B+: J8 pins 23, 21 and 19
	fn default() -> Self {
		PinConfig {
			clock: Pin::fixed(11),
			enable: Pin::fixed(9),
			data: Pin::fixed(10),
			clock_delay_us: DEFAULT_CLOCK_DELAY_US,
		}
	}
}

impl PinConfig {
	pub fn validate(&self) -> crate::AResult<()> {
		ensure!(self.clock != self.enable, "clock and enable both use {}", self.clock);
		ensure!(self.clock != self.data, "clock and data both use {}", self.clock);
		ensure!(self.enable != self.data, "enable and data both use {}", self.enable);
		Ok(())
	}
}

/// Exclusive owner of the three DS1302 lines and their directions.
///
/// `begin` leaves the lines idle (CE low, SCLK low, I/O input); dropping
/// the session turns all three back into inputs.
pub struct PinSession<P: GpioPort> {
	port: P,
	config: PinConfig,
	data_direction: Direction,
}

impl<P: GpioPort> PinSession<P> {
	pub fn begin(mut port: P, config: PinConfig) -> Self {
		port.set_direction(config.enable, Direction::Output);
		port.write(config.enable, Level::Low);
		port.set_direction(config.data, Direction::Input);
		port.set_direction(config.clock, Direction::Output);
		port.write(config.clock, Level::Low);
		debug!("pins configured: CE {}, SCLK {}, I/O {}", config.enable, config.clock, config.data);

		PinSession {
			port,
			config,
			data_direction: Direction::Input,
		}
	}

	pub fn data_direction(&self) -> Direction {
		self.data_direction
	}

	pub fn delay_ms(&mut self, ms: u32) {
		self.port.delay_ms(ms);
	}

	pub(super) fn data_as_output(&mut self) {
		if self.data_direction != Direction::Output {
			self.port.set_direction(self.config.data, Direction::Output);
			self.data_direction = Direction::Output;
		}
	}

	pub(super) fn data_as_input(&mut self) {
		if self.data_direction != Direction::Input {
			self.port.set_direction(self.config.data, Direction::Input);
			self.data_direction = Direction::Input;
		}
	}

	pub(super) fn drive_data(&mut self, level: Level) {
		debug_assert_eq!(self.data_direction, Direction::Output);
		self.port.write(self.config.data, level);
	}

	pub(super) fn sample_data(&mut self) -> Level {
		debug_assert_eq!(self.data_direction, Direction::Input);
		self.port.read(self.config.data)
	}

	pub(super) fn set_enable(&mut self, level: Level) {
		self.port.write(self.config.enable, level);
	}

	// SCLK up and down again, waiting after each edge
	pub(super) fn clock_pulse(&mut self) {
		self.port.write(self.config.clock, Level::High);
		self.clock_delay();
		self.port.write(self.config.clock, Level::Low);
		self.clock_delay();
	}

	fn clock_delay(&mut self) {
		if 0 != self.config.clock_delay_us {
			self.port.delay_us(self.config.clock_delay_us);
		}
	}
}

impl<P: GpioPort> Drop for PinSession<P> {
	fn drop(&mut self) {
		self.port.set_direction(self.config.clock, Direction::Input);
		self.port.set_direction(self.config.enable, Direction::Input);
		self.port.set_direction(self.config.data, Direction::Input);
		self.data_direction = Direction::Input;
		debug!("pins released");
	}
}
