//! Raw GPIO access: pin numbers, levels, directions and the port trait the
//! serial protocol is written against.

mod bcm2835;
mod pin;

pub use self::bcm2835::{
	Bcm2835,
	GPIOMEM_PATH,
};

pub use self::pin::{
	Pin,
	PIN_COUNT,
};

use std::thread;
use std::time::{
	Duration,
	Instant,
};

pub fn reliable_sleep(mut duration: Duration) {
	loop {
		let now = Instant::now();
		thread::sleep(duration);
		let elapsed = now.elapsed();
		if elapsed >= duration {
			return;
		}
		duration -= elapsed;
	}
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Direction {
	Input,
	Output,
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Level {
	Low,
	High,
}

impl Level {
	pub fn is_high(self) -> bool {
		self == Level::High
	}
}

impl From<bool> for Level {
	fn from(v: bool) -> Self {
		match v {
			false => Level::Low,
			true => Level::High,
		}
	}
}

/// Pin-level access to a GPIO controller.
///
/// None of the operations can fail once the port exists; acquiring the
/// port is the only fallible step.
pub trait GpioPort {
	fn set_direction(&mut self, pin: Pin, direction: Direction);
	fn write(&mut self, pin: Pin, level: Level);
	fn read(&mut self, pin: Pin) -> Level;

	fn delay_us(&mut self, us: u32) {
		reliable_sleep(Duration::from_micros(us.into()));
	}

	fn delay_ms(&mut self, ms: u32) {
		reliable_sleep(Duration::from_millis(ms.into()));
	}
}

impl<'a, P: ?Sized + GpioPort> GpioPort for &'a mut P {
	fn set_direction(&mut self, pin: Pin, direction: Direction) {
		P::set_direction(*self, pin, direction);
	}
	fn write(&mut self, pin: Pin, level: Level) {
		P::write(*self, pin, level);
	}
	fn read(&mut self, pin: Pin) -> Level {
		P::read(*self, pin)
	}
	fn delay_us(&mut self, us: u32) {
		P::delay_us(*self, us);
	}
	fn delay_ms(&mut self, ms: u32) {
		P::delay_ms(*self, ms);
	}
}
