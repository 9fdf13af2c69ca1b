use crate::gpio::{
	GpioPort,
	Level,
};

use super::PinSession;

/// One CE-framed transfer.
///
/// CE goes high when the session starts and low when it is dropped. It
/// borrows the `PinSession` mutably, so sessions can't overlap.
pub struct Session<'a, P: GpioPort + 'a>(&'a mut PinSession<P>);

impl<P: GpioPort> PinSession<P> {
	pub fn start_session(&mut self) -> Session<'_, P> {
		self.set_enable(Level::High);
		Session(self)
	}
}

impl<'a, P: GpioPort> Session<'a, P> {
	/// LSB first; the chip samples each bit on the rising SCLK edge.
	pub fn send_byte(&mut self, value: u8) {
		let pins = &mut *self.0;
		pins.data_as_output();
		for bit in 0..8 {
			pins.drive_data(Level::from(0 != value & (1 << bit)));
			pins.clock_pulse();
		}
	}

	/// LSB first; each bit is valid while SCLK is low, the following pulse
	/// moves the chip to the next one.
	pub fn receive_byte(&mut self) -> u8 {
		let pins = &mut *self.0;
		pins.data_as_input();
		let mut result = 0u8;
		for bit in 0..8 {
			if pins.sample_data().is_high() {
				result |= 1 << bit;
			}
			pins.clock_pulse();
		}
		result
	}

	/// I/O back to input, then CE low (same as dropping the session)
	pub fn end(self) {
		drop(self);
	}
}

impl<'a, P: GpioPort> Drop for Session<'a, P> {
	fn drop(&mut self) {
		self.0.data_as_input();
		self.0.set_enable(Level::Low);
	}
}
