use crate::gpio::GpioPort;

use super::{
	PinSession,
	Session,
};

/// Receives `remaining` bytes; the session stays open until the reader is
/// dropped.
pub struct Reader<'a, P: GpioPort + 'a> {
	remaining: usize,
	session: Session<'a, P>,
}

impl<'a, P: GpioPort> Iterator for Reader<'a, P> {
	type Item = u8;

	fn next(&mut self) -> Option<Self::Item> {
		if 0 == self.remaining {
			return None;
		}
		self.remaining -= 1;
		Some(self.session.receive_byte())
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.remaining, Some(self.remaining))
	}
}

impl<P: GpioPort> PinSession<P> {
	pub fn send_command_then_data(&mut self, command: u8, data: &[u8]) {
		trace!("command 0x{:02X}, writing {} bytes", command, data.len());
		let mut session = self.start_session();
		session.send_byte(command);
		for b in data {
			session.send_byte(*b);
		}
	}

	pub fn reader(&mut self, command: u8, count: usize) -> Reader<'_, P> {
		trace!("command 0x{:02X}, reading {} bytes", command, count);
		let mut session = self.start_session();
		session.send_byte(command);
		Reader {
			remaining: count,
			session,
		}
	}

	pub fn send_command_then_receive(&mut self, command: u8, count: usize) -> Vec<u8> {
		self.reader(command, count).collect()
	}

	pub fn read_burst(&mut self, command: u8, target: &mut [u8]) {
		let count = target.len();
		for (t, b) in target.iter_mut().zip(self.reader(command, count)) {
			*t = b;
		}
	}

	pub fn poke(&mut self, address: u8, data: u8) {
		self.send_command_then_data(address, &[data]);
	}

	pub fn peek(&mut self, address: u8) -> u8 {
		let mut session = self.start_session();
		session.send_byte(address);
		session.receive_byte()
	}
}
