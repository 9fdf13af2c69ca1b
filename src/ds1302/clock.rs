use std::fmt;

use super::HexBytes;
use super::registers::CLOCK_BURST_SIZE;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Hour {
	H24(u8),
	H12 { hour: u8, pm: bool },
}

impl fmt::Display for Hour {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match *self {
			Hour::H24(hour) => write!(f, "{:02}", hour),
			Hour::H12 { hour, pm } => write!(f, "{:02}{}", hour, if pm { "PM" } else { "AM" }),
		}
	}
}

fn from_bcd(value: u8) -> u8 {
	(value >> 4) * 10 + (value & 0x0f)
}

/// Clock registers as returned by a clock burst read, in register order.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClockBurst(pub [u8; CLOCK_BURST_SIZE]);

impl ClockBurst {
	pub fn bytes(&self) -> &[u8] {
		&self.0
	}

	pub fn is_halted(&self) -> bool {
		0 != self.0[0] & 0x80
	}

	pub fn seconds(&self) -> u8 {
		from_bcd(self.0[0] & 0x7f)
	}

	pub fn minutes(&self) -> u8 {
		from_bcd(self.0[1] & 0x7f)
	}

	pub fn hour(&self) -> Hour {
		let h = self.0[2];
		if 0 != h & 0x80 {
			Hour::H12 {
				hour: from_bcd(h & 0x1f),
				pm: 0 != h & 0x20,
			}
		} else {
			Hour::H24(from_bcd(h & 0x3f))
		}
	}

	pub fn date(&self) -> u8 {
		from_bcd(self.0[3] & 0x3f)
	}

	pub fn month(&self) -> u8 {
		from_bcd(self.0[4] & 0x1f)
	}

	// 1..7, meaning is up to the user
	pub fn day_of_week(&self) -> u8 {
		self.0[5] & 0x07
	}

	// two digits only
	pub fn year(&self) -> u8 {
		from_bcd(self.0[6])
	}

	pub fn is_write_protected(&self) -> bool {
		0 != self.0[7] & 0x80
	}
}

impl fmt::Display for ClockBurst {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		fmt::Display::fmt(&HexBytes(&self.0), f)
	}
}

impl fmt::Debug for ClockBurst {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f,
			"{} (20{:02}-{:02}-{:02} {}:{:02}:{:02}, day {}",
			self,
			self.year(),
			self.month(),
			self.date(),
			self.hour(),
			self.minutes(),
			self.seconds(),
			self.day_of_week(),
		)?;
		if self.is_halted() { write!(f, " [HALT]")?; }
		if self.is_write_protected() { write!(f, " [WP]")?; }
		write!(f, ")")
	}
}
