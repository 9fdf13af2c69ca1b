use std::fmt;
use std::str;

/// number of GPIO lines on the BCM2835
pub const PIN_COUNT: u8 = 54;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Pin(u8);

impl Pin {
	pub fn new(number: u8) -> crate::AResult<Self> {
		ensure!(number < PIN_COUNT, "invalid GPIO pin: {} (too big)", number);
		Ok(Pin(number))
	}

	// literal pin numbers only
	pub(crate) fn fixed(number: u8) -> Self {
		assert!(number < PIN_COUNT, "invalid GPIO pin: {}", number);
		Pin(number)
	}

	pub fn number(self) -> u8 {
		self.0
	}

	// register bank (GPSET0/GPSET1, ...) and bit within it
	pub(crate) fn bank(self) -> usize {
		(self.0 / 32) as usize
	}

	pub(crate) fn mask(self) -> u32 {
		1u32 << (self.0 % 32)
	}
}

impl fmt::Display for Pin {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "GPIO{}", self.0)
	}
}

impl str::FromStr for Pin {
	type Err = ::failure::Error;

	// "11", "GPIO11" or "gpio11"
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let digits = match s.get(..4) {
			Some(prefix) if prefix.eq_ignore_ascii_case("gpio") => &s[4..],
			_ => s,
		};

		let number = with_context!(("invalid GPIO pin: {:?}", s),
			Ok(digits.parse::<u8>()?)
		)?;

		Pin::new(number)
	}
}
