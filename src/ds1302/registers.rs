//! Command bytes and fixed payloads.
//!
//! Writes use the even address, reads the odd one (bit 0 set).

pub const SECONDS: u8 = 0x80; // bit 7: CH (clock halt)
pub const MINUTES: u8 = 0x82;
pub const HOUR: u8 = 0x84; // bit 7: 12-hour mode
pub const DATE: u8 = 0x86;
pub const MONTH: u8 = 0x88;
pub const DAY: u8 = 0x8a;
pub const YEAR: u8 = 0x8c;
pub const WRITE_PROTECT: u8 = 0x8e; // bit 7: WP

pub const CLOCK_BURST_READ: u8 = 0xbf;
pub const RAM_BURST_WRITE: u8 = 0xfe;
pub const RAM_BURST_READ: u8 = 0xff;

pub const RAM_WRITE_BASE: u8 = 0xc0;
pub const RAM_READ_BASE: u8 = 0xc1;

/// seconds through write protect
pub const CLOCK_BURST_SIZE: usize = 8;
pub const RAM_SIZE: usize = 31;

pub fn ram_read_address(index: usize) -> u8 {
	assert!(index < RAM_SIZE, "RAM index {} out of range", index);
	RAM_READ_BASE + 2 * index as u8
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RegisterWrite {
	pub name: &'static str,
	pub address: u8,
	pub value: u8,
}

const fn reg(name: &'static str, address: u8, value: u8) -> RegisterWrite {
	RegisterWrite { name, address, value }
}

/// Sets the clock to 2024-03-31 23:59:49 (Saturday) and fills the first
/// 15 RAM bytes.
pub const WRITE_ONCE: [RegisterWrite; 23] = [
	reg("write protect off", WRITE_PROTECT, 0x00),
	reg("seconds, clock halt off", SECONDS, 0x49),
	reg("minutes", MINUTES, 0x59),
	reg("hour, 24-hour mode", HOUR, 0x23),
	reg("date", DATE, 0x31),
	reg("month", MONTH, 0x03),
	reg("day of week", DAY, 0x06),
	reg("year", YEAR, 0x24),
	reg("ram 0", 0xc0, 0x01),
	reg("ram 1", 0xc2, 0x03),
	reg("ram 2", 0xc4, 0x07),
	reg("ram 3", 0xc6, 0x0f),
	reg("ram 4", 0xc8, 0x1f),
	reg("ram 5", 0xca, 0x3f),
	reg("ram 6", 0xcc, 0x7f),
	reg("ram 7", 0xce, 0xff),
	reg("ram 8", 0xd0, 0xfe),
	reg("ram 9", 0xd2, 0xfc),
	reg("ram 10", 0xd4, 0xf8),
	reg("ram 11", 0xd6, 0xf0),
	reg("ram 12", 0xd8, 0xe0),
	reg("ram 13", 0xda, 0xc0),
	reg("ram 14", 0xdc, 0x80),
];

/// the first 31 primes
pub const RAM_BURST_PAYLOAD: [u8; RAM_SIZE] = [
	0x02, 0x03, 0x05, 0x07, 0x0b, 0x0d, 0x11, 0x13, 0x17, 0x1d, 0x1f,
	0x25, 0x29, 0x2b, 0x2f, 0x35, 0x3b, 0x3d, 0x43, 0x47, 0x49, 0x4f,
	0x53, 0x59, 0x61, 0x65, 0x67, 0x6b, 0x6d, 0x71, 0x7f,
];
