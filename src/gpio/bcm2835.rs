/* Register layout: BCM2835 ARM Peripherals, chapter 6 "General Purpose I/O" */

use std::ffi::CString;
use std::fs;
use std::hint;
use std::io;
use std::os::unix::io::{
	FromRawFd,
};
use std::ptr;
use std::time::{
	Duration,
	Instant,
};

use libc::{
	MAP_FAILED,
	MAP_SHARED,
	O_CLOEXEC,
	O_RDWR,
	O_SYNC,
	PROT_READ,
	PROT_WRITE,
	c_void,
	mmap,
	munmap,
	open,
};

use super::{
	Direction,
	GpioPort,
	Level,
	Pin,
};

/// GPIO register page exported by the kernel without needing root
pub const GPIOMEM_PATH: &str = "/dev/gpiomem";

const BLOCK_SIZE: usize = 4 * 1024;

// byte offsets into the GPIO block
const GPFSEL0: usize = 0x00;
const GPSET0: usize = 0x1c;
const GPCLR0: usize = 0x28;
const GPLEV0: usize = 0x34;

// function select: 3 bits per pin, 10 pins per register
const FSEL_INPUT: u32 = 0b000;
const FSEL_OUTPUT: u32 = 0b001;
const FSEL_MASK: u32 = 0b111;

#[derive(Debug)]
pub struct Bcm2835 {
	ptr: ptr::NonNull<u32>,
	len: usize,
}

impl Drop for Bcm2835 {
	fn drop(&mut self) {
		let res = unsafe {
			munmap(
				self.ptr.as_ptr() as *mut c_void,
				self.len,
			)
		};
		if 0 != res {
			error!("munmap of GPIO registers failed: {}", io::Error::last_os_error());
		} else {
			debug!("released GPIO registers");
		}
	}
}

impl Bcm2835 {
	/// Maps the GPIO register block; the mapping is released on drop.
	pub fn acquire(path: &str) -> crate::AResult<Self> {
		let gpio = with_context!(("couldn't map GPIO registers from {}", path), {
			Ok(inner_open(path)?)
		})?;
		debug!("mapped GPIO registers from {}", path);
		Ok(gpio)
	}

	fn read_register(&self, offset: usize) -> u32 {
		assert!(offset & 3 == 0);
		assert!(offset + 3 < self.len);
		unsafe { ptr::read_volatile(self.ptr.as_ptr().add(offset / 4)) }
	}

	fn write_register(&mut self, offset: usize, data: u32) {
		assert!(offset & 3 == 0);
		assert!(offset + 3 < self.len);
		unsafe { ptr::write_volatile(self.ptr.as_ptr().add(offset / 4), data) }
	}
}

impl GpioPort for Bcm2835 {
	fn set_direction(&mut self, pin: Pin, direction: Direction) {
		let offset = GPFSEL0 + 4 * (pin.number() / 10) as usize;
		let shift = 3 * (pin.number() % 10) as u32;
		let mode = match direction {
			Direction::Input => FSEL_INPUT,
			Direction::Output => FSEL_OUTPUT,
		};
		let fsel = self.read_register(offset);
		self.write_register(offset, (fsel & !(FSEL_MASK << shift)) | (mode << shift));
	}

	fn write(&mut self, pin: Pin, level: Level) {
		// set/clear registers only act on bits written as 1
		let base = match level {
			Level::High => GPSET0,
			Level::Low => GPCLR0,
		};
		self.write_register(base + 4 * pin.bank(), pin.mask());
	}

	fn read(&mut self, pin: Pin) -> Level {
		Level::from(0 != self.read_register(GPLEV0 + 4 * pin.bank()) & pin.mask())
	}

	// sleeping would stretch each clock edge to the scheduler granularity
	fn delay_us(&mut self, us: u32) {
		let duration = Duration::from_micros(us.into());
		let start = Instant::now();
		while start.elapsed() < duration {
			hint::spin_loop();
		}
	}
}

// TODO: exclusive open / file locking?
fn inner_open(path: &str) -> io::Result<Bcm2835> {
	let path = CString::new(path)?;

	let fd = unsafe { open(path.as_ptr(), O_RDWR | O_SYNC | O_CLOEXEC) };
	if -1 == fd {
		return Err(io::Error::last_os_error());
	}
	// now get fd managed to prevent resource leak; the mapping outlives it
	let _f = unsafe { fs::File::from_raw_fd(fd) };

	let area = unsafe {
		mmap(
			ptr::null_mut(),
			BLOCK_SIZE,
			PROT_READ | PROT_WRITE,
			MAP_SHARED,
			fd,
			0,
		)
	};

	if area == MAP_FAILED {
		return Err(io::Error::last_os_error());
	}
	match ptr::NonNull::new(area as *mut u32) {
		None => Err(io::Error::new(io::ErrorKind::Other, "mmap returned NULL")),
		Some(area) => Ok(Bcm2835 {
			ptr: area,
			len: BLOCK_SIZE,
		}),
	}
}
