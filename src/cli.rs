use std::ffi::OsString;
use std::fmt;
use std::io::Write;

use crate::ds1302::{
	Ds1302,
	HexBytes,
	LOOP_ITERATIONS,
};
use crate::gpio::{
	GpioPort,
	GPIOMEM_PATH,
};
use crate::serial::{
	PinConfig,
	PinSession,
};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
	WriteOnce,
	WriteRamInBurst,
	ReadClock,
	LoopClock,
	ReadRam,
}

impl Command {
	pub const ALL: [Command; 5] = [
		Command::WriteOnce,
		Command::WriteRamInBurst,
		Command::ReadClock,
		Command::LoopClock,
		Command::ReadRam,
	];

	pub fn flag(self) -> &'static str {
		match self {
			Command::WriteOnce => "write_once",
			Command::WriteRamInBurst => "write_ram_in_burst",
			Command::ReadClock => "read_clock",
			Command::LoopClock => "loop_clock",
			Command::ReadRam => "read_ram",
		}
	}
}

impl fmt::Display for Command {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "--{}", self.flag())
	}
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Config {
	pub command: Option<Command>,
	pub pins: PinConfig,
	pub gpio_device: String,
}

impl Default for Config {
	fn default() -> Self {
		Config {
			command: None,
			pins: PinConfig::default(),
			gpio_device: GPIOMEM_PATH.into(),
		}
	}
}

fn app<'a, 'b>() -> clap::App<'a, 'b> {
	clap_app!(@app (app_from_crate!())
		(@arg write_once: --write_once +multiple "Set the clock to a fixed time and fill the first 15 RAM bytes")
		(@arg write_ram_in_burst: --write_ram_in_burst +multiple "Write the first 31 primes to RAM in one burst")
		(@arg read_clock: --read_clock +multiple "Read the clock registers once")
		(@arg loop_clock: --loop_clock +multiple "Read the clock registers once a second for four minutes")
		(@arg read_ram: --read_ram +multiple "Read RAM in burst mode and byte by byte")
		(@arg clock_pin: --clock_pin +takes_value "GPIO connected to SCLK (default: 11)")
		(@arg enable_pin: --enable_pin +takes_value "GPIO connected to CE (default: 9)")
		(@arg data_pin: --data_pin +takes_value "GPIO connected to I/O (default: 10)")
		(@arg clock_delay_us: --clock_delay_us +takes_value "Microseconds to wait after each clock edge (default: 1)")
		(@arg gpio_device: --gpio_device +takes_value "GPIO register device to map (default: /dev/gpiomem)")
	)
}

fn get_param_or<T>(matches: &clap::ArgMatches, name: &str, default: T) -> crate::AResult<T>
where
	T: std::str::FromStr,
	failure::Error: From<<T as std::str::FromStr>::Err>,
{
	let param = match matches.value_of(name) {
		Some(p) => p,
		None => return Ok(default),
	};
	param.parse::<T>().map_err(|e| {
		let e = failure::Error::from(e);
		let msg = format!("invalid parameter {}: {}", name, e);
		e.context(msg).into()
	})
}

/// Parses the command line.
///
/// Arguments clap doesn't understand leave the command unset instead of
/// failing, so the caller still reports "No command specified". With
/// several command flags the first one given wins; repeating a flag is
/// fine.
pub fn parse_args<I, T>(args: I) -> crate::AResult<Config>
where
	I: IntoIterator<Item = T>,
	T: Into<OsString> + Clone,
{
	let matches = match app().get_matches_from_safe(args) {
		Ok(m) => m,
		Err(ref e) if e.kind == clap::ErrorKind::HelpDisplayed || e.kind == clap::ErrorKind::VersionDisplayed => {
			e.exit()
		},
		Err(e) => {
			warn!("{}", e.message);
			return Ok(Config::default());
		},
	};

	let command = Command::ALL.iter()
		.filter_map(|c| matches.index_of(c.flag()).map(|index| (index, *c)))
		.min_by_key(|&(index, _)| index)
		.map(|(_, c)| c);

	let defaults = PinConfig::default();
	let pins = PinConfig {
		clock: get_param_or(&matches, "clock_pin", defaults.clock)?,
		enable: get_param_or(&matches, "enable_pin", defaults.enable)?,
		data: get_param_or(&matches, "data_pin", defaults.data)?,
		clock_delay_us: get_param_or(&matches, "clock_delay_us", defaults.clock_delay_us)?,
	};
	pins.validate()?;

	Ok(Config {
		command,
		pins,
		gpio_device: matches.value_of("gpio_device").unwrap_or(GPIOMEM_PATH).into(),
	})
}

fn execute<P, W>(rtc: &mut Ds1302<P>, command: Command, out: &mut W) -> crate::AResult<()>
where
	P: GpioPort,
	W: Write,
{
	info!("running {}", command);
	match command {
		Command::WriteOnce => rtc.write_once(),
		Command::WriteRamInBurst => rtc.write_ram_burst(),
		Command::ReadClock => {
			let clock = rtc.read_clock_burst();
			writeln!(out, "{}", clock)?;
		},
		Command::LoopClock => {
			rtc.loop_clock_burst(LOOP_ITERATIONS, |clock| {
				writeln!(out, "{}", clock)?;
				out.flush()?;
				Ok(())
			})?;
		},
		Command::ReadRam => {
			let dump = rtc.read_ram();
			writeln!(out, "{}", HexBytes(&dump.burst))?;
			writeln!(out, "{}", HexBytes(&dump.single))?;
		},
	}
	Ok(())
}

/// Acquires the GPIO port, runs the command and releases everything again.
///
/// Returns the process exit code. The pins are set up and released even
/// without a command; that is only reported afterwards.
pub fn run<P, A, W>(config: &Config, acquire: A, out: &mut W) -> crate::AResult<i32>
where
	P: GpioPort,
	A: FnOnce(&Config) -> crate::AResult<P>,
	W: Write,
{
	let mut gpio = match acquire(config) {
		Ok(gpio) => gpio,
		Err(e) => {
			error!("{}", e);
			writeln!(out, "Init of BCM2835 failed")?;
			return Ok(1);
		},
	};

	let command_done = {
		let mut rtc = Ds1302::new(PinSession::begin(&mut gpio, config.pins));
		match config.command {
			Some(command) => {
				execute(&mut rtc, command, out)?;
				true
			},
			None => false,
		}
	};
	drop(gpio);

	if !command_done {
		writeln!(out, "No command specified")?;
		return Ok(1);
	}

	Ok(0)
}
