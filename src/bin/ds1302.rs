#[macro_use]
extern crate log;

extern crate ds1302_gpio;
use ds1302_gpio::*;

use std::io;
use std::process::exit;

fn main_app() -> AResult<i32> {
	let config = cli::parse_args(std::env::args_os())?;

	let stdout = io::stdout();
	let mut out = stdout.lock();
	cli::run(&config, |config| gpio::Bcm2835::acquire(&config.gpio_device), &mut out)
}

fn main() {
	env_logger::from_env(env_logger::Env::default().default_filter_or("info")).init();

	match main_app() {
		Ok(code) => exit(code),
		Err(e) => {
			error!("Error: {}", e);
			exit(1);
		},
	}
}
