//! Scan an I2C bus for devices.
//!
//! Probes every general-purpose address (0x08 to 0x7B) behind the first
//! FT260 and prints the ones that answered.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example i2c_scan            # first device, 400 kHz
//! cargo run --example i2c_scan -- 1 100   # second device, 100 kHz
//! ```

use ft260::constants::DEFAULT_I2C_CLOCK_KHZ;
use ft260::{DeviceFilter, Ft260};

fn main() -> Result<(), ft260::Error> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let index = args.next().and_then(|a| a.parse().ok()).unwrap_or(0);
    let clock_khz = args
        .next()
        .and_then(|a| a.parse().ok())
        .unwrap_or(DEFAULT_I2C_CLOCK_KHZ);

    let mut dev = Ft260::open_with_filter(&DeviceFilter::default().index(index))?;
    let i2c = dev.i2c();
    i2c.activate(clock_khz)?;
    println!("Scanning at {} kHz...", i2c.clock_speed_khz());

    let found = i2c.scan()?;
    for addr in found.addresses() {
        println!("  device at {addr:#04x}");
    }
    println!("{} device(s) found", found.len());

    Ok(())
}
