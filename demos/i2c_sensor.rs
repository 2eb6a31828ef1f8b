//! I2C temperature sensor example.
//!
//! Reads temperature from a TMP102 (or compatible) I2C sensor
//! connected to an FT260.
//!
//! # Wiring
//!
//! | FT260 Pin | I2C Signal | Notes |
//! |-----------|-----------|-------|
//! | SCL (DIO5) | SCL      | Pull-up to 3.3V via 4.7k |
//! | SDA (DIO6) | SDA      | Pull-up to 3.3V via 4.7k |
//!
//! # Usage
//!
//! ```sh
//! cargo run --example i2c_sensor
//! ```

use ft260::constants::{FT260_PID, FT260_VID};
use ft260::Ft260;

/// Default TMP102 I2C address (ADD0 = GND).
const TMP102_ADDR: u8 = 0x48;

/// TMP102 register addresses.
const REG_TEMPERATURE: u8 = 0x00;
const REG_CONFIGURATION: u8 = 0x01;

fn main() -> Result<(), ft260::Error> {
    env_logger::init();

    println!("Opening FT260...");
    let mut dev = Ft260::open(FT260_VID, FT260_PID, 0)?;
    let i2c = dev.i2c();

    // 100 kHz standard mode
    i2c.activate(100)?;
    println!("I2C clock: {} kHz", i2c.clock_speed_khz());

    let config = i2c.write_read(TMP102_ADDR, &[REG_CONFIGURATION], 2)?;
    println!(
        "TMP102 config register: 0x{:02X}{:02X}",
        config[0], config[1]
    );

    println!("\nContinuous reading (5 samples, 1s interval):");
    for i in 0..5 {
        let data = i2c.write_read(TMP102_ADDR, &[REG_TEMPERATURE], 2)?;
        // TMP102: 12-bit resolution, 0.0625 degrees C per LSB
        let raw = ((data[0] as i8 as i16) << 4) | ((data[1] as i16) >> 4);
        let temp = raw as f32 * 0.0625;
        println!("  Sample {}: {:.2} C", i + 1, temp);
        std::thread::sleep(std::time::Duration::from_secs(1));
    }

    println!("Done.");
    Ok(())
}
