//! List all connected FT260 devices.
//!
//! Usage: cargo run --example find_all

use ft260::constants::{FT260_PID, FT260_VID};

fn main() -> Result<(), ft260::Error> {
    env_logger::init();

    let devices = ft260::find_devices(FT260_VID, FT260_PID)?;

    for (index, dev) in devices.iter().enumerate() {
        #[cfg(target_os = "linux")]
        println!(
            "#{index}: bus={} addr={} vid={:#06x} pid={:#06x}",
            dev.busnum(),
            dev.device_address(),
            dev.vendor_id(),
            dev.product_id(),
        );
        #[cfg(not(target_os = "linux"))]
        println!(
            "#{index}: addr={} vid={:#06x} pid={:#06x}",
            dev.device_address(),
            dev.vendor_id(),
            dev.product_id(),
        );
    }

    if devices.is_empty() {
        println!("No FT260 devices found.");
    }

    Ok(())
}
