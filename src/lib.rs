//! Pure Rust host driver for the FTDI FT260 USB-to-I2C bridge.
//!
//! This crate drives the FT260's hardware I2C master over its USB HID
//! interface. It uses [nusb](https://crates.io/crates/nusb) as the USB
//! backend, so no vendor DLL, `hidapi` or `libusb` is required.
//!
//! # Quick Start
//!
//! ```no_run
//! use ft260::{Ft260, constants::{FT260_PID, FT260_VID}};
//!
//! let mut dev = Ft260::open(FT260_VID, FT260_PID, 0)?;
//! let found = dev.i2c().scan()?;
//! println!("devices: {found}");
//!
//! let temp = dev.i2c().write_read(0x48, &[0x00], 2)?;
//! println!("raw temperature: {:02x?}", temp);
//! # Ok::<(), ft260::Error>(())
//! ```
//!
//! # Features
//!
//! - **Device discovery**: Enumerate connected FT260 bridges and select one
//!   of several identical devices by index.
//! - **I2C master**: Clock configuration, write, read, combined write/read
//!   with repeated START, and controller reset, with every transaction
//!   checked against the chip's bus-status register ([`i2c`]).
//! - **Bus scan**: Probe the general-purpose 7-bit address range.
//! - **Pluggable transport**: The I2C master runs over any [`Transport`],
//!   so it can be driven by a vendor library or a test double.
//! - **`embedded-hal`**: Optional `embedded_hal::i2c::I2c` implementation.

pub mod constants;
pub mod context;
pub mod device_info;
pub mod error;
#[cfg(feature = "embedded-hal")]
pub mod hal;
pub mod i2c;
pub mod status;
pub mod transport;
pub mod types;

// ---- Convenience re-exports ----

pub use context::Ft260;
pub use device_info::{find_device, find_devices, DeviceFilter};
pub use error::{Error, Result};
pub use i2c::{I2cMaster, ScanResult};
pub use status::{BusConditions, OperationStatus};
pub use transport::{Backend, RawStatus, Transport};
pub use types::*;
