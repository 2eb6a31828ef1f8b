//! Protocol constants for FT260 communication.
//!
//! These constants define the USB identifiers, HID report IDs, and other
//! wire-level details of the FT260 I2C master protocol. Most users should
//! only need the identifiers and defaults at the top.

// ---- Identifiers and defaults ----

/// Default FT260 vendor ID (FTDI).
pub const FT260_VID: u16 = 0x0403;

/// Default FT260 product ID.
pub const FT260_PID: u16 = 0x6030;

/// Default UART baud rate. Unused by the I2C path.
pub const DEFAULT_BAUDRATE: u32 = 9600;

/// Default I2C clock speed in kHz.
pub const DEFAULT_I2C_CLOCK_KHZ: u32 = 400;

/// First address probed by a bus scan.
pub const I2C_SCAN_START: u8 = 0x08;

/// Last address probed by a bus scan (inclusive).
pub const I2C_SCAN_END: u8 = 0x7B;

/// Slowest I2C clock the chip accepts, in kHz.
pub const I2C_CLOCK_MIN_KHZ: u32 = 60;

/// Fastest I2C clock the chip accepts, in kHz.
pub const I2C_CLOCK_MAX_KHZ: u32 = 3400;

// ---- HID report IDs ----

/// Chip version feature report.
pub(crate) const REPORT_CHIP_VERSION: u8 = 0xA0;
/// System setting feature report.
pub(crate) const REPORT_SYSTEM_SETTING: u8 = 0xA1;
/// I2C status feature report.
pub(crate) const REPORT_I2C_STATUS: u8 = 0xC0;
/// I2C read request output report.
pub(crate) const REPORT_I2C_READ_REQUEST: u8 = 0xC2;
/// First I2C data report ID (4 payload bytes).
pub(crate) const REPORT_I2C_DATA_FIRST: u8 = 0xD0;
/// Last I2C data report ID (60 payload bytes).
pub(crate) const REPORT_I2C_DATA_LAST: u8 = 0xDE;

// ---- System setting sub-commands ----

/// Reset the I2C controller.
pub(crate) const SETTING_I2C_RESET: u8 = 0x20;
/// Set the I2C clock speed.
pub(crate) const SETTING_I2C_CLOCK: u8 = 0x22;

// ---- HID class requests ----

/// HID GET_REPORT request.
pub(crate) const HID_GET_REPORT: u8 = 0x01;
/// HID SET_REPORT request.
pub(crate) const HID_SET_REPORT: u8 = 0x09;
/// Report type "feature" in the high byte of wValue.
pub(crate) const HID_REPORT_TYPE_FEATURE: u16 = 0x0300;

// ---- Payload limits ----

/// Size of every FT260 HID report on the interrupt endpoints.
pub(crate) const REPORT_SIZE: usize = 64;
/// Maximum data bytes in one I2C write report.
pub(crate) const I2C_WRITE_CHUNK: usize = 60;
/// Maximum data bytes requested by one I2C read request.
pub(crate) const I2C_READ_CHUNK: usize = 180;
/// Length of the chip version feature report.
pub(crate) const CHIP_VERSION_LEN: u16 = 13;
/// Length of the I2C status feature report.
pub(crate) const I2C_STATUS_LEN: u16 = 5;
/// Chip code reported by genuine FT260 parts.
pub(crate) const CHIP_CODE: [u8; 2] = [0x02, 0x60];
