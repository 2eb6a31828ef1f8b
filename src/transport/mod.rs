//! Transport seam between the I2C master and the chip.
//!
//! A [`Backend`] opens sessions; each session is a [`Transport`] that
//! carries the chip's I2C master commands and reports a raw status code per
//! call. The codes are decoded by [`crate::status::decode_status`].
//!
//! [`hid::HidBackend`] is the built-in implementation over the FT260's USB
//! HID interface. Other implementations (vendor libraries, test doubles)
//! plug in through [`Ft260::open_with`](crate::Ft260::open_with).

pub mod hid;
mod report;

use crate::types::TransferFlag;

/// Raw status code reported by a transport call. Zero is success.
pub type RawStatus = u32;

/// Raw code for a successful call.
pub const STATUS_OK: RawStatus = 0;

/// Opens transport sessions by USB identifiers.
pub trait Backend {
    /// Session type produced by this backend.
    type Transport: Transport;

    /// Open the `index`-th device (0-based) matching `vid` and `pid`.
    fn open_by_vid_pid(&self, vid: u16, pid: u16, index: u32)
        -> Result<Self::Transport, RawStatus>;
}

/// One opened session with an FT260.
///
/// Calls block until the chip answers or the transport gives up.
pub trait Transport {
    /// Configure the I2C master clock.
    fn i2c_init(&mut self, clock_khz: u32) -> RawStatus;

    /// Write `data` to `address`. Returns the status and the number of
    /// bytes written.
    fn i2c_write(&mut self, address: u8, flag: TransferFlag, data: &[u8]) -> (RawStatus, u32);

    /// Read `len` bytes from `address` into `buf`, which holds at least
    /// `len + 1` bytes. Returns the status and the number of bytes read.
    fn i2c_read(
        &mut self,
        address: u8,
        flag: TransferFlag,
        buf: &mut [u8],
        len: u32,
    ) -> (RawStatus, u32);

    /// Read the controller's bus-status byte.
    fn i2c_get_status(&mut self) -> (RawStatus, u8);

    /// Reset the I2C controller.
    fn i2c_reset(&mut self) -> RawStatus;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn i2c_init(&mut self, clock_khz: u32) -> RawStatus {
        (**self).i2c_init(clock_khz)
    }

    fn i2c_write(&mut self, address: u8, flag: TransferFlag, data: &[u8]) -> (RawStatus, u32) {
        (**self).i2c_write(address, flag, data)
    }

    fn i2c_read(
        &mut self,
        address: u8,
        flag: TransferFlag,
        buf: &mut [u8],
        len: u32,
    ) -> (RawStatus, u32) {
        (**self).i2c_read(address, flag, buf, len)
    }

    fn i2c_get_status(&mut self) -> (RawStatus, u8) {
        (**self).i2c_get_status()
    }

    fn i2c_reset(&mut self) -> RawStatus {
        (**self).i2c_reset()
    }
}
