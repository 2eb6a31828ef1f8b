//! Core FT260 device handle.
//!
//! [`Ft260`] represents one opened FT260 bridge. It exclusively owns the
//! transport session and the [`I2cMaster`] that drives it; dropping the
//! handle closes the session.
//!
//! # Opening a device
//!
//! ```no_run
//! use ft260::{Ft260, TransferFlag};
//!
//! let mut dev = Ft260::open(0x0403, 0x6030, 0)?;
//! dev.i2c().write(0x50, &[0x00, 0x42], TransferFlag::StartAndStop)?;
//! # Ok::<(), ft260::Error>(())
//! ```

use crate::device_info::DeviceFilter;
use crate::error::{Error, Result};
use crate::i2c::I2cMaster;
use crate::status::{decode_status, OperationStatus};
use crate::transport::hid::{HidBackend, HidTransport};
use crate::transport::{Backend, Transport};

/// An opened FT260 device.
#[derive(Debug)]
pub struct Ft260<T = HidTransport> {
    i2c: I2cMaster<T>,
}

impl Ft260<HidTransport> {
    /// Open the `device_number`-th device (0-based) matching the vendor and
    /// product IDs over USB HID.
    pub fn open(vid: u16, pid: u16, device_number: u32) -> Result<Self> {
        Self::open_with(&HidBackend, vid, pid, device_number)
    }

    /// Open a device from a [`DeviceFilter`].
    pub fn open_with_filter(filter: &DeviceFilter) -> Result<Self> {
        let index = u32::try_from(filter.index)
            .map_err(|_| Error::InvalidArgument("device index out of range"))?;
        Self::open(filter.vendor_id, filter.product_id, index)
    }
}

impl<T: Transport> Ft260<T> {
    /// Open a device through an arbitrary [`Backend`].
    ///
    /// On failure the decoded status is returned as [`Error::DeviceOpen`].
    pub fn open_with<B>(backend: &B, vid: u16, pid: u16, device_number: u32) -> Result<Self>
    where
        B: Backend<Transport = T>,
    {
        match backend.open_by_vid_pid(vid, pid, device_number) {
            Ok(transport) => {
                log::debug!("opened {vid:04x}:{pid:04x} #{device_number}");
                Ok(Self::from_transport(transport))
            }
            Err(code) => {
                let status = decode_status(code)?;
                // A backend must not report success without a session.
                let status = if status.is_ok() { OperationStatus::OtherError } else { status };
                Err(Error::DeviceOpen(status))
            }
        }
    }

    /// Wrap an already-opened transport session.
    pub fn from_transport(transport: T) -> Self {
        Self {
            i2c: I2cMaster::new(transport),
        }
    }

    /// The I2C master.
    pub fn i2c(&mut self) -> &mut I2cMaster<T> {
        &mut self.i2c
    }

    /// Hand over the I2C master, consuming the handle.
    pub fn into_i2c(self) -> I2cMaster<T> {
        self.i2c
    }
}
