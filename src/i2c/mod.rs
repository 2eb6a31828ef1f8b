//! I2C master protocol.
//!
//! [`I2cMaster`] drives the FT260's hardware I2C controller through a
//! [`Transport`]. Every transaction is checked twice: the transport's byte
//! count must match the request, then the controller's bus-status byte must
//! show no fault.
//!
//! The master starts [`Inactive`](MasterState::Inactive). The first
//! [`write`](I2cMaster::write) or [`read`](I2cMaster::read) configures the
//! default 400 kHz clock unless [`activate`](I2cMaster::activate) was
//! called first.
//!
//! # Example
//!
//! ```no_run
//! use ft260::{Ft260, TransferFlag};
//!
//! let mut dev = Ft260::open(0x0403, 0x6030, 0)?;
//! let i2c = dev.i2c();
//! i2c.activate(100)?; // 100 kHz
//!
//! // Write register pointer then read 2 bytes from 0x48
//! i2c.write(0x48, &[0x00], TransferFlag::StartAndStop)?;
//! let data = i2c.read(0x48, 2, TransferFlag::StartAndStop)?;
//! # Ok::<(), ft260::Error>(())
//! ```

mod scan;

pub use scan::ScanResult;

use crate::constants::DEFAULT_I2C_CLOCK_KHZ;
use crate::error::{Error, Result};
use crate::status::{decode_conditions, decode_status, OperationStatus};
use crate::transport::{RawStatus, Transport};
use crate::types::{MasterState, TransferFlag};

/// I2C master bound to one transport session.
///
/// Not internally synchronized; wrap it in a `Mutex` to share it between
/// threads.
#[derive(Debug)]
pub struct I2cMaster<T> {
    transport: T,
    state: MasterState,
}

impl<T: Transport> I2cMaster<T> {
    /// Create an inactive master over an opened transport.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: MasterState::Inactive,
        }
    }

    /// Current activation state.
    pub fn state(&self) -> MasterState {
        self.state
    }

    /// Whether the I2C clock has been configured.
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Last configured clock speed in kHz (400 before activation).
    pub fn clock_speed_khz(&self) -> u32 {
        self.state.clock_speed_khz()
    }

    /// Borrow the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutably borrow the transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Release the transport.
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Configure the I2C clock and mark the master active.
    ///
    /// Re-issues the init command on every call. Speeds the chip does not
    /// support are rejected by the transport.
    pub fn activate(&mut self, clock_speed_khz: u32) -> Result<()> {
        let status = decode_status(self.transport.i2c_init(clock_speed_khz))?;
        if !status.is_ok() {
            return Err(Error::Activation(status));
        }
        log::debug!("I2C master active at {clock_speed_khz} kHz");
        self.state = MasterState::Active { clock_speed_khz };
        Ok(())
    }

    fn ensure_active(&mut self) -> Result<()> {
        match self.state {
            MasterState::Active { .. } => Ok(()),
            MasterState::Inactive => self.activate(DEFAULT_I2C_CLOCK_KHZ),
        }
    }

    /// Write `data` to the device at `address`.
    pub fn write(&mut self, address: u8, data: &[u8], flag: TransferFlag) -> Result<()> {
        if data.is_empty() {
            return Err(Error::InvalidArgument("I2C write needs at least one byte"));
        }
        let requested = u32::try_from(data.len())
            .map_err(|_| Error::InvalidArgument("I2C write too long"))?;
        self.ensure_active()?;

        log::trace!("I2C write {requested} bytes to {address:#04x} ({flag:?})");
        let (status, written) = self.transport.i2c_write(address, flag, data);
        check_device(status)?;
        if written != requested {
            return Err(Error::I2cTimeout {
                operation: "write",
                requested,
                actual: written,
            });
        }
        self.check_bus()
    }

    /// Read `length` bytes from the device at `address`.
    pub fn read(&mut self, address: u8, length: usize, flag: TransferFlag) -> Result<Vec<u8>> {
        if length == 0 {
            return Err(Error::InvalidArgument("I2C read needs at least one byte"));
        }
        let requested =
            u32::try_from(length).map_err(|_| Error::InvalidArgument("I2C read too long"))?;
        self.ensure_active()?;

        log::trace!("I2C read {requested} bytes from {address:#04x} ({flag:?})");
        // One byte of slack is part of the transport contract.
        let mut buf = vec![0u8; length + 1];
        let (status, read) = self.transport.i2c_read(address, flag, &mut buf, requested);
        check_device(status)?;
        if read != requested {
            return Err(Error::I2cTimeout {
                operation: "read",
                requested,
                actual: read,
            });
        }
        self.check_bus()?;

        buf.truncate(length);
        Ok(buf)
    }

    /// Write `data` then read `length` bytes in one transaction.
    ///
    /// The write phase holds the bus; the read phase begins with a repeated
    /// START and ends with STOP.
    pub fn write_read(&mut self, address: u8, data: &[u8], length: usize) -> Result<Vec<u8>> {
        self.write(address, data, TransferFlag::Start)?;
        self.read(address, length, TransferFlag::RepeatedStartAndStop)
    }

    /// Reset the I2C controller.
    ///
    /// Only valid once the master is active.
    pub fn reset(&mut self) -> Result<()> {
        if !self.is_active() {
            return Err(Error::NotActive);
        }
        check_device(self.transport.i2c_reset())?;
        log::debug!("I2C controller reset");
        Ok(())
    }

    /// Read and decode the bus-status byte after a transaction.
    fn check_bus(&mut self) -> Result<()> {
        let (status, byte) = self.transport.i2c_get_status();
        check_device(status)?;
        let conditions = decode_conditions(byte);
        log::trace!("I2C bus status {byte:#04x}");
        if conditions.is_success() {
            Ok(())
        } else {
            Err(Error::I2cBus(conditions))
        }
    }
}

/// Decode a raw status from a call other than open or init.
fn check_device(code: RawStatus) -> Result<()> {
    match decode_status(code)? {
        OperationStatus::Ok => Ok(()),
        status => Err(Error::Device(status)),
    }
}
