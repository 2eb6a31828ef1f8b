//! Error types for the ft260 crate.

use crate::status::{BusConditions, OperationStatus};

/// The error type for FT260 operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The transport could not open the device.
    #[error("failed to open device: {0}")]
    DeviceOpen(OperationStatus),

    /// The I2C init command was rejected.
    #[error("failed to initialize I2C: {0}")]
    Activation(OperationStatus),

    /// The transport moved fewer bytes than requested.
    #[error("I2C {operation} timed out: {actual} of {requested} bytes transferred")]
    I2cTimeout {
        /// `"write"` or `"read"`.
        operation: &'static str,
        /// Number of bytes requested.
        requested: u32,
        /// Number of bytes the transport reported.
        actual: u32,
    },

    /// The controller reported fault conditions after a transaction.
    #[error("I2C bus error: {0}")]
    I2cBus(BusConditions),

    /// A transport call other than open or init failed.
    #[error("device error: {0}")]
    Device(OperationStatus),

    /// The transport returned a status code outside the known range.
    #[error("unknown status code {0}")]
    UnknownStatus(u32),

    /// The I2C master has not been activated.
    #[error("I2C master not activated")]
    NotActive,

    /// Invalid argument(s) were provided.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// No matching device was found.
    #[error("device not found")]
    DeviceNotFound,

    /// An error from the nusb USB layer.
    #[error("USB error: {0}")]
    Usb(#[from] nusb::Error),
}

impl Error {
    /// The bus conditions carried by an [`Error::I2cBus`].
    pub fn bus_conditions(&self) -> Option<BusConditions> {
        match self {
            Self::I2cBus(conditions) => Some(*conditions),
            _ => None,
        }
    }
}

/// A specialized `Result` type for FT260 operations.
pub type Result<T> = std::result::Result<T, Error>;
