//! Decoding of transport status codes and the I2C bus-status byte.
//!
//! Every transport call returns a raw status code; [`decode_status`] maps it
//! onto [`OperationStatus`]. After each I2C transaction the controller's
//! status register is read back and [`decode_conditions`] turns it into a
//! [`BusConditions`] set.

use std::fmt;

use bitflags::bitflags;

use crate::error::{Error, Result};

/// Outcome of a single transport-level call.
///
/// The discriminants are the raw codes reported by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum OperationStatus {
    Ok = 0,
    InvalidHandle = 1,
    DeviceNotFound = 2,
    DeviceNotOpened = 3,
    DeviceOpenFail = 4,
    DeviceCloseFail = 5,
    IncorrectInterface = 6,
    IncorrectChipMode = 7,
    DeviceManagerError = 8,
    IoError = 9,
    InvalidParameter = 10,
    NullBufferPointer = 11,
    BufferSizeError = 12,
    UartSetFail = 13,
    RxNoData = 14,
    GpioWrongDirection = 15,
    InvalidDevice = 16,
    InvalidOpenDrainSet = 17,
    InvalidOpenDrainReset = 18,
    I2cReadFail = 19,
    OtherError = 20,
}

impl OperationStatus {
    const ALL: [Self; 21] = [
        Self::Ok,
        Self::InvalidHandle,
        Self::DeviceNotFound,
        Self::DeviceNotOpened,
        Self::DeviceOpenFail,
        Self::DeviceCloseFail,
        Self::IncorrectInterface,
        Self::IncorrectChipMode,
        Self::DeviceManagerError,
        Self::IoError,
        Self::InvalidParameter,
        Self::NullBufferPointer,
        Self::BufferSizeError,
        Self::UartSetFail,
        Self::RxNoData,
        Self::GpioWrongDirection,
        Self::InvalidDevice,
        Self::InvalidOpenDrainSet,
        Self::InvalidOpenDrainReset,
        Self::I2cReadFail,
        Self::OtherError,
    ];

    /// The raw code for this status.
    #[inline]
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Whether this is the success status.
    #[inline]
    pub fn is_ok(self) -> bool {
        self == Self::Ok
    }

    fn description(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::InvalidHandle => "invalid handle",
            Self::DeviceNotFound => "device not found",
            Self::DeviceNotOpened => "device not opened",
            Self::DeviceOpenFail => "device open failed",
            Self::DeviceCloseFail => "device close failed",
            Self::IncorrectInterface => "incorrect interface",
            Self::IncorrectChipMode => "incorrect chip mode",
            Self::DeviceManagerError => "device manager error",
            Self::IoError => "I/O error",
            Self::InvalidParameter => "invalid parameter",
            Self::NullBufferPointer => "null buffer pointer",
            Self::BufferSizeError => "buffer size error",
            Self::UartSetFail => "UART setting failed",
            Self::RxNoData => "no receive data",
            Self::GpioWrongDirection => "GPIO wrong direction",
            Self::InvalidDevice => "invalid device",
            Self::InvalidOpenDrainSet => "invalid open-drain set",
            Self::InvalidOpenDrainReset => "invalid open-drain reset",
            Self::I2cReadFail => "I2C read failed",
            Self::OtherError => "other error",
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description(), self.code())
    }
}

impl TryFrom<u32> for OperationStatus {
    type Error = Error;

    fn try_from(code: u32) -> Result<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(Error::UnknownStatus(code))
    }
}

/// Decode a raw transport status code.
///
/// Fails with [`Error::UnknownStatus`] for codes outside `0..=20`.
pub fn decode_status(code: u32) -> Result<OperationStatus> {
    OperationStatus::try_from(code)
}

bitflags! {
    /// Conditions reported by the I2C controller's status register.
    ///
    /// Several conditions may be active at once. Bit 7 of the register is
    /// not part of the field and is dropped on decode.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BusConditions: u8 {
        const CONTROLLER_BUSY = 1 << 0;
        const ERROR_CONDITION = 1 << 1;
        const SLAVE_ADDRESS_NACK = 1 << 2;
        const DATA_NACK = 1 << 3;
        const ARBITRATION_LOST = 1 << 4;
        const CONTROLLER_IDLE = 1 << 5;
        const BUS_BUSY = 1 << 6;
    }
}

/// Decode the I2C bus-status byte into its active conditions.
///
/// A byte of zero yields the empty set.
pub fn decode_conditions(status: u8) -> BusConditions {
    BusConditions::from_bits_truncate(status)
}

impl BusConditions {
    /// Whether these conditions describe a completed transaction.
    ///
    /// Only the empty set and CONTROLLER_IDLE alone, the resting state
    /// after a transaction, count as success.
    pub fn is_success(self) -> bool {
        (self - Self::CONTROLLER_IDLE).is_empty()
    }

    /// Whether these conditions are exactly the address-not-acknowledged
    /// signature of an unoccupied address.
    pub fn is_address_nack(self) -> bool {
        self == Self::SLAVE_ADDRESS_NACK
    }

    fn label(flag: Self) -> &'static str {
        match flag {
            f if f == Self::CONTROLLER_BUSY => "controller busy",
            f if f == Self::ERROR_CONDITION => "error condition",
            f if f == Self::SLAVE_ADDRESS_NACK => "slave address not acknowledged",
            f if f == Self::DATA_NACK => "data not acknowledged",
            f if f == Self::ARBITRATION_LOST => "arbitration lost",
            f if f == Self::CONTROLLER_IDLE => "controller idle",
            _ => "bus busy",
        }
    }
}

impl fmt::Display for BusConditions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        for (i, flag) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(Self::label(flag))?;
        }
        Ok(())
    }
}
