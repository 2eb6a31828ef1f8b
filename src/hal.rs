//! `embedded-hal` 1.0 trait implementations.
//!
//! Enable the `embedded-hal` feature in your `Cargo.toml` to use an FT260
//! with any `embedded_hal::i2c::I2c` driver:
//!
//! ```toml
//! [dependencies]
//! ft260 = { version = "0.1", features = ["embedded-hal"] }
//! ```
//!
//! Each [`Operation`] becomes one FT260 transaction. The first carries a
//! START, a change of direction a repeated START, and the last a STOP, so
//! the whole list executes as a single bus transaction.
//!
//! The FT260 cannot issue a transaction without data, so an empty
//! [`Operation::Write`] or [`Operation::Read`] fails with
//! [`Error::InvalidArgument`] before anything reaches the bus. Use
//! [`I2cMaster::probe`] to test for a device instead of a zero-length write.

use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource, Operation};

use crate::error::Error;
use crate::i2c::I2cMaster;
use crate::status::BusConditions;
use crate::transport::Transport;
use crate::types::TransferFlag;

// ---- Error conversion ----

impl embedded_hal::i2c::Error for Error {
    fn kind(&self) -> ErrorKind {
        match self {
            Error::I2cBus(c) if c.contains(BusConditions::ARBITRATION_LOST) => ErrorKind::ArbitrationLoss,
            Error::I2cBus(c) if c.contains(BusConditions::SLAVE_ADDRESS_NACK) => {
                ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
            }
            Error::I2cBus(c) if c.contains(BusConditions::DATA_NACK) => {
                ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data)
            }
            Error::I2cBus(_) => ErrorKind::Bus,
            _ => ErrorKind::Other,
        }
    }
}

// ---- embedded-hal I2C ----

impl<T: Transport> embedded_hal::i2c::ErrorType for I2cMaster<T> {
    type Error = Error;
}

impl<T: Transport> embedded_hal::i2c::I2c for I2cMaster<T> {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if address > 0x7F {
            return Err(Error::InvalidArgument(
                "I2C address must be 7-bit (0x00..=0x7F)",
            ));
        }

        let last = operations.len().saturating_sub(1);
        let mut prev_is_read = None;

        for (i, op) in operations.iter_mut().enumerate() {
            let cur_is_read = matches!(op, Operation::Read(_));
            let start = match prev_is_read {
                None => TransferFlag::Start,
                Some(prev) if prev != cur_is_read => TransferFlag::RepeatedStart,
                Some(_) => TransferFlag::None,
            };
            let flag = TransferFlag::compose(start, i == last);

            match op {
                Operation::Read(buf) => {
                    let data = self.read(address, buf.len(), flag)?;
                    buf.copy_from_slice(&data);
                }
                Operation::Write(buf) => self.write(address, buf, flag)?,
            }

            prev_is_read = Some(cur_is_read);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::Error as _;

    #[test]
    fn error_kind_mapping_address_nack() {
        let err = Error::I2cBus(BusConditions::SLAVE_ADDRESS_NACK | BusConditions::ERROR_CONDITION);
        assert_eq!(err.kind(), ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
    }

    #[test]
    fn error_kind_mapping_data_nack() {
        let err = Error::I2cBus(BusConditions::DATA_NACK);
        assert_eq!(err.kind(), ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data));
    }

    #[test]
    fn error_kind_mapping_arbitration() {
        let err = Error::I2cBus(BusConditions::ARBITRATION_LOST | BusConditions::DATA_NACK);
        assert_eq!(err.kind(), ErrorKind::ArbitrationLoss);
    }

    #[test]
    fn error_kind_mapping_other() {
        assert_eq!(Error::I2cBus(BusConditions::BUS_BUSY).kind(), ErrorKind::Bus);
        assert_eq!(Error::NotActive.kind(), ErrorKind::Other);
        let timeout = Error::I2cTimeout { operation: "read", requested: 2, actual: 0 };
        assert_eq!(timeout.kind(), ErrorKind::Other);
    }
}
