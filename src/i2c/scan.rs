//! Bus scanning.

use std::fmt;
use std::ops::RangeInclusive;

use super::I2cMaster;
use crate::constants::{I2C_SCAN_END, I2C_SCAN_START};
use crate::error::{Error, Result};
use crate::transport::Transport;
use crate::types::{Probe, TransferFlag};

/// Addresses that acknowledged during a scan, in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    addresses: Vec<u8>,
}

impl ScanResult {
    /// The present addresses.
    pub fn addresses(&self) -> &[u8] {
        &self.addresses
    }

    /// Whether a device answered at `address`.
    pub fn contains(&self, address: u8) -> bool {
        self.addresses.binary_search(&address).is_ok()
    }

    /// Number of devices found.
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    /// Whether no device answered.
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// Release the address list.
    pub fn into_vec(self) -> Vec<u8> {
        self.addresses
    }
}

impl IntoIterator for ScanResult {
    type Item = u8;
    type IntoIter = std::vec::IntoIter<u8>;

    fn into_iter(self) -> Self::IntoIter {
        self.addresses.into_iter()
    }
}

impl fmt::Display for ScanResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, addr) in self.addresses.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{addr:#04x}")?;
        }
        f.write_str("]")
    }
}

impl<T: Transport> I2cMaster<T> {
    /// Check for a device at `address` with a one-byte read.
    ///
    /// An address-not-acknowledged bus error is reported as
    /// [`Probe::Absent`]; every other failure is returned as an error.
    pub fn probe(&mut self, address: u8) -> Result<Probe> {
        match self.read(address, 1, TransferFlag::StartAndStop) {
            Ok(_) => Ok(Probe::Present),
            Err(Error::I2cBus(conditions)) if conditions.is_address_nack() => Ok(Probe::Absent),
            Err(e) => Err(e),
        }
    }

    /// Probe every general-purpose address (0x08 to 0x7B).
    ///
    /// Stops at the first failure that is not an address NACK.
    pub fn scan(&mut self) -> Result<ScanResult> {
        self.scan_range(I2C_SCAN_START..=I2C_SCAN_END)
    }

    /// Probe every address in `range`, in ascending order.
    pub fn scan_range(&mut self, range: RangeInclusive<u8>) -> Result<ScanResult> {
        let mut addresses = Vec::new();
        for address in range {
            if self.probe(address)? == Probe::Present {
                log::debug!("found I2C device at {address:#04x}");
                addresses.push(address);
            }
        }
        Ok(ScanResult { addresses })
    }
}
