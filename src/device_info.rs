//! Device discovery and enumeration.
//!
//! Use [`find_devices`] to list connected FT260 bridges, or [`DeviceFilter`]
//! to pick one of several identical devices by index.

use nusb::{self, DeviceInfo, MaybeFuture};

use crate::constants::{FT260_PID, FT260_VID};
use crate::error::{Error, Result};

/// Filtering criteria for finding FT260 devices.
///
/// # Example
///
/// ```no_run
/// use ft260::DeviceFilter;
///
/// // Second FT260 on the system
/// let filter = DeviceFilter::default().index(1);
/// let dev = ft260::find_device(&filter)?;
/// # Ok::<(), ft260::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceFilter {
    /// USB vendor ID to match.
    pub vendor_id: u16,
    /// USB product ID to match.
    pub product_id: u16,
    /// Select the Nth matching device (0-based). Defaults to 0.
    pub index: usize,
}

impl DeviceFilter {
    /// Create a new filter matching the given vendor and product IDs.
    pub fn new(vendor_id: u16, product_id: u16) -> Self {
        Self {
            vendor_id,
            product_id,
            index: 0,
        }
    }

    /// Select the Nth matching device (0-based).
    pub fn index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    fn matches(&self, dev: &DeviceInfo) -> bool {
        dev.vendor_id() == self.vendor_id && dev.product_id() == self.product_id
    }
}

impl Default for DeviceFilter {
    fn default() -> Self {
        Self::new(FT260_VID, FT260_PID)
    }
}

/// List all connected devices matching the given vendor and product IDs.
///
/// Devices are returned in enumeration order, which is the order used by
/// [`DeviceFilter::index`].
///
/// # Example
///
/// ```no_run
/// use ft260::constants::{FT260_PID, FT260_VID};
///
/// for dev in ft260::find_devices(FT260_VID, FT260_PID)? {
///     println!("Found: vid={:#06x} pid={:#06x}", dev.vendor_id(), dev.product_id());
/// }
/// # Ok::<(), ft260::Error>(())
/// ```
pub fn find_devices(vendor: u16, product: u16) -> Result<Vec<DeviceInfo>> {
    let filter = DeviceFilter::new(vendor, product);
    let devices: Vec<DeviceInfo> = nusb::list_devices()
        .wait()?
        .filter(|d| filter.matches(d))
        .collect();
    Ok(devices)
}

/// Find a single device matching the given filter criteria.
pub fn find_device(filter: &DeviceFilter) -> Result<DeviceInfo> {
    nusb::list_devices()
        .wait()?
        .filter(|d| filter.matches(d))
        .nth(filter.index)
        .ok_or(Error::DeviceNotFound)
}
