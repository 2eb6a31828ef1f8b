//! USB HID transport built on nusb.
//!
//! The FT260 exposes its I2C master as a vendor-defined HID interface.
//! Settings and status travel as feature reports over class control
//! transfers; I2C data travels as output/input reports on the interrupt
//! endpoints. The kernel HID driver is detached when the interface is
//! claimed.

use std::fmt::Display;
use std::time::{Duration, Instant};

use nusb::transfer::{Buffer, ControlIn, ControlOut, ControlType, In, Interrupt, Out, Recipient};
use nusb::{self, MaybeFuture};

use super::report;
use super::{Backend, RawStatus, Transport, STATUS_OK};
use crate::constants::*;
use crate::device_info::{find_device, DeviceFilter};
use crate::error::Error;
use crate::status::{decode_conditions, BusConditions, OperationStatus};
use crate::types::TransferFlag;

/// Default transfer timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Wait per interrupt IN transfer before rechecking controller status.
const INPUT_POLL: Duration = Duration::from_millis(20);

/// Delay between controller status polls.
const BUSY_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Maximum controller status polls while waiting for a transaction to end.
const BUSY_POLL_LIMIT: usize = 100;

/// Interface carrying the I2C master.
const I2C_INTERFACE: u8 = 0;

/// Collapse a USB-level failure into a raw status code.
fn usb_failure(context: &str, err: impl Display, status: OperationStatus) -> RawStatus {
    log::warn!("{context}: {err}");
    status.code()
}

/// Opens FT260 devices through nusb.
#[derive(Debug, Clone, Copy, Default)]
pub struct HidBackend;

impl Backend for HidBackend {
    type Transport = HidTransport;

    fn open_by_vid_pid(&self, vid: u16, pid: u16, index: u32) -> Result<HidTransport, RawStatus> {
        let filter = DeviceFilter::new(vid, pid).index(index as usize);
        let dev_info = find_device(&filter).map_err(|e| match e {
            Error::DeviceNotFound => OperationStatus::DeviceNotFound.code(),
            other => usb_failure("device enumeration failed", other, OperationStatus::DeviceManagerError),
        })?;
        HidTransport::from_device_info(dev_info)
    }
}

/// An opened FT260 I2C interface.
pub struct HidTransport {
    #[allow(dead_code)] // Kept to ensure the USB device stays open
    device: nusb::Device,
    interface: nusb::Interface,
    ep_out: nusb::Endpoint<Interrupt, Out>,
    ep_in: nusb::Endpoint<Interrupt, In>,
    in_packet_size: usize,
    timeout: Duration,
}

impl std::fmt::Debug for HidTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HidTransport")
            .field("in_packet_size", &self.in_packet_size)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl HidTransport {
    /// Open the I2C interface of an already-discovered device.
    pub fn from_device_info(dev_info: nusb::DeviceInfo) -> Result<Self, RawStatus> {
        let open_fail =
            |e: nusb::Error| usb_failure("device open failed", e, OperationStatus::DeviceOpenFail);

        let device = dev_info.open().wait().map_err(open_fail)?;
        let (in_addr, out_addr, in_packet_size) =
            find_interrupt_endpoints(&device, I2C_INTERFACE).ok_or_else(|| {
                log::warn!("interface {I2C_INTERFACE} has no interrupt endpoint pair");
                OperationStatus::IncorrectInterface.code()
            })?;

        let interface = device
            .detach_and_claim_interface(I2C_INTERFACE)
            .wait()
            .map_err(open_fail)?;
        let ep_in = interface.endpoint::<Interrupt, In>(in_addr).map_err(open_fail)?;
        let ep_out = interface.endpoint::<Interrupt, Out>(out_addr).map_err(open_fail)?;

        let transport = Self {
            device,
            interface,
            ep_out,
            ep_in,
            in_packet_size,
            timeout: DEFAULT_TIMEOUT,
        };

        let version = transport.get_feature(REPORT_CHIP_VERSION, CHIP_VERSION_LEN)?;
        if !report::is_ft260(&version) {
            log::warn!("unexpected chip version report {version:02x?}");
            return Err(OperationStatus::InvalidDevice.code());
        }

        Ok(transport)
    }

    /// Set the USB transfer timeout.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// The USB transfer timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Read the controller's status report: bus-status byte and clock in kHz.
    pub fn controller_status(&self) -> Result<(u8, u16), RawStatus> {
        let data = self.get_feature(REPORT_I2C_STATUS, I2C_STATUS_LEN)?;
        report::decode_status_report(&data).ok_or_else(|| {
            log::warn!("malformed I2C status report {data:02x?}");
            OperationStatus::IoError.code()
        })
    }

    fn set_feature(&self, data: &[u8]) -> Result<(), RawStatus> {
        let report_id = data.first().copied().unwrap_or_default();
        self.interface
            .control_out(
                ControlOut {
                    control_type: ControlType::Class,
                    recipient: Recipient::Interface,
                    request: HID_SET_REPORT,
                    value: HID_REPORT_TYPE_FEATURE | report_id as u16,
                    index: I2C_INTERFACE as u16,
                    data,
                },
                self.timeout,
            )
            .wait()
            .map_err(|e| usb_failure("SET_REPORT failed", e, OperationStatus::IoError))
    }

    fn get_feature(&self, report_id: u8, length: u16) -> Result<Vec<u8>, RawStatus> {
        self.interface
            .control_in(
                ControlIn {
                    control_type: ControlType::Class,
                    recipient: Recipient::Interface,
                    request: HID_GET_REPORT,
                    value: HID_REPORT_TYPE_FEATURE | report_id as u16,
                    index: I2C_INTERFACE as u16,
                    length,
                },
                self.timeout,
            )
            .wait()
            .map_err(|e| usb_failure("GET_REPORT failed", e, OperationStatus::IoError))
    }

    fn send_output(&mut self, data: &[u8]) -> Result<(), RawStatus> {
        let mut buf = Buffer::new(data.len());
        buf.extend_from_slice(data);
        let completion = self.ep_out.transfer_blocking(buf, self.timeout);
        completion
            .status
            .map_err(|e| usb_failure("interrupt OUT failed", e, OperationStatus::IoError))?;
        if completion.actual_len < data.len() {
            log::warn!("short interrupt OUT: {} of {} bytes", completion.actual_len, data.len());
            return Err(OperationStatus::IoError.code());
        }
        Ok(())
    }

    /// Receive one input report, or `None` if nothing arrived within `wait`.
    fn receive_input(&mut self, wait: Duration) -> Result<Option<Vec<u8>>, RawStatus> {
        let buf = Buffer::new(self.in_packet_size);
        let completion = self.ep_in.transfer_blocking(buf, wait);
        match completion.status {
            Ok(()) => {
                let mut data = completion.buffer.into_vec();
                data.truncate(completion.actual_len);
                Ok(Some(data))
            }
            Err(nusb::transfer::TransferError::Cancelled) => Ok(None),
            Err(e) => Err(usb_failure("interrupt IN failed", e, OperationStatus::IoError)),
        }
    }

    /// Poll the controller until it is no longer busy.
    fn wait_idle(&self) -> Result<BusConditions, RawStatus> {
        let mut conditions = BusConditions::empty();
        for _ in 0..BUSY_POLL_LIMIT {
            let (status, _) = self.controller_status()?;
            conditions = decode_conditions(status);
            if !conditions.contains(BusConditions::CONTROLLER_BUSY) {
                break;
            }
            std::thread::sleep(BUSY_POLL_INTERVAL);
        }
        Ok(conditions)
    }

    fn write_chunks(&mut self, address: u8, flag: TransferFlag, data: &[u8]) -> (RawStatus, u32) {
        let mut written = 0u32;
        for (offset, len, chunk_flag) in report::chunks(data.len(), I2C_WRITE_CHUNK, flag) {
            let out = report::encode_write(address, chunk_flag, &data[offset..offset + len]);
            if let Err(status) = self.send_output(&out) {
                return (status, written);
            }
            written += len as u32;
        }
        match self.wait_idle() {
            Ok(_) => (STATUS_OK, written),
            Err(status) => (status, written),
        }
    }

    /// Collect one read request's worth of data into `out`.
    ///
    /// Returns the number of bytes accounted for. A transaction the
    /// controller aborted (address or data NACK) counts as complete; the
    /// bus-status check that follows reports it.
    fn read_chunk(&mut self, address: u8, flag: TransferFlag, out: &mut [u8]) -> Result<usize, RawStatus> {
        self.send_output(&report::encode_read_request(address, flag, out.len() as u16))?;

        let deadline = Instant::now() + self.timeout;
        let mut got = 0;
        while got < out.len() {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            match self.receive_input(INPUT_POLL.min(deadline - now))? {
                Some(input) => {
                    if let Some(payload) = report::decode_input(&input) {
                        let n = payload.len().min(out.len() - got);
                        out[got..got + n].copy_from_slice(&payload[..n]);
                        got += n;
                    }
                }
                None => {
                    let (status, _) = self.controller_status()?;
                    let conditions = decode_conditions(status);
                    if !conditions.contains(BusConditions::CONTROLLER_BUSY)
                        && conditions.contains(BusConditions::ERROR_CONDITION)
                    {
                        out[got..].fill(0);
                        return Ok(out.len());
                    }
                }
            }
        }
        Ok(got)
    }
}

impl Transport for HidTransport {
    fn i2c_init(&mut self, clock_khz: u32) -> RawStatus {
        if !(I2C_CLOCK_MIN_KHZ..=I2C_CLOCK_MAX_KHZ).contains(&clock_khz) {
            return OperationStatus::InvalidParameter.code();
        }
        // Range above keeps the value within u16.
        match self.set_feature(&report::encode_set_clock(clock_khz as u16)) {
            Ok(()) => STATUS_OK,
            Err(status) => status,
        }
    }

    fn i2c_write(&mut self, address: u8, flag: TransferFlag, data: &[u8]) -> (RawStatus, u32) {
        if data.is_empty() {
            return (OperationStatus::BufferSizeError.code(), 0);
        }
        log::trace!("HID write {} bytes to {address:#04x} flag {flag:?}", data.len());
        self.write_chunks(address, flag, data)
    }

    fn i2c_read(
        &mut self,
        address: u8,
        flag: TransferFlag,
        buf: &mut [u8],
        len: u32,
    ) -> (RawStatus, u32) {
        let len = len as usize;
        if len == 0 || buf.len() < len {
            return (OperationStatus::BufferSizeError.code(), 0);
        }
        log::trace!("HID read {len} bytes from {address:#04x} flag {flag:?}");

        let mut total = 0usize;
        for (offset, chunk_len, chunk_flag) in report::chunks(len, I2C_READ_CHUNK, flag) {
            match self.read_chunk(address, chunk_flag, &mut buf[offset..offset + chunk_len]) {
                Ok(n) => {
                    total += n;
                    if n < chunk_len {
                        break;
                    }
                }
                Err(status) => return (status, total as u32),
            }
        }

        match self.wait_idle() {
            Ok(_) => (STATUS_OK, total as u32),
            Err(status) => (status, total as u32),
        }
    }

    fn i2c_get_status(&mut self) -> (RawStatus, u8) {
        match self.controller_status() {
            Ok((status, _)) => (STATUS_OK, status),
            Err(status) => (status, 0),
        }
    }

    fn i2c_reset(&mut self) -> RawStatus {
        match self.set_feature(&report::encode_reset()) {
            Ok(()) => STATUS_OK,
            Err(status) => status,
        }
    }
}

/// Find the interrupt IN and OUT endpoint addresses of `interface_num`,
/// along with the IN endpoint's max packet size.
fn find_interrupt_endpoints(device: &nusb::Device, interface_num: u8) -> Option<(u8, u8, usize)> {
    let config = device.active_configuration().ok()?;

    for iface_group in config.interfaces() {
        if iface_group.interface_number() != interface_num {
            continue;
        }
        for alt in iface_group.alt_settings() {
            let mut ep_in = None;
            let mut ep_out = None;
            for ep in alt.endpoints() {
                if ep.address() & 0x80 != 0 {
                    ep_in = Some((ep.address(), ep.max_packet_size()));
                } else {
                    ep_out = Some(ep.address());
                }
            }
            if let (Some((in_addr, size)), Some(out_addr)) = (ep_in, ep_out) {
                let size = if size == 0 { REPORT_SIZE } else { size };
                return Some((in_addr, out_addr, size));
            }
        }
    }

    None
}
