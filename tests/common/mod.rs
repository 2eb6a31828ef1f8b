//! Scriptable FT260 transport for integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use ft260::{Backend, RawStatus, TransferFlag, Transport};

/// One recorded transport call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Init(u32),
    Write {
        address: u8,
        flag: TransferFlag,
        data: Vec<u8>,
    },
    Read {
        address: u8,
        flag: TransferFlag,
        len: u32,
        buf_len: usize,
    },
    GetStatus,
    Reset,
}

/// How a target address answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Acknowledges; the bus-status byte reads `idle_status` afterwards.
    Ack,
    /// Address not acknowledged (status byte `0x04`).
    Nack,
    /// Full byte count, then the given raw bus-status byte.
    Status(u8),
    /// Transfers only this many bytes.
    Short(u32),
    /// The transfer call itself fails with this raw code.
    Fail(RawStatus),
}

/// Mock transport echoing written bytes back on read.
#[derive(Debug)]
pub struct MockTransport {
    pub calls: Vec<Call>,
    pub targets: HashMap<u8, Target>,
    pub default_target: Target,
    pub init_status: RawStatus,
    pub reset_status: RawStatus,
    pub get_status_code: RawStatus,
    /// Bus-status byte reported after a successful transaction.
    pub idle_status: u8,
    memory: Vec<u8>,
    last_status: u8,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            targets: HashMap::new(),
            default_target: Target::Ack,
            init_status: 0,
            reset_status: 0,
            get_status_code: 0,
            idle_status: 0x00,
            memory: Vec::new(),
            last_status: 0,
        }
    }
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every address NACKs except `present`.
    pub fn with_devices(present: &[u8]) -> Self {
        let mut mock = Self {
            default_target: Target::Nack,
            ..Self::default()
        };
        for &addr in present {
            mock.targets.insert(addr, Target::Ack);
        }
        mock
    }

    pub fn target(mut self, address: u8, target: Target) -> Self {
        self.targets.insert(address, target);
        self
    }

    fn target_for(&self, address: u8) -> Target {
        self.targets
            .get(&address)
            .copied()
            .unwrap_or(self.default_target)
    }

    /// Run a transfer of `len` bytes and return `(status, count)`.
    fn transfer(&mut self, address: u8, len: u32) -> (RawStatus, u32) {
        match self.target_for(address) {
            Target::Ack => {
                self.last_status = self.idle_status;
                (0, len)
            }
            Target::Nack => {
                self.last_status = 0x04;
                (0, len)
            }
            Target::Status(byte) => {
                self.last_status = byte;
                (0, len)
            }
            Target::Short(n) => (0, n.min(len)),
            Target::Fail(code) => (code, 0),
        }
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    pub fn inits(&self) -> Vec<u32> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Init(khz) => Some(*khz),
                _ => None,
            })
            .collect()
    }

    pub fn read_addresses(&self) -> Vec<u8> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Read { address, .. } => Some(*address),
                _ => None,
            })
            .collect()
    }
}

impl Transport for MockTransport {
    fn i2c_init(&mut self, clock_khz: u32) -> RawStatus {
        self.calls.push(Call::Init(clock_khz));
        self.init_status
    }

    fn i2c_write(&mut self, address: u8, flag: TransferFlag, data: &[u8]) -> (RawStatus, u32) {
        self.calls.push(Call::Write {
            address,
            flag,
            data: data.to_vec(),
        });
        let (status, n) = self.transfer(address, data.len() as u32);
        if status == 0 {
            self.memory = data[..n as usize].to_vec();
        }
        (status, n)
    }

    fn i2c_read(
        &mut self,
        address: u8,
        flag: TransferFlag,
        buf: &mut [u8],
        len: u32,
    ) -> (RawStatus, u32) {
        self.calls.push(Call::Read {
            address,
            flag,
            len,
            buf_len: buf.len(),
        });
        let (status, n) = self.transfer(address, len);
        // Fill slack so tests can see it never leaks.
        buf.fill(0xEE);
        for (i, byte) in buf.iter_mut().take(n as usize).enumerate() {
            *byte = self.memory.get(i).copied().unwrap_or(0);
        }
        (status, n)
    }

    fn i2c_get_status(&mut self) -> (RawStatus, u8) {
        self.calls.push(Call::GetStatus);
        (self.get_status_code, self.last_status)
    }

    fn i2c_reset(&mut self) -> RawStatus {
        self.calls.push(Call::Reset);
        self.reset_status
    }
}

/// Backend handing out one prepared [`MockTransport`].
#[derive(Debug, Default)]
pub struct MockBackend {
    pub open_error: Option<RawStatus>,
    pub transport: RefCell<Option<MockTransport>>,
    pub opened: RefCell<Vec<(u16, u16, u32)>>,
}

impl MockBackend {
    pub fn with(transport: MockTransport) -> Self {
        Self {
            transport: RefCell::new(Some(transport)),
            ..Self::default()
        }
    }

    pub fn failing(code: RawStatus) -> Self {
        Self {
            open_error: Some(code),
            ..Self::default()
        }
    }
}

impl Backend for MockBackend {
    type Transport = MockTransport;

    fn open_by_vid_pid(&self, vid: u16, pid: u16, index: u32) -> Result<MockTransport, RawStatus> {
        self.opened.borrow_mut().push((vid, pid, index));
        if let Some(code) = self.open_error {
            return Err(code);
        }
        Ok(self.transport.borrow_mut().take().unwrap_or_default())
    }
}
