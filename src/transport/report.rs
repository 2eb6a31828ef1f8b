//! HID report framing for the FT260 I2C master.

use crate::constants::*;
use crate::types::TransferFlag;

/// Report ID of an I2C data report carrying `len` bytes (1..=60).
pub(crate) fn data_report_id(len: usize) -> u8 {
    REPORT_I2C_DATA_FIRST + ((len.max(1) - 1) / 4) as u8
}

/// Encode one I2C write report: `[id, addr, flag, len, data...]`.
///
/// `data` must hold between 1 and [`I2C_WRITE_CHUNK`] bytes.
pub(crate) fn encode_write(address: u8, flag: TransferFlag, data: &[u8]) -> Vec<u8> {
    debug_assert!(!data.is_empty() && data.len() <= I2C_WRITE_CHUNK);
    let mut report = Vec::with_capacity(4 + data.len());
    report.push(data_report_id(data.len()));
    report.push(address);
    report.push(flag.wire_value());
    report.push(data.len() as u8);
    report.extend_from_slice(data);
    report
}

/// Encode an I2C read request: `[0xC2, addr, flag, len_lo, len_hi]`.
pub(crate) fn encode_read_request(address: u8, flag: TransferFlag, len: u16) -> [u8; 5] {
    let [lo, hi] = len.to_le_bytes();
    [REPORT_I2C_READ_REQUEST, address, flag.wire_value(), lo, hi]
}

/// Encode the system-setting report that sets the I2C clock.
pub(crate) fn encode_set_clock(clock_khz: u16) -> [u8; 4] {
    let [lo, hi] = clock_khz.to_le_bytes();
    [REPORT_SYSTEM_SETTING, SETTING_I2C_CLOCK, lo, hi]
}

/// The system-setting report that resets the I2C controller.
pub(crate) fn encode_reset() -> [u8; 2] {
    [REPORT_SYSTEM_SETTING, SETTING_I2C_RESET]
}

/// Payload of an I2C input report, or `None` for any other report.
pub(crate) fn decode_input(report: &[u8]) -> Option<&[u8]> {
    let (&id, rest) = report.split_first()?;
    if !(REPORT_I2C_DATA_FIRST..=REPORT_I2C_DATA_LAST).contains(&id) {
        return None;
    }
    let (&len, payload) = rest.split_first()?;
    Some(&payload[..(len as usize).min(payload.len())])
}

/// Bus-status byte and clock speed from an I2C status report.
pub(crate) fn decode_status_report(report: &[u8]) -> Option<(u8, u16)> {
    match report {
        [REPORT_I2C_STATUS, status, lo, hi, ..] => Some((*status, u16::from_le_bytes([*lo, *hi]))),
        _ => None,
    }
}

/// Whether a chip version report identifies an FT260.
pub(crate) fn is_ft260(report: &[u8]) -> bool {
    matches!(report, [REPORT_CHIP_VERSION, a, b, ..] if [*a, *b] == CHIP_CODE)
}

/// Split `total` bytes into chunks of at most `max`, yielding
/// `(offset, len, flag)` for each chunk.
pub(crate) fn chunks(
    total: usize,
    max: usize,
    flag: TransferFlag,
) -> impl Iterator<Item = (usize, usize, TransferFlag)> {
    let count = total.div_ceil(max);
    (0..count).map(move |i| {
        let offset = i * max;
        let len = max.min(total - offset);
        (offset, len, flag.for_chunk(i, count))
    })
}
