//! Type definitions for the FT260 I2C master.
//!
//! These types model the framing of a single I2C transaction and the
//! activation state of the controller.

use crate::constants::DEFAULT_I2C_CLOCK_KHZ;

/// Bus conditions framing a single I2C transaction.
///
/// Multi-part transactions are built by issuing one call with a START
/// and no STOP, then continuing with [`None`](Self::None) or
/// [`RepeatedStart`](Self::RepeatedStart) and finishing with a STOP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransferFlag {
    /// Neither START nor STOP.
    None,
    /// START only; the bus is held afterwards.
    Start,
    /// Repeated START only; the bus is held afterwards.
    RepeatedStart,
    /// STOP only.
    Stop,
    /// A complete transaction.
    #[default]
    StartAndStop,
    /// Repeated START followed by STOP.
    RepeatedStartAndStop,
}

impl TransferFlag {
    /// Wire value of the STOP bit.
    const STOP_BIT: u8 = 0x04;
    /// Wire mask of the START part.
    const START_MASK: u8 = 0x03;

    /// Wire value sent to the chip.
    pub fn wire_value(self) -> u8 {
        match self {
            Self::None => 0x00,
            Self::Start => 0x02,
            Self::RepeatedStart => 0x03,
            Self::Stop => 0x04,
            Self::StartAndStop => 0x06,
            Self::RepeatedStartAndStop => 0x07,
        }
    }

    /// Parse a wire value.
    pub fn from_wire(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(Self::None),
            0x02 => Some(Self::Start),
            0x03 => Some(Self::RepeatedStart),
            0x04 => Some(Self::Stop),
            0x06 => Some(Self::StartAndStop),
            0x07 => Some(Self::RepeatedStartAndStop),
            _ => None,
        }
    }

    /// Build a flag from its START part and STOP bit.
    ///
    /// `start` must be [`None`](Self::None), [`Start`](Self::Start) or
    /// [`RepeatedStart`](Self::RepeatedStart); any STOP it carries is
    /// replaced by `stop`.
    pub fn compose(start: Self, stop: bool) -> Self {
        let bits = (start.wire_value() & Self::START_MASK) | if stop { Self::STOP_BIT } else { 0 };
        // Every START part combined with either STOP state is a valid flag.
        Self::from_wire(bits).unwrap_or(Self::StartAndStop)
    }

    /// The START part of this flag.
    pub fn start_part(self) -> Self {
        Self::compose(self, false)
    }

    /// Whether the transaction ends with a STOP condition.
    pub fn has_stop(self) -> bool {
        self.wire_value() & Self::STOP_BIT != 0
    }

    /// Flag for chunk `index` of `count` when one transaction is split
    /// across several reports.
    ///
    /// The first chunk keeps the START part, the last keeps the STOP bit,
    /// and chunks in between carry neither.
    pub fn for_chunk(self, index: usize, count: usize) -> Self {
        let start = if index == 0 { self.start_part() } else { Self::None };
        let stop = index + 1 == count && self.has_stop();
        Self::compose(start, stop)
    }
}

/// Activation state of an I2C master.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MasterState {
    /// The I2C clock has not been configured.
    #[default]
    Inactive,
    /// The I2C clock is configured at the given speed.
    Active {
        /// Configured clock speed in kHz.
        clock_speed_khz: u32,
    },
}

impl MasterState {
    /// Whether the master has been activated.
    #[inline]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active { .. })
    }

    /// Last configured clock speed, or the default when inactive.
    pub fn clock_speed_khz(self) -> u32 {
        match self {
            Self::Active { clock_speed_khz } => clock_speed_khz,
            Self::Inactive => DEFAULT_I2C_CLOCK_KHZ,
        }
    }
}

/// Presence of a device at one address, as seen by a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Probe {
    /// The address was acknowledged.
    Present,
    /// The address was not acknowledged.
    Absent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values_round_trip() {
        for flag in [
            TransferFlag::None,
            TransferFlag::Start,
            TransferFlag::RepeatedStart,
            TransferFlag::Stop,
            TransferFlag::StartAndStop,
            TransferFlag::RepeatedStartAndStop,
        ] {
            assert_eq!(TransferFlag::from_wire(flag.wire_value()), Some(flag));
        }
        assert_eq!(TransferFlag::from_wire(0x01), None);
        assert_eq!(TransferFlag::from_wire(0x05), None);
    }

    #[test]
    fn compose_flags() {
        assert_eq!(TransferFlag::compose(TransferFlag::Start, true), TransferFlag::StartAndStop);
        assert_eq!(
            TransferFlag::compose(TransferFlag::RepeatedStart, true),
            TransferFlag::RepeatedStartAndStop
        );
        assert_eq!(TransferFlag::compose(TransferFlag::None, true), TransferFlag::Stop);
        assert_eq!(TransferFlag::compose(TransferFlag::StartAndStop, false), TransferFlag::Start);
        assert_eq!(TransferFlag::compose(TransferFlag::Stop, false), TransferFlag::None);
    }

    #[test]
    fn chunk_flags() {
        let f = TransferFlag::StartAndStop;
        assert_eq!(f.for_chunk(0, 1), TransferFlag::StartAndStop);
        assert_eq!(f.for_chunk(0, 3), TransferFlag::Start);
        assert_eq!(f.for_chunk(1, 3), TransferFlag::None);
        assert_eq!(f.for_chunk(2, 3), TransferFlag::Stop);

        let held = TransferFlag::Start;
        assert_eq!(held.for_chunk(0, 2), TransferFlag::Start);
        assert_eq!(held.for_chunk(1, 2), TransferFlag::None);

        let rs = TransferFlag::RepeatedStartAndStop;
        assert_eq!(rs.for_chunk(0, 2), TransferFlag::RepeatedStart);
        assert_eq!(rs.for_chunk(1, 2), TransferFlag::Stop);
    }

    #[test]
    fn master_state_defaults() {
        let state = MasterState::default();
        assert!(!state.is_active());
        assert_eq!(state.clock_speed_khz(), DEFAULT_I2C_CLOCK_KHZ);

        let active = MasterState::Active { clock_speed_khz: 100 };
        assert!(active.is_active());
        assert_eq!(active.clock_speed_khz(), 100);
    }
}
