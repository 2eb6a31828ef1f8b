//! Bus scanning against the mock transport.

mod common;

use common::{MockTransport, Target};
use ft260::{BusConditions, Error, I2cMaster, OperationStatus, Probe, TransferFlag};

#[test]
fn scan_finds_only_acknowledging_addresses() {
    let mut i2c = I2cMaster::new(MockTransport::with_devices(&[0x50, 0x20]));
    let found = i2c.scan().unwrap();

    assert_eq!(found.addresses(), &[0x20, 0x50]);
}

#[test]
fn scan_probes_full_range_in_order() {
    let mut i2c = I2cMaster::new(MockTransport::with_devices(&[]));
    let found = i2c.scan().unwrap();

    assert!(found.is_empty());
    let probed = i2c.transport().read_addresses();
    assert_eq!(probed, (0x08..=0x7B).collect::<Vec<u8>>());
}

#[test]
fn scan_probes_with_single_byte_complete_reads() {
    let mut i2c = I2cMaster::new(MockTransport::with_devices(&[0x10]));
    i2c.scan().unwrap();

    for call in &i2c.transport().calls {
        if let common::Call::Read { flag, len, .. } = call {
            assert_eq!(*flag, TransferFlag::StartAndStop);
            assert_eq!(*len, 1);
        }
    }
}

#[test]
fn scan_aborts_on_nack_with_error_condition() {
    let mut i2c = I2cMaster::new(
        MockTransport::with_devices(&[0x50]).target(0x30, Target::Status(0x06)),
    );
    let err = i2c.scan().unwrap_err();

    assert_eq!(
        err.bus_conditions(),
        Some(BusConditions::SLAVE_ADDRESS_NACK | BusConditions::ERROR_CONDITION)
    );
    assert_eq!(i2c.transport().read_addresses().last(), Some(&0x30));
}

#[test]
fn scan_aborts_on_nack_with_idle_and_error() {
    let mut i2c = I2cMaster::new(
        MockTransport::with_devices(&[0x68]).target(0x40, Target::Status(0x26)),
    );
    let err = i2c.scan().unwrap_err();

    assert_eq!(
        err.bus_conditions(),
        Some(
            BusConditions::SLAVE_ADDRESS_NACK
                | BusConditions::ERROR_CONDITION
                | BusConditions::CONTROLLER_IDLE
        )
    );
    assert_eq!(i2c.transport().read_addresses().last(), Some(&0x40));
}

#[test]
fn probe_reports_nack_with_extra_condition_as_error() {
    let mut i2c = I2cMaster::new(MockTransport::new().target(0x30, Target::Status(0x06)));

    assert!(matches!(i2c.probe(0x30), Err(Error::I2cBus(_))));
}

#[test]
fn scan_aborts_on_arbitration_loss() {
    let mut i2c = I2cMaster::new(
        MockTransport::with_devices(&[0x20, 0x50]).target(0x30, Target::Status(0x10)),
    );
    let err = i2c.scan().unwrap_err();

    assert_eq!(err.bus_conditions(), Some(BusConditions::ARBITRATION_LOST));
    assert_eq!(i2c.transport().read_addresses().last(), Some(&0x30));
}

#[test]
fn scan_aborts_on_nack_with_extra_condition() {
    let mut i2c = I2cMaster::new(
        MockTransport::with_devices(&[]).target(0x11, Target::Status(0x0C)),
    );
    let err = i2c.scan().unwrap_err();

    assert_eq!(
        err.bus_conditions(),
        Some(BusConditions::SLAVE_ADDRESS_NACK | BusConditions::DATA_NACK)
    );
    assert_eq!(i2c.transport().read_addresses().last(), Some(&0x11));
}

#[test]
fn scan_aborts_on_timeout() {
    let mut i2c = I2cMaster::new(MockTransport::with_devices(&[]).target(0x09, Target::Short(0)));
    let err = i2c.scan().unwrap_err();

    assert!(matches!(err, Error::I2cTimeout { operation: "read", .. }));
    assert_eq!(i2c.transport().read_addresses(), vec![0x08, 0x09]);
}

#[test]
fn scan_aborts_on_device_error() {
    let mut i2c = I2cMaster::new(MockTransport::with_devices(&[]).target(0x08, Target::Fail(9)));
    let err = i2c.scan().unwrap_err();

    assert!(matches!(err, Error::Device(OperationStatus::IoError)));
}

#[test]
fn scan_results_are_rebuilt_each_call() {
    let mut i2c = I2cMaster::new(MockTransport::with_devices(&[0x20]));
    let first = i2c.scan().unwrap();
    i2c.transport_mut().targets.insert(0x20, Target::Nack);
    let second = i2c.scan().unwrap();

    assert_eq!(first.addresses(), &[0x20]);
    assert!(second.is_empty());
}

#[test]
fn probe_classifies_addresses() {
    let mut i2c = I2cMaster::new(MockTransport::with_devices(&[0x3C]));

    assert_eq!(i2c.probe(0x3C).unwrap(), Probe::Present);
    assert_eq!(i2c.probe(0x3D).unwrap(), Probe::Absent);
}

#[test]
fn scan_range_limits_probes() {
    let mut i2c = I2cMaster::new(MockTransport::with_devices(&[0x48, 0x49, 0x60]));
    let found = i2c.scan_range(0x48..=0x4F).unwrap();

    assert_eq!(found.addresses(), &[0x48, 0x49]);
    assert_eq!(i2c.transport().read_addresses().len(), 8);
}
