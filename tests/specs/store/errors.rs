//! Storage error specs

use crate::prelude::*;

#[test]
fn unformatted_device_cannot_be_opened() {
    let device = Device::blank(20);
    device
        .hatch()
        .args(&["add-node", "1"])
        .fails()
        .stderr_has("error: opening")
        .stderr_has("bad magic");
}

#[test]
fn tiny_device_is_rejected() {
    let device = Device::blank(9);
    device
        .hatch()
        .args(&["format"])
        .fails()
        .stderr_has("too small");
}

#[test]
fn missing_device_file_is_reported() {
    let device = Device::blank(10);
    device
        .bare()
        .args(&["--device", "absent.img", "inspect"])
        .fails()
        .stderr_has("error: opening absent.img")
        .stderr_has("failed to open device");
}

#[test]
fn self_loops_are_invalid() {
    let device = Device::formatted();
    device.hatch().args(&["add-node", "1"]).passes();
    device
        .hatch()
        .args(&["add-edge", "1", "1"])
        .fails()
        .stderr_has("error: INVALID");
}

#[test]
fn edges_need_both_endpoints() {
    let device = Device::formatted();
    device.hatch().args(&["add-node", "1"]).passes();
    device
        .hatch()
        .args(&["add-edge", "1", "2"])
        .fails()
        .stderr_has("error: DOES_NOT_EXIST");
}

#[test]
fn full_log_reports_no_space_until_checkpoint() {
    // Ten blocks leave room for a single log block
    let device = Device::blank(10);
    device.hatch().args(&["format"]).passes();
    for id in 0..169 {
        device.hatch().args(&["add-node", &id.to_string()]).passes();
    }

    device
        .hatch()
        .args(&["add-node", "500"])
        .fails()
        .stderr_has("error: NO_SPACE");
    device.hatch().args(&["checkpoint"]).passes();
    device.hatch().args(&["add-node", "500"]).passes().stdout_eq("SUCCESS\n");
}
