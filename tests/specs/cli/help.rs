//! CLI surface specs
//!
//! Verify help output and usage errors.

use crate::prelude::*;

#[test]
fn help_lists_graph_commands() {
    let device = Device::blank(10);
    device
        .bare()
        .args(&["--help"])
        .passes()
        .stdout_has("add-node")
        .stdout_has("shortest-path")
        .stdout_has("checkpoint")
        .stdout_has("inspect");
}

#[test]
fn missing_command_is_a_usage_error() {
    let device = Device::blank(10);
    device.bare().exits_with(2);
}

#[test]
fn non_numeric_id_is_a_usage_error() {
    let device = Device::formatted();
    device.hatch().args(&["add-node", "seven"]).exits_with(2);
}

#[test]
fn missing_device_is_reported() {
    let device = Device::blank(10);
    device
        .bare()
        .args(&["add-node", "1"])
        .fails()
        .stderr_has("no device configured");
}
