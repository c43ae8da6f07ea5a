//! Graph mutation specs
//!
//! Verify statuses printed for node and edge commands.

use crate::prelude::*;

#[test]
fn adding_a_node_twice_is_a_no_op() {
    let device = Device::formatted();
    device.hatch().args(&["add-node", "1"]).passes().stdout_eq("SUCCESS\n");
    device.hatch().args(&["add-node", "1"]).passes().stdout_eq("NO_ACTION\n");
}

#[test]
fn edges_are_undirected() {
    let device = Device::formatted();
    device.hatch().args(&["add-node", "1"]).passes();
    device.hatch().args(&["add-node", "2"]).passes();
    device.hatch().args(&["add-edge", "1", "2"]).passes().stdout_eq("SUCCESS\n");

    device.hatch().args(&["edge", "2", "1"]).passes().stdout_eq("2 1\n");
    device.hatch().args(&["add-edge", "2", "1"]).passes().stdout_eq("NO_ACTION\n");
    device.hatch().args(&["neighbors", "2"]).passes().stdout_eq("1\n");
}

#[test]
fn removing_a_node_removes_its_edges() {
    let device = Device::formatted();
    for id in ["1", "2", "3"] {
        device.hatch().args(&["add-node", id]).passes();
    }
    device.hatch().args(&["add-edge", "1", "2"]).passes();
    device.hatch().args(&["add-edge", "1", "3"]).passes();

    device.hatch().args(&["remove-node", "1"]).passes().stdout_eq("SUCCESS\n");
    device.hatch().args(&["node", "2"]).passes().stdout_eq("2:\n");
    device.hatch().args(&["node", "3"]).passes().stdout_eq("3:\n");
}

#[test]
fn removing_an_edge_twice_fails() {
    let device = Device::formatted();
    device.hatch().args(&["add-node", "1"]).passes();
    device.hatch().args(&["add-node", "2"]).passes();
    device.hatch().args(&["add-edge", "1", "2"]).passes();

    device.hatch().args(&["remove-edge", "2", "1"]).passes().stdout_eq("SUCCESS\n");
    device
        .hatch()
        .args(&["remove-edge", "1", "2"])
        .fails()
        .stderr_has("error: DOES_NOT_EXIST");
}
