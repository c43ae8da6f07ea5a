//! Shortest-path specs

use crate::prelude::*;

fn edge(device: &Device, a: &str, b: &str) {
    device.hatch().args(&["add-edge", a, b]).passes();
}

fn path(device: &Device, a: &str, b: &str) -> String {
    device.hatch().args(&["shortest-path", a, b]).passes().stdout()
}

#[test]
fn path_lengths_follow_added_edges() {
    let device = Device::formatted();
    for id in ["1", "2", "3", "4", "5"] {
        device.hatch().args(&["add-node", id]).passes();
    }
    edge(&device, "1", "2");
    edge(&device, "2", "3");
    assert_eq!(path(&device, "1", "3"), "2\n");

    edge(&device, "3", "1");
    assert_eq!(path(&device, "1", "3"), "1\n");

    edge(&device, "2", "4");
    edge(&device, "4", "5");
    assert_eq!(path(&device, "1", "4"), "2\n");
    assert_eq!(path(&device, "1", "5"), "3\n");
}

#[test]
fn path_to_self_and_unreachable_nodes_is_no_action() {
    let device = Device::formatted();
    device.hatch().args(&["add-node", "1"]).passes();
    device.hatch().args(&["add-node", "2"]).passes();

    assert_eq!(path(&device, "1", "1"), "NO_ACTION\n");
    assert_eq!(path(&device, "1", "2"), "NO_ACTION\n");
}

#[test]
fn path_to_a_missing_node_fails() {
    let device = Device::formatted();
    device.hatch().args(&["add-node", "1"]).passes();
    device
        .hatch()
        .args(&["shortest-path", "1", "9"])
        .fails()
        .stderr_has("DOES_NOT_EXIST");
}
