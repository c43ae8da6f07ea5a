//! Durability specs
//!
//! Every invocation opens, recovers and closes the store, so state seen by
//! a later invocation came back from the device.

use crate::prelude::*;

#[test]
fn format_starts_generation_one() {
    let device = Device::blank(20);
    device
        .hatch()
        .args(&["format"])
        .passes()
        .stdout_has("generation 1");
    device
        .hatch()
        .args(&["inspect"])
        .passes()
        .stdout_has("Generation:   1")
        .stdout_has("Nodes:        0")
        .stdout_has("Checkpoint:   none");
}

#[test]
fn checkpoint_bumps_the_generation() {
    let device = Device::formatted();
    device.hatch().args(&["add-node", "1"]).passes();
    device
        .hatch()
        .args(&["checkpoint"])
        .passes()
        .stdout_eq("SUCCESS (generation 2)\n");

    device
        .hatch()
        .args(&["inspect"])
        .passes()
        .stdout_has("Generation:   2")
        .stdout_has("Checkpoint:   generation 1")
        .stdout_has("Nodes:        1");
}

#[test]
fn graph_survives_checkpoint_and_later_mutations() {
    let device = Device::formatted();
    for id in ["1", "2", "3"] {
        device.hatch().args(&["add-node", id]).passes();
    }
    device.hatch().args(&["add-edge", "1", "2"]).passes();
    device.hatch().args(&["checkpoint"]).passes();
    device.hatch().args(&["add-edge", "2", "3"]).passes();
    device.hatch().args(&["remove-node", "1"]).passes();

    device.hatch().args(&["node", "2"]).passes().stdout_eq("2: 3\n");
    device.hatch().args(&["node", "1"]).fails();
}

#[test]
fn reformatting_discards_the_graph() {
    let device = Device::formatted();
    device.hatch().args(&["add-node", "1"]).passes();
    device.hatch().args(&["format"]).passes().stdout_has("generation 2");
    device.hatch().args(&["node", "1"]).fails().stderr_has("DOES_NOT_EXIST");
}

#[test]
fn format_flag_applies_before_the_command() {
    let device = Device::formatted();
    device.hatch().args(&["add-node", "1"]).passes();
    device
        .hatch()
        .args(&["--format", "add-node", "1"])
        .passes()
        .stdout_eq("SUCCESS\n");
}

#[test]
fn inspect_json_reports_counts() {
    let device = Device::formatted();
    device.hatch().args(&["add-node", "1"]).passes();
    device.hatch().args(&["add-node", "2"]).passes();
    device.hatch().args(&["add-edge", "1", "2"]).passes();

    device
        .hatch()
        .args(&["inspect", "--json"])
        .passes()
        .stdout_has("\"node_count\": 2")
        .stdout_has("\"edge_count\": 1")
        .stdout_has("\"generation\": 1");
}
