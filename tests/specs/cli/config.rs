//! Configuration specs
//!
//! Verify hatch.toml discovery and command-line overrides.

use crate::prelude::*;

#[test]
fn config_in_working_directory_names_the_device() {
    let device = Device::blank(20);
    device.write_config("device = \"graph.img\"\n");

    device.bare().args(&["format"]).passes();
    device.bare().args(&["add-node", "1"]).passes().stdout_eq("SUCCESS\n");
    device.bare().args(&["node", "1"]).passes().stdout_eq("1:\n");
}

#[test]
fn explicit_config_file_is_loaded() {
    let device = Device::blank(20);
    let config = device.dir().join("custom.toml");
    std::fs::write(&config, format!("device = {:?}\n", device.path())).unwrap();
    let config = config.display().to_string();

    device.bare().args(&["--config", &config, "format"]).passes();
    device
        .bare()
        .args(&["--config", &config, "inspect"])
        .passes()
        .stdout_has("Generation:   1");
}

#[test]
fn device_flag_overrides_the_config_file() {
    let device = Device::blank(20);
    device.write_config("device = \"missing.img\"\n");

    device.hatch().args(&["format"]).passes();
    device.hatch().args(&["add-node", "3"]).passes();
}

#[test]
fn format_key_in_config_reformats_every_run() {
    let device = Device::blank(20);
    device.write_config("device = \"graph.img\"\nformat = true\n");

    device.bare().args(&["add-node", "1"]).passes();
    device
        .bare()
        .args(&["node", "1"])
        .fails()
        .stderr_has("DOES_NOT_EXIST");
}

#[test]
fn malformed_config_is_reported() {
    let device = Device::blank(20);
    device.write_config("device = [\n");
    device
        .bare()
        .args(&["inspect"])
        .fails()
        .stderr_has("hatch.toml");
}

#[test]
fn log_filter_comes_from_the_environment() {
    let device = Device::formatted();
    device
        .hatch()
        .env("HATCH_LOG", "info")
        .args(&["add-node", "1"])
        .passes()
        .stdout_eq("SUCCESS\n")
        .stderr_has("recovery complete");
}
