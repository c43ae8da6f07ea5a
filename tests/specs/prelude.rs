//! Shared helpers for the behavioral specs
//!
//! A `Device` is a scratch image file in its own temp directory. Commands run
//! with that directory as their working directory, so a `hatch.toml` written
//! there is picked up the way an operator's would be.

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use std::process::Output;
use tempfile::TempDir;

pub const BLOCK_SIZE: u64 = 4096;

pub struct Device {
    dir: TempDir,
    path: PathBuf,
}

impl Device {
    /// Blank (unformatted) image of `blocks` blocks
    pub fn blank(blocks: u64) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("graph.img");
        let file = std::fs::File::create(&path).expect("create image");
        file.set_len(blocks * BLOCK_SIZE).expect("size image");
        Self { dir, path }
    }

    /// Formatted image with room for a few thousand log entries
    pub fn formatted() -> Self {
        let device = Self::blank(100);
        device.hatch().args(&["format"]).passes();
        device
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Write `hatch.toml` into the working directory
    pub fn write_config(&self, content: &str) {
        std::fs::write(self.dir().join("hatch.toml"), content).expect("write config");
    }

    /// `hatch --device <image>`
    pub fn hatch(&self) -> Cli {
        self.bare().args(&["--device", &self.path.display().to_string()])
    }

    /// `hatch` with no device flag
    pub fn bare(&self) -> Cli {
        let mut cmd = Command::cargo_bin("hatch").expect("hatch binary");
        cmd.current_dir(self.dir()).env_remove("HATCH_LOG");
        Cli { cmd }
    }
}

pub struct Cli {
    cmd: Command,
}

impl Cli {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Run and require exit code 0
    pub fn passes(mut self) -> Run {
        let output = self.cmd.output().expect("run hatch");
        let run = Run { output };
        assert!(
            run.output.status.success(),
            "expected success, got {:?}\nstdout: {}\nstderr: {}",
            run.output.status.code(),
            run.stdout(),
            run.stderr()
        );
        run
    }

    /// Run and require exit code 1
    pub fn fails(self) -> Run {
        self.exits_with(1)
    }

    pub fn exits_with(mut self, code: i32) -> Run {
        let output = self.cmd.output().expect("run hatch");
        let run = Run { output };
        assert_eq!(
            run.output.status.code(),
            Some(code),
            "stdout: {}\nstderr: {}",
            run.stdout(),
            run.stderr()
        );
        run
    }
}

pub struct Run {
    output: Output,
}

impl Run {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout(), expected);
        self
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        let stdout = self.stdout();
        assert!(stdout.contains(needle), "stdout lacks {needle:?}:\n{stdout}");
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        let stderr = self.stderr();
        assert!(stderr.contains(needle), "stderr lacks {needle:?}:\n{stderr}");
        self
    }
}
