// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! hatch - durable graph store CLI

mod commands;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use commands::Command;
use hatch_core::TracedGraphStore;
use hatch_storage::{LoggedStore, StoreConfig};
use output::OutputFormat;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Config file picked up from the working directory when `--config` is absent
const DEFAULT_CONFIG: &str = "hatch.toml";

#[derive(Parser)]
#[command(name = "hatch", version, about = "Hatch - durable graph store")]
struct Cli {
    /// Config file (defaults to ./hatch.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Block device or image file
    #[arg(long, global = true)]
    device: Option<PathBuf>,

    /// Format the device instead of recovering from it
    #[arg(long, global = true)]
    format: bool,

    /// Bypass the page cache (Linux)
    #[arg(long, global = true)]
    direct_io: bool,

    #[command(subcommand)]
    command: Command,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };
    setup_logging(&config.log_level);

    match run(cli.command, &config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// File settings first, then command-line overrides
fn resolve_config(cli: &Cli) -> Result<StoreConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None if Path::new(DEFAULT_CONFIG).is_file() => load_config(Path::new(DEFAULT_CONFIG))?,
        None => StoreConfig::default(),
    };

    if let Some(device) = &cli.device {
        config.device = device.clone();
    }
    config.format |= cli.format || matches!(cli.command, Command::Format);
    config.direct_io |= cli.direct_io;

    if config.device.as_os_str().is_empty() {
        anyhow::bail!("no device configured (pass --device or set `device` in {DEFAULT_CONFIG})");
    }
    Ok(config)
}

fn load_config(path: &Path) -> Result<StoreConfig> {
    StoreConfig::load(path).with_context(|| format!("loading {}", path.display()))
}

fn setup_logging(default_level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_env("HATCH_LOG")
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(command: Command, config: &StoreConfig) -> Result<ExitCode> {
    let store = LoggedStore::open(config)
        .with_context(|| format!("opening {}", config.device.display()))?;
    let store = TracedGraphStore::new(store);

    match command {
        Command::Format => {
            let stats = store.inner().stats();
            println!(
                "formatted {} ({} blocks, generation {})",
                stats.device.display(),
                stats.device_blocks,
                stats.generation
            );
        }
        Command::Inspect { json } => {
            let format = if json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            };
            output::print_stats(&store.inner().stats(), format)?;
        }
        command => match commands::execute(&store, command) {
            Ok(reply) => println!("{}", reply),
            Err(e) => {
                eprintln!("error: {}: {}", e.status(), e);
                return Ok(ExitCode::FAILURE);
            }
        },
    }
    Ok(ExitCode::SUCCESS)
}
