// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! hatch-storage: durable storage for the graph
//!
//! This crate provides:
//! - Synchronous whole-block I/O against a raw device
//! - The bit-exact on-disk layout of every record
//! - A block-structured write-ahead log with generations
//! - Full-graph checkpoints
//! - `LoggedStore`, which ties them to the in-memory graph

pub mod checkpoint;
pub mod config;
pub mod device;
pub mod layout;
pub mod store;
pub mod wal;

pub use checkpoint::{CheckpointError, CheckpointManager};
pub use config::{ConfigError, StoreConfig};
pub use device::{BlockDevice, Buffer, DeviceError, BLOCK_SIZE};
pub use layout::LayoutError;
pub use store::{regions, LoggedStore, Stats, StoreError};
pub use wal::{LogEntry, LogError, LogManager, LogReader, OpCode};
