// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! hatch-core: graph model and store contract
//!
//! This crate provides:
//! - The graph-store contract and the partition seam
//! - The status taxonomy shared with external collaborators
//! - The authoritative in-memory graph
//! - A tracing decorator for any store

pub mod graph;
pub mod memory;
pub mod status;
pub mod traced;

pub use graph::{DurableGraphStore, EdgePartStore, GraphStore, Node, NodeId};
pub use memory::MemoryStore;
pub use status::{status_of, CheckpointStatus, GraphError, Outcome, StatusCode};
pub use traced::TracedGraphStore;
