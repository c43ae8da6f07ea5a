// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable graph store
//!
//! Every mutation is appended to the write-ahead log before it is applied to
//! the in-memory graph. A checkpoint writes the whole graph to the checkpoint
//! region and then rotates the log, so on startup the store restores the last
//! checkpoint and replays the log written since.
//!
//! The device is split once at open: the first fifth holds the log, the rest
//! holds the checkpoint.

use crate::checkpoint::{CheckpointError, CheckpointManager};
use crate::config::{ConfigError, StoreConfig};
use crate::device::{BlockDevice, DeviceError};
use crate::wal::{LogEntry, LogError, LogManager, OpCode};
use hatch_core::{
    status_of, DurableGraphStore, EdgePartStore, GraphError, GraphStore, MemoryStore, Node, NodeId,
    Outcome,
};
use serde::Serialize;
use std::ops::Range;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

/// Smallest region either component can work with: superblock plus one block
const MIN_REGION_BLOCKS: u64 = 2;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Device(#[from] DeviceError),
    #[error("log: {0}")]
    Log(#[from] LogError),
    #[error("checkpoint: {0}")]
    Checkpoint(#[from] CheckpointError),
    #[error("device of {block_count} blocks is too small (need at least 10)")]
    DeviceTooSmall { block_count: u64 },
    #[error("log rotation failed, database not recoverable beyond this point: {0}")]
    RotationFailed(#[source] LogError),
    #[error("store halted after an unrecoverable storage fault")]
    Halted,
    #[error("config: {0}")]
    Config(#[from] ConfigError),
}

impl StoreError {
    /// True when the failure is an exhausted region rather than a fault
    pub fn is_no_space(&self) -> bool {
        matches!(
            self,
            StoreError::Log(LogError::NoSpace { .. })
                | StoreError::Checkpoint(CheckpointError::NoSpace { .. })
                | StoreError::Device(DeviceError::NoSpace { .. })
        )
    }
}

impl From<StoreError> for GraphError {
    fn from(err: StoreError) -> Self {
        if err.is_no_space() {
            return GraphError::NoSpace;
        }
        match err {
            StoreError::Halted => GraphError::Halted,
            other => GraphError::Storage(other.to_string()),
        }
    }
}

/// Split a device into its log and checkpoint regions
pub fn regions(block_count: u64) -> Result<(Range<u64>, Range<u64>), StoreError> {
    let log_end = block_count / 5;
    if log_end < MIN_REGION_BLOCKS || block_count - log_end < MIN_REGION_BLOCKS {
        return Err(StoreError::DeviceTooSmall { block_count });
    }
    Ok((0..log_end, log_end..block_count))
}

/// Point-in-time summary of the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub device: PathBuf,
    pub device_blocks: u64,
    pub generation: u64,
    pub node_count: u64,
    pub edge_count: u64,
    pub log_segment: Range<u64>,
    pub log_capacity_remaining: u64,
    pub checkpoint_version: u64,
    pub checkpointed: bool,
    pub halted: bool,
}

struct Inner {
    device: Arc<BlockDevice>,
    log: LogManager,
    checkpoints: CheckpointManager,
    memory: MemoryStore,
    halted: bool,
}

/// Graph store made durable by a write-ahead log and checkpoints
///
/// All operations, reads included, run under one lock.
pub struct LoggedStore {
    inner: Mutex<Inner>,
}

impl LoggedStore {
    /// Open the configured device, formatting it or recovering its graph
    pub fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        config.validate()?;
        let device = Arc::new(BlockDevice::open(&config.device, config.direct_io)?);
        let (log_range, checkpoint_range) = regions(device.block_count())?;

        let mut inner = Inner {
            log: LogManager::new(Arc::clone(&device), log_range)?,
            checkpoints: CheckpointManager::new(Arc::clone(&device), checkpoint_range)?,
            device,
            memory: MemoryStore::new(),
            halted: false,
        };
        if config.format {
            inner.format()?;
        } else {
            inner.log.init()?;
            inner.checkpoints.init()?;
            inner.recover()?;
        }

        Ok(Self {
            inner: Mutex::new(inner),
        })
    }

    pub fn stats(&self) -> Stats {
        let inner = self.lock();
        let checkpoint = inner.checkpoints.superblock();
        Stats {
            device: inner.device.path().to_path_buf(),
            device_blocks: inner.device.block_count(),
            generation: inner.log.generation(),
            node_count: inner.memory.node_count() as u64,
            edge_count: inner.memory.edge_count() as u64,
            log_segment: inner.log.segment(),
            log_capacity_remaining: inner.log.capacity_remaining(),
            checkpoint_version: checkpoint.version,
            checkpointed: checkpoint.checkpointed,
            halted: inner.halted,
        }
    }

    /// Copy of the live graph
    pub fn snapshot(&self) -> Result<MemoryStore, GraphError> {
        self.read(|memory| Ok(memory.clone()))
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn read<T>(&self, f: impl FnOnce(&MemoryStore) -> Result<T, GraphError>) -> Result<T, GraphError> {
        let inner = self.lock();
        inner.check_running()?;
        f(&inner.memory)
    }

    fn mutate(&self, entry: LogEntry) -> Result<Outcome, GraphError> {
        let mut inner = self.lock();
        inner.check_running()?;
        if let Err(e) = inner.log.log_operation(&entry) {
            return Err(inner.fail(e.into()));
        }
        apply(&mut inner.memory, &entry)
    }
}

impl Inner {
    fn format(&mut self) -> Result<(), StoreError> {
        let generation = self.log.format()?;
        self.checkpoints.format()?;
        self.memory.clear();
        tracing::info!(
            device = %self.device.path().display(),
            blocks = self.device.block_count(),
            generation,
            "formatted store"
        );
        Ok(())
    }

    /// Restore the last completed checkpoint, then replay the log written
    /// since. Replay applies entries directly and does not log them again.
    fn recover(&mut self) -> Result<(), StoreError> {
        let generation = self.log.generation();
        tracing::info!(generation, "recovering store");

        // The live generation is still open; the last completed checkpoint
        // belongs to the one before it.
        let restored = self
            .checkpoints
            .restore_checkpoint(generation.saturating_sub(1), &mut self.memory)?;

        let mut replayed = 0u64;
        for entry in self.log.read_log()? {
            let entry = entry?;
            let result = apply(&mut self.memory, &entry);
            tracing::debug!(%entry, status = %status_of(&result), "replayed");
            replayed += 1;
        }

        tracing::info!(
            generation,
            restored,
            replayed,
            nodes = self.memory.node_count(),
            edges = self.memory.edge_count(),
            "recovery complete"
        );
        Ok(())
    }

    /// Checkpoint the current generation, then rotate the log.
    ///
    /// Returns the new generation.
    fn checkpoint(&mut self) -> Result<u64, StoreError> {
        let generation = self.log.generation();
        self.checkpoints
            .perform_checkpoint(generation, &self.memory)?;
        let next = self
            .log
            .increase_generation()
            .map_err(StoreError::RotationFailed)?;
        tracing::info!(
            generation,
            next,
            nodes = self.memory.node_count(),
            "checkpoint complete, log rotated"
        );
        Ok(next)
    }

    fn check_running(&self) -> Result<(), GraphError> {
        if self.halted {
            return Err(GraphError::Halted);
        }
        Ok(())
    }

    /// Translate a storage failure, halting on anything but exhaustion
    fn fail(&mut self, err: StoreError) -> GraphError {
        if err.is_no_space() {
            tracing::warn!(error = %err, "out of space");
            return GraphError::NoSpace;
        }
        self.halted = true;
        tracing::error!(error = %err, "store halted");
        GraphError::from(err)
    }
}

fn apply(memory: &mut MemoryStore, entry: &LogEntry) -> Result<Outcome, GraphError> {
    match entry.opcode {
        OpCode::AddNode => memory.add_node(entry.a),
        OpCode::RemoveNode => memory.remove_node(entry.a),
        OpCode::AddEdge => memory.add_edge(entry.a, entry.b),
        OpCode::RemoveEdge => memory.remove_edge(entry.a, entry.b),
    }
}

impl GraphStore for LoggedStore {
    fn add_node(&self, id: NodeId) -> Result<Outcome, GraphError> {
        self.mutate(LogEntry::add_node(id))
    }

    fn remove_node(&self, id: NodeId) -> Result<Outcome, GraphError> {
        self.mutate(LogEntry::remove_node(id))
    }

    fn find_node(&self, id: NodeId) -> Result<Node, GraphError> {
        self.read(|memory| memory.find_node(id).cloned())
    }

    fn add_edge(&self, a: NodeId, b: NodeId) -> Result<Outcome, GraphError> {
        self.mutate(LogEntry::add_edge(a, b))
    }

    fn remove_edge(&self, a: NodeId, b: NodeId) -> Result<Outcome, GraphError> {
        self.mutate(LogEntry::remove_edge(a, b))
    }

    fn get_edge(&self, a: NodeId, b: NodeId) -> Result<(NodeId, NodeId), GraphError> {
        self.read(|memory| memory.get_edge(a, b))
    }

    fn get_neighbors(&self, id: NodeId) -> Result<Vec<NodeId>, GraphError> {
        self.read(|memory| memory.get_neighbors(id))
    }

    fn shortest_path(&self, a: NodeId, b: NodeId) -> Result<Option<u64>, GraphError> {
        self.read(|memory| memory.shortest_path(a, b))
    }
}

impl DurableGraphStore for LoggedStore {
    fn checkpoint(&self) -> Result<u64, GraphError> {
        let mut inner = self.lock();
        inner.check_running()?;
        match inner.checkpoint() {
            Ok(generation) => Ok(generation),
            Err(e) => Err(inner.fail(e)),
        }
    }
}

impl EdgePartStore for LoggedStore {}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
