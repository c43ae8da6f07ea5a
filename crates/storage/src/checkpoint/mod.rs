// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Full-graph checkpoints
//!
//! The checkpoint region `[min, max)` holds a superblock followed by a body
//! of u64 words starting at `min + 1`. Each node is one variable-length
//! record: `id, edge_count, edge_count x neighbor_id`.
//!
//! The superblock's `checkpointed` flag is the commit point. It is cleared
//! before the body is written and set only after the body is flushed.

mod cursor;

pub use cursor::{BlockReader, BlockWriter};

use crate::device::{BlockDevice, DeviceError};
use crate::layout::{CheckpointSuperblock, WORDS_PER_BLOCK};
use hatch_core::{GraphError, MemoryStore};
use std::ops::Range;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while writing or restoring a checkpoint
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error(transparent)]
    Device(#[from] DeviceError),
    #[error("checkpoint region exhausted at block {block}")]
    NoSpace { block: u64 },
    #[error("corrupt checkpoint: body runs past the region at block {block}")]
    Truncated { block: u64 },
    #[error("invalid checkpoint range {start}..{end} on a device of {block_count} blocks")]
    InvalidRange {
        start: u64,
        end: u64,
        block_count: u64,
    },
    #[error("corrupt checkpoint: {0}")]
    Restore(#[from] GraphError),
}

/// Writes and restores the single checkpoint slot
#[derive(Debug)]
pub struct CheckpointManager {
    device: Arc<BlockDevice>,
    range: Range<u64>,
    superblock: CheckpointSuperblock,
}

impl CheckpointManager {
    pub fn new(device: Arc<BlockDevice>, range: Range<u64>) -> Result<Self, CheckpointError> {
        if range.end > device.block_count() || range.end.saturating_sub(range.start) < 2 {
            return Err(CheckpointError::InvalidRange {
                start: range.start,
                end: range.end,
                block_count: device.block_count(),
            });
        }
        Ok(Self {
            device,
            range,
            superblock: CheckpointSuperblock::default(),
        })
    }

    /// Reset the region to "never checkpointed"
    pub fn format(&mut self) -> Result<(), CheckpointError> {
        self.write_superblock(CheckpointSuperblock::default())
    }

    pub fn init(&mut self) -> Result<(), CheckpointError> {
        let buffer = self.device.get(self.range.start)?;
        self.superblock = CheckpointSuperblock::decode(&buffer);
        tracing::debug!(
            version = self.superblock.version,
            checkpointed = self.superblock.checkpointed,
            "checkpoint superblock loaded"
        );
        Ok(())
    }

    /// True iff a committed checkpoint of `generation` is on disk
    pub fn has_checkpoint(&self, generation: u64) -> bool {
        self.superblock.checkpointed && self.superblock.version == generation
    }

    pub fn superblock(&self) -> CheckpointSuperblock {
        self.superblock
    }

    /// Write every node of `graph` as the checkpoint of `generation`.
    ///
    /// A graph that cannot fit fails with `NoSpace` before anything is
    /// written, so the previous checkpoint stays committed.
    pub fn perform_checkpoint(
        &mut self,
        generation: u64,
        graph: &MemoryStore,
    ) -> Result<(), CheckpointError> {
        let words: u64 = graph.nodes().map(|node| 2 + node.degree() as u64).sum();
        if words > self.body_words() {
            return Err(CheckpointError::NoSpace {
                block: self.range.end,
            });
        }

        let mut superblock = CheckpointSuperblock {
            checkpointed: false,
            version: generation,
            node_count: graph.node_count() as u64,
        };
        self.write_superblock(superblock)?;

        let mut writer = BlockWriter::new(&self.device, self.body());
        for node in graph.nodes() {
            writer.write_u64(node.id())?;
            writer.write_u64(node.degree() as u64)?;
            for neighbor in node.edges() {
                writer.write_u64(*neighbor)?;
            }
        }
        writer.finish()?;

        superblock.checkpointed = true;
        self.write_superblock(superblock)?;
        tracing::debug!(generation, nodes = superblock.node_count, "checkpoint committed");
        Ok(())
    }

    /// Load the checkpoint of `generation` into `graph`.
    ///
    /// Returns the number of node records restored; zero when no committed
    /// checkpoint of that generation exists.
    pub fn restore_checkpoint(
        &self,
        generation: u64,
        graph: &mut MemoryStore,
    ) -> Result<u64, CheckpointError> {
        if !self.has_checkpoint(generation) {
            if self.superblock.version == generation && generation != 0 {
                tracing::warn!(generation, "skipping incomplete checkpoint");
            } else {
                tracing::debug!(
                    generation,
                    on_disk = self.superblock.version,
                    "no checkpoint to restore"
                );
            }
            return Ok(0);
        }

        let mut reader = BlockReader::new(&self.device, self.body());
        for _ in 0..self.superblock.node_count {
            let id = reader.read_u64()?;
            graph.add_node(id)?;
            let edge_count = reader.read_u64()?;
            for _ in 0..edge_count {
                let neighbor = reader.read_u64()?;
                graph.add_node(neighbor)?;
                graph.add_edge(id, neighbor)?;
            }
        }
        Ok(self.superblock.node_count)
    }

    fn body(&self) -> Range<u64> {
        self.range.start + 1..self.range.end
    }

    fn body_words(&self) -> u64 {
        (self.range.end - self.range.start - 1) * WORDS_PER_BLOCK as u64
    }

    fn write_superblock(&mut self, superblock: CheckpointSuperblock) -> Result<(), CheckpointError> {
        let mut buffer = self.device.get_zeroed(self.range.start)?;
        superblock.encode(&mut buffer);
        self.device.write(&buffer)?;
        self.superblock = superblock;
        Ok(())
    }
}

#[cfg(test)]
#[path = "checkpoint_tests.rs"]
mod tests;
