// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Block-structured write-ahead log
//!
//! The log region `[min, max)` starts with a superblock. The active segment
//! is a contiguous run of log blocks right after it, all written in the
//! current generation. Rotation (`increase_generation`) bumps the generation
//! and truncates the segment back to a single empty block.

mod entry;
mod reader;

pub use entry::{LogEntry, OpCode};
pub use reader::LogReader;

use crate::device::{BlockDevice, Buffer, DeviceError};
use crate::layout::{entry_slot, LayoutError, LogBlockHeader, LogSuperblock, LOG_BLOCK_CAPACITY};
use std::ops::Range;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur in the log manager
#[derive(Debug, Error)]
pub enum LogError {
    #[error(transparent)]
    Device(#[from] DeviceError),
    #[error("corrupt log: {0}")]
    Layout(#[from] LayoutError),
    #[error("log region exhausted at block {block}")]
    NoSpace { block: u64 },
    #[error("invalid log range {start}..{end} on a device of {block_count} blocks")]
    InvalidRange {
        start: u64,
        end: u64,
        block_count: u64,
    },
    #[error("corrupt log: segment {start}+{size} lies outside the log region")]
    BadSegment { start: u64, size: u64 },
    #[error("corrupt log: block {block} has generation {found}, expected {expected}")]
    StaleBlock {
        block: u64,
        found: u64,
        expected: u64,
    },
    #[error("read past the end of the log segment at block {block}")]
    PastSegmentEnd { block: u64 },
    #[error("log generation counter exhausted")]
    GenerationOverflow,
    #[error("log has not been formatted or initialized")]
    NotStarted,
}

/// The block currently receiving appends
#[derive(Debug)]
struct ActiveBlock {
    buffer: Buffer,
    header: LogBlockHeader,
}

/// Append-only log over a fixed block range of the device
#[derive(Debug)]
pub struct LogManager {
    device: Arc<BlockDevice>,
    range: Range<u64>,
    superblock: LogSuperblock,
    active: Option<ActiveBlock>,
}

impl LogManager {
    /// Bind a log to `range` of the device. Nothing is read or written until
    /// [`format`](Self::format) or [`init`](Self::init).
    pub fn new(device: Arc<BlockDevice>, range: Range<u64>) -> Result<Self, LogError> {
        let invalid = || LogError::InvalidRange {
            start: range.start,
            end: range.end,
            block_count: device.block_count(),
        };
        // The superblock stores block numbers as u32.
        if range.end > device.block_count()
            || range.end.saturating_sub(range.start) < 2
            || u32::try_from(range.end).is_err()
        {
            return Err(invalid());
        }
        let segment_start = u32::try_from(range.start + 1).map_err(|_| invalid())?;

        Ok(Self {
            superblock: LogSuperblock::fresh(segment_start),
            device,
            range,
            active: None,
        })
    }

    /// Prepare the region for use, then rotate into a new generation.
    ///
    /// A region that already holds a valid superblock keeps counting from its
    /// generation; anything else is overwritten with a fresh superblock.
    pub fn format(&mut self) -> Result<u64, LogError> {
        let buffer = self.device.get(self.range.start)?;
        match LogSuperblock::decode(&buffer) {
            Ok(existing) => {
                tracing::debug!(generation = existing.generation, "reformatting existing log");
                self.superblock = existing;
            }
            Err(_) => {
                self.superblock = LogSuperblock::fresh(self.first_log_block()?);
                self.write_superblock(&self.superblock)?;
            }
        }
        self.increase_generation()
    }

    /// Load and validate the superblock and the tail of the active segment
    pub fn init(&mut self) -> Result<(), LogError> {
        let buffer = self.device.get(self.range.start)?;
        let superblock = LogSuperblock::decode(&buffer)?;

        let start = u64::from(superblock.segment_start);
        let size = u64::from(superblock.segment_size);
        if start != self.range.start + 1 || size == 0 || superblock.segment_end() > self.range.end {
            return Err(LogError::BadSegment { start, size });
        }

        let generation = u64::from(superblock.generation);
        let tail = self.load_block(superblock.segment_end() - 1, generation)?;
        self.superblock = superblock;
        self.active = Some(tail);

        tracing::debug!(generation, segment_size = size, "log initialized");
        Ok(())
    }

    /// Append one entry and write its block through to the device.
    ///
    /// Fails with [`LogError::NoSpace`] once the log region is exhausted,
    /// leaving the log untouched.
    pub fn log_operation(&mut self, entry: &LogEntry) -> Result<(), LogError> {
        if self.active.as_ref().ok_or(LogError::NotStarted)?.header.is_full() {
            self.extend_segment()?;
        }
        let active = self.active.as_mut().ok_or(LogError::NotStarted)?;

        let index = active.header.entry_count as usize;
        entry.encode(&mut active.buffer.bytes_mut()[entry_slot(index)]);
        active.header.entry_count += 1;
        active.header.encode(&mut active.buffer);

        if let Err(e) = self.device.write(&active.buffer) {
            active.header.entry_count -= 1;
            active.header.encode(&mut active.buffer);
            return Err(e.into());
        }
        Ok(())
    }

    /// Rotate: bump the generation and truncate the segment to one empty block.
    ///
    /// Returns the new generation.
    pub fn increase_generation(&mut self) -> Result<u64, LogError> {
        let generation = self
            .superblock
            .generation
            .checked_add(1)
            .ok_or(LogError::GenerationOverflow)?;
        let next = LogSuperblock {
            generation,
            segment_start: self.first_log_block()?,
            segment_size: 1,
        };
        self.write_superblock(&next)?;
        self.superblock = next;

        let generation = u64::from(generation);
        let mut buffer = self.device.get_zeroed(next.segment_end() - 1)?;
        let header = LogBlockHeader::new(generation);
        header.encode(&mut buffer);
        self.device.write(&buffer)?;
        self.active = Some(ActiveBlock { buffer, header });

        tracing::debug!(generation, "log rotated");
        Ok(generation)
    }

    pub fn generation(&self) -> u64 {
        u64::from(self.superblock.generation)
    }

    /// Blocks of the active segment
    pub fn segment(&self) -> Range<u64> {
        u64::from(self.superblock.segment_start)..self.superblock.segment_end()
    }

    /// Entries that can still be appended before the region is exhausted
    pub fn capacity_remaining(&self) -> u64 {
        let Some(active) = &self.active else {
            return 0;
        };
        let unused_blocks = self.range.end.saturating_sub(self.superblock.segment_end());
        let in_tail = LOG_BLOCK_CAPACITY as u64 - u64::from(active.header.entry_count);
        unused_blocks * LOG_BLOCK_CAPACITY as u64 + in_tail
    }

    /// Open the single reader over the active segment.
    ///
    /// The reader borrows the log mutably, so nothing else can touch the log
    /// while it is open.
    pub fn read_log(&mut self) -> Result<LogReader<'_>, LogError> {
        let tail_entries = self
            .active
            .as_ref()
            .ok_or(LogError::NotStarted)?
            .header
            .entry_count;
        let segment = self.segment();
        let generation = self.generation();
        let first = load_block(&self.device, segment.start, generation)?;
        Ok(LogReader::new(&self.device, segment, generation, first, tail_entries))
    }

    fn extend_segment(&mut self) -> Result<(), LogError> {
        let block = self.superblock.segment_end();
        if block >= self.range.end {
            return Err(LogError::NoSpace { block });
        }

        let generation = self.generation();
        let mut buffer = self.device.get_zeroed(block)?;
        let header = LogBlockHeader::new(generation);
        header.encode(&mut buffer);
        self.device.write(&buffer)?;

        let next = LogSuperblock {
            segment_size: self.superblock.segment_size + 1,
            ..self.superblock
        };
        self.write_superblock(&next)?;
        self.superblock = next;
        self.active = Some(ActiveBlock { buffer, header });

        tracing::trace!(block, "log segment extended");
        Ok(())
    }

    fn load_block(&self, block: u64, generation: u64) -> Result<ActiveBlock, LogError> {
        load_block(&self.device, block, generation).map(|(buffer, header)| ActiveBlock { buffer, header })
    }

    fn write_superblock(&self, superblock: &LogSuperblock) -> Result<(), LogError> {
        let mut buffer = self.device.get_zeroed(self.range.start)?;
        superblock.encode(&mut buffer);
        self.device.write(&buffer)?;
        Ok(())
    }

    fn first_log_block(&self) -> Result<u32, LogError> {
        u32::try_from(self.range.start + 1).map_err(|_| LogError::InvalidRange {
            start: self.range.start,
            end: self.range.end,
            block_count: self.device.block_count(),
        })
    }
}

/// Read and validate one log block of the expected generation
pub(crate) fn load_block(
    device: &BlockDevice,
    block: u64,
    generation: u64,
) -> Result<(Buffer, LogBlockHeader), LogError> {
    let buffer = device.get(block)?;
    let header = LogBlockHeader::decode(&buffer)?;
    if header.generation != generation {
        return Err(LogError::StaleBlock {
            block,
            found: header.generation,
            expected: generation,
        });
    }
    Ok((buffer, header))
}

#[cfg(test)]
#[path = "wal_tests.rs"]
mod tests;
