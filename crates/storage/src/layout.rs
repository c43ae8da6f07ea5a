// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! On-disk record layout
//!
//! Every record is encoded at fixed little-endian byte offsets. Checksummed
//! records start with an 8-byte checksum: the XOR of every 8-byte word in an
//! explicitly bounded byte range that starts at the magic field and ends at
//! the record's sentinel offset.
//!
//! ```text
//! log superblock   0 checksum | 8 magic:u32 | 12 generation:u32
//!                  16 segment_start:u32 | 20 segment_size:u32 | 24 sentinel
//! log block        0 checksum | 8 magic:u64 | 16 generation:u64
//!                  24 entry_count:u32 | 28 pad | 32 entries[169] | 4088 sentinel
//! checkpoint sb    0 checkpointed:u8 | 1 pad | 8 version:u64 | 16 node_count:u64
//! ```

use crate::device::{Buffer, BLOCK_SIZE};
use std::ops::Range;
use thiserror::Error;

/// Magic constant carried by the log superblock and every log block
pub const LOG_MAGIC: u32 = 1234567;

/// Encoded size of one log entry
pub const LOG_ENTRY_SIZE: usize = 24;

const LOG_BLOCK_HEADER_SIZE: usize = 32;

/// Number of entries that fit in one log block after its header
pub const LOG_BLOCK_CAPACITY: usize = (BLOCK_SIZE - LOG_BLOCK_HEADER_SIZE) / LOG_ENTRY_SIZE;

const SUPERBLOCK_CHECKSUMMED: Range<usize> = 8..24;
const LOG_BLOCK_CHECKSUMMED: Range<usize> =
    8..LOG_BLOCK_HEADER_SIZE + LOG_BLOCK_CAPACITY * LOG_ENTRY_SIZE;

/// Number of 8-byte words in one block, for the checkpoint body
pub const WORDS_PER_BLOCK: usize = BLOCK_SIZE / 8;

/// Errors found while decoding a block
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("checksum mismatch in block {block}: stored {stored:#018x}, computed {computed:#018x}")]
    ChecksumMismatch {
        block: u64,
        stored: u64,
        computed: u64,
    },
    #[error("bad magic in block {block}: {found}")]
    BadMagic { block: u64, found: u64 },
    #[error("unknown opcode {opcode} in block {block}")]
    UnknownOpcode { block: u64, opcode: u32 },
    #[error("entry count {count} in block {block} exceeds block capacity")]
    EntryCountOverflow { block: u64, count: u32 },
}

pub(crate) fn read_u64(bytes: &[u8], offset: usize) -> u64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(&bytes[offset..offset + 8]);
    u64::from_le_bytes(word)
}

pub(crate) fn write_u64(bytes: &mut [u8], offset: usize, value: u64) {
    bytes[offset..offset + 8].copy_from_slice(&value.to_le_bytes());
}

pub(crate) fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&bytes[offset..offset + 4]);
    u32::from_le_bytes(word)
}

pub(crate) fn write_u32(bytes: &mut [u8], offset: usize, value: u32) {
    bytes[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

/// XOR of every little-endian 8-byte word in `bytes`
pub fn checksum(bytes: &[u8]) -> u64 {
    bytes
        .chunks_exact(8)
        .fold(0, |acc, word| acc ^ read_u64(word, 0))
}

fn seal(buffer: &mut Buffer, range: Range<usize>) {
    let sum = checksum(&buffer.bytes()[range]);
    write_u64(buffer.bytes_mut(), 0, sum);
}

fn verify(buffer: &Buffer, range: Range<usize>) -> Result<(), LayoutError> {
    let stored = read_u64(buffer.bytes(), 0);
    let computed = checksum(&buffer.bytes()[range]);
    if stored != computed {
        return Err(LayoutError::ChecksumMismatch {
            block: buffer.block(),
            stored,
            computed,
        });
    }
    Ok(())
}

/// Region-wide metadata of the log, stored in its first block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogSuperblock {
    /// Incremented only on rotation
    pub generation: u32,
    /// First block of the active segment
    pub segment_start: u32,
    /// Number of blocks in the active segment
    pub segment_size: u32,
}

impl LogSuperblock {
    /// Superblock of a never-used log: generation 0, empty segment right after it
    pub fn fresh(segment_start: u32) -> Self {
        Self {
            generation: 0,
            segment_start,
            segment_size: 0,
        }
    }

    pub fn decode(buffer: &Buffer) -> Result<Self, LayoutError> {
        verify(buffer, SUPERBLOCK_CHECKSUMMED)?;
        let bytes = buffer.bytes();
        let magic = read_u32(bytes, 8);
        if magic != LOG_MAGIC {
            return Err(LayoutError::BadMagic {
                block: buffer.block(),
                found: u64::from(magic),
            });
        }
        Ok(Self {
            generation: read_u32(bytes, 12),
            segment_start: read_u32(bytes, 16),
            segment_size: read_u32(bytes, 20),
        })
    }

    /// Write the fields and a fresh checksum into `buffer`
    pub fn encode(&self, buffer: &mut Buffer) {
        let bytes = buffer.bytes_mut();
        write_u32(bytes, 8, LOG_MAGIC);
        write_u32(bytes, 12, self.generation);
        write_u32(bytes, 16, self.segment_start);
        write_u32(bytes, 20, self.segment_size);
        seal(buffer, SUPERBLOCK_CHECKSUMMED);
    }

    /// One past the last block of the active segment
    pub fn segment_end(&self) -> u64 {
        u64::from(self.segment_start) + u64::from(self.segment_size)
    }
}

/// Header of one log block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogBlockHeader {
    pub generation: u64,
    pub entry_count: u32,
}

impl LogBlockHeader {
    pub fn new(generation: u64) -> Self {
        Self {
            generation,
            entry_count: 0,
        }
    }

    pub fn is_full(&self) -> bool {
        self.entry_count as usize >= LOG_BLOCK_CAPACITY
    }

    pub fn decode(buffer: &Buffer) -> Result<Self, LayoutError> {
        verify(buffer, LOG_BLOCK_CHECKSUMMED)?;
        let bytes = buffer.bytes();
        let magic = read_u64(bytes, 8);
        if magic != u64::from(LOG_MAGIC) {
            return Err(LayoutError::BadMagic {
                block: buffer.block(),
                found: magic,
            });
        }
        let entry_count = read_u32(bytes, 24);
        if entry_count as usize > LOG_BLOCK_CAPACITY {
            return Err(LayoutError::EntryCountOverflow {
                block: buffer.block(),
                count: entry_count,
            });
        }
        Ok(Self {
            generation: read_u64(bytes, 16),
            entry_count,
        })
    }

    /// Write the header fields and reseal the whole block
    pub fn encode(&self, buffer: &mut Buffer) {
        let bytes = buffer.bytes_mut();
        write_u64(bytes, 8, u64::from(LOG_MAGIC));
        write_u64(bytes, 16, self.generation);
        write_u32(bytes, 24, self.entry_count);
        write_u32(bytes, 28, 0);
        seal(buffer, LOG_BLOCK_CHECKSUMMED);
    }
}

/// Byte range of entry `index` inside a log block
pub(crate) fn entry_slot(index: usize) -> Range<usize> {
    let start = LOG_BLOCK_HEADER_SIZE + index * LOG_ENTRY_SIZE;
    start..start + LOG_ENTRY_SIZE
}

/// First block of the checkpoint region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CheckpointSuperblock {
    /// Set only once the whole body has been written
    pub checkpointed: bool,
    /// Log generation the body corresponds to
    pub version: u64,
    pub node_count: u64,
}

impl CheckpointSuperblock {
    pub fn decode(buffer: &Buffer) -> Self {
        let bytes = buffer.bytes();
        Self {
            checkpointed: bytes[0] != 0,
            version: read_u64(bytes, 8),
            node_count: read_u64(bytes, 16),
        }
    }

    pub fn encode(&self, buffer: &mut Buffer) {
        let bytes = buffer.bytes_mut();
        bytes[..8].fill(0);
        bytes[0] = u8::from(self.checkpointed);
        write_u64(bytes, 8, self.version);
        write_u64(bytes, 16, self.node_count);
    }
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
