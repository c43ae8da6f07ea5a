// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Word cursors spanning a block range

use super::CheckpointError;
use crate::device::{BlockDevice, Buffer};
use crate::layout::{read_u64, write_u64, WORDS_PER_BLOCK};
use std::ops::Range;

/// Writes u64 words across consecutive blocks, flushing each block as it fills
pub struct BlockWriter<'a> {
    device: &'a BlockDevice,
    block: u64,
    end: u64,
    word: usize,
    buffer: Option<Buffer>,
}

impl<'a> BlockWriter<'a> {
    pub fn new(device: &'a BlockDevice, range: Range<u64>) -> Self {
        Self {
            device,
            block: range.start,
            end: range.end,
            word: 0,
            buffer: None,
        }
    }

    /// Fails with `NoSpace` when the word would land past the range
    pub fn write_u64(&mut self, value: u64) -> Result<(), CheckpointError> {
        let mut buffer = match self.buffer.take() {
            Some(buffer) => buffer,
            None if self.block >= self.end => {
                return Err(CheckpointError::NoSpace { block: self.block });
            }
            None => self.device.get_zeroed(self.block)?,
        };
        write_u64(buffer.bytes_mut(), self.word * 8, value);
        self.word += 1;

        if self.word == WORDS_PER_BLOCK {
            self.device.write(&buffer)?;
            self.block += 1;
            self.word = 0;
        } else {
            self.buffer = Some(buffer);
        }
        Ok(())
    }

    /// Flush the final partial block
    pub fn finish(mut self) -> Result<(), CheckpointError> {
        if let Some(buffer) = self.buffer.take() {
            self.device.write(&buffer)?;
        }
        Ok(())
    }
}

/// Reads u64 words across consecutive blocks, loading each block on demand
pub struct BlockReader<'a> {
    device: &'a BlockDevice,
    block: u64,
    end: u64,
    word: usize,
    buffer: Option<Buffer>,
}

impl<'a> BlockReader<'a> {
    pub fn new(device: &'a BlockDevice, range: Range<u64>) -> Self {
        Self {
            device,
            block: range.start,
            end: range.end,
            word: 0,
            buffer: None,
        }
    }

    /// Fails with `Truncated` when the body runs past the range
    pub fn read_u64(&mut self) -> Result<u64, CheckpointError> {
        let buffer = match self.buffer.take() {
            Some(buffer) => buffer,
            None if self.block >= self.end => {
                return Err(CheckpointError::Truncated { block: self.block });
            }
            None => self.device.get(self.block)?,
        };
        let value = read_u64(buffer.bytes(), self.word * 8);
        self.word += 1;

        if self.word == WORDS_PER_BLOCK {
            self.block += 1;
            self.word = 0;
        } else {
            self.buffer = Some(buffer);
        }
        Ok(value)
    }
}
