// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sequential cursor over the active log segment

use super::entry::LogEntry;
use super::{load_block, LogError};
use crate::device::{BlockDevice, Buffer};
use crate::layout::{entry_slot, LogBlockHeader};
use std::ops::Range;

/// Reads entries of the active segment in append order.
///
/// Blocks after the first are loaded and validated lazily. Created by
/// [`LogManager::read_log`](super::LogManager::read_log).
#[derive(Debug)]
pub struct LogReader<'a> {
    device: &'a BlockDevice,
    generation: u64,
    end: u64,
    tail_entries: u32,
    block: u64,
    index: u32,
    current: Option<(Buffer, LogBlockHeader)>,
}

impl<'a> LogReader<'a> {
    pub(super) fn new(
        device: &'a BlockDevice,
        segment: Range<u64>,
        generation: u64,
        first: (Buffer, LogBlockHeader),
        tail_entries: u32,
    ) -> Self {
        Self {
            device,
            generation,
            end: segment.end,
            tail_entries,
            block: segment.start,
            index: 0,
            current: Some(first),
        }
    }

    /// True while unread entries remain, in this block or a later one
    pub fn has_next(&self) -> bool {
        let Some((_, header)) = &self.current else {
            return false;
        };
        if self.index < header.entry_count {
            return true;
        }
        // Only the tail can be short: a block is extended past once full.
        // A crash right after an extension leaves the tail empty.
        let tail = self.end - 1;
        self.block + 1 < tail || (self.block < tail && self.tail_entries > 0)
    }

    /// Advance the cursor and return the entry under it
    pub fn get_next(&mut self) -> Result<LogEntry, LogError> {
        loop {
            let Some((buffer, header)) = &self.current else {
                return Err(LogError::PastSegmentEnd { block: self.block });
            };
            if self.index < header.entry_count {
                let slot = &buffer.bytes()[entry_slot(self.index as usize)];
                let entry = LogEntry::decode(slot, self.block)?;
                self.index += 1;
                return Ok(entry);
            }

            let next = self.block + 1;
            if next >= self.end {
                return Err(LogError::PastSegmentEnd { block: next });
            }
            self.current = None;
            self.current = Some(load_block(self.device, next, self.generation)?);
            self.block = next;
            self.index = 0;
        }
    }

    /// Release the reader, handing the log back to its manager
    pub fn close(self) {}
}

impl Iterator for LogReader<'_> {
    type Item = Result<LogEntry, LogError>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.has_next() {
            return None;
        }
        let next = self.get_next();
        if next.is_err() {
            // Stop after the first failure
            self.current = None;
        }
        Some(next)
    }
}
