// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log entry structure
//!
//! One graph mutation, encoded as a fixed 24-byte record:
//! `opcode:u32 | pad:u32 | a:u64 | b:u64`.

use crate::layout::{read_u32, read_u64, write_u32, write_u64, LayoutError, LOG_ENTRY_SIZE};
use hatch_core::NodeId;
use std::fmt;

/// Mutation kind; the discriminants are the on-disk values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum OpCode {
    AddNode = 0,
    AddEdge = 1,
    RemoveNode = 2,
    RemoveEdge = 3,
}

impl OpCode {
    pub fn as_str(self) -> &'static str {
        match self {
            OpCode::AddNode => "ADD_NODE",
            OpCode::AddEdge => "ADD_EDGE",
            OpCode::RemoveNode => "REMOVE_NODE",
            OpCode::RemoveEdge => "REMOVE_EDGE",
        }
    }

    fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(OpCode::AddNode),
            1 => Some(OpCode::AddEdge),
            2 => Some(OpCode::RemoveNode),
            3 => Some(OpCode::RemoveEdge),
            _ => None,
        }
    }
}

/// A single record in the write-ahead log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LogEntry {
    pub opcode: OpCode,
    pub a: NodeId,
    /// Zero for node operations
    pub b: NodeId,
}

impl LogEntry {
    pub fn new(opcode: OpCode, a: NodeId, b: NodeId) -> Self {
        Self { opcode, a, b }
    }

    pub fn add_node(id: NodeId) -> Self {
        Self::new(OpCode::AddNode, id, 0)
    }

    pub fn remove_node(id: NodeId) -> Self {
        Self::new(OpCode::RemoveNode, id, 0)
    }

    pub fn add_edge(a: NodeId, b: NodeId) -> Self {
        Self::new(OpCode::AddEdge, a, b)
    }

    pub fn remove_edge(a: NodeId, b: NodeId) -> Self {
        Self::new(OpCode::RemoveEdge, a, b)
    }

    /// Encode into a `LOG_ENTRY_SIZE` slot
    pub(crate) fn encode(&self, slot: &mut [u8]) {
        debug_assert_eq!(slot.len(), LOG_ENTRY_SIZE);
        write_u32(slot, 0, self.opcode as u32);
        write_u32(slot, 4, 0);
        write_u64(slot, 8, self.a);
        write_u64(slot, 16, self.b);
    }

    /// Decode from a slot of log block `block`
    pub(crate) fn decode(slot: &[u8], block: u64) -> Result<Self, LayoutError> {
        let raw = read_u32(slot, 0);
        let opcode = OpCode::from_raw(raw).ok_or(LayoutError::UnknownOpcode { block, opcode: raw })?;
        Ok(Self {
            opcode,
            a: read_u64(slot, 8),
            b: read_u64(slot, 16),
        })
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entry({}, {}, {})", self.opcode.as_str(), self.a, self.b)
    }
}

#[cfg(test)]
#[path = "entry_tests.rs"]
mod tests;
