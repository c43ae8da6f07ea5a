// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    add_node = { LogEntry::add_node(5), OpCode::AddNode, 0 },
    add_edge = { LogEntry::add_edge(5, 6), OpCode::AddEdge, 1 },
    remove_node = { LogEntry::remove_node(5), OpCode::RemoveNode, 2 },
    remove_edge = { LogEntry::remove_edge(5, 6), OpCode::RemoveEdge, 3 },
)]
fn opcode_wire_values(entry: LogEntry, opcode: OpCode, raw: u32) {
    assert_eq!(entry.opcode, opcode);

    let mut slot = [0xEEu8; LOG_ENTRY_SIZE];
    entry.encode(&mut slot);
    assert_eq!(read_u32(&slot, 0), raw);
    assert_eq!(read_u32(&slot, 4), 0, "padding is zeroed");
    assert_eq!(read_u64(&slot, 8), 5);
    assert_eq!(LogEntry::decode(&slot, 1), Ok(entry));
}

#[test]
fn node_operations_leave_second_id_zero() {
    assert_eq!(LogEntry::add_node(9).b, 0);
    assert_eq!(LogEntry::remove_node(9).b, 0);
}

#[test]
fn unknown_opcode_is_corruption() {
    let mut slot = [0u8; LOG_ENTRY_SIZE];
    write_u32(&mut slot, 0, 17);
    assert_eq!(
        LogEntry::decode(&slot, 4),
        Err(LayoutError::UnknownOpcode {
            block: 4,
            opcode: 17
        })
    );
}

#[test]
fn display_names_the_operation() {
    assert_eq!(LogEntry::add_edge(1, 2).to_string(), "Entry(ADD_EDGE, 1, 2)");
    assert_eq!(LogEntry::remove_node(3).to_string(), "Entry(REMOVE_NODE, 3, 0)");
}
