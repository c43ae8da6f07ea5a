// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Graph commands

use clap::Subcommand;
use hatch_core::{DurableGraphStore, GraphError, Node, NodeId, Outcome};
use std::fmt;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Format the log and checkpoint regions
    Format,
    /// Add a node
    AddNode { id: NodeId },
    /// Remove a node and every edge touching it
    RemoveNode { id: NodeId },
    /// Show a node and its neighbors
    Node { id: NodeId },
    /// Add an undirected edge
    AddEdge { a: NodeId, b: NodeId },
    /// Remove an undirected edge
    RemoveEdge { a: NodeId, b: NodeId },
    /// Check that an edge exists
    Edge { a: NodeId, b: NodeId },
    /// List the neighbors of a node
    Neighbors { id: NodeId },
    /// Number of hops between two nodes
    ShortestPath { a: NodeId, b: NodeId },
    /// Write a checkpoint and start a new log generation
    Checkpoint,
    /// Show generation, counts and log usage
    Inspect {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Successful result of a graph command
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    Outcome(Outcome),
    Node(Node),
    Edge(NodeId, NodeId),
    Neighbors(Vec<NodeId>),
    Distance(Option<u64>),
    Checkpointed { generation: u64 },
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Outcome(outcome) => write!(f, "{}", outcome.status()),
            Reply::Node(node) => {
                write!(f, "{}:", node.id())?;
                for neighbor in node.edges() {
                    write!(f, " {}", neighbor)?;
                }
                Ok(())
            }
            Reply::Edge(a, b) => write!(f, "{} {}", a, b),
            Reply::Neighbors(ids) => {
                let ids: Vec<String> = ids.iter().map(ToString::to_string).collect();
                write!(f, "{}", ids.join(" "))
            }
            Reply::Distance(Some(hops)) => write!(f, "{}", hops),
            Reply::Distance(None) => write!(f, "{}", Outcome::NoAction.status()),
            Reply::Checkpointed { generation } => {
                write!(f, "{} (generation {})", Outcome::Success.status(), generation)
            }
        }
    }
}

/// Run one graph command against the store.
///
/// `Format` and `Inspect` act on the store itself and are handled by the
/// caller; passing them here is a usage error.
pub fn execute<S: DurableGraphStore>(store: &S, command: Command) -> Result<Reply, GraphError> {
    match command {
        Command::AddNode { id } => store.add_node(id).map(Reply::Outcome),
        Command::RemoveNode { id } => store.remove_node(id).map(Reply::Outcome),
        Command::Node { id } => store.find_node(id).map(Reply::Node),
        Command::AddEdge { a, b } => store.add_edge(a, b).map(Reply::Outcome),
        Command::RemoveEdge { a, b } => store.remove_edge(a, b).map(Reply::Outcome),
        Command::Edge { a, b } => store.get_edge(a, b).map(|(a, b)| Reply::Edge(a, b)),
        Command::Neighbors { id } => store.get_neighbors(id).map(Reply::Neighbors),
        Command::ShortestPath { a, b } => store.shortest_path(a, b).map(Reply::Distance),
        Command::Checkpoint => store
            .checkpoint()
            .map(|generation| Reply::Checkpointed { generation }),
        Command::Format | Command::Inspect { .. } => {
            Err(GraphError::Invalid("not a graph command"))
        }
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
