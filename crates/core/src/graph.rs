// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Graph-store contract
//!
//! Edges are undirected and stored by identifier: every node keeps the ids of
//! its neighbors, and `a` lists `b` iff `b` lists `a`.

use crate::status::{GraphError, Outcome};
use std::collections::BTreeSet;

/// Identifier of a node, unique among live nodes
pub type NodeId = u64;

/// A node and the ids of its neighbors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: NodeId,
    edges: BTreeSet<NodeId>,
}

impl Node {
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            edges: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Neighbor ids in ascending order
    pub fn edges(&self) -> &BTreeSet<NodeId> {
        &self.edges
    }

    pub fn has_edge(&self, other: NodeId) -> bool {
        self.edges.contains(&other)
    }

    pub fn degree(&self) -> usize {
        self.edges.len()
    }

    /// Returns false if the edge already existed
    pub(crate) fn insert_edge(&mut self, other: NodeId) -> bool {
        self.edges.insert(other)
    }

    /// Returns false if the edge did not exist
    pub(crate) fn remove_edge(&mut self, other: NodeId) -> bool {
        self.edges.remove(&other)
    }
}

/// Operations every graph store serves
///
/// Implementors serialize calls internally, so the contract takes `&self`.
pub trait GraphStore: Send + Sync {
    /// `NoAction` if the id already exists
    fn add_node(&self, id: NodeId) -> Result<Outcome, GraphError>;

    /// Removes the node and every edge touching it
    fn remove_node(&self, id: NodeId) -> Result<Outcome, GraphError>;

    fn find_node(&self, id: NodeId) -> Result<Node, GraphError>;

    /// `Invalid` for a self-loop, `NoAction` if the edge already exists
    fn add_edge(&self, a: NodeId, b: NodeId) -> Result<Outcome, GraphError>;

    /// `DoesNotExist` if either endpoint or the edge is absent
    fn remove_edge(&self, a: NodeId, b: NodeId) -> Result<Outcome, GraphError>;

    fn get_edge(&self, a: NodeId, b: NodeId) -> Result<(NodeId, NodeId), GraphError>;

    fn get_neighbors(&self, id: NodeId) -> Result<Vec<NodeId>, GraphError>;

    /// Number of hops from `a` to `b`.
    ///
    /// `Ok(None)` when `a == b` or when `b` is unreachable. There is no depth
    /// limit, so this is unbounded in time and memory.
    fn shortest_path(&self, a: NodeId, b: NodeId) -> Result<Option<u64>, GraphError>;
}

/// A store that can persist a full snapshot of itself
pub trait DurableGraphStore: GraphStore {
    /// Snapshot the graph and start a fresh log generation.
    ///
    /// Returns the new generation.
    fn checkpoint(&self) -> Result<u64, GraphError>;
}

/// Local half of an edge whose other endpoint lives on another partition.
///
/// The storage of cross-partition edges belongs to the partition layer; the
/// defaults reject every call until a store opts in.
pub trait EdgePartStore: GraphStore {
    fn add_edge_part(&self, local: NodeId, remote: NodeId) -> Result<Outcome, GraphError> {
        let _ = (local, remote);
        Err(GraphError::WrongPartition)
    }

    fn remove_edge_part(&self, local: NodeId, remote: NodeId) -> Result<Outcome, GraphError> {
        let _ = (local, remote);
        Err(GraphError::WrongPartition)
    }

    fn get_edge_part(&self, local: NodeId, remote: NodeId) -> Result<(NodeId, NodeId), GraphError> {
        let _ = (local, remote);
        Err(GraphError::WrongPartition)
    }
}
