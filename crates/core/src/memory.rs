// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory graph store
//!
//! The authoritative live graph. Nodes are indexed by id and edges are id
//! sets, so removing a node never leaves a dangling reference behind.

use crate::graph::{GraphStore, Node, NodeId};
use crate::status::{GraphError, Outcome};
use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

const SELF_LOOP: &str = "edge endpoints must differ";

/// Adjacency-list graph held entirely in memory
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryStore {
    nodes: BTreeMap<NodeId, Node>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, id: NodeId) -> Result<Outcome, GraphError> {
        if self.nodes.contains_key(&id) {
            return Ok(Outcome::NoAction);
        }
        self.nodes.insert(id, Node::new(id));
        Ok(Outcome::Success)
    }

    pub fn remove_node(&mut self, id: NodeId) -> Result<Outcome, GraphError> {
        let node = self.nodes.remove(&id).ok_or(GraphError::DoesNotExist)?;
        for neighbor in node.edges() {
            if let Some(n) = self.nodes.get_mut(neighbor) {
                n.remove_edge(id);
            }
        }
        Ok(Outcome::Success)
    }

    pub fn find_node(&self, id: NodeId) -> Result<&Node, GraphError> {
        self.nodes.get(&id).ok_or(GraphError::DoesNotExist)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn get_edge(&self, a: NodeId, b: NodeId) -> Result<(NodeId, NodeId), GraphError> {
        self.check_endpoints(a, b)?;
        let node_a = self.find_node(a)?;
        if node_a.has_edge(b) {
            Ok((a, b))
        } else {
            Err(GraphError::DoesNotExist)
        }
    }

    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> Result<Outcome, GraphError> {
        self.check_endpoints(a, b)?;
        let inserted = match self.nodes.get_mut(&a) {
            Some(node) => node.insert_edge(b),
            None => return Err(GraphError::DoesNotExist),
        };
        if let Some(node) = self.nodes.get_mut(&b) {
            node.insert_edge(a);
        }
        Ok(if inserted {
            Outcome::Success
        } else {
            Outcome::NoAction
        })
    }

    pub fn remove_edge(&mut self, a: NodeId, b: NodeId) -> Result<Outcome, GraphError> {
        self.check_endpoints(a, b)?;
        let removed = match self.nodes.get_mut(&a) {
            Some(node) => node.remove_edge(b),
            None => return Err(GraphError::DoesNotExist),
        };
        if !removed {
            return Err(GraphError::DoesNotExist);
        }
        if let Some(node) = self.nodes.get_mut(&b) {
            node.remove_edge(a);
        }
        Ok(Outcome::Success)
    }

    pub fn get_neighbors(&self, id: NodeId) -> Result<Vec<NodeId>, GraphError> {
        Ok(self.find_node(id)?.edges().iter().copied().collect())
    }

    /// Breadth-first search, one level at a time
    pub fn shortest_path(&self, a: NodeId, b: NodeId) -> Result<Option<u64>, GraphError> {
        let start = self.find_node(a)?;
        self.find_node(b)?;
        if a == b {
            return Ok(None);
        }

        let mut distance = 0u64;
        let mut visited: HashSet<NodeId> = HashSet::from([a]);
        let mut frontier = vec![start];

        while !frontier.is_empty() {
            let mut next = Vec::new();
            for node in frontier {
                if node.id() == b {
                    return Ok(Some(distance));
                }
                for neighbor in node.edges() {
                    if !visited.insert(*neighbor) {
                        continue;
                    }
                    if let Some(n) = self.nodes.get(neighbor) {
                        next.push(n);
                    }
                }
            }
            distance += 1;
            frontier = next;
        }

        Ok(None)
    }

    /// All nodes in ascending id order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(Node::degree).sum::<usize>() / 2
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Both endpoints must exist and differ
    fn check_endpoints(&self, a: NodeId, b: NodeId) -> Result<(), GraphError> {
        if a == b {
            return Err(GraphError::Invalid(SELF_LOOP));
        }
        if !self.contains(a) || !self.contains(b) {
            return Err(GraphError::DoesNotExist);
        }
        Ok(())
    }
}

/// Non-durable store: the in-memory graph behind a single lock
impl GraphStore for Mutex<MemoryStore> {
    fn add_node(&self, id: NodeId) -> Result<Outcome, GraphError> {
        self.lock().unwrap_or_else(|e| e.into_inner()).add_node(id)
    }

    fn remove_node(&self, id: NodeId) -> Result<Outcome, GraphError> {
        self.lock().unwrap_or_else(|e| e.into_inner()).remove_node(id)
    }

    fn find_node(&self, id: NodeId) -> Result<Node, GraphError> {
        self.lock()
            .unwrap_or_else(|e| e.into_inner())
            .find_node(id)
            .cloned()
    }

    fn add_edge(&self, a: NodeId, b: NodeId) -> Result<Outcome, GraphError> {
        self.lock().unwrap_or_else(|e| e.into_inner()).add_edge(a, b)
    }

    fn remove_edge(&self, a: NodeId, b: NodeId) -> Result<Outcome, GraphError> {
        self.lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove_edge(a, b)
    }

    fn get_edge(&self, a: NodeId, b: NodeId) -> Result<(NodeId, NodeId), GraphError> {
        self.lock().unwrap_or_else(|e| e.into_inner()).get_edge(a, b)
    }

    fn get_neighbors(&self, id: NodeId) -> Result<Vec<NodeId>, GraphError> {
        self.lock()
            .unwrap_or_else(|e| e.into_inner())
            .get_neighbors(id)
    }

    fn shortest_path(&self, a: NodeId, b: NodeId) -> Result<Option<u64>, GraphError> {
        self.lock()
            .unwrap_or_else(|e| e.into_inner())
            .shortest_path(a, b)
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
