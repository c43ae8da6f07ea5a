// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced graph-store wrapper for consistent observability

use crate::graph::{DurableGraphStore, EdgePartStore, GraphStore, Node, NodeId};
use crate::status::{GraphError, Outcome};
use std::time::Instant;

/// Wrapper that adds a tracing span to every call on any GraphStore
pub struct TracedGraphStore<S> {
    inner: S,
}

impl<S> TracedGraphStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

/// Log how a call ended; rejected requests are not failures of the store
fn record<T: std::fmt::Debug>(result: &Result<T, GraphError>, started: Instant) {
    let elapsed_ms = started.elapsed().as_millis() as u64;
    match result {
        Ok(value) => tracing::debug!(elapsed_ms, ?value, "ok"),
        Err(e @ (GraphError::Halted | GraphError::Storage(_))) => {
            tracing::error!(elapsed_ms, error = %e, "failed")
        }
        Err(e) => tracing::debug!(elapsed_ms, status = %e.status(), "rejected"),
    }
}

impl<S: GraphStore> GraphStore for TracedGraphStore<S> {
    fn add_node(&self, id: NodeId) -> Result<Outcome, GraphError> {
        let _guard = tracing::info_span!("graph.add_node", id).entered();
        let started = Instant::now();
        let result = self.inner.add_node(id);
        record(&result, started);
        result
    }

    fn remove_node(&self, id: NodeId) -> Result<Outcome, GraphError> {
        let _guard = tracing::info_span!("graph.remove_node", id).entered();
        let started = Instant::now();
        let result = self.inner.remove_node(id);
        record(&result, started);
        result
    }

    fn find_node(&self, id: NodeId) -> Result<Node, GraphError> {
        let _guard = tracing::debug_span!("graph.find_node", id).entered();
        let started = Instant::now();
        let result = self.inner.find_node(id);
        record(&result.as_ref().map(Node::degree).map_err(|e| e.clone()), started);
        result
    }

    fn add_edge(&self, a: NodeId, b: NodeId) -> Result<Outcome, GraphError> {
        let _guard = tracing::info_span!("graph.add_edge", a, b).entered();
        let started = Instant::now();
        let result = self.inner.add_edge(a, b);
        record(&result, started);
        result
    }

    fn remove_edge(&self, a: NodeId, b: NodeId) -> Result<Outcome, GraphError> {
        let _guard = tracing::info_span!("graph.remove_edge", a, b).entered();
        let started = Instant::now();
        let result = self.inner.remove_edge(a, b);
        record(&result, started);
        result
    }

    fn get_edge(&self, a: NodeId, b: NodeId) -> Result<(NodeId, NodeId), GraphError> {
        let _guard = tracing::debug_span!("graph.get_edge", a, b).entered();
        let started = Instant::now();
        let result = self.inner.get_edge(a, b);
        record(&result, started);
        result
    }

    fn get_neighbors(&self, id: NodeId) -> Result<Vec<NodeId>, GraphError> {
        let _guard = tracing::debug_span!("graph.get_neighbors", id).entered();
        let started = Instant::now();
        let result = self.inner.get_neighbors(id);
        record(&result.as_ref().map(Vec::len).map_err(|e| e.clone()), started);
        result
    }

    fn shortest_path(&self, a: NodeId, b: NodeId) -> Result<Option<u64>, GraphError> {
        let _guard = tracing::info_span!("graph.shortest_path", a, b).entered();
        let started = Instant::now();
        let result = self.inner.shortest_path(a, b);
        record(&result, started);
        result
    }
}

impl<S: DurableGraphStore> DurableGraphStore for TracedGraphStore<S> {
    fn checkpoint(&self) -> Result<u64, GraphError> {
        let _guard = tracing::info_span!("graph.checkpoint").entered();
        let started = Instant::now();
        let result = self.inner.checkpoint();
        match &result {
            Ok(generation) => tracing::info!(
                generation,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "checkpoint complete"
            ),
            Err(e) => tracing::error!(error = %e, "checkpoint failed"),
        }
        result
    }
}

impl<S: EdgePartStore> EdgePartStore for TracedGraphStore<S> {
    fn add_edge_part(&self, local: NodeId, remote: NodeId) -> Result<Outcome, GraphError> {
        let _guard = tracing::info_span!("graph.add_edge_part", local, remote).entered();
        let started = Instant::now();
        let result = self.inner.add_edge_part(local, remote);
        record(&result, started);
        result
    }

    fn remove_edge_part(&self, local: NodeId, remote: NodeId) -> Result<Outcome, GraphError> {
        let _guard = tracing::info_span!("graph.remove_edge_part", local, remote).entered();
        let started = Instant::now();
        let result = self.inner.remove_edge_part(local, remote);
        record(&result, started);
        result
    }

    fn get_edge_part(&self, local: NodeId, remote: NodeId) -> Result<(NodeId, NodeId), GraphError> {
        let _guard = tracing::debug_span!("graph.get_edge_part", local, remote).entered();
        let started = Instant::now();
        let result = self.inner.get_edge_part(local, remote);
        record(&result, started);
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
