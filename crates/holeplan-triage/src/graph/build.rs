//! Dependency graph construction from extracted edges.
//!
//! ## Edge Direction
//!
//! An edge `A → B` means "A **depends on** B" (B is the prerequisite),
//! matching [`DependencyEdge`]. Scheduling walks the edges backwards.
//!
//! ## Node Order
//!
//! Node `i` is hole `i`: holes are inserted in input order, so every
//! `NodeIndex` doubles as a hole index. Neighbour queries return nodes in
//! edge insertion order so downstream traversals are reproducible.
//!
//! ## Deduplication
//!
//! The extractor may emit the same strong pair several times (one per
//! matching triple). The graph keeps at most one strong and one weak edge
//! per ordered pair; the first kind seen wins.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use holeplan_core::EnhancedHole;
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use tracing::{debug, instrument};

use crate::extract::{DependencyEdge, DependencyKind};

/// Directed graph over hole ids.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// Nodes are hole ids; edge weights are the dependency kind.
    pub graph: DiGraph<String, DependencyKind>,
    /// Mapping from hole id to petgraph `NodeIndex`.
    pub node_map: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    /// Build the graph for `holes`, adding every edge whose endpoints are
    /// both known holes. Edges naming unknown ids are dropped.
    #[instrument(skip_all, fields(holes = holes.len(), edges = edges.len()))]
    #[must_use]
    pub fn build(holes: &[EnhancedHole], edges: &[DependencyEdge]) -> Self {
        let mut graph = DiGraph::<String, DependencyKind>::with_capacity(holes.len(), edges.len());
        let mut node_map: HashMap<String, NodeIndex> = HashMap::with_capacity(holes.len());

        for hole in holes {
            let idx = graph.add_node(hole.id.clone());
            node_map.insert(hole.id.clone(), idx);
        }

        let mut dropped = 0_usize;
        for edge in edges {
            let (Some(&from), Some(&to)) = (node_map.get(&edge.from), node_map.get(&edge.to)) else {
                dropped += 1;
                continue;
            };

            let strong = edge.relationship.is_strong();
            let duplicate = graph
                .edges_connecting(from, to)
                .any(|e| e.weight().is_strong() == strong);
            if !duplicate {
                graph.add_edge(from, to, edge.relationship);
            }
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            dropped,
            "built dependency graph"
        );

        Self { graph, node_map }
    }

    /// Return the number of nodes (holes) in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of distinct edges in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Look up the `NodeIndex` for a hole id.
    #[must_use]
    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.node_map.get(id).copied()
    }

    /// Return the hole id for a node.
    #[must_use]
    pub fn node_id(&self, idx: NodeIndex) -> Option<&str> {
        self.graph.node_weight(idx).map(String::as_str)
    }

    /// Prerequisites of `idx` over strong edges.
    #[must_use]
    pub fn prerequisites(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.neighbors(idx, Direction::Outgoing, true)
    }

    /// Holes that depend on `idx` over strong edges.
    #[must_use]
    pub fn dependents(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.neighbors(idx, Direction::Incoming, true)
    }

    /// Every node `idx` points at, weak edges included.
    #[must_use]
    pub fn associations(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.neighbors(idx, Direction::Outgoing, false)
    }

    /// Every node pointing at `idx`, weak edges included.
    #[must_use]
    pub fn associated_by(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.neighbors(idx, Direction::Incoming, false)
    }

    /// All strong edges as `(dependent, prerequisite)` in insertion order.
    #[must_use]
    pub fn strong_edges(&self) -> Vec<(NodeIndex, NodeIndex)> {
        self.graph
            .edge_references()
            .filter(|e| e.weight().is_strong())
            .map(|e| (e.source(), e.target()))
            .collect()
    }

    fn neighbors(&self, idx: NodeIndex, dir: Direction, strong_only: bool) -> Vec<NodeIndex> {
        let mut edges: Vec<_> = self
            .graph
            .edges_directed(idx, dir)
            .filter(|e| !strong_only || e.weight().is_strong())
            .map(|e| {
                let other = if dir == Direction::Outgoing {
                    e.target()
                } else {
                    e.source()
                };
                (e.id(), other)
            })
            .collect();
        // petgraph walks adjacency lists newest-first.
        edges.sort_unstable_by_key(|(id, _)| *id);

        let mut out: Vec<NodeIndex> = Vec::with_capacity(edges.len());
        for (_, other) in edges {
            if !out.contains(&other) {
                out.push(other);
            }
        }
        out
    }
}
