//! Cycle detection over strong dependency edges.
//!
//! # Traversal
//!
//! Depth-first search is started from every unvisited node in hole-index
//! order and walks prerequisites (`A → B` means A depends on B). The DFS is
//! iterative: an explicit frame stack stores each node's successor list and
//! a cursor into it, and `path` mirrors the stack as the walk-so-far.
//!
//! When a successor is already on the stack, the cycle is the suffix of the
//! path starting at that successor. The cycle is recorded and the current
//! DFS root is abandoned. Its nodes stay visited, so a node shows up in at
//! most one reported cycle per pass.

#![allow(clippy::module_name_repetitions)]

use fixedbitset::FixedBitSet;
use petgraph::graph::NodeIndex;
use tracing::{debug, instrument, warn};

use super::build::DependencyGraph;

/// Detect cycles among strong edges.
///
/// Each cycle is listed in traversal order; the edge from the last id back
/// to the first is implicit.
#[instrument(skip_all, fields(nodes = graph.node_count()))]
#[must_use]
pub fn detect_cycles(graph: &DependencyGraph) -> Vec<Vec<String>> {
    let n = graph.node_count();
    let mut visited = FixedBitSet::with_capacity(n);
    let mut on_stack = FixedBitSet::with_capacity(n);
    let mut cycles: Vec<Vec<String>> = Vec::new();

    for start in (0..n).map(NodeIndex::new) {
        if visited.contains(start.index()) {
            continue;
        }
        if let Some(cycle) = dfs_from(graph, start, &mut visited, &mut on_stack) {
            cycles.push(
                cycle
                    .into_iter()
                    .filter_map(|idx| graph.node_id(idx).map(str::to_owned))
                    .collect(),
            );
        }
    }

    if cycles.is_empty() {
        debug!("no dependency cycles");
    } else {
        warn!(count = cycles.len(), "circular dependencies detected");
    }
    cycles
}

/// Slice `path` at the first occurrence of `start`.
///
/// Returns `None` when `start` is not on the path.
#[must_use]
pub fn extract_cycle<T: PartialEq + Clone>(path: &[T], start: &T) -> Option<Vec<T>> {
    let pos = path.iter().position(|node| node == start)?;
    Some(path[pos..].to_vec())
}

struct Frame {
    node: NodeIndex,
    successors: Vec<NodeIndex>,
    next: usize,
}

impl Frame {
    fn new(graph: &DependencyGraph, node: NodeIndex) -> Self {
        Self {
            node,
            successors: graph.prerequisites(node),
            next: 0,
        }
    }
}

fn dfs_from(
    graph: &DependencyGraph,
    start: NodeIndex,
    visited: &mut FixedBitSet,
    on_stack: &mut FixedBitSet,
) -> Option<Vec<NodeIndex>> {
    visited.insert(start.index());
    on_stack.insert(start.index());
    let mut stack = vec![Frame::new(graph, start)];
    let mut path = vec![start];

    while let Some(frame) = stack.last_mut() {
        let Some(&succ) = frame.successors.get(frame.next) else {
            on_stack.set(frame.node.index(), false);
            stack.pop();
            path.pop();
            continue;
        };
        frame.next += 1;

        if on_stack.contains(succ.index()) {
            let cycle = extract_cycle(&path, &succ);
            // Abandoned root: nothing on the path stays on the stack.
            for node in &path {
                on_stack.set(node.index(), false);
            }
            return cycle;
        }

        if !visited.contains(succ.index()) {
            visited.insert(succ.index());
            on_stack.insert(succ.index());
            path.push(succ);
            stack.push(Frame::new(graph, succ));
        }
    }

    None
}
