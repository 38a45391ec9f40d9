//! Critical path through the dependency tree.
//!
//! # Overview
//!
//! The critical path is the root-to-leaf chain with the largest summed
//! complexity: the longest run of prerequisite work. The root contributes
//! nothing.
//!
//! # Algorithm
//!
//! A longest-path DP over the acyclic core of the tree, walked in reverse
//! topological order so every child is solved before its parents. At each
//! node the best child is replaced only by a strictly larger one, starting
//! from zero. Ties therefore go to the earliest child, and children whose
//! best chain costs nothing are never appended.

use fixedbitset::FixedBitSet;
use holeplan_core::EnhancedHole;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::DependencyTree;

/// Winning root-to-leaf chain, prerequisite first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriticalPath {
    /// Hole indices from the top prerequisite down to the leaf.
    pub holes: Vec<usize>,
    pub total_complexity: u64,
}

impl CriticalPath {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holes.is_empty()
    }
}

/// Find the critical path of `tree`.
///
/// `holes` supplies the complexities; it must be the list the tree was
/// built from.
#[instrument(skip_all, fields(nodes = tree.nodes.len()))]
#[must_use]
pub fn find_critical_path(tree: &DependencyTree, holes: &[EnhancedHole]) -> CriticalPath {
    let order = tree.acyclic_order();
    let n = tree.nodes.len();

    let mut reached = FixedBitSet::with_capacity(n);
    for &idx in &order {
        reached.insert(idx);
    }

    let mut best = vec![0_u64; n];
    let mut next: Vec<Option<usize>> = vec![None; n];

    for &idx in order.iter().rev() {
        let node = &tree.nodes[idx];
        let own = node
            .hole
            .and_then(|h| holes.get(h))
            .map_or(0, |h| u64::from(h.complexity));

        let mut tail = 0_u64;
        for &child in &node.children {
            if reached.contains(child) && best[child] > tail {
                tail = best[child];
                next[idx] = Some(child);
            }
        }
        best[idx] = own + tail;
    }

    let mut path: Vec<usize> = Vec::new();
    let mut cursor = next.get(DependencyTree::ROOT).copied().flatten();
    while let Some(idx) = cursor {
        if let Some(hole) = tree.nodes[idx].hole {
            path.push(hole);
        }
        cursor = next[idx];
    }

    let total_complexity = best.first().copied().unwrap_or(0);
    debug!(length = path.len(), total_complexity, "found critical path");
    CriticalPath {
        holes: path,
        total_complexity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{DependencyEdge, DependencyKind};
    use crate::graph::DependencyGraph;

    fn solve(
        scores: &[(&str, u32)],
        requires: &[(usize, usize)],
    ) -> (CriticalPath, Vec<EnhancedHole>) {
        let holes: Vec<EnhancedHole> = scores
            .iter()
            .enumerate()
            .map(|(i, &(name, c))| EnhancedHole::new(i, name, 5, c))
            .collect();
        let edges: Vec<DependencyEdge> = requires
            .iter()
            .map(|&(f, t)| {
                DependencyEdge::new(
                    holes[f].id.clone(),
                    holes[t].id.clone(),
                    DependencyKind::Requires,
                )
            })
            .collect();
        let graph = DependencyGraph::build(&holes, &edges);
        let tree = DependencyTree::build(&holes, &graph);
        (find_critical_path(&tree, &holes), holes)
    }

    #[test]
    fn empty_tree_has_empty_path() {
        let (cp, _) = solve(&[], &[]);
        assert!(cp.is_empty());
        assert_eq!(cp.total_complexity, 0);
    }

    #[test]
    fn single_chain_sums_every_hole() {
        // Top(2) <- Mid(8) <- Leaf(7): Leaf requires Mid requires Top.
        let (cp, _) = solve(&[("Top", 2), ("Mid", 8), ("Leaf", 7)], &[(2, 1), (1, 0)]);
        assert_eq!(cp.holes, vec![0, 1, 2]);
        assert_eq!(cp.total_complexity, 17);
    }

    #[test]
    fn picks_heaviest_branch() {
        // Root children A(1), B(4). A has child C(9); B has child D(2).
        let (cp, _) = solve(
            &[("A", 1), ("B", 4), ("C", 9), ("D", 2)],
            &[(2, 0), (3, 1)],
        );
        assert_eq!(cp.holes, vec![0, 2]);
        assert_eq!(cp.total_complexity, 10);
    }

    #[test]
    fn earliest_child_wins_ties() {
        let (cp, _) = solve(&[("A", 5), ("B", 5)], &[]);
        assert_eq!(cp.holes, vec![0]);
        assert_eq!(cp.total_complexity, 5);
    }

    #[test]
    fn zero_cost_tail_is_not_appended() {
        // Free requires Base; Free costs nothing.
        let (cp, _) = solve(&[("Base", 3), ("Free", 0)], &[(1, 0)]);
        assert_eq!(cp.holes, vec![0]);
        assert_eq!(cp.total_complexity, 3);
    }

    #[test]
    fn shared_child_counts_once_per_path() {
        // D requires both A(1) and B(6).
        let (cp, _) = solve(&[("A", 1), ("B", 6), ("D", 4)], &[(2, 0), (2, 1)]);
        assert_eq!(cp.holes, vec![1, 2]);
        assert_eq!(cp.total_complexity, 10);
    }

    #[test]
    fn cyclic_holes_are_skipped() {
        // A <-> B is heavy but unreachable; C is the only root.
        let (cp, _) = solve(&[("A", 9), ("B", 9), ("C", 1)], &[(0, 1), (1, 0)]);
        assert_eq!(cp.holes, vec![2]);
        assert_eq!(cp.total_complexity, 1);
    }
}
