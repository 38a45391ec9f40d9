//! Rooted dependency tree over strong edges.
//!
//! # Shape
//!
//! The tree is an arena: `nodes[0]` is the synthetic root and `nodes[i + 1]`
//! belongs to hole `i`. For every strong edge `A → B` (A requires B), B is a
//! parent of A, so prerequisites sit above the holes that need them. Holes
//! with no prerequisite hang off the root in hole-index order.
//!
//! Because a hole can have several prerequisites the "tree" is really a
//! DAG rooted at `root`, and a strong cycle leaves its members (and
//! everything below them) with no path from the root at all.
//!
//! # Acyclic Core
//!
//! [`DependencyTree::acyclic_order`] runs Kahn's algorithm from the root
//! over child links. The nodes it reaches are exactly those whose every
//! ancestor chain leads back to the root without passing a cycle. Depths and
//! the critical path are computed over that core only; the remaining nodes
//! keep depth 0 and are never traversed.

pub mod critical_path;

use std::collections::VecDeque;

use holeplan_core::EnhancedHole;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::graph::DependencyGraph;

pub use critical_path::{CriticalPath, find_critical_path};

/// Id of the synthetic root node.
pub const ROOT_ID: &str = "root";

/// One node of the dependency tree arena.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Hole id, or [`ROOT_ID`].
    pub id: String,
    /// Index of the hole this node stands for; `None` for the root.
    pub hole: Option<usize>,
    /// Arena indices of dependents, in edge insertion order.
    pub children: Vec<usize>,
    /// Arena indices of prerequisites (or the root).
    pub parents: Vec<usize>,
    /// Longest distance from the root; −1 for the root itself.
    pub depth: i32,
    pub on_critical_path: bool,
}

impl TreeNode {
    fn root() -> Self {
        Self {
            id: ROOT_ID.to_string(),
            hole: None,
            children: Vec::new(),
            parents: Vec::new(),
            depth: -1,
            on_critical_path: false,
        }
    }

    fn for_hole(hole: &EnhancedHole, index: usize) -> Self {
        Self {
            id: hole.id.clone(),
            hole: Some(index),
            children: Vec::new(),
            parents: Vec::new(),
            depth: 0,
            on_critical_path: false,
        }
    }

    /// Returns `true` for the synthetic root.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.hole.is_none()
    }
}

/// Arena-backed dependency tree.
///
/// Deserialization rejects arenas without a root at index 0 and links that
/// point outside the arena.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TreeArena")]
pub struct DependencyTree {
    pub nodes: Vec<TreeNode>,
}

/// Unchecked wire form of [`DependencyTree`].
#[derive(Deserialize)]
struct TreeArena {
    nodes: Vec<TreeNode>,
}

impl TryFrom<TreeArena> for DependencyTree {
    type Error = String;

    fn try_from(arena: TreeArena) -> Result<Self, Self::Error> {
        let nodes = arena.nodes;
        match nodes.first() {
            None => return Err("dependency tree has no root node".to_string()),
            Some(root) if !root.is_root() => {
                return Err(format!("node 0 must be the root, found `{}`", root.id));
            }
            Some(_) => {}
        }

        for (idx, node) in nodes.iter().enumerate().skip(1) {
            if node.is_root() {
                return Err(format!("node {idx} (`{}`) has no hole", node.id));
            }
            let dangling = node
                .children
                .iter()
                .chain(&node.parents)
                .find(|&&link| link >= nodes.len());
            if let Some(link) = dangling {
                return Err(format!("node {idx} links to missing node {link}"));
            }
        }
        if let Some(link) = nodes[0].children.iter().find(|&&link| link >= nodes.len()) {
            return Err(format!("root links to missing node {link}"));
        }

        Ok(Self { nodes })
    }
}

impl Default for DependencyTree {
    fn default() -> Self {
        Self {
            nodes: vec![TreeNode::root()],
        }
    }
}

impl DependencyTree {
    /// Arena index of the root.
    pub const ROOT: usize = 0;

    /// Build the tree for `holes` from the strong edges of `graph`.
    ///
    /// `graph` must have been built from `holes`, so node `i` is `holes[i]`.
    #[instrument(skip_all, fields(holes = holes.len()))]
    #[must_use]
    pub fn build(holes: &[EnhancedHole], graph: &DependencyGraph) -> Self {
        let mut nodes: Vec<TreeNode> = Vec::with_capacity(holes.len() + 1);
        nodes.push(TreeNode::root());
        nodes.extend(holes.iter().enumerate().map(|(i, h)| TreeNode::for_hole(h, i)));

        for (dependent, prerequisite) in graph.strong_edges() {
            let child = dependent.index() + 1;
            let parent = prerequisite.index() + 1;
            if child >= nodes.len() || parent >= nodes.len() {
                continue;
            }
            nodes[parent].children.push(child);
            nodes[child].parents.push(parent);
        }

        let orphans: Vec<usize> = (1..nodes.len())
            .filter(|&idx| nodes[idx].parents.is_empty())
            .collect();
        for idx in orphans {
            nodes[idx].parents.push(Self::ROOT);
            nodes[Self::ROOT].children.push(idx);
        }

        let mut tree = Self { nodes };
        let reached = tree.assign_depths();
        debug!(
            nodes = tree.nodes.len(),
            roots = tree.root().map_or(0, |r| r.children.len()),
            reached,
            "built dependency tree"
        );
        tree
    }

    /// The synthetic root, absent only if `nodes` was emptied by hand.
    #[must_use]
    pub fn root(&self) -> Option<&TreeNode> {
        self.nodes.get(Self::ROOT)
    }

    /// Arena index of the node for hole `hole`.
    #[must_use]
    pub const fn node_for_hole(hole: usize) -> usize {
        hole + 1
    }

    #[must_use]
    pub fn get(&self, idx: usize) -> Option<&TreeNode> {
        self.nodes.get(idx)
    }

    /// Find a node by hole id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&TreeNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Number of hole nodes (the root is not counted).
    #[must_use]
    pub fn hole_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// Arena indices reachable from the root through acyclic paths, in a
    /// topological order starting with the root.
    ///
    /// A node is emitted only after all of its parents, so nodes on a strong
    /// cycle or below one never appear.
    #[must_use]
    pub fn acyclic_order(&self) -> Vec<usize> {
        let mut remaining: Vec<usize> = self.nodes.iter().map(|n| n.parents.len()).collect();
        let mut queue: VecDeque<usize> = VecDeque::new();
        let mut order: Vec<usize> = Vec::with_capacity(self.nodes.len());

        if !self.nodes.is_empty() {
            queue.push_back(Self::ROOT);
        }
        while let Some(idx) = queue.pop_front() {
            order.push(idx);
            for &child in &self.nodes[idx].children {
                let Some(left) = remaining.get_mut(child) else {
                    continue;
                };
                *left = left.saturating_sub(1);
                if *left == 0 {
                    queue.push_back(child);
                }
            }
        }
        order
    }

    /// Flag the nodes of the given holes as lying on the critical path.
    ///
    /// Any earlier marking is cleared first. Unknown hole indices are ignored.
    pub fn mark_critical_path(&mut self, holes: &[usize]) {
        for node in &mut self.nodes {
            node.on_critical_path = false;
        }
        for &hole in holes {
            if let Some(node) = self.nodes.get_mut(Self::node_for_hole(hole)) {
                node.on_critical_path = true;
            }
        }
    }

    /// Ids of flagged nodes, in arena order.
    #[must_use]
    pub fn critical_ids(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|n| n.on_critical_path)
            .map(|n| n.id.as_str())
            .collect()
    }

    fn assign_depths(&mut self) -> usize {
        let order = self.acyclic_order();
        for &idx in order.iter().skip(1) {
            let depth = self.nodes[idx]
                .parents
                .iter()
                .map(|&p| self.nodes[p].depth + 1)
                .max()
                .unwrap_or(0);
            self.nodes[idx].depth = depth;
        }
        order.len().saturating_sub(1)
    }
}
