//! Priority-ordered topological scheduling of holes.
//!
//! # Algorithm
//!
//! Kahn's algorithm over strong edges. An edge `A → B` (A requires B) adds
//! one to A's in-degree, and scheduling B releases A. The frontier is a
//! max-heap keyed by `priority / max(complexity, 1)`.
//!
//! Ratios are compared exactly by cross-multiplying in `u64`, so `10/5` and
//! `6/3` are equal rather than almost equal. Equal ratios fall back to the
//! lower hole index. That order is reproducible, but callers should not
//! treat it as meaningful.
//!
//! Holes on a strong cycle, and every hole that transitively depends on
//! one, never reach in-degree zero and are left out of the result. No error
//! is raised; compare the result length with the hole count, or use
//! [`unscheduled`].

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use holeplan_core::EnhancedHole;
use petgraph::graph::NodeIndex;
use tracing::{debug, instrument};

use crate::graph::DependencyGraph;

/// Frontier entry. Greater means "schedule sooner".
#[derive(Debug, Clone, Copy)]
struct Ready {
    priority: u32,
    complexity: u32,
    index: usize,
}

impl Ready {
    const fn of(hole: &EnhancedHole, index: usize) -> Self {
        Self {
            priority: hole.priority,
            complexity: hole.complexity,
            index,
        }
    }
}

impl Ord for Ready {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = u64::from(self.priority) * u64::from(other.complexity.max(1));
        let rhs = u64::from(other.priority) * u64::from(self.complexity.max(1));
        lhs.cmp(&rhs).then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for Ready {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Ready {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ready {}

/// Compute the implementation order as hole indices.
///
/// `graph` must have been built from `holes`, so node `i` is `holes[i]`.
#[instrument(skip_all, fields(holes = holes.len()))]
#[must_use]
pub fn schedule_indices(holes: &[EnhancedHole], graph: &DependencyGraph) -> Vec<usize> {
    let n = holes.len().min(graph.node_count());
    let mut in_degree = vec![0_usize; n];
    for (dependent, _) in graph.strong_edges() {
        if let Some(d) = in_degree.get_mut(dependent.index()) {
            *d += 1;
        }
    }

    let mut frontier: BinaryHeap<Ready> = in_degree
        .iter()
        .enumerate()
        .filter(|&(_, &d)| d == 0)
        .map(|(i, _)| Ready::of(&holes[i], i))
        .collect();

    let mut order: Vec<usize> = Vec::with_capacity(n);
    while let Some(next) = frontier.pop() {
        order.push(next.index);
        for dependent in graph.dependents(NodeIndex::new(next.index)) {
            let i = dependent.index();
            let Some(d) = in_degree.get_mut(i) else {
                continue;
            };
            *d -= 1;
            if *d == 0 {
                frontier.push(Ready::of(&holes[i], i));
            }
        }
    }

    debug!(scheduled = order.len(), excluded = n - order.len(), "scheduled holes");
    order
}

/// Compute the implementation order, prerequisites first.
#[must_use]
pub fn schedule(holes: &[EnhancedHole], graph: &DependencyGraph) -> Vec<EnhancedHole> {
    schedule_indices(holes, graph)
        .into_iter()
        .map(|i| holes[i].clone())
        .collect()
}

/// Holes missing from `order`, in input order.
#[must_use]
pub fn unscheduled<'a>(holes: &'a [EnhancedHole], order: &[EnhancedHole]) -> Vec<&'a EnhancedHole> {
    holes
        .iter()
        .filter(|h| !order.iter().any(|o| o.id == h.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{DependencyEdge, DependencyKind};

    fn setup(
        scores: &[(&str, u32, u32)],
        requires: &[(usize, usize)],
    ) -> (Vec<EnhancedHole>, DependencyGraph) {
        let holes: Vec<EnhancedHole> = scores
            .iter()
            .enumerate()
            .map(|(i, &(name, p, c))| EnhancedHole::new(i, name, p, c))
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
        (holes, graph)
    }

    fn names(order: &[EnhancedHole]) -> Vec<&str> {
        order.iter().map(|h| h.hole_type.as_str()).collect()
    }

    #[test]
    fn empty_input() {
        let (holes, graph) = setup(&[], &[]);
        assert!(schedule(&holes, &graph).is_empty());
    }

    #[test]
    fn higher_ratio_goes_first() {
        let (holes, graph) = setup(&[("Ten", 10, 5), ("Six", 6, 3), ("Nine", 9, 3)], &[]);
        assert_eq!(names(&schedule(&holes, &graph)), ["Nine", "Ten", "Six"]);
    }

    #[test]
    fn equal_ratio_keeps_input_order() {
        let (holes, graph) = setup(&[("Six", 6, 3), ("Ten", 10, 5), ("Two", 2, 1)], &[]);
        assert_eq!(names(&schedule(&holes, &graph)), ["Six", "Ten", "Two"]);
    }

    #[test]
    fn zero_complexity_counts_as_one() {
        let (holes, graph) = setup(&[("Four", 4, 2), ("Free", 3, 0)], &[]);
        assert_eq!(names(&schedule(&holes, &graph)), ["Free", "Four"]);
    }

    #[test]
    fn prerequisites_come_first() {
        // A requires B, B requires C; A has the best ratio but must wait.
        let (holes, graph) = setup(&[("A", 10, 1), ("B", 5, 5), ("C", 1, 10)], &[(0, 1), (1, 2)]);
        assert_eq!(names(&schedule(&holes, &graph)), ["C", "B", "A"]);
    }

    #[test]
    fn released_hole_competes_with_frontier() {
        // Base releases Top (ratio 10); Mid (ratio 2) is already waiting.
        let (holes, graph) = setup(
            &[("Base", 9, 1), ("Mid", 4, 2), ("Top", 10, 1)],
            &[(2, 0)],
        );
        assert_eq!(names(&schedule(&holes, &graph)), ["Base", "Top", "Mid"]);
    }

    #[test]
    fn cyclic_and_downstream_holes_are_excluded() {
        // A <-> B cycle, C requires A, D is free.
        let (holes, graph) = setup(
            &[("A", 5, 5), ("B", 5, 5), ("C", 5, 5), ("D", 5, 5)],
            &[(0, 1), (1, 0), (2, 0)],
        );
        let order = schedule(&holes, &graph);
        assert_eq!(names(&order), ["D"]);

        let missing: Vec<&str> = unscheduled(&holes, &order)
            .iter()
            .map(|h| h.hole_type.as_str())
            .collect();
        assert_eq!(missing, ["A", "B", "C"]);
    }

    #[test]
    fn weak_edges_do_not_constrain() {
        let holes = vec![
            EnhancedHole::new(0, "A", 1, 9),
            EnhancedHole::new(1, "B", 9, 1),
        ];
        let edges = vec![DependencyEdge::new("B_1", "A_0", DependencyKind::Related)];
        let graph = DependencyGraph::build(&holes, &edges);
        assert_eq!(names(&schedule(&holes, &graph)), ["B", "A"]);
    }

    #[test]
    fn ready_ordering_is_exact() {
        let a = Ready::of(&EnhancedHole::new(0, "A", 10, 5), 0);
        let b = Ready::of(&EnhancedHole::new(1, "B", 6, 3), 1);
        let c = Ready::of(&EnhancedHole::new(2, "C", 9, 3), 2);
        assert!(c > a);
        assert!(c > b);
        // Equal ratio: lower index is greater.
        assert!(a > b);
    }
}
