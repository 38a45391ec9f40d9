//! End-to-end hole analysis.
//!
//! [`HoleAnalyzer`] runs extraction, cycle detection, scheduling, the
//! dependency tree, the critical path and milestone grouping in one call and
//! returns a [`HoleAnalysis`]. Every structure is rebuilt per call; the
//! analyzer itself only carries configuration.

#![allow(clippy::module_name_repetitions)]

use holeplan_core::config::MilestoneConfig;
use holeplan_core::enhance::enhance_all;
use holeplan_core::model::hole_id;
use holeplan_core::{EnhancedHole, Relationship, TypedHole};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::extract::{DependencyEdge, HoleMatcher, SubstringMatcher, extract_with};
use crate::graph::{DependencyGraph, detect_cycles};
use crate::milestones::{Milestone, group_into_milestones};
use crate::schedule::{schedule, unscheduled};
use crate::tree::{DependencyTree, find_critical_path};

/// Everything computed for one set of holes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoleAnalysis {
    /// Every hole, annotated with its dependencies.
    pub holes: Vec<EnhancedHole>,
    /// Extracted edges, strong and weak.
    pub dependencies: Vec<DependencyEdge>,
    pub tree: DependencyTree,
    /// Holes in implementation order, prerequisites first.
    pub implement_order: Vec<EnhancedHole>,
    /// Heaviest prerequisite chain, top to leaf.
    pub critical_path: Vec<EnhancedHole>,
    /// Sum of complexity over every hole.
    pub total_complexity: u64,
    /// Mean priority over every hole; 0 when there are none.
    pub average_priority: f64,
    /// Strong-edge cycles as id sequences.
    pub circular_deps: Vec<Vec<String>>,
    /// The implementation order split into milestones.
    pub milestones: Vec<Milestone>,
}

impl Default for HoleAnalysis {
    fn default() -> Self {
        Self {
            holes: Vec::new(),
            dependencies: Vec::new(),
            tree: DependencyTree::default(),
            implement_order: Vec::new(),
            critical_path: Vec::new(),
            total_complexity: 0,
            average_priority: 0.0,
            circular_deps: Vec::new(),
            milestones: Vec::new(),
        }
    }
}

impl HoleAnalysis {
    #[must_use]
    pub fn has_cycles(&self) -> bool {
        !self.circular_deps.is_empty()
    }

    /// Holes left out of `implement_order`, in input order.
    #[must_use]
    pub fn unscheduled(&self) -> Vec<&EnhancedHole> {
        unscheduled(&self.holes, &self.implement_order)
    }

    /// Summed complexity along the critical path.
    #[must_use]
    pub fn critical_path_complexity(&self) -> u64 {
        self.critical_path
            .iter()
            .map(|h| u64::from(h.complexity))
            .sum()
    }
}

/// Runs the full analysis pipeline.
#[derive(Debug, Clone, Default)]
pub struct HoleAnalyzer<M = SubstringMatcher> {
    pub config: MilestoneConfig,
    matcher: M,
}

impl HoleAnalyzer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: MilestoneConfig) -> Self {
        Self {
            config,
            matcher: SubstringMatcher,
        }
    }
}

impl<M: HoleMatcher> HoleAnalyzer<M> {
    /// Swap the matcher used to find holes in relationship text.
    #[must_use]
    pub fn with_matcher<N: HoleMatcher>(self, matcher: N) -> HoleAnalyzer<N> {
        HoleAnalyzer {
            config: self.config,
            matcher,
        }
    }

    /// Score raw holes, then analyze them.
    #[must_use]
    pub fn analyze(&self, holes: &[TypedHole], relationships: &[Relationship]) -> HoleAnalysis {
        self.analyze_enhanced(enhance_all(holes, relationships), relationships)
    }

    /// Analyze holes that already carry scores.
    ///
    /// Each hole's `id` and `index` are reassigned from its position so the
    /// graph, tree and edges agree on identity.
    #[instrument(skip_all, fields(holes = holes.len(), relationships = relationships.len()))]
    #[must_use]
    pub fn analyze_enhanced(
        &self,
        mut holes: Vec<EnhancedHole>,
        relationships: &[Relationship],
    ) -> HoleAnalysis {
        for (index, hole) in holes.iter_mut().enumerate() {
            hole.index = index;
            hole.id = hole_id(&hole.hole_type, index);
        }

        let extraction = extract_with(&self.matcher, holes, relationships);
        self.analyze_edges(extraction.holes, extraction.edges)
    }

    /// Analyze holes against an already extracted edge list.
    ///
    /// `holes` must be indexed by position, as [`analyze_enhanced`] leaves
    /// them. Edges naming unknown ids are ignored.
    ///
    /// [`analyze_enhanced`]: Self::analyze_enhanced
    #[must_use]
    pub fn analyze_edges(
        &self,
        holes: Vec<EnhancedHole>,
        edges: Vec<DependencyEdge>,
    ) -> HoleAnalysis {
        let graph = DependencyGraph::build(&holes, &edges);
        let circular_deps = detect_cycles(&graph);
        let implement_order = schedule(&holes, &graph);

        let mut tree = DependencyTree::build(&holes, &graph);
        let path = find_critical_path(&tree, &holes);
        tree.mark_critical_path(&path.holes);
        let critical_path: Vec<EnhancedHole> = path
            .holes
            .iter()
            .filter_map(|&i| holes.get(i).cloned())
            .collect();

        let total_complexity: u64 = holes.iter().map(|h| u64::from(h.complexity)).sum();
        let average_priority = average_priority(&holes);
        let milestones = group_into_milestones(&implement_order, &self.config);

        debug!(
            holes = holes.len(),
            edges = edges.len(),
            scheduled = implement_order.len(),
            cycles = circular_deps.len(),
            critical = path.total_complexity,
            "hole analysis complete"
        );

        HoleAnalysis {
            holes,
            dependencies: edges,
            tree,
            implement_order,
            critical_path,
            total_complexity,
            average_priority,
            circular_deps,
            milestones,
        }
    }

    /// Group an arbitrary order with this analyzer's milestone bounds.
    #[must_use]
    pub fn milestones(&self, order: &[EnhancedHole]) -> Vec<Milestone> {
        group_into_milestones(order, &self.config)
    }
}

/// Analyze typed holes with the default configuration.
#[must_use]
pub fn analyze_typed_holes(holes: &[TypedHole], relationships: &[Relationship]) -> HoleAnalysis {
    HoleAnalyzer::new().analyze(holes, relationships)
}

#[allow(clippy::cast_precision_loss)]
fn average_priority(holes: &[EnhancedHole]) -> f64 {
    if holes.is_empty() {
        return 0.0;
    }
    let sum: u64 = holes.iter().map(|h| u64::from(h.priority)).sum();
    sum as f64 / holes.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::WholeWordMatcher;

    fn scored(name: &str, priority: u32, complexity: u32) -> TypedHole {
        TypedHole::new(name).with_scores(priority, complexity)
    }

    fn names(holes: &[EnhancedHole]) -> Vec<&str> {
        holes.iter().map(|h| h.hole_type.as_str()).collect()
    }

    #[test]
    fn empty_input_yields_empty_analysis() {
        let a = analyze_typed_holes(&[], &[]);
        assert!(a.holes.is_empty());
        assert!(a.dependencies.is_empty());
        assert!(a.implement_order.is_empty());
        assert!(a.critical_path.is_empty());
        assert!(a.circular_deps.is_empty());
        assert!(a.milestones.is_empty());
        assert_eq!(a.total_complexity, 0);
        assert!(a.average_priority.abs() < f64::EPSILON);
        assert_eq!(a.tree.nodes.len(), 1);
    }

    #[test]
    fn config_database_auth() {
        let holes = [
            scored("Config", 8, 3),
            scored("Database", 9, 7),
            scored("Auth", 10, 8),
        ];
        let rels = [
            Relationship::new("Database", "requires", "Config"),
            Relationship::new("Auth", "requires", "Database"),
        ];
        let a = analyze_typed_holes(&holes, &rels);

        assert_eq!(names(&a.implement_order), ["Config", "Database", "Auth"]);
        assert_eq!(names(&a.critical_path), ["Config", "Database", "Auth"]);
        assert_eq!(a.critical_path_complexity(), 18);
        assert!(!a.has_cycles());
        assert_eq!(a.total_complexity, 18);
        assert!((a.average_priority - 9.0).abs() < f64::EPSILON);
        assert_eq!(a.tree.critical_ids(), ["Config_0", "Database_1", "Auth_2"]);
        assert_eq!(a.holes[2].dependencies, ["Database_1"]);
    }

    #[test]
    fn cycle_is_reported_and_unscheduled() {
        let holes = [scored("Alpha", 5, 5), scored("Beta", 5, 5), scored("Gamma", 5, 5)];
        let rels = [
            Relationship::new("Alpha", "requires", "Beta"),
            Relationship::new("Beta", "requires", "Gamma"),
            Relationship::new("Gamma", "requires", "Alpha"),
        ];
        let a = analyze_typed_holes(&holes, &rels);

        assert_eq!(a.circular_deps, vec![vec!["Alpha_0", "Beta_1", "Gamma_2"]]);
        assert!(a.implement_order.is_empty());
        assert_eq!(a.unscheduled().len(), 3);
        assert!(a.critical_path.is_empty());
        assert_eq!(a.total_complexity, 15);
    }

    #[test]
    fn analyzer_uses_its_milestone_bounds() {
        let holes: Vec<TypedHole> = (0..5).map(|i| scored(&format!("H{i}"), 5, 1)).collect();
        let analyzer = HoleAnalyzer::with_config(MilestoneConfig {
            complexity_threshold: 25,
            max_holes: 2,
        });
        let a = analyzer.analyze(&holes, &[]);
        let sizes: Vec<usize> = a.milestones.iter().map(Milestone::len).collect();
        assert_eq!(sizes, [2, 2, 1]);
    }

    #[test]
    fn whole_word_matcher_drops_glued_names() {
        let holes = [scored("Auth", 5, 5), scored("Session", 5, 5), scored("OAuthToken", 5, 5)];
        let rels = [Relationship::new("OAuthToken", "requires", "Session")];

        let loose = HoleAnalyzer::new().analyze(&holes, &rels);
        let strict = HoleAnalyzer::new()
            .with_matcher(WholeWordMatcher)
            .analyze(&holes, &rels);

        assert_eq!(loose.holes[0].dependencies, ["Session_1"]);
        assert!(strict.holes[0].dependencies.is_empty());
        assert_eq!(strict.holes[2].dependencies, ["Session_1"]);
        assert_eq!(strict.dependencies.len(), 2);
    }

    #[test]
    fn analyze_enhanced_reassigns_ids() {
        let holes = vec![EnhancedHole::new(7, "A", 5, 5), EnhancedHole::new(7, "B", 5, 5)];
        let a = HoleAnalyzer::new().analyze_enhanced(holes, &[]);
        let ids: Vec<&str> = a.holes.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, ["A_0", "B_1"]);
    }

    #[test]
    fn analyzer_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HoleAnalyzer>();
        assert_send_sync::<HoleAnalyzer<WholeWordMatcher>>();
    }

    #[test]
    fn analysis_serializes() {
        let a = analyze_typed_holes(&[scored("Cache", 6, 2)], &[]);
        let json = serde_json::to_value(&a).expect("serialize");
        assert_eq!(json["implement_order"][0]["type"], "Cache");
        assert_eq!(json["tree"]["nodes"][0]["id"], "root");
    }
}
