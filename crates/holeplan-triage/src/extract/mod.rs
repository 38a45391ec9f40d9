//! Heuristic dependency extraction from relationship triples.
//!
//! # Rules
//!
//! For every triple and every ordered pair of distinct holes `(h_i, h_j)`
//! where the subject mentions `h_i` and the object mentions `h_j`:
//!
//! | Predicate contains (case-insensitive) | Edge `h_i → h_j`             |
//! |---------------------------------------|------------------------------|
//! | `require`                             | `requires`, strength 8       |
//! | `implement`                           | `implements`, strength 7     |
//! | `extend` (and not `implement`)        | `extends`, strength 7        |
//!
//! Independently of the predicate, a pair mentioned in either direction
//! gets a weak `related` edge (strength 3) unless some edge already
//! connects exactly `h_i → h_j`.
//!
//! Strong edges are emitted for every matching triple, so the same pair
//! can appear more than once in the edge list. Consumers that need a
//! simple graph dedupe on construction ([`crate::graph::DependencyGraph`]).
//!
//! Cost is `O(R · H²)` for `R` triples and `H` holes.

pub mod matcher;

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use holeplan_core::{EnhancedHole, Relationship};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

pub use matcher::{HoleMatcher, SubstringMatcher, WholeWordMatcher};

// ---------------------------------------------------------------------------
// Edge types
// ---------------------------------------------------------------------------

/// Classification of an inferred dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    Requires,
    Extends,
    Implements,
    Related,
}

impl DependencyKind {
    /// Fixed strength for the kind, on a 1–10 scale.
    #[must_use]
    pub const fn strength(self) -> u8 {
        match self {
            Self::Requires => 8,
            Self::Extends | Self::Implements => 7,
            Self::Related => 3,
        }
    }

    /// Strong edges drive ordering, cycle detection and the tree.
    #[must_use]
    pub const fn is_strong(self) -> bool {
        !matches!(self, Self::Related)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Requires => "requires",
            Self::Extends => "extends",
            Self::Implements => "implements",
            Self::Related => "related",
        }
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed dependency between two holes.
///
/// `from → to` reads "`from` depends on `to`": `to` is the prerequisite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub from: String,
    pub to: String,
    pub relationship: DependencyKind,
    pub strength: u8,
}

impl DependencyEdge {
    #[must_use]
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        relationship: DependencyKind,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            relationship,
            strength: relationship.strength(),
        }
    }

    #[must_use]
    pub const fn is_strong(&self) -> bool {
        self.relationship.is_strong()
    }
}

/// Holes annotated with their dependencies, plus the raw edge list.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub holes: Vec<EnhancedHole>,
    pub edges: Vec<DependencyEdge>,
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Extract dependencies using the default [`SubstringMatcher`].
#[must_use]
pub fn extract_dependencies(
    holes: Vec<EnhancedHole>,
    relationships: &[Relationship],
) -> Extraction {
    extract_with(&SubstringMatcher, holes, relationships)
}

/// Extract dependencies with an explicit matcher.
#[instrument(skip_all, fields(holes = holes.len(), relationships = relationships.len()))]
#[must_use]
pub fn extract_with<M: HoleMatcher>(
    matcher: &M,
    mut holes: Vec<EnhancedHole>,
    relationships: &[Relationship],
) -> Extraction {
    let mut edges: Vec<DependencyEdge> = Vec::new();
    // Ordered pairs (i, j) already joined by any edge.
    let mut connected: BTreeSet<(usize, usize)> = BTreeSet::new();

    for rel in relationships {
        let in_subject: Vec<bool> = holes
            .iter()
            .map(|h| matcher.mentions(&rel.subject, h))
            .collect();
        let in_object: Vec<bool> = holes
            .iter()
            .map(|h| matcher.mentions(&rel.object, h))
            .collect();

        for kind in strong_kinds(&rel.predicate) {
            for (i, j) in distinct_pairs(holes.len()) {
                if in_subject[i] && in_object[j] {
                    edges.push(DependencyEdge::new(&holes[i].id, &holes[j].id, kind));
                    connected.insert((i, j));
                }
            }
        }

        for (i, j) in distinct_pairs(holes.len()) {
            let mentioned = (in_subject[i] && in_object[j]) || (in_subject[j] && in_object[i]);
            if mentioned && connected.insert((i, j)) {
                edges.push(DependencyEdge::new(
                    &holes[i].id,
                    &holes[j].id,
                    DependencyKind::Related,
                ));
            }
        }
    }

    annotate_holes(&mut holes, &edges);

    debug!(
        edges = edges.len(),
        strong = edges.iter().filter(|e| e.is_strong()).count(),
        "extracted dependency edges"
    );

    Extraction { holes, edges }
}

/// Fill each hole's `dependencies` and `related_holes` from `edges`.
///
/// Both lists are rebuilt from scratch, keep first-seen order and contain
/// no duplicates. Edges naming unknown holes are ignored.
pub fn annotate_holes(holes: &mut [EnhancedHole], edges: &[DependencyEdge]) {
    for hole in holes.iter_mut() {
        hole.dependencies.clear();
        hole.related_holes.clear();
    }

    let positions: HashMap<String, usize> = holes
        .iter()
        .enumerate()
        .map(|(pos, h)| (h.id.clone(), pos))
        .collect();

    for edge in edges {
        let Some(&from) = positions.get(&edge.from) else {
            continue;
        };
        if !positions.contains_key(&edge.to) {
            continue;
        }
        let hole = &mut holes[from];
        if edge.is_strong() {
            push_unique(&mut hole.dependencies, &edge.to);
        }
        push_unique(&mut hole.related_holes, &edge.to);
    }
}

/// Strong kinds triggered by a predicate, in emission order.
fn strong_kinds(predicate: &str) -> Vec<DependencyKind> {
    let lowered = predicate.to_lowercase();
    let mut kinds = Vec::with_capacity(2);
    if lowered.contains("require") {
        kinds.push(DependencyKind::Requires);
    }
    if lowered.contains("implement") {
        kinds.push(DependencyKind::Implements);
    } else if lowered.contains("extend") {
        kinds.push(DependencyKind::Extends);
    }
    kinds
}

fn distinct_pairs(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n).flat_map(move |i| (0..n).filter(move |&j| j != i).map(move |j| (i, j)))
}

fn push_unique(list: &mut Vec<String>, id: &str) {
    if !list.iter().any(|existing| existing == id) {
        list.push(id.to_string());
    }
}
