//! Scoring heuristics that turn a raw [`TypedHole`] into an [`EnhancedHole`].
//!
//! # Priority
//!
//! | Component                                   | Points |
//! |---------------------------------------------|--------|
//! | base                                        | 5      |
//! | triples mentioning the hole type (max 3)    | +1 each|
//! | hole carries a constraint                   | +2     |
//!
//! Capped at [`MAX_SCORE`].
//!
//! # Complexity
//!
//! Base 3, plus one per parsed constraint, plus a surcharge for the harder
//! constraint families (`thread`/`concurrent`/`atomic` +2,
//! `pure`/`idempotent`/`async` +1). Capped at [`MAX_SCORE`].
//!
//! Upstream-supplied scores on the [`TypedHole`] always win over derived ones.

use std::cmp::Reverse;

use tracing::{debug, instrument};

use crate::model::{ConstraintKind, EnhancedHole, HoleConstraint, Relationship, TypedHole, hole_id};

/// Upper bound for derived priority and complexity scores.
pub const MAX_SCORE: u32 = 10;

const BASE_PRIORITY: u32 = 5;
const MAX_MENTION_BONUS: u32 = 3;
const CONSTRAINT_PRIORITY_BONUS: u32 = 2;
const BASE_COMPLEXITY: u32 = 3;

/// Constraint keywords in match order. `async` precedes `sync` so that
/// "async" text is not classified as synchronous.
const CONSTRAINT_PATTERNS: &[(ConstraintKind, &str)] = &[
    (ConstraintKind::Implements, "Interface implementation required"),
    (ConstraintKind::Idempotent, "Idempotent operation required"),
    (ConstraintKind::Immutable, "Immutability required"),
    (ConstraintKind::Concurrent, "Concurrent execution support required"),
    (ConstraintKind::Async, "Asynchronous execution required"),
    (ConstraintKind::Extends, "Type extension required"),
    (ConstraintKind::Requires, "Dependency required"),
    (ConstraintKind::Thread, "Thread-safety requirement"),
    (ConstraintKind::Sync, "Synchronous execution required"),
    (ConstraintKind::Mutable, "Mutability allowed"),
    (ConstraintKind::Pure, "Pure function required (no side effects)"),
    (ConstraintKind::Atomic, "Atomic operation required"),
];

const TYPE_HINTS: &[(&str, &str)] = &[
    ("Function", "Implement as a pure function with clear input/output"),
    ("Method", "Add method to the owning type"),
    ("Interface", "Define the interface contract with its key operations"),
    ("Struct", "Define the record with its necessary fields"),
    ("Type", "Create a type alias or new type definition"),
    ("Handler", "Implement the handler with explicit error handling"),
    ("Service", "Create the service with injected dependencies"),
    ("Manager", "Implement the manager with explicit lifecycle operations"),
    ("Factory", "Create a factory function for object construction"),
    ("Builder", "Implement a builder for complex construction"),
];

/// Parse a hole's constraint text into structured descriptors.
///
/// An empty constraint yields no descriptors; anything else yields exactly
/// one, classified by the first keyword that appears in the text.
#[must_use]
pub fn parse_constraints(hole: &TypedHole) -> Vec<HoleConstraint> {
    let value = hole.constraint.trim();
    if value.is_empty() {
        return Vec::new();
    }

    let lowered = value.to_lowercase();
    let constraint = CONSTRAINT_PATTERNS
        .iter()
        .find(|(kind, _)| kind.keyword().is_some_and(|kw| lowered.contains(kw)))
        .map_or_else(
            || HoleConstraint {
                kind: ConstraintKind::Generic,
                value: value.to_string(),
                description: value.to_string(),
            },
            |(kind, description)| HoleConstraint {
                kind: *kind,
                value: value.to_string(),
                description: (*description).to_string(),
            },
        );

    vec![constraint]
}

/// Estimate implementation priority from relationship mentions.
#[must_use]
pub fn derive_priority(hole: &TypedHole, relationships: &[Relationship]) -> u32 {
    let mentions = relationships
        .iter()
        .filter(|rel| {
            rel.subject.contains(&hole.hole_type)
                || rel.predicate.contains(&hole.hole_type)
                || rel.object.contains(&hole.hole_type)
        })
        .count();

    let bonus = u32::try_from(mentions)
        .unwrap_or(u32::MAX)
        .min(MAX_MENTION_BONUS);
    let mut priority = BASE_PRIORITY + bonus;
    if !hole.constraint.is_empty() {
        priority += CONSTRAINT_PRIORITY_BONUS;
    }
    priority.min(MAX_SCORE)
}

/// Estimate implementation complexity from parsed constraints.
#[must_use]
pub fn derive_complexity(constraints: &[HoleConstraint]) -> u32 {
    let surcharge: u32 = constraints
        .iter()
        .map(|c| match c.kind {
            ConstraintKind::Thread | ConstraintKind::Concurrent | ConstraintKind::Atomic => 2,
            ConstraintKind::Pure | ConstraintKind::Idempotent | ConstraintKind::Async => 1,
            _ => 0,
        })
        .sum();

    let count = u32::try_from(constraints.len()).unwrap_or(u32::MAX);
    BASE_COMPLEXITY
        .saturating_add(count)
        .saturating_add(surcharge)
        .min(MAX_SCORE)
}

/// Produce implementation guidance from the hole type and its constraints.
#[must_use]
pub fn suggest_implementation(hole: &TypedHole, constraints: &[HoleConstraint]) -> String {
    let mut suggestions: Vec<&str> = TYPE_HINTS
        .iter()
        .filter(|(name, _)| *name == hole.hole_type)
        .map(|(_, hint)| *hint)
        .collect();

    for constraint in constraints {
        let hint = match constraint.kind {
            ConstraintKind::Thread | ConstraintKind::Concurrent => {
                Some("Guard shared state with a mutex or read-write lock")
            }
            ConstraintKind::Async => Some("Run the work on an async task and await completion"),
            ConstraintKind::Pure => Some("Avoid side effects and work on immutable data"),
            ConstraintKind::Atomic => Some("Use atomic primitives for the shared counters"),
            _ => None,
        };
        suggestions.extend(hint);
    }

    if suggestions.is_empty() {
        return format!(
            "Implement {} with appropriate error handling and tests",
            hole.hole_type
        );
    }
    suggestions.join("; ")
}

/// Enrich the hole at `index` with scores, constraints and a suggestion.
#[must_use]
pub fn enhance(hole: &TypedHole, index: usize, relationships: &[Relationship]) -> EnhancedHole {
    let constraints = parse_constraints(hole);
    let priority = hole
        .priority
        .unwrap_or_else(|| derive_priority(hole, relationships));
    let complexity = hole
        .complexity
        .unwrap_or_else(|| derive_complexity(&constraints));
    let suggested_impl = suggest_implementation(hole, &constraints);

    EnhancedHole {
        id: hole_id(&hole.hole_type, index),
        index,
        hole_type: hole.hole_type.clone(),
        constraint: hole.constraint.clone(),
        constraints,
        priority,
        complexity,
        suggested_impl,
        dependencies: Vec::new(),
        related_holes: Vec::new(),
    }
}

/// Enhance every hole, preserving input order.
#[instrument(skip_all, fields(holes = holes.len(), relationships = relationships.len()))]
#[must_use]
pub fn enhance_all(holes: &[TypedHole], relationships: &[Relationship]) -> Vec<EnhancedHole> {
    let enhanced: Vec<EnhancedHole> = holes
        .iter()
        .enumerate()
        .map(|(index, hole)| enhance(hole, index, relationships))
        .collect();
    debug!(count = enhanced.len(), "enhanced typed holes");
    enhanced
}

// ---------------------------------------------------------------------------
// HolePrioritizer
// ---------------------------------------------------------------------------

/// Dependency-agnostic orderings over a set of enhanced holes.
///
/// All orderings are stable: holes with equal keys keep their input order.
#[derive(Debug, Clone, Default)]
pub struct HolePrioritizer {
    pub holes: Vec<EnhancedHole>,
}

impl HolePrioritizer {
    #[must_use]
    pub fn new(holes: &[TypedHole], relationships: &[Relationship]) -> Self {
        Self {
            holes: enhance_all(holes, relationships),
        }
    }

    /// Highest priority first.
    #[must_use]
    pub fn by_priority(&self) -> Vec<EnhancedHole> {
        let mut sorted = self.holes.clone();
        sorted.sort_by_key(|h| Reverse(h.priority));
        sorted
    }

    /// Lowest complexity first.
    #[must_use]
    pub fn by_complexity(&self) -> Vec<EnhancedHole> {
        let mut sorted = self.holes.clone();
        sorted.sort_by_key(|h| h.complexity);
        sorted
    }

    /// Highest priority/complexity ratio first, ignoring dependencies.
    #[must_use]
    pub fn recommended_order(&self) -> Vec<EnhancedHole> {
        let mut sorted = self.holes.clone();
        sorted.sort_by(|a, b| b.ratio().total_cmp(&a.ratio()));
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(s: &str, p: &str, o: &str) -> Relationship {
        Relationship::new(s, p, o)
    }

    #[test]
    fn empty_constraint_parses_to_nothing() {
        assert!(parse_constraints(&TypedHole::new("Cache")).is_empty());
        assert!(parse_constraints(&TypedHole::new("Cache").with_constraint("   ")).is_empty());
    }

    #[test]
    fn async_is_not_mistaken_for_sync() {
        let hole = TypedHole::new("Fetcher").with_constraint("must be Async");
        let parsed = parse_constraints(&hole);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].kind, ConstraintKind::Async);
        assert_eq!(parsed[0].value, "must be Async");
    }

    #[test]
    fn unknown_constraint_is_generic() {
        let hole = TypedHole::new("Store").with_constraint("fits in 4KB");
        let parsed = parse_constraints(&hole);
        assert_eq!(parsed[0].kind, ConstraintKind::Generic);
        assert_eq!(parsed[0].description, "fits in 4KB");
    }

    #[test]
    fn priority_counts_mentions_up_to_three() {
        let hole = TypedHole::new("Cache");
        let rels = vec![
            rel("Cache", "uses", "Store"),
            rel("Api", "reads", "Cache"),
            rel("x", "Cache", "y"),
            rel("Cache", "feeds", "Cache"),
            rel("unrelated", "is", "here"),
        ];
        assert_eq!(derive_priority(&hole, &rels), 8);
        assert_eq!(derive_priority(&hole, &[]), 5);
    }

    #[test]
    fn priority_is_capped() {
        let hole = TypedHole::new("Cache").with_constraint("thread-safe");
        let rels = vec![rel("Cache", "a", "b"); 10];
        assert_eq!(derive_priority(&hole, &rels), MAX_SCORE);
    }

    #[test]
    fn complexity_charges_concurrency_most() {
        let threaded = parse_constraints(&TypedHole::new("Pool").with_constraint("thread-safe"));
        assert_eq!(derive_complexity(&threaded), 6);

        let pure = parse_constraints(&TypedHole::new("Fn").with_constraint("pure"));
        assert_eq!(derive_complexity(&pure), 5);

        assert_eq!(derive_complexity(&[]), 3);
    }

    #[test]
    fn supplied_scores_override_derived_ones() {
        let hole = TypedHole::new("Auth").with_scores(10, 8);
        let enhanced = enhance(&hole, 2, &[]);
        assert_eq!(enhanced.id, "Auth_2");
        assert_eq!(enhanced.priority, 10);
        assert_eq!(enhanced.complexity, 8);
    }

    #[test]
    fn suggestion_combines_type_and_constraint_hints() {
        let hole = TypedHole::new("Service").with_constraint("concurrent access");
        let constraints = parse_constraints(&hole);
        let text = suggest_implementation(&hole, &constraints);
        assert!(text.starts_with("Create the service"));
        assert!(text.contains("; Guard shared state"));

        let plain = TypedHole::new("Widget");
        assert_eq!(
            suggest_implementation(&plain, &[]),
            "Implement Widget with appropriate error handling and tests"
        );
    }

    #[test]
    fn prioritizer_orderings_are_stable() {
        let holes = vec![
            TypedHole::new("A").with_scores(5, 5),
            TypedHole::new("B").with_scores(9, 3),
            TypedHole::new("C").with_scores(5, 1),
        ];
        let p = HolePrioritizer::new(&holes, &[]);

        let by_priority: Vec<_> = p.by_priority().into_iter().map(|h| h.hole_type).collect();
        assert_eq!(by_priority, ["B", "A", "C"]);

        let by_complexity: Vec<_> = p.by_complexity().into_iter().map(|h| h.hole_type).collect();
        assert_eq!(by_complexity, ["C", "B", "A"]);

        let recommended: Vec<_> = p
            .recommended_order()
            .into_iter()
            .map(|h| h.hole_type)
            .collect();
        assert_eq!(recommended, ["C", "B", "A"]);
    }
}
