//! Typed holes, relationship triples and the enhanced hole record.
//!
//! A *typed hole* is an unresolved design placeholder (`??Handler`,
//! `??Cache`) found in a document. The upstream extractor hands us the raw
//! [`TypedHole`] list plus the subject–predicate–object [`Relationship`]
//! triples it found next to them. Everything downstream works on
//! [`EnhancedHole`], which pins a stable identifier to each hole and carries
//! the scores and dependency lists the analysis fills in.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A raw typed hole as produced by the upstream extractor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TypedHole {
    /// Hole type, which doubles as its name. Not unique across a document.
    #[serde(rename = "type")]
    pub hole_type: String,
    /// Free-text constraint attached to the hole (may be empty).
    #[serde(default)]
    pub constraint: String,
    /// Upstream-supplied priority. Derived when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    /// Upstream-supplied complexity. Derived when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<u32>,
}

impl TypedHole {
    /// Create a hole with no constraint and no supplied scores.
    #[must_use]
    pub fn new(hole_type: impl Into<String>) -> Self {
        Self {
            hole_type: hole_type.into(),
            ..Self::default()
        }
    }

    /// Attach a constraint.
    #[must_use]
    pub fn with_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.constraint = constraint.into();
        self
    }

    /// Pin priority and complexity instead of deriving them.
    #[must_use]
    pub const fn with_scores(mut self, priority: u32, complexity: u32) -> Self {
        self.priority = Some(priority);
        self.complexity = Some(complexity);
        self
    }
}

/// A subject–predicate–object triple extracted from the same document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Relationship {
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

impl Relationship {
    #[must_use]
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}

/// Category of a parsed hole constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstraintKind {
    Implements,
    Idempotent,
    Immutable,
    Concurrent,
    Async,
    Extends,
    Requires,
    Thread,
    Sync,
    Mutable,
    Pure,
    Atomic,
    Generic,
}

impl ConstraintKind {
    /// Keyword recognised in constraint text, or `None` for [`Self::Generic`].
    #[must_use]
    pub const fn keyword(self) -> Option<&'static str> {
        match self {
            Self::Implements => Some("implements"),
            Self::Idempotent => Some("idempotent"),
            Self::Immutable => Some("immutable"),
            Self::Concurrent => Some("concurrent"),
            Self::Async => Some("async"),
            Self::Extends => Some("extends"),
            Self::Requires => Some("requires"),
            Self::Thread => Some("thread"),
            Self::Sync => Some("sync"),
            Self::Mutable => Some("mutable"),
            Self::Pure => Some("pure"),
            Self::Atomic => Some("atomic"),
            Self::Generic => None,
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword().unwrap_or("generic"))
    }
}

/// A structured view of a hole's constraint text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleConstraint {
    pub kind: ConstraintKind,
    /// The trimmed constraint text.
    pub value: String,
    /// Human-readable description of what the constraint demands.
    pub description: String,
}

/// A typed hole after scoring, carrying its stable identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhancedHole {
    /// Stable identifier, `"<type>_<index>"`.
    pub id: String,
    /// Position of the hole in the input list.
    pub index: usize,
    #[serde(rename = "type")]
    pub hole_type: String,
    pub constraint: String,
    pub constraints: Vec<HoleConstraint>,
    /// Implementation priority, nominally 0–10.
    pub priority: u32,
    /// Estimated complexity, nominally 0–10.
    pub complexity: u32,
    pub suggested_impl: String,
    /// Ids of holes this one depends on through strong edges.
    pub dependencies: Vec<String>,
    /// Ids of holes this one points at through any edge.
    pub related_holes: Vec<String>,
}

impl EnhancedHole {
    /// Build a bare enhanced hole with explicit scores.
    ///
    /// The id follows the `"<type>_<index>"` scheme used for dependency
    /// edges, so holes sharing a type stay distinguishable.
    #[must_use]
    pub fn new(index: usize, hole_type: impl Into<String>, priority: u32, complexity: u32) -> Self {
        let hole_type = hole_type.into();
        Self {
            id: hole_id(&hole_type, index),
            index,
            hole_type,
            constraint: String::new(),
            constraints: Vec::new(),
            priority,
            complexity,
            suggested_impl: String::new(),
            dependencies: Vec::new(),
            related_holes: Vec::new(),
        }
    }

    /// Priority divided by complexity (complexity floored at 1).
    #[must_use]
    pub fn ratio(&self) -> f64 {
        f64::from(self.priority) / f64::from(self.complexity.max(1))
    }
}

/// Format the stable identifier for the hole at `index`.
#[must_use]
pub fn hole_id(hole_type: &str, index: usize) -> String {
    format!("{hole_type}_{index}")
}
