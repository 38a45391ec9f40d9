#![forbid(unsafe_code)]
//! holeplan-triage library.
//!
//! Turns a list of typed holes and the relationship triples found next to
//! them into a dependency-aware implementation plan.
//!
//! ## Pipeline
//!
//! ```text
//! holes + triples
//!        ↓  extract::extract_dependencies()
//! Extraction (annotated holes + DependencyEdge list)
//!        ↓  graph::DependencyGraph::build()
//! DependencyGraph (petgraph DiGraph, node i == hole i)
//!        ├─ graph::detect_cycles()         → circular_deps
//!        ├─ schedule::schedule()           → implement_order
//!        └─ tree::DependencyTree::build()
//!               ↓  tree::find_critical_path()
//!           critical_path
//!        ↓  milestones::group_into_milestones()
//! Milestones
//! ```
//!
//! [`analyze::HoleAnalyzer`] runs the whole pipeline and returns a single
//! [`analyze::HoleAnalysis`]; [`roadmap::render_roadmap`] formats it.
//!
//! # Conventions
//!
//! - **Errors**: analysis is infallible; cycles are reported as data.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod analyze;
pub mod extract;
pub mod graph;
pub mod milestones;
pub mod roadmap;
pub mod schedule;
pub mod tree;

pub use analyze::{HoleAnalysis, HoleAnalyzer, analyze_typed_holes};
pub use extract::{DependencyEdge, DependencyKind};
pub use milestones::Milestone;
