//! Dependency graph over typed holes.
//!
//! # Overview
//!
//! [`DependencyGraph`] is a petgraph `DiGraph` whose node `i` is hole `i`.
//! Every downstream stage (cycles, scheduling, the tree) reads it; only
//! strong edges take part in ordering.
//!
//! ## Typical Usage
//!
//! ```rust,ignore
//! use holeplan_triage::extract::extract_dependencies;
//! use holeplan_triage::graph::{DependencyGraph, detect_cycles};
//!
//! let ex = extract_dependencies(holes, &relationships);
//! let graph = DependencyGraph::build(&ex.holes, &ex.edges);
//! for cycle in detect_cycles(&graph) {
//!     println!("cycle: {}", cycle.join(" -> "));
//! }
//! ```

pub mod build;
pub mod cycles;

pub use build::DependencyGraph;
pub use cycles::{detect_cycles, extract_cycle};
