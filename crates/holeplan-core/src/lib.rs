#![forbid(unsafe_code)]
//! holeplan-core library.
//!
//! Data model for typed holes and the relationship triples extracted
//! alongside them, the heuristics that score a raw hole into an
//! [`model::EnhancedHole`], and the configuration/input loading shared by
//! the analysis engine and the CLI.
//!
//! # Conventions
//!
//! - **Errors**: `thiserror` enums at the library surface, [`error::ErrorCode`]
//!   for machine-readable codes.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod enhance;
pub mod error;
pub mod input;
pub mod model;

pub use model::{EnhancedHole, HoleConstraint, Relationship, TypedHole};
